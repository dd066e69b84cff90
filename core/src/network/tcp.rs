//! TCP service probing: connect scans over the candidate port list and
//! a single banner grab against the first open port.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use lansight_common::scanning::{CANDIDATE_PORTS, ServiceProber};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
const BANNER_TIMEOUT: Duration = Duration::from_secs(2);
const BANNER_BUFFER: usize = 1024;

pub struct TcpProber;

#[async_trait]
impl ServiceProber for TcpProber {
    async fn probe_ports(&self, addr: Ipv4Addr) -> Vec<u16> {
        probe_ports(addr, &CANDIDATE_PORTS).await
    }

    async fn grab_banner(&self, addr: Ipv4Addr, port: u16) -> Option<String> {
        grab_banner(addr, port).await
    }
}

/// Probes `ports` concurrently, one connect attempt each. The result
/// preserves the order of `ports`, not completion order, and a timeout
/// or refusal is conclusive: no retries.
pub async fn probe_ports(addr: Ipv4Addr, ports: &[u16]) -> Vec<u16> {
    let attempts = ports.iter().map(|&port| async move {
        let target = SocketAddr::new(IpAddr::V4(addr), port);
        let open = matches!(
            timeout(CONNECT_TIMEOUT, TcpStream::connect(target)).await,
            Ok(Ok(_))
        );
        (port, open)
    });

    join_all(attempts)
        .await
        .into_iter()
        .filter_map(|(port, open)| open.then_some(port))
        .collect()
}

/// Connects to the given port, sends the port-appropriate probe and
/// returns the first non-empty line of whatever comes back. Silence,
/// timeouts and connection errors all yield `None`; the caller
/// substitutes a synthesized banner.
pub async fn grab_banner(addr: Ipv4Addr, port: u16) -> Option<String> {
    let target = SocketAddr::new(IpAddr::V4(addr), port);
    let mut stream = timeout(BANNER_TIMEOUT, TcpStream::connect(target))
        .await
        .ok()?
        .ok()?;

    if let Some(payload) = probe_payload(port) {
        timeout(BANNER_TIMEOUT, stream.write_all(payload))
            .await
            .ok()?
            .ok()?;
    }

    let mut buffer = vec![0u8; BANNER_BUFFER];
    let read = timeout(BANNER_TIMEOUT, stream.read(&mut buffer))
        .await
        .ok()?
        .ok()?;
    trace!(%addr, port, bytes = read, "banner bytes received");
    first_line(&buffer[..read])
}

/// Port-specific probe payload. SSH servers announce themselves, so
/// port 22 gets nothing.
pub fn probe_payload(port: u16) -> Option<&'static [u8]> {
    match port {
        80 | 8080 => Some(b"HEAD / HTTP/1.0\r\n\r\n"),
        554 => Some(b"OPTIONS * RTSP/1.0\r\n\r\n"),
        22 => None,
        _ => Some(b"\r\n"),
    }
}

/// Everything up to the first line terminator, trimmed. Whitespace-only
/// responses count as no banner at all.
pub fn first_line(bytes: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(bytes);
    let line = text.split('\n').next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
