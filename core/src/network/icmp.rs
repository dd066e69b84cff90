//! ICMP echo reachability sweep over a /24 network.
//!
//! One raw transport channel serves the whole sweep: a listener thread
//! funnels echo replies into an async queue while the sweep sends one
//! echo request per candidate address and matches replies back to their
//! send timestamps. Requires raw-socket privilege; the channel failing
//! to open is the distinguished "probing unavailable" signal, not an
//! empty result.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use lansight_common::error::SweepError;
use lansight_common::model::Latency;
use lansight_common::network::subnet::Subnet24;
use lansight_common::scanning::{Pong, Sweeper};
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{self, IcmpPacket, IcmpTypes};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{self, TransportChannelType, TransportProtocol};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, warn};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

/// 8 byte ICMP header plus 8 bytes of payload.
const ECHO_REQUEST_LEN: usize = 16;

/// Per-host reply deadline, counted from the last request sent.
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Listener poll interval; bounds how long the thread outlives a sweep.
const READ_POLL: Duration = Duration::from_millis(100);

pub struct IcmpSweeper;

#[async_trait]
impl Sweeper for IcmpSweeper {
    async fn sweep(&self, subnet: Subnet24) -> Result<Vec<Pong>, SweepError> {
        let (mut tx, mut rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE)?;
        let ident: u16 = rand::random();

        // The stop flag ends the listener (and releases the socket)
        // within one poll interval of the sweep finishing.
        let stop = Arc::new(AtomicBool::new(false));
        let listener_stop = Arc::clone(&stop);
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<(IpAddr, Instant)>();
        std::thread::spawn(move || {
            let mut iterator = transport::icmp_packet_iter(&mut rx);
            while !listener_stop.load(Ordering::Relaxed) {
                let Ok(Some((packet, source))) = iterator.next_with_timeout(READ_POLL) else {
                    continue;
                };
                if packet.get_icmp_type() != IcmpTypes::EchoReply {
                    continue;
                }
                let Some(reply) = EchoReplyPacket::new(packet.packet()) else {
                    continue;
                };
                if reply.get_identifier() != ident {
                    continue;
                }
                if reply_tx.send((source, Instant::now())).is_err() {
                    break;
                }
            }
        });

        debug!(%subnet, "sweeping 254 addresses");
        let mut pending: HashMap<Ipv4Addr, Instant> = HashMap::new();
        for addr in subnet.hosts() {
            let sequence = u16::from(addr.octets()[3]);
            let bytes = match echo_request(ident, sequence) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("failed to build echo request: {e}");
                    continue;
                }
            };
            let Some(packet) = IcmpPacket::new(&bytes) else {
                continue;
            };
            match tx.send_to(packet, IpAddr::V4(addr)) {
                Ok(_) => {
                    pending.insert(addr, Instant::now());
                }
                Err(e) => debug!(%addr, "echo request not sent: {e}"),
            }
        }

        let deadline = Instant::now() + PROBE_TIMEOUT;
        let mut pongs: Vec<Pong> = Vec::new();
        while !pending.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match timeout(deadline - now, reply_rx.recv()).await {
                Ok(Some((IpAddr::V4(source), seen_at))) => {
                    if let Some(sent_at) = pending.remove(&source) {
                        pongs.push(Pong {
                            addr: source,
                            latency: to_latency(seen_at.duration_since(sent_at)),
                        });
                    }
                }
                Ok(Some((IpAddr::V6(_), _))) => continue,
                Ok(None) | Err(_) => break,
            }
        }

        stop.store(true, Ordering::Relaxed);
        debug!("{} of 254 addresses answered", pongs.len());
        Ok(pongs)
    }
}

fn echo_request(ident: u16, sequence: u16) -> anyhow::Result<Vec<u8>> {
    let mut buffer = vec![0u8; ECHO_REQUEST_LEN];
    let mut echo = MutableEchoRequestPacket::new(&mut buffer)
        .context("failed to create echo request packet")?;
    echo.set_icmp_type(IcmpTypes::EchoRequest);
    echo.set_identifier(ident);
    echo.set_sequence_number(sequence);
    echo.set_checksum(0);

    let checksum = {
        let packet = IcmpPacket::new(echo.packet()).context("failed to reparse echo request")?;
        icmp::checksum(&packet)
    };
    echo.set_checksum(checksum);
    Ok(buffer)
}

/// Rounds to whole milliseconds; anything below the clock's millisecond
/// resolution becomes the `<1` sentinel.
fn to_latency(elapsed: Duration) -> Latency {
    let ms = (elapsed.as_secs_f64() * 1000.0).round() as u64;
    if ms == 0 {
        Latency::SubMilli
    } else {
        Latency::Millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::icmp::echo_request::EchoRequestPacket;

    #[test]
    fn echo_request_carries_identifier_and_sequence() {
        let bytes = echo_request(0xBEEF, 42).unwrap();
        let packet = EchoRequestPacket::new(&bytes).unwrap();
        assert_eq!(packet.get_icmp_type(), IcmpTypes::EchoRequest);
        assert_eq!(packet.get_identifier(), 0xBEEF);
        assert_eq!(packet.get_sequence_number(), 42);
        assert_ne!(packet.get_checksum(), 0);
    }

    #[test]
    fn latency_rounds_and_falls_back_to_sentinel() {
        assert_eq!(to_latency(Duration::from_micros(400)), Latency::SubMilli);
        assert_eq!(to_latency(Duration::from_micros(1600)), Latency::Millis(2));
        assert_eq!(to_latency(Duration::from_millis(45)), Latency::Millis(45));
    }
}
