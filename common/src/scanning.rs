//! Trait seams between the discovery orchestrator and the live network
//! code. The orchestrator depends only on these abstractions; tests
//! drive it with fakes.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use pnet::util::MacAddr;

use crate::error::SweepError;
use crate::model::Latency;
use crate::network::subnet::Subnet24;

/// The fixed candidate port list, in probe order: SSH, HTTP, HTTPS,
/// RTSP and the two common alternate HTTP ports.
pub const CANDIDATE_PORTS: [u16; 6] = [22, 80, 443, 554, 8080, 8000];

/// A host that answered the reachability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong {
    pub addr: Ipv4Addr,
    pub latency: Latency,
}

/// Sweeps a /24 network for live hosts.
///
/// Per-host silence is not an error: unresponsive addresses are simply
/// absent from the result. `SweepError` is reserved for the probing
/// mechanism itself being unusable.
#[async_trait]
pub trait Sweeper: Send + Sync {
    async fn sweep(&self, subnet: Subnet24) -> Result<Vec<Pong>, SweepError>;
}

/// Resolves an IPv4 address to its link-layer hardware address.
///
/// Returns `None` on any failure; a missing MAC must never abort the
/// host's pipeline.
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr>;
}

/// Probes application-layer service exposure on a single host.
#[async_trait]
pub trait ServiceProber: Send + Sync {
    /// Attempts a TCP connect on every candidate port. The returned
    /// ports keep [`CANDIDATE_PORTS`] order regardless of which
    /// connection completed first.
    async fn probe_ports(&self, addr: Ipv4Addr) -> Vec<u16>;

    /// Grabs the first response line from the given port, or `None` if
    /// the service stayed silent or the connection failed.
    async fn grab_banner(&self, addr: Ipv4Addr, port: u16) -> Option<String>;
}
