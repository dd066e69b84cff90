//! Fake scanning collaborators for driving [`DiscoveryService`]
//! without touching the network.
//!
//! [`DiscoveryService`]: lansight_core::discovery::DiscoveryService

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use async_trait::async_trait;
use lansight_common::error::SweepError;
use lansight_common::scanning::{LinkResolver, Pong, ServiceProber, Sweeper};
use lansight_common::network::subnet::Subnet24;
use pnet::util::MacAddr;

/// Replays a scripted sweep result, or signals mechanism failure.
pub struct FakeSweeper {
    pub outcome: Result<Vec<Pong>, ()>,
}

#[async_trait]
impl Sweeper for FakeSweeper {
    async fn sweep(&self, _subnet: Subnet24) -> Result<Vec<Pong>, SweepError> {
        match &self.outcome {
            Ok(pongs) => Ok(pongs.clone()),
            Err(()) => Err(SweepError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "raw socket denied",
            ))),
        }
    }
}

/// Answers MAC lookups from a fixed table and records every queried
/// address.
#[derive(Default)]
pub struct FakeLinkResolver {
    pub table: HashMap<Ipv4Addr, MacAddr>,
    pub queried: Mutex<Vec<Ipv4Addr>>,
}

#[async_trait]
impl LinkResolver for FakeLinkResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        self.queried.lock().unwrap().push(addr);
        self.table.get(&addr).copied()
    }
}

/// Scripted port and banner answers per host.
#[derive(Default)]
pub struct FakeProber {
    pub open_ports: HashMap<Ipv4Addr, Vec<u16>>,
    pub banners: HashMap<(Ipv4Addr, u16), String>,
}

#[async_trait]
impl ServiceProber for FakeProber {
    async fn probe_ports(&self, addr: Ipv4Addr) -> Vec<u16> {
        self.open_ports.get(&addr).cloned().unwrap_or_default()
    }

    async fn grab_banner(&self, addr: Ipv4Addr, port: u16) -> Option<String> {
        self.banners.get(&(addr, port)).cloned()
    }
}
