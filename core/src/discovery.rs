//! # Network Discovery Service
//!
//! Implements the one-shot "scan the local network" use case: sweep the
//! /24 around the local address, then run every live host through MAC
//! resolution, vendor lookup, port probing, banner capture and
//! classification, and assemble the device list.

use std::net::Ipv4Addr;
use std::sync::Arc;

use lansight_common::error::{ScanError, SweepError};
use lansight_common::model::DeviceRecord;
use lansight_common::network::mac;
use lansight_common::network::subnet::Subnet24;
use lansight_common::scanning::{LinkResolver, Pong, ServiceProber, Sweeper};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::classify::classify;
use crate::network::arp::{ArpResolver, NullResolver};
use crate::network::icmp::IcmpSweeper;
use crate::network::interface;
use crate::network::tcp::TcpProber;
use crate::simulate;
use crate::vendors::lookup_vendor;

/// Orchestrates one discovery sweep.
///
/// Depends only on the scanning trait seams; the live wiring lives in
/// [`scan_network`], tests drive it with fakes.
pub struct DiscoveryService {
    sweeper: Arc<dyn Sweeper>,
    link: Arc<dyn LinkResolver>,
    prober: Arc<dyn ServiceProber>,
}

impl DiscoveryService {
    pub fn new(
        sweeper: Arc<dyn Sweeper>,
        link: Arc<dyn LinkResolver>,
        prober: Arc<dyn ServiceProber>,
    ) -> Self {
        Self {
            sweeper,
            link,
            prober,
        }
    }

    /// Runs the full pipeline around `local`, the scanning host's own
    /// address.
    ///
    /// Per-host failures degrade into sentinel fields. A systemic sweep
    /// failure switches to the demonstration payload; only interface
    /// resolution (already done by the caller) can fail a scan.
    pub async fn perform_discovery(&self, local: Ipv4Addr) -> Vec<DeviceRecord> {
        let subnet = Subnet24::of(local);
        info!("Scanning subnet: {subnet}");

        let pongs = match self.sweeper.sweep(subnet).await {
            Ok(pongs) => pongs,
            Err(SweepError::Unavailable(e)) => {
                warn!("reachability probing unavailable ({e}); returning demonstration payload");
                return simulate::demo_devices();
            }
        };
        info!("{} live host(s) found", pongs.len());

        let mut tasks: JoinSet<DeviceRecord> = JoinSet::new();
        for pong in pongs {
            let link = Arc::clone(&self.link);
            let prober = Arc::clone(&self.prober);
            tasks.spawn(survey_host(pong, local, link, prober));
        }

        let mut devices = Vec::new();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(record) => devices.push(record),
                Err(e) => warn!("host survey task failed: {e}"),
            }
        }
        devices
    }
}

/// Resolves, probes and classifies a single live host. Independent per
/// host; nothing here can fail the scan.
async fn survey_host(
    pong: Pong,
    local: Ipv4Addr,
    link: Arc<dyn LinkResolver>,
    prober: Arc<dyn ServiceProber>,
) -> DeviceRecord {
    let is_self = pong.addr == local;

    // Self-lookup is definitionally known; never query ARP for it.
    let mac = if is_self {
        mac::ZERO_MAC.to_string()
    } else {
        match link.resolve(pong.addr).await {
            Some(hw) => mac::canonical(hw),
            None => mac::UNKNOWN_MAC.to_string(),
        }
    };

    let vendor = lookup_vendor(&mac);
    let open_ports = prober.probe_ports(pong.addr).await;

    let grabbed = match open_ports.first() {
        Some(&port) => prober.grab_banner(pong.addr, port).await,
        None => None,
    };
    let banner = grabbed.unwrap_or_else(|| match open_ports.first() {
        Some(port) => format!("Port {port} Open"),
        None => "No Services Exposed".to_string(),
    });

    let device_type = classify(vendor, &open_ports, pong.addr, is_self);

    DeviceRecord {
        ip: pong.addr,
        mac,
        vendor: vendor.to_string(),
        banner,
        open_ports,
        device_type,
        latency: pong.latency,
        is_self,
    }
}

/// The single external operation: one full scan with the live network
/// stack. Fails only when no usable local interface exists.
pub async fn scan_network() -> Result<Vec<DeviceRecord>, ScanError> {
    let (intf, local) = interface::local_ipv4()?;

    let link: Arc<dyn LinkResolver> = match ArpResolver::open(&intf, local) {
        Ok(resolver) => Arc::new(resolver),
        Err(e) => {
            warn!("ARP resolution unavailable ({e}); MAC addresses will be unknown");
            Arc::new(NullResolver)
        }
    };

    let service = DiscoveryService::new(Arc::new(IcmpSweeper), link, Arc::new(TcpProber));
    Ok(service.perform_discovery(local).await)
}
