//! Hardware-address resolution over ARP.
//!
//! One datalink channel serves every lookup: a listener thread parses
//! incoming replies and routes them to waiting lookups by sender IP,
//! so concurrent per-host resolutions share the wire without queueing
//! behind each other. Each lookup broadcasts its request, then waits on
//! its own reply slot up to the deadline. Every failure shape resolves
//! to `None`: a missing MAC degrades a single record, never the scan.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use lansight_common::scanning::LinkResolver;
use pnet::datalink::{self, Channel, DataLinkSender, NetworkInterface};
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;
use tokio::sync::oneshot;
use tokio::time::timeout;
use tracing::debug;

const ETH_HDR_LEN: usize = 14;
const ARP_LEN: usize = 28;
const MIN_ETH_FRAME_NO_FCS: usize = 60;

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(1);
const READ_POLL: Duration = Duration::from_millis(100);

/// Routes ARP replies to the lookups waiting for them, keyed by the
/// reply's sender address. A lookup that times out withdraws its slot.
#[derive(Default)]
struct ReplyRouter {
    pending: Mutex<HashMap<Ipv4Addr, oneshot::Sender<MacAddr>>>,
}

impl ReplyRouter {
    fn register(&self, addr: Ipv4Addr) -> oneshot::Receiver<MacAddr> {
        let (tx, rx) = oneshot::channel();
        // A stale slot for the same address is replaced; its waiter
        // already gave up or is about to.
        self.pending.lock().unwrap().insert(addr, tx);
        rx
    }

    fn fulfill(&self, addr: Ipv4Addr, mac: MacAddr) {
        if let Some(waiter) = self.pending.lock().unwrap().remove(&addr) {
            let _ = waiter.send(mac);
        }
    }

    fn forget(&self, addr: Ipv4Addr) {
        self.pending.lock().unwrap().remove(&addr);
    }
}

pub struct ArpResolver {
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    tx: Mutex<Box<dyn DataLinkSender>>,
    router: Arc<ReplyRouter>,
    shutdown: Arc<AtomicBool>,
}

impl ArpResolver {
    pub fn open(intf: &NetworkInterface, src_addr: Ipv4Addr) -> anyhow::Result<Self> {
        let src_mac = intf.mac.context("interface has no MAC address")?;
        let config = datalink::Config {
            read_timeout: Some(READ_POLL),
            ..Default::default()
        };
        let (tx, mut rx) = match datalink::channel(intf, config)? {
            Channel::Ethernet(tx, rx) => (tx, rx),
            _ => anyhow::bail!("interface {} has no ethernet channel", intf.name),
        };

        let router = Arc::new(ReplyRouter::default());
        let shutdown = Arc::new(AtomicBool::new(false));

        let listener_router = Arc::clone(&router);
        let listener_shutdown = Arc::clone(&shutdown);
        std::thread::spawn(move || {
            while !listener_shutdown.load(Ordering::Relaxed) {
                // Read timeouts just tick the shutdown check.
                let Ok(frame) = rx.next() else { continue };
                if let Some((addr, mac)) = parse_reply(frame) {
                    listener_router.fulfill(addr, mac);
                }
            }
        });

        Ok(Self {
            src_mac,
            src_addr,
            tx: Mutex::new(tx),
            router,
            shutdown,
        })
    }
}

impl Drop for ArpResolver {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}

#[async_trait]
impl LinkResolver for ArpResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<MacAddr> {
        let Ok(request) = build_request(self.src_mac, self.src_addr, addr) else {
            return None;
        };

        // Register before sending so a fast reply cannot slip past.
        let waiter = self.router.register(addr);

        let sent = {
            let mut guard = self.tx.lock().ok()?;
            matches!(guard.send_to(&request, None), Some(Ok(())))
        };
        if !sent {
            self.router.forget(addr);
            debug!(%addr, "ARP request not sent");
            return None;
        }

        match timeout(RESOLVE_TIMEOUT, waiter).await {
            Ok(Ok(mac)) => Some(mac),
            _ => {
                self.router.forget(addr);
                debug!(%addr, "no ARP reply before deadline");
                None
            }
        }
    }
}

/// Used when the datalink channel cannot be opened; every host then
/// reports the unknown-MAC sentinel.
pub struct NullResolver;

#[async_trait]
impl LinkResolver for NullResolver {
    async fn resolve(&self, _addr: Ipv4Addr) -> Option<MacAddr> {
        None
    }
}

fn build_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];

    let mut eth = MutableEthernetPacket::new(&mut buffer[..ETH_HDR_LEN])
        .context("failed to create ethernet header")?;
    eth.set_destination(MacAddr::broadcast());
    eth.set_source(src_mac);
    eth.set_ethertype(EtherTypes::Arp);

    let mut arp = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create ARP request")?;
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_sender_proto_addr(src_addr);
    arp.set_target_hw_addr(MacAddr::zero());
    arp.set_target_proto_addr(target_addr);

    Ok(Vec::from(buffer))
}

/// Extracts (sender IP, sender MAC) from an ARP reply frame; anything
/// else is ignored.
fn parse_reply(frame: &[u8]) -> Option<(Ipv4Addr, MacAddr)> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    Some((arp.get_sender_proto_addr(), arp.get_sender_hw_addr()))
}
