use std::net::Ipv4Addr;

use lansight_common::error::ScanError;
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::IpNetwork;
use tracing::debug;

/// Picks the first up, non-loopback interface carrying an IPv4 address,
/// together with that address. The scan sweeps this address's /24.
///
/// Failing here is fatal to the whole scan; there is nothing to probe
/// without a local address.
pub fn local_ipv4() -> Result<(NetworkInterface, Ipv4Addr), ScanError> {
    let interfaces = pnet::datalink::interfaces();
    debug!("inspecting {} network interface(s)", interfaces.len());

    for intf in interfaces {
        if !intf.is_up() || intf.is_loopback() {
            continue;
        }
        if let Some(addr) = first_ipv4(&intf) {
            debug!(interface = %intf.name, %addr, "selected local interface");
            return Ok((intf, addr));
        }
    }

    Err(ScanError::NoInterface)
}

fn first_ipv4(intf: &NetworkInterface) -> Option<Ipv4Addr> {
    intf.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(v4.ip()),
        _ => None,
    })
}
