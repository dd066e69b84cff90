use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use lansight_common::model::{DeviceRecord, DeviceType, Latency};
use lansight_common::scanning::{CANDIDATE_PORTS, Pong};
use lansight_core::discovery::DiscoveryService;
use lansight_core::simulate;
use lansight_integration_tests::{FakeLinkResolver, FakeProber, FakeSweeper};
use pnet::util::MacAddr;

const LOCAL: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 50);
const GATEWAY: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);
const PI: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 200);

fn pong(addr: Ipv4Addr, ms: u64) -> Pong {
    Pong {
        addr,
        latency: Latency::Millis(ms),
    }
}

fn find(devices: &[DeviceRecord], ip: Ipv4Addr) -> &DeviceRecord {
    devices
        .iter()
        .find(|d| d.ip == ip)
        .unwrap_or_else(|| panic!("no record for {ip}"))
}

fn two_host_network() -> (Arc<FakeSweeper>, Arc<FakeLinkResolver>, Arc<FakeProber>) {
    let sweeper = FakeSweeper {
        outcome: Ok(vec![pong(GATEWAY, 4), pong(PI, 2), pong(LOCAL, 1)]),
    };

    let resolver = FakeLinkResolver {
        table: HashMap::from([
            (GATEWAY, MacAddr::new(0xAC, 0x84, 0xC6, 0x01, 0x02, 0x03)),
            (PI, MacAddr::new(0xB8, 0x27, 0xEB, 0x12, 0x34, 0x56)),
        ]),
        ..Default::default()
    };

    let prober = FakeProber {
        open_ports: HashMap::from([(GATEWAY, vec![80]), (PI, vec![22])]),
        banners: HashMap::from([
            ((GATEWAY, 80), "HTTP/1.1 200 OK".to_string()),
            ((PI, 22), "SSH-2.0-OpenSSH_8.2p1".to_string()),
        ]),
    };

    (Arc::new(sweeper), Arc::new(resolver), Arc::new(prober))
}

#[tokio::test]
async fn end_to_end_classifies_router_iot_and_self() {
    let (sweeper, resolver, prober) = two_host_network();
    let service = DiscoveryService::new(sweeper, resolver, prober);

    let devices = service.perform_discovery(LOCAL).await;
    assert_eq!(devices.len(), 3);

    let gateway = find(&devices, GATEWAY);
    assert_eq!(gateway.device_type, DeviceType::Router);
    assert_eq!(gateway.vendor, "TP-LINK TECHNOLOGIES CO.,LTD.");
    assert_eq!(gateway.mac, "AC:84:C6:01:02:03");
    assert_eq!(gateway.banner, "HTTP/1.1 200 OK");
    assert_eq!(gateway.open_ports, vec![80]);
    assert!(!gateway.is_self);

    let pi = find(&devices, PI);
    assert_eq!(pi.device_type, DeviceType::Iot);
    assert_eq!(pi.vendor, "Raspberry Pi Foundation");
    assert_eq!(pi.open_ports, vec![22]);
    assert_eq!(pi.latency, Latency::Millis(2));

    let non_self: Vec<_> = devices.iter().filter(|d| !d.is_self).collect();
    assert_eq!(non_self.len(), 2);
}

#[tokio::test]
async fn self_record_gets_zero_mac_and_own_category_without_arp() {
    let (sweeper, resolver, prober) = two_host_network();
    let resolver_probe = Arc::clone(&resolver);
    let service = DiscoveryService::new(sweeper, resolver, prober);

    let devices = service.perform_discovery(LOCAL).await;

    let own = find(&devices, LOCAL);
    assert!(own.is_self);
    assert_eq!(own.device_type, DeviceType::SelfWorkstation);
    assert_eq!(own.mac, "00:00:00:00:00:00");
    assert_eq!(own.vendor, "Unknown Vendor");

    // The self lookup short-circuits; ARP is never consulted for it.
    let queried = resolver_probe.queried.lock().unwrap();
    assert!(!queried.contains(&LOCAL));
}

#[tokio::test]
async fn soft_failures_degrade_to_sentinels() {
    let host = Ipv4Addr::new(192, 168, 1, 77);
    let silent = Ipv4Addr::new(192, 168, 1, 78);

    let sweeper = FakeSweeper {
        outcome: Ok(vec![pong(host, 9), pong(silent, 11)]),
    };
    // No MAC table entries, no banners; one host exposes a port anyway.
    let prober = FakeProber {
        open_ports: HashMap::from([(host, vec![80, 443])]),
        ..Default::default()
    };
    let service = DiscoveryService::new(
        Arc::new(sweeper),
        Arc::new(FakeLinkResolver::default()),
        Arc::new(prober),
    );

    let devices = service.perform_discovery(LOCAL).await;

    let exposed = find(&devices, host);
    assert_eq!(exposed.mac, "Unknown");
    assert_eq!(exposed.vendor, "Unknown Vendor");
    assert_eq!(exposed.banner, "Port 80 Open");

    let quiet = find(&devices, silent);
    assert_eq!(quiet.open_ports, Vec::<u16>::new());
    assert_eq!(quiet.banner, "No Services Exposed");
    assert_eq!(quiet.device_type, DeviceType::Generic);
}

#[tokio::test]
async fn open_ports_stay_a_subsequence_of_the_candidate_list() {
    let (sweeper, resolver, prober) = two_host_network();
    let service = DiscoveryService::new(sweeper, resolver, prober);

    let devices = service.perform_discovery(LOCAL).await;

    for device in &devices {
        let mut cursor = 0;
        for port in &device.open_ports {
            let pos = CANDIDATE_PORTS[cursor..]
                .iter()
                .position(|p| p == port)
                .unwrap_or_else(|| panic!("{port} out of order or foreign"));
            cursor += pos + 1;
        }
    }
}

#[tokio::test]
async fn sweep_mechanism_failure_returns_the_demo_payload_verbatim() {
    let service = DiscoveryService::new(
        Arc::new(FakeSweeper { outcome: Err(()) }),
        Arc::new(FakeLinkResolver::default()),
        Arc::new(FakeProber::default()),
    );

    let devices = service.perform_discovery(LOCAL).await;
    assert_eq!(devices, simulate::demo_devices());
}

#[tokio::test]
async fn camera_port_outranks_gateway_and_vendor_rules() {
    let camera = Ipv4Addr::new(192, 168, 1, 15);
    let sweeper = FakeSweeper {
        outcome: Ok(vec![pong(camera, 12)]),
    };
    let prober = FakeProber {
        open_ports: HashMap::from([(camera, vec![554])]),
        ..Default::default()
    };
    let service = DiscoveryService::new(
        Arc::new(sweeper),
        Arc::new(FakeLinkResolver::default()),
        Arc::new(prober),
    );

    let devices = service.perform_discovery(LOCAL).await;
    let record = find(&devices, camera);
    assert_eq!(record.vendor, "Unknown Vendor");
    assert_eq!(record.device_type, DeviceType::Camera);
}
