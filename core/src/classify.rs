//! Deterministic device classification.
//!
//! An ordered rule chain, first match wins: port signature, then vendor
//! keyword groups, then the gateway heuristic for `.1` addresses. The
//! scanning host itself always classifies as its own category, whatever
//! the other rules would say.

use std::net::Ipv4Addr;

use lansight_common::model::DeviceType;

/// Ports that betray a camera regardless of vendor (RTSP and the
/// Hikvision-style alternate HTTP port).
const CAMERA_PORTS: [u16; 2] = [554, 8000];

/// Vendor keyword groups, evaluated in order against the lowercased
/// vendor name.
const VENDOR_RULES: &[(DeviceType, &[&str])] = &[
    (DeviceType::Mobile, &["apple", "samsung", "xiaomi", "google"]),
    (
        DeviceType::Computer,
        &["intel", "dell", "hp", "lenovo", "asustek", "msi"],
    ),
    (
        DeviceType::Router,
        &["tp-link", "d-link", "ubiquiti", "cisco", "netgear"],
    ),
    (DeviceType::Server, &["synology", "qnap"]),
    (DeviceType::Iot, &["espressif", "tuya", "raspberry"]),
    (DeviceType::Camera, &["hikvision", "dahua", "axis"]),
];

pub fn classify(vendor: &str, open_ports: &[u16], addr: Ipv4Addr, is_self: bool) -> DeviceType {
    // The self override is unconditional, so it can short-circuit the
    // whole chain.
    if is_self {
        return DeviceType::SelfWorkstation;
    }

    let mut kind = DeviceType::Generic;

    if CAMERA_PORTS.iter().any(|p| open_ports.contains(p)) {
        kind = DeviceType::Camera;
    } else {
        let vendor = vendor.to_lowercase();
        for (label, needles) in VENDOR_RULES {
            if needles.iter().any(|needle| vendor.contains(needle)) {
                kind = *label;
                break;
            }
        }
    }

    if kind == DeviceType::Generic && addr.octets()[3] == 1 {
        kind = DeviceType::Router;
    }

    kind
}
