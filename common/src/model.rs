use std::fmt;
use std::net::Ipv4Addr;

use serde::{Serialize, Serializer};

/// One discovered host, fully resolved and classified.
///
/// Field names follow the JSON contract of the consuming HTTP layer,
/// which serializes the list verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub ip: Ipv4Addr,
    /// Colon-separated uppercase hex, the all-zero sentinel for the
    /// scanning host, or `"Unknown"`.
    pub mac: String,
    pub vendor: String,
    /// First line of a service response, or a synthesized
    /// `"Port N Open"` / `"No Services Exposed"` string.
    pub banner: String,
    /// Open ports in candidate-list order, never completion order.
    pub open_ports: Vec<u16>,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub latency: Latency,
    pub is_self: bool,
}

/// Closed set of device categories the classifier can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceType {
    Camera,
    Mobile,
    Computer,
    Router,
    Server,
    #[serde(rename = "IoT")]
    Iot,
    Generic,
    #[serde(rename = "Workstation (Self)")]
    SelfWorkstation,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeviceType::Camera => "Camera",
            DeviceType::Mobile => "Mobile",
            DeviceType::Computer => "Computer",
            DeviceType::Router => "Router",
            DeviceType::Server => "Server",
            DeviceType::Iot => "IoT",
            DeviceType::Generic => "Generic",
            DeviceType::SelfWorkstation => "Workstation (Self)",
        };
        f.write_str(label)
    }
}

/// Round-trip time of the reachability probe.
///
/// Replies faster than the millisecond clock resolution are reported
/// with the `<1` sentinel instead of a bogus zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    Millis(u64),
    SubMilli,
}

impl fmt::Display for Latency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Latency::Millis(ms) => write!(f, "{ms}"),
            Latency::SubMilli => f.write_str("<1"),
        }
    }
}

impl Serialize for Latency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Latency::Millis(ms) => serializer.serialize_u64(*ms),
            Latency::SubMilli => serializer.serialize_str("<1"),
        }
    }
}
