use pnet::util::MacAddr;

/// Sentinel used for the scanning host itself.
pub const ZERO_MAC: &str = "00:00:00:00:00:00";

/// Sentinel used when hardware-address resolution failed.
pub const UNKNOWN_MAC: &str = "Unknown";

/// Renders a MAC address as uppercase colon-separated hex, the canonical
/// form the vendor table is keyed on. `MacAddr`'s own `Display` is
/// lowercase.
pub fn canonical(mac: MacAddr) -> String {
    format!(
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac.0, mac.1, mac.2, mac.3, mac.4, mac.5
    )
}
