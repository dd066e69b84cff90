//! Static OUI-prefix vendor table.
//!
//! Keyed on the first three octets of a canonical (uppercase,
//! colon-separated) MAC address. Exact prefix match only, no fuzzy
//! lookups. The table is built once and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

const VENDOR_PREFIXES: &[(&str, &str)] = &[
    // Virtualization / dev boards
    ("00:0C:29", "VMware, Inc."),
    ("00:50:56", "VMware, Inc."),
    ("B8:27:EB", "Raspberry Pi Foundation"),
    ("DC:A6:32", "Raspberry Pi Trading Ltd"),
    ("E4:5F:01", "Raspberry Pi Trading Ltd"),
    // Cameras / security
    ("00:23:5E", "Hikvision Digital Technology"),
    ("4C:1B:86", "Hikvision Digital Technology"),
    ("10:12:48", "ITX Security Co., Ltd."),
    ("00:40:8C", "Axis Communications AB"),
    ("AC:CC:8E", "Axis Communications AB"),
    ("48:EA:63", "Dahua Technology"),
    ("90:02:A9", "Dahua Technology"),
    ("38:AF:29", "Dahua Technology"),
    // Mobile / smart devices
    ("00:1A:11", "Google, Inc."),
    ("3C:5C:48", "Google, Inc."),
    ("D8:3C:99", "Google, Inc."),
    ("F4:F5:D8", "Google, Inc."),
    ("F0:D5:BF", "Apple, Inc."),
    ("BC:92:6B", "Apple, Inc."),
    ("88:66:5A", "Apple, Inc."),
    ("1C:AB:05", "Apple, Inc."),
    ("FC:FC:48", "Apple, Inc."),
    ("00:F4:B9", "Apple, Inc."),
    ("24:F5:AA", "Samsung Electronics Co.,Ltd"),
    ("38:01:95", "Samsung Electronics Co.,Ltd"),
    ("84:25:DB", "Samsung Electronics Co.,Ltd"),
    ("18:59:36", "Xiaomi Communications Co Ltd"),
    ("64:09:80", "Xiaomi Communications Co Ltd"),
    // IoT chipsets
    ("A4:2B:B0", "Espressif Inc."),
    ("5C:CF:7F", "Espressif Inc."),
    ("18:FE:34", "Espressif Inc."),
    ("24:62:AB", "Espressif Inc."),
    ("3C:71:BF", "Espressif Inc."),
    ("AC:D0:74", "Espressif Inc."),
    ("60:01:94", "Espressif Inc."),
    ("50:02:91", "Tuya Smart Inc."),
    // Computing / NAS
    ("00:11:32", "Synology Incorporated"),
    ("00:1E:8C", "ASUSTek COMPUTER INC."),
    ("04:92:26", "ASUSTek COMPUTER INC."),
    ("00:24:8C", "ASUSTek COMPUTER INC."),
    ("00:90:A9", "Western Digital Technologies, Inc."),
    ("00:D0:B7", "Intel Corporation"),
    ("00:1B:21", "Intel Corporate"),
    ("F8:75:A4", "Dell Inc."),
    ("54:9F:35", "Dell Inc."),
    ("98:29:A6", "HP Inc."),
    // Networking / routers
    ("E0:D5:5E", "D-Link International"),
    ("00:0D:88", "D-Link Corporation"),
    ("00:18:E7", "Cameo Communications, Inc."),
    ("00:26:5A", "D-Link Systems, Inc."),
    ("D4:6E:0E", "TP-Link Corporation Limited"),
    ("18:A6:F7", "TP-Link Corporation Limited"),
    ("A8:5E:45", "TP-Link Corporation Limited"),
    ("00:14:78", "TP-LINK TECHNOLOGIES CO.,LTD."),
    ("B0:95:75", "TP-Link Corporation Limited"),
    ("50:C7:BF", "TP-Link Corporation Limited"),
    ("70:4F:57", "TP-Link Corporation Limited"),
    ("F4:F2:6D", "TP-Link Corporation Limited"),
    ("AC:84:C6", "TP-LINK TECHNOLOGIES CO.,LTD."),
    ("78:8A:20", "Ubiquiti Networks Inc."),
    ("F0:9F:C2", "Ubiquiti Networks Inc."),
    ("74:83:C2", "Ubiquiti Networks Inc."),
    // Demonstration payload
    ("AA:AA:AA", "Simulated Vendor"),
];

static VENDOR_TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn table() -> &'static HashMap<&'static str, &'static str> {
    VENDOR_TABLE.get_or_init(|| VENDOR_PREFIXES.iter().copied().collect())
}

/// Resolves a MAC address string to its vendor name.
///
/// The first eight characters (three octets) are uppercased and
/// dash-normalized before lookup. The `"Unknown"` sentinel, strings too
/// short to carry a prefix, and unlisted prefixes all map to
/// [`UNKNOWN_VENDOR`].
pub fn lookup_vendor(mac: &str) -> &'static str {
    if mac == lansight_common::network::mac::UNKNOWN_MAC {
        return UNKNOWN_VENDOR;
    }
    let Some(raw_prefix) = mac.get(..8) else {
        return UNKNOWN_VENDOR;
    };
    let prefix = raw_prefix.to_uppercase().replace('-', ":");
    table().get(prefix.as_str()).copied().unwrap_or(UNKNOWN_VENDOR)
}
