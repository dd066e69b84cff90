//! Live implementation of the LAN discovery pipeline: interface
//! resolution, ICMP reachability sweep, ARP hardware-address lookup,
//! TCP port probing with banner capture, vendor identification and
//! device classification.

pub mod classify;
pub mod discovery;
pub mod network;
pub mod simulate;
pub mod vendors;

pub use discovery::scan_network;
