pub mod arp;
pub mod icmp;
pub mod interface;
pub mod tcp;
