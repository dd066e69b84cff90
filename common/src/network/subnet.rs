use std::fmt;
use std::net::Ipv4Addr;

/// A /24 network derived from a host address by octet truncation.
///
/// The sweep enumerates the 254 usable addresses `.1` through `.254`;
/// network and broadcast addresses are never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subnet24 {
    prefix: [u8; 3],
}

impl Subnet24 {
    pub fn of(addr: Ipv4Addr) -> Self {
        let [a, b, c, _] = addr.octets();
        Self { prefix: [a, b, c] }
    }

    pub fn host(&self, last_octet: u8) -> Ipv4Addr {
        let [a, b, c] = self.prefix;
        Ipv4Addr::new(a, b, c, last_octet)
    }

    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        (1..=254).map(|n| self.host(n))
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let [a, b, c, _] = addr.octets();
        [a, b, c] == self.prefix
    }
}

impl fmt::Display for Subnet24 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.prefix;
        write!(f, "{a}.{b}.{c}.0/24")
    }
}
