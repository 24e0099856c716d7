//! The `Host` enum classifies an already-validated host string into its
//! concrete shape. Grounded directly on the teacher crate's `Host`
//! (`auris::Host`), extended with the `IpvFuture` case this spec adds.

use std::net::{Ipv4Addr, Ipv6Addr};

/// The host name of an IRI authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Host<'a> {
    Domain(&'a str),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    /// The `[v...]` escape hatch for address families this crate does
    /// not otherwise model; carries the literal body between the
    /// brackets, excluding the brackets themselves.
    IpvFuture(&'a str),
}

/// Classifies a host string already accepted by the grammar parser (and,
/// for IP-literals, the IPv6/IPvFuture checker). Does not itself perform
/// RFC validation — by the time this runs the string is known-good.
pub(crate) fn classify(host: &str) -> Host<'_> {
    if let Some(stripped) = host.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        if stripped.starts_with(['v', 'V']) {
            return Host::IpvFuture(&stripped[1..]);
        }
        if let Ok(addr) = stripped.parse::<Ipv6Addr>() {
            return Host::Ipv6(addr);
        }
        // Embedded-IPv4 / zone-id forms that `std`'s strict parser
        // rejects still validated fine against our own grammar; keep the
        // raw literal rather than erroring a second time here.
        return Host::IpvFuture(stripped);
    }
    if let Ok(addr) = host.parse::<Ipv4Addr>() {
        return Host::Ipv4(addr);
    }
    Host::Domain(host)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classifies_ipv4() {
        assert_eq!(classify("192.168.1.1"), Host::Ipv4(Ipv4Addr::new(192, 168, 1, 1)));
    }

    #[test]
    fn classifies_ipv6() {
        assert_eq!(classify("[::1]"), Host::Ipv6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)));
    }

    #[test]
    fn classifies_domain() {
        assert_eq!(classify("example.com"), Host::Domain("example.com"));
    }
}
