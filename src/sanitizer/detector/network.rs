//! Network value classifiers: IP addresses, subnets, MACs, hostnames, emails

use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

static MAC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}$").expect("MAC regex is valid")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("email regex is valid")
});

// Labels of 1-63 chars; the final label must start with a letter so that
// version strings such as "23.7.1" are not mistaken for names.
static HOSTNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("hostname regex is valid")
});

const MAX_HOSTNAME_LEN: usize = 253;

/// Parse an IPv4 or IPv6 address
pub fn parse_ip(value: &str) -> Option<IpAddr> {
    value.parse().ok()
}

/// Check for IPv4 dotted-quad syntax
pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

/// Check for IPv6 syntax
pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

/// Check for either address family
pub fn is_ip_address(value: &str) -> bool {
    parse_ip(value).is_some()
}

/// RFC 1918 IPv4 ranges or IPv6 unique-local (fc00::/7)
pub fn is_private_ip(value: &str) -> bool {
    match parse_ip(value) {
        Some(IpAddr::V4(ip)) => ip.is_private(),
        Some(IpAddr::V6(ip)) => (ip.segments()[0] & 0xfe00) == 0xfc00,
        None => false,
    }
}

/// Any parseable address that is not private, loopback or link-local
pub fn is_public_ip(value: &str) -> bool {
    match parse_ip(value) {
        Some(ip) => !is_private_addr(&ip) && !ip.is_loopback() && !is_link_local_addr(&ip),
        None => false,
    }
}

/// Private or public; excludes loopback and link-local addresses
pub fn is_routable_ip(value: &str) -> bool {
    is_private_ip(value) || is_public_ip(value)
}

/// Contiguous IPv4 netmask of /8 or longer (or 0.0.0.0)
///
/// Masks such as `255.255.255.0` parse as addresses but carry no
/// information about the network itself.
pub fn is_netmask(value: &str) -> bool {
    let Ok(ip) = value.parse::<Ipv4Addr>() else {
        return false;
    };
    let bits = u32::from(ip);
    if bits == 0 {
        return true;
    }
    bits.leading_ones() >= 8 && bits.leading_ones() + bits.trailing_zeros() == 32
}

/// Split `address/prefix` into its parts, validating the prefix against the family
pub fn parse_cidr(value: &str) -> Option<(IpAddr, u8)> {
    let (address, prefix) = value.split_once('/')?;
    if prefix.is_empty() || prefix.len() > 3 || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix: u8 = prefix.parse().ok()?;
    let ip = parse_ip(address)?;
    let max_prefix = if ip.is_ipv4() { 32 } else { 128 };
    (prefix <= max_prefix).then_some((ip, prefix))
}

/// Address with a prefix length; a bare address is not a subnet
pub fn is_cidr(value: &str) -> bool {
    parse_cidr(value).is_some()
}

/// Six hex octets separated by `:` or `-`
pub fn is_mac_address(value: &str) -> bool {
    value.len() == 17 && MAC_REGEX.is_match(value)
}

/// `local@domain.tld`
pub fn is_email(value: &str) -> bool {
    value.contains('@') && EMAIL_REGEX.is_match(value)
}

/// Dotted host or domain name that is not itself an IP address
pub fn is_hostname(value: &str) -> bool {
    value.len() <= MAX_HOSTNAME_LEN
        && value.contains('.')
        && !is_ip_address(value)
        && HOSTNAME_REGEX.is_match(value)
}

fn is_private_addr(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

fn is_link_local_addr(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_link_local(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) == 0xfe80,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_syntax() {
        assert!(is_ipv4("192.168.1.1"));
        assert!(!is_ipv4("192.168.1"));
        assert!(!is_ipv4("256.1.1.1"));
        assert!(is_ipv6("2001:db8::1"));
        assert!(is_ipv6("::1"));
        assert!(!is_ipv6("192.168.1.1"));
        assert!(is_ip_address("fe80::1"));
        assert!(!is_ip_address("not-an-ip"));
        assert!(!is_ip_address(""));
    }

    #[test]
    fn test_private_ip_ranges() {
        assert!(is_private_ip("10.1.2.3"));
        assert!(is_private_ip("172.16.0.1"));
        assert!(is_private_ip("172.31.255.255"));
        assert!(!is_private_ip("172.32.0.1"));
        assert!(is_private_ip("192.168.100.1"));
        assert!(is_private_ip("fd12:3456::1"));
        assert!(!is_private_ip("8.8.8.8"));
        assert!(!is_private_ip("garbage"));
    }

    #[test]
    fn test_public_ip_excludes_special_ranges() {
        assert!(is_public_ip("8.8.8.8"));
        assert!(is_public_ip("2606:4700::1111"));
        assert!(!is_public_ip("10.0.0.1"));
        assert!(!is_public_ip("127.0.0.1"));
        assert!(!is_public_ip("169.254.10.10"));
        assert!(!is_public_ip("fe80::1"));
        assert!(!is_public_ip("::1"));
        assert!(!is_public_ip("example.com"));
    }

    #[test]
    fn test_routable_ip() {
        assert!(is_routable_ip("192.168.1.1"));
        assert!(is_routable_ip("1.1.1.1"));
        assert!(!is_routable_ip("127.0.0.1"));
    }

    #[test]
    fn test_netmask() {
        assert!(is_netmask("255.255.255.0"));
        assert!(is_netmask("255.255.255.255"));
        assert!(is_netmask("255.0.0.0"));
        assert!(is_netmask("0.0.0.0"));
        assert!(!is_netmask("255.0.255.0"));
        assert!(!is_netmask("8.8.8.8"));
        assert!(!is_netmask("128.0.0.0"));
        assert!(!is_netmask("ffff::"));
    }

    #[test]
    fn test_cidr_bounds() {
        assert!(is_cidr("10.0.0.0/8"));
        assert!(is_cidr("192.168.1.0/24"));
        assert!(is_cidr("0.0.0.0/0"));
        assert!(!is_cidr("10.0.0.0/33"));
        assert!(is_cidr("2001:db8::/32"));
        assert!(is_cidr("::/128"));
        assert!(!is_cidr("2001:db8::/129"));
        assert!(!is_cidr("192.168.1.0"));
        assert!(!is_cidr("192.168.1.0/"));
        assert!(!is_cidr("192.168.1.0/+8"));
        assert!(!is_cidr("host/24"));
        assert_eq!(
            parse_cidr("172.16.0.0/12"),
            Some(("172.16.0.0".parse().unwrap(), 12))
        );
    }

    #[test]
    fn test_mac_address() {
        assert!(is_mac_address("00:1a:2b:3c:4d:5e"));
        assert!(is_mac_address("00-1A-2B-3C-4D-5E"));
        assert!(!is_mac_address("00:1a:2b:3c:4d"));
        assert!(!is_mac_address("00:1a:2b:3c:4d:5g"));
        assert!(!is_mac_address("001a2b3c4d5e"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("admin@company.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("admin@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("plain text"));
    }

    #[test]
    fn test_hostname() {
        assert!(is_hostname("firewall.example.com"));
        assert!(is_hostname("example.com"));
        assert!(is_hostname("ntp-1.pool.ntp.org"));
        assert!(!is_hostname("localhost"));
        assert!(!is_hostname("192.168.1.1"));
        assert!(!is_hostname("23.7.1"));
        assert!(!is_hostname("-bad.example.com"));
        assert!(!is_hostname("under_score.example.com"));
        let too_long = format!("{}.com", "a.".repeat(200));
        assert!(!is_hostname(&too_long));
    }
}
