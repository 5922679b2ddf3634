//! Pattern detectors
//!
//! Stateless classifiers used by the rule table. Every detector is a pure
//! `fn(&str) -> bool`: no side effects, no errors, no panics. Matching is
//! done with the `regex` crate (finite automata, no backtracking) and
//! `std::net` parsing, so run time stays linear on adversarial input.

pub mod fields;
pub mod network;
pub mod secrets;

pub use fields::{
    is_api_key_field, is_password_field, is_psk_field, is_snmp_community_field,
    looks_like_secret_field,
};
pub use network::{
    is_cidr, is_email, is_hostname, is_ip_address, is_ipv4, is_ipv6, is_mac_address, is_netmask,
    is_private_ip, is_public_ip, is_routable_ip, parse_cidr,
};
pub use secrets::{is_aws_access_key, is_base64, is_certificate, is_pem_block, is_private_key};
