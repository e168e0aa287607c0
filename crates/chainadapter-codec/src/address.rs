//! TRON hex address <-> ABI address conversion.
//!
//! A TRON hex address is the 20-byte account id prefixed with the `0x41`
//! network byte, written as `41` + 40 hex digits. The ABI coder only knows
//! `0x` + 40 hex digits, so the two prefixes are swapped at the boundary.

use alloy_primitives::Address;

/// Network prefix of a TRON hex address.
pub const ADDRESS_PREFIX: &str = "41";

/// Replace a leading `41` with `0x`. Anything else is returned unchanged.
pub fn to_abi_address(addr: &str) -> String {
    match addr.strip_prefix(ADDRESS_PREFIX) {
        Some(rest) => format!("0x{rest}"),
        None => addr.to_string(),
    }
}

/// Render a decoded ABI address as a lower-case TRON hex address.
pub fn from_abi_address(addr: &Address) -> String {
    format!("{ADDRESS_PREFIX}{}", hex::encode(addr.as_slice()))
}
