//! # ABI Helpers
//!
//! Just enough of the contract ABI to read an address-returning view.

use crate::domain::{Address, Domain, GovernanceError};
use sha3::{Digest, Keccak256};

/// Signature of the router's governor view.
pub const GOVERNOR_SIGNATURE: &str = "governor()";

/// First four bytes of Keccak-256 of a function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// `0x`-prefixed calldata for a call without arguments.
pub fn encode_call(signature: &str) -> String {
    format!("0x{}", hex::encode(function_selector(signature)))
}

/// Decode an ABI-encoded `address` return value.
///
/// The word is 32 bytes; the address sits in the low 20 and the high 12
/// must be zero.
pub fn decode_address_word(domain: Domain, data: &str) -> Result<Address, GovernanceError> {
    let digits = data.strip_prefix("0x").unwrap_or(data);
    let bytes = hex::decode(digits)
        .map_err(|e| GovernanceError::communication(domain, format!("bad return data: {}", e)))?;

    if bytes.len() != 32 {
        return Err(GovernanceError::communication(
            domain,
            format!("expected 32-byte return word, got {} bytes", bytes.len()),
        ));
    }
    if bytes[..12].iter().any(|b| *b != 0) {
        return Err(GovernanceError::communication(
            domain,
            "return word is not an address",
        ));
    }

    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes[12..]);
    Ok(Address::new(address))
}
