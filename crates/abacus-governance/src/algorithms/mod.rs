//! # Algorithms Module
//!
//! Governor aggregation rules and the ABI pieces the router adapter needs.

pub mod abi;
pub mod governors;

pub use abi::{decode_address_word, encode_call, function_selector, GOVERNOR_SIGNATURE};
pub use governors::{collect_governors, single_governor};
