//! # chainadapter-codec
//!
//! ABI parameter codec for TRON-style constant contract calls.
//!
//! ## Implementation notes
//! - Uses `alloy-dyn-abi` for the actual ABI params encoding
//! - TRON hex addresses carry a `41` prefix where the ABI coder expects `0x`;
//!   the prefix is swapped on the way in ([`to_abi_address`]) and out
//!   ([`from_abi_address`])
//! - Payloads are lower-case hex without `0x`, one 64-char slot per word

pub mod address;
pub mod codec;
pub mod error;
pub mod value;

pub use address::{from_abi_address, to_abi_address, ADDRESS_PREFIX};
pub use codec::{ParameterCodec, SELECTOR_HEX_LEN, SLOT_HEX_LEN};
pub use error::CodecError;
pub use value::{AbiValue, TypedValue};
