//! ABI params encoder / decoder for contract-call payloads.
//!
//! # Wire format
//! - Payloads are lower-case hex without `0x`
//! - Each static value occupies one 32-byte slot (64 hex characters)
//! - Constant-call results may carry a 4-byte method selector in front of
//!   the slots (8 hex characters); callers opt in to stripping it

use alloy_dyn_abi::{DynSolType, DynSolValue};

use crate::address::{from_abi_address, to_abi_address};
use crate::error::CodecError;
use crate::value::{json_to_dyn_value, AbiValue, TypedValue};

/// Hex characters per ABI slot.
pub const SLOT_HEX_LEN: usize = 64;

/// Hex characters of a 4-byte method selector.
pub const SELECTOR_HEX_LEN: usize = 8;

/// Stateless ABI parameter codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterCodec;

impl ParameterCodec {
    /// Encode an ordered list of typed values into a parameter payload.
    ///
    /// `address` values (and every element of `address[]` values) have their
    /// `41` prefix swapped for `0x` before encoding. An empty input list
    /// encodes to the empty string.
    ///
    /// # Errors
    /// Returns `CodecError` if a type name cannot be parsed or a value does
    /// not fit its type.
    pub fn encode(inputs: &[TypedValue]) -> Result<String, CodecError> {
        if inputs.is_empty() {
            return Ok(String::new());
        }

        let values = inputs
            .iter()
            .map(encode_input)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                tracing::error!(error = %e, inputs = inputs.len(), "ABI encoding failed");
                e
            })?;

        let encoded = DynSolValue::Tuple(values).abi_encode_params();
        Ok(hex::encode(encoded))
    }

    /// Decode a parameter payload positionally according to `types`.
    ///
    /// With `ignore_method_hash` set, a payload whose length leaves 8 extra
    /// hex characters has them dropped as a method selector first. Outputs
    /// declared as `address` are returned as lower-case `41` addresses.
    ///
    /// # Errors
    /// `CodecError::InvalidLength` if the payload is not a whole number of
    /// slots; other variants for malformed hex, unknown types or payloads
    /// too short for the declared types.
    pub fn decode(
        types: &[&str],
        output: &str,
        ignore_method_hash: bool,
    ) -> Result<Vec<AbiValue>, CodecError> {
        let mut payload = strip_hex_prefix(output);

        if ignore_method_hash && payload.len() % SLOT_HEX_LEN == SELECTOR_HEX_LEN {
            if let Some(rest) = payload.get(SELECTOR_HEX_LEN..) {
                payload = rest;
            }
        }

        if payload.len() % SLOT_HEX_LEN != 0 {
            return Err(CodecError::InvalidLength { len: payload.len() });
        }

        let sol_types = types
            .iter()
            .map(|ty| parse_type(ty))
            .collect::<Result<Vec<_>, _>>()?;

        let bytes = hex::decode(payload).map_err(|e| CodecError::InvalidHex {
            reason: e.to_string(),
        })?;

        let decoded = DynSolType::Tuple(sol_types)
            .abi_decode_params(&bytes)
            .map_err(|e| CodecError::AbiDecodeFailed {
                reason: e.to_string(),
            })?;

        // a tuple type always decodes to a tuple of `types.len()` values
        let values = decoded.as_tuple().unwrap_or_default();

        Ok(types
            .iter()
            .zip(values)
            .map(|(ty, val)| match (*ty, val) {
                ("address", DynSolValue::Address(addr)) => AbiValue::Address(from_abi_address(addr)),
                (_, val) => AbiValue::from(val.clone()),
            })
            .collect())
    }
}

fn encode_input(input: &TypedValue) -> Result<DynSolValue, CodecError> {
    let sol_type = parse_type(&input.ty)?;
    let raw = rewrite_address_input(input);
    json_to_dyn_value(&raw, &sol_type).map_err(|reason| CodecError::InvalidValue {
        ty: input.ty.clone(),
        reason,
    })
}

fn parse_type(ty: &str) -> Result<DynSolType, CodecError> {
    DynSolType::parse(ty).map_err(|e| CodecError::UnknownType {
        ty: ty.to_string(),
        reason: e.to_string(),
    })
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Apply the `41` -> `0x` swap to `address` and `address[]` inputs.
fn rewrite_address_input(input: &TypedValue) -> serde_json::Value {
    use serde_json::Value;

    match (input.ty.as_str(), &input.value) {
        ("address", Value::String(s)) => Value::String(to_abi_address(s)),
        ("address[]", Value::Array(elems)) => Value::Array(
            elems
                .iter()
                .map(|e| match e {
                    Value::String(s) => Value::String(to_abi_address(s)),
                    other => other.clone(),
                })
                .collect(),
        ),
        _ => input.value.clone(),
    }
}
