//! Typed input values and decoded output values.
//!
//! Inputs arrive as JSON (`{"type": "address", "value": "41..."}`), so a
//! [`TypedValue`] keeps the raw `serde_json::Value` and is only coerced to
//! an alloy `DynSolValue` once its ABI type is known. Decoded values come
//! back as [`AbiValue`], where integers keep their full 256-bit width.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// An ABI type name paired with its native JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub ty: String,
    pub value: Value,
}

impl TypedValue {
    pub fn new(ty: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            ty: ty.into(),
            value: value.into(),
        }
    }

    /// Shorthand for an `address` input.
    pub fn address(value: impl Into<String>) -> Self {
        Self::new("address", value.into())
    }
}

/// A decoded ABI value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256),
    Int(I256),
    Bool(bool),
    Bytes(Vec<u8>),
    FixedBytes(Vec<u8>),
    Str(String),
    /// Top-level `address` outputs use the TRON `41` form; addresses nested
    /// in arrays or tuples keep the EIP-55 `0x` form.
    Address(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    /// Returns the inner string if this is an Address value.
    pub fn as_address(&self) -> Option<&str> {
        match self {
            AbiValue::Address(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// JSON rendering: integers as decimal strings, bytes as `0x` hex.
    pub fn to_json(&self) -> Value {
        match self {
            AbiValue::Uint(u) => Value::String(u.to_string()),
            AbiValue::Int(i) => Value::String(i.to_string()),
            AbiValue::Bool(b) => Value::Bool(*b),
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => {
                Value::String(format!("0x{}", hex::encode(b)))
            }
            AbiValue::Str(s) | AbiValue::Address(s) => Value::String(s.clone()),
            AbiValue::Array(vals) | AbiValue::Tuple(vals) => {
                Value::Array(vals.iter().map(AbiValue::to_json).collect())
            }
        }
    }
}

impl From<DynSolValue> for AbiValue {
    fn from(val: DynSolValue) -> Self {
        match val {
            DynSolValue::Bool(b) => AbiValue::Bool(b),
            DynSolValue::Int(i, _) => AbiValue::Int(i),
            DynSolValue::Uint(u, _) => AbiValue::Uint(u),
            DynSolValue::FixedBytes(word, size) => AbiValue::FixedBytes(word[..size].to_vec()),
            DynSolValue::Address(a) => AbiValue::Address(a.to_checksum(None)),
            // Function pointers are 24 raw bytes (address ++ selector)
            DynSolValue::Function(f) => AbiValue::Bytes(f.to_vec()),
            DynSolValue::Bytes(b) => AbiValue::Bytes(b),
            DynSolValue::String(s) => AbiValue::Str(s),
            DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
                AbiValue::Array(vals.into_iter().map(AbiValue::from).collect())
            }
            DynSolValue::Tuple(fields) => {
                AbiValue::Tuple(fields.into_iter().map(AbiValue::from).collect())
            }
        }
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Uint(v) => write!(f, "{v}"),
            AbiValue::Int(v) => write!(f, "{v}"),
            AbiValue::Bool(v) => write!(f, "{v}"),
            AbiValue::Bytes(b) | AbiValue::FixedBytes(b) => write!(f, "0x{}", hex::encode(b)),
            AbiValue::Str(s) | AbiValue::Address(s) => write!(f, "{s}"),
            AbiValue::Array(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AbiValue::Tuple(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

/// Convert a JSON input value to the alloy `DynSolValue` for the given type.
///
/// Addresses and integers are parsed directly so that mixed-case addresses
/// are accepted without checksum validation; every other scalar goes
/// through alloy's string coercion.
pub fn json_to_dyn_value(val: &Value, expected: &DynSolType) -> Result<DynSolValue, String> {
    match (val, expected) {
        (Value::String(s), DynSolType::Address) => {
            let addr = Address::from_str(s).map_err(|e| format!("address parse: {e}"))?;
            Ok(DynSolValue::Address(addr))
        }

        (Value::String(_) | Value::Number(_), DynSolType::Uint(bits)) => {
            let raw = scalar_text(val);
            let u = U256::from_str(&raw).map_err(|e| format!("uint parse '{raw}': {e}"))?;
            if u.bit_len() > *bits {
                return Err(format!("{u} overflows uint{bits}"));
            }
            Ok(DynSolValue::Uint(u, *bits))
        }

        (Value::String(_) | Value::Number(_), DynSolType::Int(bits)) => {
            let raw = scalar_text(val);
            let i = I256::from_str(&raw).map_err(|e| format!("int parse '{raw}': {e}"))?;
            if !fits_signed(i, *bits) {
                return Err(format!("{i} out of range for int{bits}"));
            }
            Ok(DynSolValue::Int(i, *bits))
        }

        (Value::Bool(b), DynSolType::Bool) => Ok(DynSolValue::Bool(*b)),

        (Value::Array(elems), DynSolType::Array(inner)) => {
            let dyn_elems: Result<Vec<_>, _> =
                elems.iter().map(|e| json_to_dyn_value(e, inner)).collect();
            Ok(DynSolValue::Array(dyn_elems?))
        }

        (Value::Array(elems), DynSolType::FixedArray(inner, len)) => {
            if elems.len() != *len {
                return Err(format!(
                    "fixed array length mismatch: expected {len}, got {}",
                    elems.len()
                ));
            }
            let dyn_elems: Result<Vec<_>, _> =
                elems.iter().map(|e| json_to_dyn_value(e, inner)).collect();
            Ok(DynSolValue::FixedArray(dyn_elems?))
        }

        (Value::Array(fields), DynSolType::Tuple(types)) => {
            if fields.len() != types.len() {
                return Err(format!(
                    "tuple length mismatch: expected {}, got {}",
                    types.len(),
                    fields.len()
                ));
            }
            let dyn_elems: Result<Vec<_>, _> = fields
                .iter()
                .zip(types.iter())
                .map(|(v, t)| json_to_dyn_value(v, t))
                .collect();
            Ok(DynSolValue::Tuple(dyn_elems?))
        }

        (Value::String(_) | Value::Number(_) | Value::Bool(_), _) => expected
            .coerce_str(&scalar_text(val))
            .map_err(|e| e.to_string()),

        _ => Err(format!("cannot convert {val} to {expected}")),
    }
}

/// `-2^(bits-1) <= i < 2^(bits-1)`; every I256 fits `int256`.
fn fits_signed(i: I256, bits: usize) -> bool {
    if bits == 0 || bits >= 256 {
        return true;
    }
    let bound = I256::from_raw(U256::from(1u8) << (bits - 1));
    i >= -bound && i < bound
}

fn scalar_text(val: &Value) -> String {
    match val {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_value_deserializes_type_field() {
        let tv: TypedValue =
            serde_json::from_value(json!({"type": "uint256", "value": "42"})).unwrap();
        assert_eq!(tv.ty, "uint256");
        assert_eq!(tv.value, json!("42"));
    }

    #[test]
    fn uint_from_number_and_string() {
        let ty = DynSolType::Uint(256);
        let a = json_to_dyn_value(&json!(5), &ty).unwrap();
        let b = json_to_dyn_value(&json!("5"), &ty).unwrap();
        let c = json_to_dyn_value(&json!("0x05"), &ty).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn uint_overflow_is_rejected() {
        let err = json_to_dyn_value(&json!("256"), &DynSolType::Uint(8)).unwrap_err();
        assert!(err.contains("overflows uint8"), "{err}");
    }

    #[test]
    fn int_out_of_range_is_rejected() {
        let ty = DynSolType::Int(8);
        let err = json_to_dyn_value(&json!("1000"), &ty).unwrap_err();
        assert!(err.contains("out of range for int8"), "{err}");
        assert!(json_to_dyn_value(&json!("128"), &ty).is_err());
        assert!(json_to_dyn_value(&json!(-129), &ty).is_err());
    }

    #[test]
    fn int_bounds_are_inclusive_of_min() {
        let ty = DynSolType::Int(8);
        assert!(json_to_dyn_value(&json!("127"), &ty).is_ok());
        assert!(json_to_dyn_value(&json!(-128), &ty).is_ok());
        assert!(json_to_dyn_value(&json!("1000"), &DynSolType::Int(256)).is_ok());
    }

    #[test]
    fn mixed_case_address_accepted() {
        let v = json_to_dyn_value(
            &json!("0x4D97C0CCAB4D2B1F2E3D4C5B6A79880716253443"),
            &DynSolType::Address,
        )
        .unwrap();
        assert!(matches!(v, DynSolValue::Address(_)));
    }

    #[test]
    fn object_value_is_rejected() {
        assert!(json_to_dyn_value(&json!({"a": 1}), &DynSolType::Bool).is_err());
    }

    #[test]
    fn uint_displays_in_decimal() {
        let v = AbiValue::from(DynSolValue::Uint(U256::from(1_000_000u64), 256));
        assert_eq!(v.to_string(), "1000000");
        assert_eq!(v.to_json(), json!("1000000"));
    }

    #[test]
    fn nested_address_keeps_checksum_form() {
        let addr = Address::from_str("0xd8da6bf26964af9d7eed9e03e53415d37aa96045").unwrap();
        let v = AbiValue::from(DynSolValue::Array(vec![DynSolValue::Address(addr)]));
        assert_eq!(
            v,
            AbiValue::Array(vec![AbiValue::Address(
                "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".into()
            )])
        );
    }
}
