//! Keyword validators.
//!
//! Four predicate engines, one per scalar schema type, each checking a
//! candidate value's text against the constraints recorded on a node.
//! Constraint keyword values are re-read from the borrowed document at
//! every call; nothing is cached between validations.
//!
//! ## Rejection Is Not Failure
//!
//! A [`Rejection`] is the engine working as intended: the schema was
//! usable and the value did not pass. Rejecting one value has no
//! effect on later validations against the same schema.
//!
//! ## Empty Values
//!
//! An empty value text means "not supplied". Every validator accepts
//! it unless the node carries the required flag, in which case it
//! rejects with [`Rejection::Required`] before any other check runs.

use serde_json::Value;
use thiserror::Error;

use strand_core::numeric;

use crate::decode::{self, ValueType};
use crate::item::{ItemFlags, ItemRef, SchemaItem};
use crate::keyword::Keyword;
use crate::schema::Schema;

/// Tokens accepted as boolean true, compared ASCII-case-insensitively.
const TRUE_TOKENS: [&str; 6] = ["y", "yes", "t", "true", "on", "1"];
/// Tokens accepted as boolean false.
const FALSE_TOKENS: [&str; 6] = ["n", "no", "f", "false", "off", "0"];

/// Tolerance for the real `multipleOf` remainder, relative to the
/// multiple. Exact equality would spuriously fail on values that are
/// not representable in binary floating point.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// Why a candidate value was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The handle is stale or the node's declared type does not match
    /// the validator that was called.
    #[error("invalid object")]
    InvalidNode,

    /// No value was supplied for a required property.
    #[error("value is required")]
    Required,

    /// The text is not a parsable number.
    #[error("invalid number")]
    InvalidNumber,

    /// The text is none of the accepted boolean spellings.
    #[error(
        "invalid boolean value (acceptable values are: y, n, yes, no, t, f, true, false, on, off, 1 or 0)"
    )]
    InvalidBoolean,

    /// The value exceeds the node's maximum.
    #[error("value is greater than maximum")]
    AboveMaximum,

    /// The value falls below the node's minimum.
    #[error("value is less than minimum")]
    BelowMinimum,

    /// The value is not a multiple of the node's `multipleOf`.
    #[error("value is not a valid multiple")]
    NotMultiple,

    /// A constraint keyword in the schema carries an unusable value,
    /// discovered while validating against it.
    #[error("invalid '{0}' value")]
    BadKeyword(&'static str),

    /// The string is longer than `maxLength`.
    #[error("string is too long")]
    TooLong,

    /// The string is shorter than `minLength`.
    #[error("string is too short")]
    TooShort,

    /// The string matches no `enum` entry. Heap-backed schemas carry
    /// the acceptable entries; fixed-buffer schemas keep the generic
    /// message.
    #[error(
        "value not in accepted list{}",
        .acceptable
            .as_deref()
            .map(|list| format!(" (acceptable values are: {list})"))
            .unwrap_or_default()
    )]
    NotInEnum {
        /// Comma-separated acceptable entries, when buildable.
        acceptable: Option<String>,
    },

    /// Array content validation is not implemented.
    #[error("array validation not implemented")]
    ArrayUnsupported,
}

impl<'doc> Schema<'doc> {
    /// Validate a boolean value's text against a boolean node.
    pub fn validate_bool(&self, item: ItemRef, value: &str) -> Result<(), Rejection> {
        let entry = self.typed_item(item, ValueType::Bool)?;
        if value.is_empty() {
            return required_check(entry);
        }
        let known = TRUE_TOKENS
            .iter()
            .chain(FALSE_TOKENS.iter())
            .any(|token| value.eq_ignore_ascii_case(token));
        if known {
            Ok(())
        } else {
            Err(Rejection::InvalidBoolean)
        }
    }

    /// Validate an integer value's text against an integer node.
    ///
    /// Checks, in order: `exclusiveMaximum`/`exclusiveMinimum` shape,
    /// `maximum`, `minimum`, `multipleOf`.
    pub fn validate_integer(&self, item: ItemRef, value: &str) -> Result<(), Rejection> {
        let entry = self.typed_item(item, ValueType::Integer)?;
        if value.is_empty() {
            return required_check(entry);
        }
        let parsed =
            numeric::parse_integer(value).map_err(|_| Rejection::InvalidNumber)?;
        let node = entry.node;

        let exclusive_max = exclusive_flag(node, Keyword::ExclusiveMaximum)?;
        let exclusive_min = exclusive_flag(node, Keyword::ExclusiveMinimum)?;

        if let Some(maximum) = bound_i64(node, Keyword::Maximum)? {
            if parsed > maximum || (exclusive_max && parsed == maximum) {
                return Err(Rejection::AboveMaximum);
            }
        }
        if let Some(minimum) = bound_i64(node, Keyword::Minimum)? {
            if parsed < minimum || (exclusive_min && parsed == minimum) {
                return Err(Rejection::BelowMinimum);
            }
        }
        if let Some(multiple) = bound_i64(node, Keyword::MultipleOf)? {
            match parsed.checked_rem(multiple) {
                Some(0) => {}
                Some(_) => return Err(Rejection::NotMultiple),
                None => {
                    return Err(Rejection::BadKeyword(Keyword::MultipleOf.as_str()))
                }
            }
        }
        Ok(())
    }

    /// Validate a real value's text against a `number` node.
    ///
    /// Same check order as [`Schema::validate_integer`], except
    /// `multipleOf` uses a relative-epsilon remainder to tolerate
    /// binary floating-point error.
    pub fn validate_real(&self, item: ItemRef, value: &str) -> Result<(), Rejection> {
        let entry = self.typed_item(item, ValueType::Real)?;
        if value.is_empty() {
            return required_check(entry);
        }
        let parsed = numeric::parse_real(value).map_err(|_| Rejection::InvalidNumber)?;
        let node = entry.node;

        let exclusive_max = exclusive_flag(node, Keyword::ExclusiveMaximum)?;
        let exclusive_min = exclusive_flag(node, Keyword::ExclusiveMinimum)?;

        if let Some(maximum) = bound_f64(node, Keyword::Maximum)? {
            let out = if exclusive_max {
                parsed >= maximum
            } else {
                parsed > maximum
            };
            if out {
                return Err(Rejection::AboveMaximum);
            }
        }
        if let Some(minimum) = bound_f64(node, Keyword::Minimum)? {
            let out = if exclusive_min {
                parsed <= minimum
            } else {
                parsed < minimum
            };
            if out {
                return Err(Rejection::BelowMinimum);
            }
        }
        if let Some(multiple) = bound_f64(node, Keyword::MultipleOf)? {
            if multiple <= 0.0 {
                return Err(Rejection::BadKeyword(Keyword::MultipleOf.as_str()));
            }
            // Distance to the nearest multiple.
            let remainder = parsed - (parsed / multiple).round() * multiple;
            if remainder.abs() > MULTIPLE_OF_EPSILON * multiple {
                return Err(Rejection::NotMultiple);
            }
        }
        Ok(())
    }

    /// Validate a string value against a string node.
    ///
    /// Checks `enum` membership first, then `maxLength`/`minLength`.
    /// Lengths are byte lengths. `pattern` and `format` are never
    /// evaluated.
    pub fn validate_string(&self, item: ItemRef, value: &str) -> Result<(), Rejection> {
        let entry = self.typed_item(item, ValueType::String)?;
        if value.is_empty() {
            return required_check(entry);
        }
        let node = entry.node;

        if let Some(options) = node.get(Keyword::Enum.as_str()) {
            let entries = options
                .as_array()
                .ok_or(Rejection::BadKeyword(Keyword::Enum.as_str()))?;
            let matched = entries
                .iter()
                .filter_map(Value::as_str)
                .any(|option| option == value);
            if !matched {
                let acceptable = self.is_dynamic().then(|| {
                    entries
                        .iter()
                        .filter_map(Value::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                });
                return Err(Rejection::NotInEnum { acceptable });
            }
        }

        if let Some(max) = length_bound(node, Keyword::MaxLength)? {
            if value.len() > max {
                return Err(Rejection::TooLong);
            }
        }
        if let Some(min) = length_bound(node, Keyword::MinLength)? {
            if value.len() < min {
                return Err(Rejection::TooShort);
            }
        }
        Ok(())
    }

    /// Array content validation is not implemented; every candidate
    /// value is rejected.
    pub fn validate_array(&self, _item: ItemRef, _value: &str) -> Result<(), Rejection> {
        Err(Rejection::ArrayUnsupported)
    }

    fn typed_item(
        &self,
        item: ItemRef,
        want: ValueType,
    ) -> Result<&SchemaItem<'doc>, Rejection> {
        let entry = self.item(item).ok_or(Rejection::InvalidNode)?;
        if self.type_of(item) != want {
            return Err(Rejection::InvalidNode);
        }
        Ok(entry)
    }

    fn is_dynamic(&self) -> bool {
        self.items.is_dynamic()
    }
}

fn required_check(entry: &SchemaItem<'_>) -> Result<(), Rejection> {
    if entry.flags.contains(ItemFlags::REQUIRED) {
        Err(Rejection::Required)
    } else {
        Ok(())
    }
}

/// Read `exclusiveMaximum`/`exclusiveMinimum` at validation time.
/// Present but not boolean rejects the value outright.
fn exclusive_flag(node: &Value, keyword: Keyword) -> Result<bool, Rejection> {
    match node.get(keyword.as_str()) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(Rejection::BadKeyword(keyword.as_str())),
    }
}

/// Read an integer-typed bound keyword at validation time.
fn bound_i64(node: &Value, keyword: Keyword) -> Result<Option<i64>, Rejection> {
    match node.get(keyword.as_str()) {
        None => Ok(None),
        Some(value) if decode::kind(value) == ValueType::Integer => value
            .as_i64()
            .map(Some)
            .ok_or(Rejection::BadKeyword(keyword.as_str())),
        Some(_) => Err(Rejection::BadKeyword(keyword.as_str())),
    }
}

/// Read a real-typed bound keyword at validation time.
fn bound_f64(node: &Value, keyword: Keyword) -> Result<Option<f64>, Rejection> {
    match node.get(keyword.as_str()) {
        None => Ok(None),
        Some(value) if decode::kind(value) == ValueType::Real => value
            .as_f64()
            .map(Some)
            .ok_or(Rejection::BadKeyword(keyword.as_str())),
        Some(_) => Err(Rejection::BadKeyword(keyword.as_str())),
    }
}

/// `maxLength`/`minLength` must be non-negative integers; anything
/// else rejects the value as a schema-shape problem surfaced at
/// validation time.
fn length_bound(node: &Value, keyword: Keyword) -> Result<Option<usize>, Rejection> {
    match node.get(keyword.as_str()) {
        None => Ok(None),
        Some(value) => match value.as_i64() {
            Some(n) if n >= 0 => Ok(Some(n as usize)),
            _ => Err(Rejection::BadKeyword(keyword.as_str())),
        },
    }
}
