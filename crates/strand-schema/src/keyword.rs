//! Schema keyword table.
//!
//! One identifier per keyword in the supported subset, with the wire
//! spelling behind [`Keyword::as_str`]. Lookups dispatch on the
//! identifier rather than building keyword strings at each call site.

use crate::decode::ValueType;

/// Identifier for each schema keyword understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    AdditionalItems,
    AdditionalProperties,
    Default,
    Dependencies,
    Description,
    Enum,
    ExclusiveMaximum,
    ExclusiveMinimum,
    Format,
    Items,
    Maximum,
    MaxItems,
    MaxLength,
    MaxProperties,
    Minimum,
    MinItems,
    MinLength,
    MinProperties,
    MultipleOf,
    Pattern,
    Properties,
    Required,
    Title,
    Type,
    UniqueItems,
}

impl Keyword {
    /// The keyword's spelling in schema documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdditionalItems => "additionalItems",
            Self::AdditionalProperties => "additionalProperties",
            Self::Default => "default",
            Self::Dependencies => "dependencies",
            Self::Description => "description",
            Self::Enum => "enum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::Format => "format",
            Self::Items => "items",
            Self::Maximum => "maximum",
            Self::MaxItems => "maxItems",
            Self::MaxLength => "maxLength",
            Self::MaxProperties => "maxProperties",
            Self::Minimum => "minimum",
            Self::MinItems => "minItems",
            Self::MinLength => "minLength",
            Self::MinProperties => "minProperties",
            Self::MultipleOf => "multipleOf",
            Self::Pattern => "pattern",
            Self::Properties => "properties",
            Self::Required => "required",
            Self::Title => "title",
            Self::Type => "type",
            Self::UniqueItems => "uniqueItems",
        }
    }
}

/// The `maximum`-family and `minimum`-family keywords that apply to a
/// node type, with the JSON type their values must carry.
pub(crate) fn bound_keywords(ty: ValueType) -> (Keyword, Keyword, ValueType) {
    match ty {
        ValueType::Array => (Keyword::MaxItems, Keyword::MinItems, ValueType::Integer),
        ValueType::Object => (
            Keyword::MaxProperties,
            Keyword::MinProperties,
            ValueType::Integer,
        ),
        ValueType::String => (Keyword::MaxLength, Keyword::MinLength, ValueType::Integer),
        ValueType::Real => (Keyword::Maximum, Keyword::Minimum, ValueType::Real),
        _ => (Keyword::Maximum, Keyword::Minimum, ValueType::Integer),
    }
}
