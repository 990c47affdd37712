//! Schema document parsing.
//!
//! Walks the decoded schema document depth-first, objects before their
//! properties, appending one item-table node per schema object and
//! validating the shape of every keyword it recognizes along the way.
//!
//! ## Failure Policy
//!
//! Parsing is all-or-nothing. Any keyword-shape violation, a missing
//! `"type"`, or a full fixed-capacity table aborts the whole parse and
//! the partially built table is dropped. No partial schema is ever
//! returned.

use serde_json::Value;
use thiserror::Error;

use crate::decode::{self, ValueType};
use crate::item::{Capacity, ItemFlags, ItemTable, SchemaItem};
use crate::keyword::{bound_keywords, Keyword};
use crate::schema::Schema;

/// Error from schema construction.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema text itself is not valid JSON.
    #[error("schema text is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// A keyword in the decoded document has the wrong shape.
    #[error("malformed schema: {reason}")]
    Malformed {
        /// What was wrong, in the engine's message vocabulary.
        reason: &'static str,
    },

    /// The fixed-capacity item table filled before the document was
    /// fully parsed.
    #[error("schema item table is full ({capacity} items)")]
    Full {
        /// The capacity the table was created with.
        capacity: usize,
    },
}

fn malformed(reason: &'static str) -> SchemaError {
    SchemaError::Malformed { reason }
}

/// Parse context handed from an object node down to each property.
#[derive(Clone, Copy)]
struct NodeContext<'doc> {
    parent: Option<usize>,
    name: Option<&'doc str>,
    /// The parent object's `"required"` array.
    required: Option<&'doc Value>,
    /// The parent object's `"dependencies"` object.
    dependencies: Option<&'doc Value>,
}

impl<'doc> NodeContext<'doc> {
    fn root() -> Self {
        NodeContext {
            parent: None,
            name: None,
            required: None,
            dependencies: None,
        }
    }
}

impl<'doc> Schema<'doc> {
    /// Build a schema from an externally decoded document.
    ///
    /// The schema borrows `doc` for its whole lifetime; keyword values
    /// are re-queried from it during validation rather than copied.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Malformed`] for a missing or unusable `"type"`,
    /// a scalar root, or any recognized keyword of the wrong shape.
    /// [`SchemaError::Full`] when a [`Capacity::Fixed`] table fills.
    pub fn parse(doc: &'doc Value, capacity: Capacity) -> Result<Self, SchemaError> {
        let mut items = ItemTable::new(capacity);
        parse_node(doc, &mut items, NodeContext::root(), true)?;
        Ok(Schema { items })
    }
}

fn parse_node<'doc>(
    node: &'doc Value,
    items: &mut ItemTable<'doc>,
    ctx: NodeContext<'doc>,
    is_root: bool,
) -> Result<usize, SchemaError> {
    let type_name = node
        .get(Keyword::Type.as_str())
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("'type' field not found"))?;
    let ty = ValueType::from_name(type_name)
        .ok_or_else(|| malformed("unsupported 'type' value"))?;
    if is_root && !matches!(ty, ValueType::Object | ValueType::Array) {
        return Err(malformed("schema root must be an object or array"));
    }
    append_item(node, ty, items, ctx)
}

fn append_item<'doc>(
    node: &'doc Value,
    ty: ValueType,
    items: &mut ItemTable<'doc>,
    ctx: NodeContext<'doc>,
) -> Result<usize, SchemaError> {
    let mut flags = ItemFlags::empty();

    // Type-specific keyword shapes.
    match ty {
        ValueType::Array => {
            if keyword_flag(node, Keyword::UniqueItems, "'uniqueItems' is not of correct type")? {
                flags |= ItemFlags::UNIQUE;
            }
            if keyword_flag(
                node,
                Keyword::AdditionalItems,
                "'additionalItems' is not of correct type",
            )? {
                flags |= ItemFlags::ADDITIONAL;
            }
            check_kind(node, Keyword::Items, ValueType::Array, "'items' is not of correct type")?;
        }
        ValueType::Integer | ValueType::Real => {
            keyword_flag(
                node,
                Keyword::ExclusiveMaximum,
                "'exclusiveMaximum' is not of correct type",
            )?;
            keyword_flag(
                node,
                Keyword::ExclusiveMinimum,
                "'exclusiveMinimum' is not of correct type",
            )?;
            check_kind(node, Keyword::MultipleOf, ty, "'multipleOf' is not of correct type")?;
        }
        ValueType::String => {
            check_kind(
                node,
                Keyword::Pattern,
                ValueType::String,
                "'pattern' is not of correct type",
            )?;
            check_kind(
                node,
                Keyword::Format,
                ValueType::String,
                "'format' is not of correct type",
            )?;
        }
        ValueType::Object => {
            if let Some(extra) = node.get(Keyword::AdditionalProperties.as_str()) {
                match extra {
                    Value::Bool(true) => flags |= ItemFlags::ADDITIONAL,
                    Value::Bool(false) | Value::Object(_) => {}
                    _ => {
                        return Err(malformed(
                            "'additionalProperties' is not of correct type",
                        ))
                    }
                }
            }
        }
        ValueType::Bool | ValueType::Null => {}
    }

    // Keyword shapes checked on every node type.
    check_kind(node, Keyword::Default, ty, "'default' is not of correct type")?;
    check_kind(
        node,
        Keyword::Description,
        ValueType::String,
        "'description' is not a string",
    )?;
    check_kind(node, Keyword::Title, ValueType::String, "'title' is not a string")?;

    let (max_keyword, min_keyword, bound_type) = bound_keywords(ty);
    check_kind(node, max_keyword, bound_type, "item maximum is of wrong type")?;
    check_kind(node, min_keyword, bound_type, "item minimum is of wrong type")?;

    check_enum(node, ty)?;

    // This property's entry in the parent's "dependencies" object.
    let mut dependencies = None;
    if let (Some(name), Some(deps)) = (ctx.name, ctx.dependencies) {
        let entries = deps
            .as_object()
            .ok_or_else(|| malformed("'dependencies' should be an object"))?;
        dependencies = entries.get(name);
    }

    // Membership in the parent's "required" array.
    if let (Some(name), Some(required)) = (ctx.name, ctx.required) {
        if required_contains(required, name)? {
            flags |= ItemFlags::REQUIRED;
        }
    }

    let own = items.len();
    items.push(SchemaItem {
        flags,
        node,
        name: ctx.name,
        parent: ctx.parent,
        last_child: own + 1,
        dependencies,
    })?;

    if ty == ValueType::Object {
        let required = node.get(Keyword::Required.as_str());
        let dependencies = node.get(Keyword::Dependencies.as_str());
        if let Some(properties) = node.get(Keyword::Properties.as_str()) {
            let members = properties
                .as_object()
                .ok_or_else(|| malformed("'properties' is not of correct type"))?;
            for (key, child) in members {
                parse_node(
                    child,
                    items,
                    NodeContext {
                        parent: Some(own),
                        name: Some(key),
                        required,
                        dependencies,
                    },
                    false,
                )?;
            }
        }
        if let Some(entry) = items.get_mut(own) {
            entry.last_child = items.len();
        }
    }

    Ok(own)
}

/// Read an optional boolean keyword, failing on any other shape.
fn keyword_flag(
    node: &Value,
    keyword: Keyword,
    reason: &'static str,
) -> Result<bool, SchemaError> {
    match node.get(keyword.as_str()) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(malformed(reason)),
    }
}

/// Require an optional keyword, when present, to carry the given type.
fn check_kind(
    node: &Value,
    keyword: Keyword,
    want: ValueType,
    reason: &'static str,
) -> Result<(), SchemaError> {
    match node.get(keyword.as_str()) {
        Some(value) if decode::kind(value) != want => Err(malformed(reason)),
        _ => Ok(()),
    }
}

/// `enum` must be an array, and its entries must match the node's own
/// type unless the node is an object.
fn check_enum(node: &Value, ty: ValueType) -> Result<(), SchemaError> {
    let Some(options) = node.get(Keyword::Enum.as_str()) else {
        return Ok(());
    };
    let entries = options
        .as_array()
        .ok_or_else(|| malformed("'enum' is not an array"))?;
    if ty != ValueType::Object {
        for entry in entries {
            if decode::kind(entry) != ty {
                return Err(malformed("'enum' contains invalid item"));
            }
        }
    }
    Ok(())
}

fn required_contains(required: &Value, name: &str) -> Result<bool, SchemaError> {
    let entries = required
        .as_array()
        .ok_or_else(|| malformed("'required' should be an array of strings"))?;
    for entry in entries {
        let listed = entry
            .as_str()
            .ok_or_else(|| malformed("'required' should be an array of strings"))?;
        if listed == name {
            return Ok(true);
        }
    }
    Ok(false)
}
