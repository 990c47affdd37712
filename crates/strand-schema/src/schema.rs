//! The parsed schema and its node accessors.
//!
//! A [`Schema`] is built exactly once by [`Schema::parse`] and is
//! immutable afterwards. Accessors re-query keyword values from the
//! borrowed document, so returned strings share the document's
//! lifetime, not the schema's.

use serde_json::Value;

use crate::decode::ValueType;
use crate::item::{ItemFlags, ItemRef, ItemTable, SchemaItem};
use crate::keyword::Keyword;

/// A parsed schema document.
///
/// Borrows the decoded [`Value`] it was parsed from. All methods take
/// `&self`; validation is side-effect-free and freely concurrent.
#[derive(Debug)]
pub struct Schema<'doc> {
    pub(crate) items: ItemTable<'doc>,
}

impl<'doc> Schema<'doc> {
    /// Handle to the root node.
    pub fn root(&self) -> ItemRef {
        ItemRef(0)
    }

    /// Number of nodes in the item table.
    pub fn node_count(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn item(&self, item: ItemRef) -> Option<&SchemaItem<'doc>> {
        self.items.get(item.0)
    }

    /// The node's declared type, re-read from its `"type"` keyword.
    ///
    /// [`ValueType::Null`] for a stale handle; a parsed node always
    /// carries one of the six schema types.
    pub fn type_of(&self, item: ItemRef) -> ValueType {
        self.item(item)
            .and_then(|entry| entry.node.get(Keyword::Type.as_str()))
            .and_then(Value::as_str)
            .and_then(ValueType::from_name)
            .unwrap_or(ValueType::Null)
    }

    /// Whether the node's name appears in its parent's `"required"`
    /// array.
    pub fn is_required(&self, item: ItemRef) -> bool {
        self.flags(item).contains(ItemFlags::REQUIRED)
    }

    /// The node's constraint flags. Empty for a stale handle.
    pub fn flags(&self, item: ItemRef) -> ItemFlags {
        self.item(item)
            .map_or(ItemFlags::empty(), |entry| entry.flags)
    }

    /// The node's `"description"`, if declared.
    pub fn description(&self, item: ItemRef) -> Option<&'doc str> {
        self.keyword_str(item, Keyword::Description)
    }

    /// The node's `"title"`, if declared.
    pub fn title(&self, item: ItemRef) -> Option<&'doc str> {
        self.keyword_str(item, Keyword::Title)
    }

    /// The node's `"format"`, if declared. String nodes only; the
    /// keyword is recorded but never evaluated.
    pub fn format(&self, item: ItemRef) -> Option<&'doc str> {
        if self.type_of(item) != ValueType::String {
            return None;
        }
        self.keyword_str(item, Keyword::Format)
    }

    /// The node's `"pattern"`, if declared. String nodes only; the
    /// keyword is recorded but never evaluated.
    pub fn pattern(&self, item: ItemRef) -> Option<&'doc str> {
        if self.type_of(item) != ValueType::String {
            return None;
        }
        self.keyword_str(item, Keyword::Pattern)
    }

    fn keyword_str(&self, item: ItemRef, keyword: Keyword) -> Option<&'doc str> {
        self.item(item)?
            .node
            .get(keyword.as_str())
            .and_then(Value::as_str)
    }

    /// Whether the node's `"dependencies"` constraint is satisfied by
    /// the property names already supplied.
    ///
    /// No constraint means satisfied. A single-string constraint wants
    /// that key among `provided`; an array constraint is satisfied by
    /// any one of its entries. Any other constraint shape satisfies
    /// nothing.
    pub fn dependencies_achieved(&self, item: ItemRef, provided: &[&str]) -> bool {
        let Some(entry) = self.item(item) else {
            return false;
        };
        let Some(deps) = entry.dependencies else {
            return true;
        };
        match deps {
            Value::String(want) => provided.iter().any(|key| *key == want.as_str()),
            Value::Array(entries) => entries
                .iter()
                .filter_map(Value::as_str)
                .any(|want| provided.iter().any(|key| *key == want)),
            _ => false,
        }
    }
}
