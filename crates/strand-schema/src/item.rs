//! Schema item table.
//!
//! Parsing flattens the schema tree into an insertion-ordered table of
//! nodes, appended parent-first in depth order. A node's subtree is the
//! half-open index range `own + 1 .. last_child`; walking structure is
//! index arithmetic over the table, so the whole tree can live in a
//! region sized once up front.

use bitflags::bitflags;
use serde_json::Value;

use crate::keyword::Keyword;
use crate::parse::SchemaError;

bitflags! {
    /// Per-item constraint flags, fixed at parse time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ItemFlags: u8 {
        /// The property must be supplied.
        const REQUIRED = 0b0001;
        /// Array items must be distinct.
        const UNIQUE = 0b0100;
        /// Extra, unvalidated members are permitted.
        const ADDITIONAL = 0b1000;
    }
}

/// Handle to one node in a parsed [`Schema`](crate::Schema).
///
/// Cheap to copy and valid for the lifetime of the schema that issued
/// it. A handle used against a different schema resolves to whatever
/// node sits at that index there, or to a rejection if out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef(pub(crate) usize);

/// One schema tree node, stored by value in the item table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SchemaItem<'doc> {
    pub flags: ItemFlags,
    /// The raw schema sub-object this node was built from. Keyword
    /// values are re-queried from here on demand, never copied out.
    pub node: &'doc Value,
    /// Property key under the parent object; `None` for the root.
    pub name: Option<&'doc str>,
    /// Index of the owning object node; `None` for the root.
    pub parent: Option<usize>,
    /// Exclusive upper bound of this node's subtree in the table.
    /// `own + 1` for leaves.
    pub last_child: usize,
    /// This property's entry in the parent's `"dependencies"` object,
    /// resolved once at parse time.
    pub dependencies: Option<&'doc Value>,
}

/// Storage discipline for the item table, chosen at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// Heap-backed table that grows a node at a time.
    Dynamic,
    /// Table carved once up front; parsing fails when it fills and the
    /// engine never allocates past construction.
    Fixed(usize),
}

impl Capacity {
    /// Node budget for a decoded schema document: one node per schema
    /// object reachable through `"properties"`.
    pub fn for_document(doc: &Value) -> Capacity {
        Capacity::Fixed(node_budget(doc))
    }
}

fn node_budget(value: &Value) -> usize {
    match value.get(Keyword::Properties.as_str()).and_then(Value::as_object) {
        Some(members) => 1 + members.values().map(node_budget).sum::<usize>(),
        None => 1,
    }
}

/// The flat, insertion-ordered node table.
#[derive(Debug)]
pub(crate) enum ItemTable<'doc> {
    Fixed {
        items: Vec<SchemaItem<'doc>>,
        capacity: usize,
    },
    Dynamic {
        items: Vec<SchemaItem<'doc>>,
    },
}

impl<'doc> ItemTable<'doc> {
    pub fn new(capacity: Capacity) -> Self {
        match capacity {
            Capacity::Dynamic => Self::Dynamic { items: Vec::new() },
            Capacity::Fixed(capacity) => Self::Fixed {
                items: Vec::with_capacity(capacity),
                capacity,
            },
        }
    }

    /// Append a node, reporting its index.
    ///
    /// A fixed table at capacity refuses the append; it never grows.
    pub fn push(&mut self, item: SchemaItem<'doc>) -> Result<usize, SchemaError> {
        let items = match self {
            Self::Fixed { items, capacity } => {
                if items.len() == *capacity {
                    return Err(SchemaError::Full {
                        capacity: *capacity,
                    });
                }
                items
            }
            Self::Dynamic { items } => items,
        };
        items.push(item);
        Ok(items.len() - 1)
    }

    pub fn get(&self, index: usize) -> Option<&SchemaItem<'doc>> {
        self.items().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SchemaItem<'doc>> {
        match self {
            Self::Fixed { items, .. } | Self::Dynamic { items } => items.get_mut(index),
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn items(&self) -> &[SchemaItem<'doc>] {
        match self {
            Self::Fixed { items, .. } | Self::Dynamic { items } => items,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf<'doc>(node: &'doc Value) -> SchemaItem<'doc> {
        SchemaItem {
            flags: ItemFlags::empty(),
            node,
            name: None,
            parent: None,
            last_child: 1,
            dependencies: None,
        }
    }

    #[test]
    fn fixed_table_refuses_overflow() {
        let node = json!({"type": "integer"});
        let mut table = ItemTable::new(Capacity::Fixed(2));
        assert_eq!(table.push(leaf(&node)).unwrap(), 0);
        assert_eq!(table.push(leaf(&node)).unwrap(), 1);
        assert!(matches!(
            table.push(leaf(&node)),
            Err(SchemaError::Full { capacity: 2 })
        ));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn dynamic_table_grows() {
        let node = json!({"type": "integer"});
        let mut table = ItemTable::new(Capacity::Dynamic);
        for expected in 0..64 {
            assert_eq!(table.push(leaf(&node)).unwrap(), expected);
        }
        assert!(table.is_dynamic());
    }

    #[test]
    fn node_budget_counts_nested_properties() {
        let doc = json!({
            "type": "object",
            "properties": {
                "net": {
                    "type": "object",
                    "properties": {
                        "port": {"type": "integer"},
                        "host": {"type": "string"}
                    }
                },
                "debug": {"type": "boolean"}
            }
        });
        assert_eq!(Capacity::for_document(&doc), Capacity::Fixed(5));
    }
}
