//! Iteration over an object node's direct children.
//!
//! No recursion and no child pointers: the cursor scans forward
//! through the item table from the object's own index, keeps entries
//! whose parent index matches, and stops at the subtree's exclusive
//! upper bound. Grandchildren fall inside the scanned range but fail
//! the parent filter.

use crate::decode::ValueType;
use crate::item::ItemRef;
use crate::schema::Schema;

/// Iterator over the direct children of an object node.
///
/// Yields each property's key alongside its node handle.
#[derive(Debug, Clone)]
pub struct Properties<'s, 'doc> {
    schema: &'s Schema<'doc>,
    parent: usize,
    cursor: usize,
    end: usize,
}

impl<'doc> Schema<'doc> {
    /// Iterate the direct children of an object node.
    ///
    /// Yields nothing when the handle is stale, the node is not an
    /// object, or the object declares no properties.
    pub fn properties(&self, item: ItemRef) -> Properties<'_, 'doc> {
        let end = match self.item(item) {
            Some(entry) if self.type_of(item) == ValueType::Object => entry.last_child,
            _ => 0,
        };
        Properties {
            schema: self,
            parent: item.0,
            cursor: (item.0 + 1).min(end),
            end,
        }
    }
}

impl<'s, 'doc> Iterator for Properties<'s, 'doc> {
    type Item = (Option<&'doc str>, ItemRef);

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < self.end {
            let index = self.cursor;
            self.cursor += 1;
            let entry = self.schema.item(ItemRef(index))?;
            if entry.parent == Some(self.parent) {
                return Some((entry.name, ItemRef(index)));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::item::Capacity;
    use crate::schema::Schema;

    const DOC: &str = r#"{
        "type": "object",
        "properties": {
            "net": {
                "type": "object",
                "properties": {
                    "host": {"type": "string"},
                    "port": {"type": "integer"}
                }
            },
            "debug": {"type": "boolean"}
        }
    }"#;

    #[test]
    fn yields_direct_children_only() {
        let doc = decode(DOC).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        let mut names: Vec<_> = schema
            .properties(schema.root())
            .map(|(name, _)| name.unwrap())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["debug", "net"]);
    }

    #[test]
    fn descends_one_level_at_a_time() {
        let doc = decode(DOC).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        let (_, net) = schema
            .properties(schema.root())
            .find(|(name, _)| *name == Some("net"))
            .unwrap();
        let mut names: Vec<_> = schema
            .properties(net)
            .map(|(name, _)| name.unwrap())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["host", "port"]);
    }

    #[test]
    fn non_objects_yield_nothing() {
        let doc = decode(DOC).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        let (_, debug) = schema
            .properties(schema.root())
            .find(|(name, _)| *name == Some("debug"))
            .unwrap();
        assert_eq!(schema.properties(debug).count(), 0);
        assert_eq!(schema.properties(ItemRef(99)).count(), 0);
    }

    #[test]
    fn empty_object_yields_nothing() {
        let doc = decode(r#"{"type": "object", "properties": {}}"#).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        assert_eq!(schema.properties(schema.root()).count(), 0);

        let doc = decode(r#"{"type": "object"}"#).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        assert_eq!(schema.properties(schema.root()).count(), 0);
    }

    #[test]
    fn handles_resolve_back_to_nodes() {
        let doc = decode(DOC).unwrap();
        let schema = Schema::parse(&doc, Capacity::Dynamic).unwrap();
        for (name, item) in schema.properties(schema.root()) {
            let ty = schema.type_of(item);
            match name {
                Some("net") => assert_eq!(ty, ValueType::Object),
                Some("debug") => assert_eq!(ty, ValueType::Bool),
                other => panic!("unexpected property {other:?}"),
            }
        }
    }
}
