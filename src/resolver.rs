//! Parent name resolution
//!
//! Paginated fragments usually carry their own `parent_name`; when one does
//! not, the engine falls back to this id-to-name map built from whatever
//! structure the snapshot holds locally: the root, its direct children, and
//! one further nesting level where legacy unpaginated shapes are present.

use std::collections::HashMap;

use crate::models::{MemberFragment, RootSnapshot, Side};

/// Id-to-display-name lookup for one snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentNames {
    names: HashMap<i64, String>,
}

impl ParentNames {
    pub fn from_snapshot(snapshot: &RootSnapshot) -> Self {
        let mut resolver = Self::default();
        resolver.insert(Some(snapshot.id), Some(snapshot.display_name()));

        for side in [Side::Left, Side::Right] {
            let Some(child) = snapshot.child(side) else {
                continue;
            };
            resolver.insert_fragment(&child.fragment);

            for nested_side in [Side::Left, Side::Right] {
                if let Some(nested) = child.fragment.nested_child(nested_side) {
                    resolver.insert_fragment(nested);
                }
            }
        }
        resolver
    }

    pub fn get(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert_fragment(&mut self, fragment: &MemberFragment) {
        self.insert(fragment.node_id, fragment.display_name());
    }

    fn insert(&mut self, id: Option<i64>, name: Option<&str>) {
        if let (Some(id), Some(name)) = (id, name) {
            if !name.is_empty() {
                self.names.entry(id).or_insert_with(|| name.to_string());
            }
        }
    }
}
