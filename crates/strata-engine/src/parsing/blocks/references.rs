use std::collections::HashMap;

use crate::parsing::tree::DepthTree;

use super::{
    kinds::{ReferenceDefinition, normalize_label},
    types::BlockNode,
};

/// Link reference definitions collected from a finished block tree.
///
/// When several definitions share a label, the first in document order wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    definitions: HashMap<String, ReferenceDefinition>,
    order: Vec<String>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(tree: &DepthTree<BlockNode>) -> Self {
        let mut map = Self::new();
        for (_, node) in tree.iter() {
            if let BlockNode::ReferenceDefinition(r) = node
                && !map.insert(r.label.clone(), r.definition.clone())
            {
                log::debug!("ignoring duplicate reference definition [{}]", r.label);
            }
        }
        map
    }

    /// Adds a definition unless the label is already taken. Returns whether
    /// it was added.
    pub fn insert(&mut self, label: String, definition: ReferenceDefinition) -> bool {
        let label = normalize_label(&label);
        if self.definitions.contains_key(&label) {
            return false;
        }
        self.order.push(label.clone());
        self.definitions.insert(label, definition);
        true
    }

    pub fn get(&self, label: &str) -> Option<&ReferenceDefinition> {
        self.definitions.get(&normalize_label(label))
    }

    /// Definitions in the order they first appeared.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceDefinition)> + '_ {
        self.order
            .iter()
            .filter_map(|label| Some((label.as_str(), self.definitions.get(label)?)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
