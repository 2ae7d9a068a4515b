// Wed Jan 14 2026 - Alex

use crate::structure::PrimitiveValue;
use indexmap::IndexMap;

/// Parsed contents of a struct, mirroring its declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTree {
    Leaf(PrimitiveValue),
    Struct(IndexMap<String, ValueTree>),
}

impl ValueTree {
    pub fn get(&self, name: &str) -> Option<&ValueTree> {
        match self {
            Self::Struct(children) => children.get(name),
            Self::Leaf(_) => None,
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ValueTree> {
        match self {
            Self::Struct(children) => children.get_mut(name),
            Self::Leaf(_) => None,
        }
    }

    /// Follows a dotted path such as `header.size` or `items.2.id`.
    pub fn path(&self, path: &str) -> Option<&ValueTree> {
        path.split('.').try_fold(self, |node, part| node.get(part))
    }

    pub fn as_leaf(&self) -> Option<&PrimitiveValue> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Struct(_) => None,
        }
    }

    pub fn value(&self) -> Option<i64> {
        self.as_leaf().map(PrimitiveValue::value)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Leaf values in declaration order, depth first.
    pub fn leaves(&self) -> Vec<&PrimitiveValue> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a PrimitiveValue>) {
        match self {
            Self::Leaf(value) => out.push(value),
            Self::Struct(children) => {
                for child in children.values() {
                    child.collect_leaves(out);
                }
            }
        }
    }
}
