//! The chain of ancestors above the entity being solved.
//!
//! Each recursive call extends its caller's path with a node living in its
//! own stack frame, so a path is never shared or mutated once built.

use crate::registry::{EntityId, Stack};

/// Ancestors from the entry stack down to (not including) the current one
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionPath<'a> {
    head: Option<&'a PathNode<'a>>,
    len: usize,
}

/// One ancestor plus the path above it
#[derive(Debug)]
pub struct PathNode<'a> {
    stack: &'a Stack,
    parent: RecursionPath<'a>,
}

impl<'a> RecursionPath<'a> {
    /// Path for a top-level solve
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the node that makes `stack` the innermost ancestor
    pub fn extend(self, stack: &'a Stack) -> PathNode<'a> {
        PathNode {
            stack,
            parent: self,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.entities().any(|e| e == entity)
    }

    /// Ancestor entities, innermost first
    pub fn entities(self) -> impl Iterator<Item = &'a EntityId> {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let node = cursor?;
            cursor = node.parent.head;
            Some(&node.stack.entity)
        })
    }
}

impl PathNode<'_> {
    /// The extended path
    pub fn path(&self) -> RecursionPath<'_> {
        RecursionPath {
            head: Some(self),
            len: self.parent.len + 1,
        }
    }
}
