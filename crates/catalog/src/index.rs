//! Denormalized parent→children association lists.
//!
//! Each index keeps, per parent id, the ordered list of child ids attached to
//! it. Lists are duplicate-free and preserve insertion order. Mutation is
//! serialized per key by the underlying sharded map, so concurrent manager
//! calls touching the same parent cannot interleave inside one list.

use dashmap::DashMap;

use crate::error::{CatalogError, OpResult};

#[derive(Debug)]
pub struct RelationIndex {
    /// Entity kind of the parent, used in not-found messages.
    parent_kind: &'static str,
    /// Entity kind of the children, used in conflict messages.
    child_kind: &'static str,
    entries: DashMap<String, Vec<String>>,
}

impl RelationIndex {
    pub fn new(parent_kind: &'static str, child_kind: &'static str) -> Self {
        Self {
            parent_kind,
            child_kind,
            entries: DashMap::new(),
        }
    }

    /// Make a parent known to the index with an empty child list. Called when
    /// the owning record is created; listing an unregistered parent fails.
    pub fn register(&self, parent_id: &str) {
        self.entries.entry(parent_id.to_string()).or_default();
    }

    /// Forget a parent and its children. Called when the owning record is
    /// removed.
    pub fn unregister(&self, parent_id: &str) {
        self.entries.remove(parent_id);
    }

    pub fn add(&self, parent_id: &str, child_id: &str) -> OpResult<()> {
        let mut children = self.entries.get_mut(parent_id).ok_or_else(|| {
            CatalogError::not_found(self.parent_kind, parent_id)
        })?;
        if children.iter().any(|existing| existing == child_id) {
            return Err(CatalogError::already_exists(
                self.child_kind,
                format!("{parent_id}/{child_id}"),
            ));
        }
        children.push(child_id.to_string());
        Ok(())
    }

    pub fn remove(&self, parent_id: &str, child_id: &str) -> OpResult<()> {
        let Some(mut children) = self.entries.get_mut(parent_id) else {
            return Err(CatalogError::not_found(
                self.child_kind,
                format!("{parent_id}/{child_id}"),
            ));
        };
        let Some(position) = children.iter().position(|existing| existing == child_id) else {
            return Err(CatalogError::not_found(
                self.child_kind,
                format!("{parent_id}/{child_id}"),
            ));
        };
        children.remove(position);
        Ok(())
    }

    /// Children of `parent_id` in insertion order. Empty for a known parent
    /// without children; an unknown parent is an error.
    pub fn list(&self, parent_id: &str) -> OpResult<Vec<String>> {
        self.entries
            .get(parent_id)
            .map(|children| children.clone())
            .ok_or_else(|| CatalogError::not_found(self.parent_kind, parent_id))
    }

    pub fn contains(&self, parent_id: &str, child_id: &str) -> bool {
        self.entries
            .get(parent_id)
            .map(|children| children.iter().any(|existing| existing == child_id))
            .unwrap_or(false)
    }
}
