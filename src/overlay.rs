//! Overlay batches: ordered groups of edits applied to one schema tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::PathError;
use crate::mutate::{delete, optional, require, set};
use crate::types::Mutation;

/// A batch of structural edits.
///
/// Deserializes from the options record written in templates:
///
/// ```yaml
/// require: [properties.name]
/// optional: [properties.deletedAt]
/// omit: [properties.id]
/// include:
///   - [properties.codename, { type: string }]
/// ```
///
/// Groups are applied require → optional → omit → include, each in the
/// order given. Later edits see the tree as left by earlier ones, so an
/// omit that splices an array shifts the indices a later include refers to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Overlay {
    pub require: Vec<String>,
    pub optional: Vec<String>,
    pub omit: Vec<String>,
    pub include: Vec<(String, Value)>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to the `require` group.
    pub fn require(mut self, path: impl Into<String>) -> Self {
        self.require.push(path.into());
        self
    }

    /// Add a path to the `optional` group.
    pub fn optional(mut self, path: impl Into<String>) -> Self {
        self.optional.push(path.into());
        self
    }

    /// Add a path to the `omit` group.
    pub fn omit(mut self, path: impl Into<String>) -> Self {
        self.omit.push(path.into());
        self
    }

    /// Add a `(path, fragment)` pair to the `include` group.
    pub fn include(mut self, path: impl Into<String>, fragment: Value) -> Self {
        self.include.push((path.into(), fragment));
        self
    }

    /// Append every group of `other` after the matching group of `self`.
    pub fn merge(&mut self, other: Overlay) {
        self.require.extend(other.require);
        self.optional.extend(other.optional);
        self.omit.extend(other.omit);
        self.include.extend(other.include);
    }

    pub fn is_empty(&self) -> bool {
        self.require.is_empty()
            && self.optional.is_empty()
            && self.omit.is_empty()
            && self.include.is_empty()
    }

    /// The edits in application order.
    pub fn mutations(&self) -> impl Iterator<Item = Mutation<'_>> {
        let require = self.require.iter().map(|p| Mutation::Require(p));
        let optional = self.optional.iter().map(|p| Mutation::Optional(p));
        let omit = self.omit.iter().map(|p| Mutation::Omit(p));
        let include = self
            .include
            .iter()
            .map(|(p, fragment)| Mutation::Include(p, fragment));

        require.chain(optional).chain(omit).chain(include)
    }

    /// Apply the batch to `tree` in place.
    ///
    /// # Errors
    ///
    /// Stops at the first edit that returns a `PathError`; edits before it
    /// stay applied.
    pub fn apply(&self, tree: &mut Value) -> Result<(), PathError> {
        for mutation in self.mutations() {
            debug!(kind = mutation.kind(), path = mutation.path(), "applying overlay edit");
            apply_mutation(tree, mutation)?;
        }
        Ok(())
    }
}

/// Apply a single edit to `tree`.
pub fn apply_mutation(tree: &mut Value, mutation: Mutation<'_>) -> Result<(), PathError> {
    match mutation {
        Mutation::Require(path) => require(tree, path),
        Mutation::Optional(path) => optional(tree, path),
        Mutation::Omit(path) => delete(tree, path)?,
        Mutation::Include(path, fragment) => set(tree, path, fragment.clone())?,
    }
    Ok(())
}

/// Apply `overlay` to `tree` and hand the same tree back.
///
/// # Errors
///
/// See [`Overlay::apply`].
pub fn apply_overlay(mut tree: Value, overlay: &Overlay) -> Result<Value, PathError> {
    overlay.apply(&mut tree)?;
    Ok(tree)
}
