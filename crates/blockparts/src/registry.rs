//! Block type registration keyed by identity.
//!
//! The host renders a block by looking up its registered type. The registry
//! enforces the one invariant the rest of the pipeline relies on: a block
//! identity is unique within a registry. Re-registering an identity is
//! rejected, never silently replaced.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::BlockError;
use crate::metadata::BlockMetadata;

/// Handle for a registered block type.
///
/// Cheap to clone; carries the subset of metadata the host consults after
/// registration.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockType {
    /// Unique namespaced identity, e.g. `acme/card`.
    pub name: String,
    /// Human-readable title from the metadata, if any.
    pub title: Option<String>,
    /// Editor category from the metadata, if any.
    pub category: Option<String>,
    /// Directory containing the block's `block.json`.
    pub dir: PathBuf,
}

/// Registry of block types, keyed by identity.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: HashMap<String, BlockType>,
}

impl BlockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a block type from its metadata and base directory.
    ///
    /// Returns a handle exposing the registered identity.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::AlreadyRegistered`] when the identity is taken.
    pub fn register(
        &mut self,
        metadata: &BlockMetadata,
        dir: impl AsRef<Path>,
    ) -> Result<BlockType, BlockError> {
        if self.blocks.contains_key(&metadata.name) {
            return Err(BlockError::AlreadyRegistered {
                name: metadata.name.clone(),
            });
        }

        let block_type = BlockType {
            name: metadata.name.clone(),
            title: metadata.title.clone(),
            category: metadata.category.clone(),
            dir: dir.as_ref().to_path_buf(),
        };
        self.blocks
            .insert(block_type.name.clone(), block_type.clone());

        Ok(block_type)
    }

    /// Returns true if the identity is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Looks up a registered block type by identity.
    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.blocks.get(name)
    }

    /// Removes a registration, returning its handle if it existed.
    pub fn unregister(&mut self, name: &str) -> Option<BlockType> {
        self.blocks.remove(name)
    }

    /// Iterates over registered identities.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(|s| s.as_str())
    }

    /// Returns the number of registered block types.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
