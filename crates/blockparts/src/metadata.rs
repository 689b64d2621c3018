//! Block metadata loading from `block.json` descriptors.
//!
//! A block ships a JSON metadata document describing its identity and
//! editor-facing surface. This module loads and validates that document.
//! The only field the pipeline requires is `name`; the rest is carried
//! through to the registry handle for the host's benefit.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::BlockError;

/// File name of the block metadata descriptor.
pub const BLOCK_METADATA_FILE: &str = "block.json";

/// The parsed `block.json` document.
///
/// Unknown fields are ignored; the descriptor schema grows over time and this
/// library only interprets the subset below.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockMetadata {
    /// Unique namespaced block identity, e.g. `acme/card`.
    pub name: String,

    /// Human-readable block title.
    #[serde(default)]
    pub title: Option<String>,

    /// Short description shown in the editor.
    #[serde(default)]
    pub description: Option<String>,

    /// Editor category the block is listed under.
    #[serde(default)]
    pub category: Option<String>,

    /// Icon slug.
    #[serde(default)]
    pub icon: Option<String>,

    /// Metadata schema version.
    #[serde(default, rename = "apiVersion")]
    pub api_version: Option<u32>,

    /// Attribute schema (opaque to this library).
    #[serde(default)]
    pub attributes: Option<Value>,

    /// Feature support flags (opaque to this library).
    #[serde(default)]
    pub supports: Option<Value>,
}

/// Resolves the metadata file path from a file-or-folder location.
///
/// A path whose file name is already `block.json` is used as-is; any other
/// path is treated as the folder containing it.
pub fn metadata_path(file_or_folder: &Path) -> PathBuf {
    if file_or_folder.file_name() == Some(OsStr::new(BLOCK_METADATA_FILE)) {
        file_or_folder.to_path_buf()
    } else {
        file_or_folder.join(BLOCK_METADATA_FILE)
    }
}

impl BlockMetadata {
    /// Loads and validates block metadata from a file or folder path.
    ///
    /// Returns the metadata together with the block's base directory (the
    /// metadata file's parent), which backs template fallback resolution.
    ///
    /// # Errors
    ///
    /// - [`BlockError::MetadataNotFound`] when the file does not exist
    /// - [`BlockError::MetadataInvalid`] for unparseable JSON or a
    ///   missing/empty `name`
    pub fn load(file_or_folder: impl AsRef<Path>) -> Result<(Self, PathBuf), BlockError> {
        let metadata_file = metadata_path(file_or_folder.as_ref());
        if !metadata_file.is_file() {
            return Err(BlockError::MetadataNotFound {
                path: metadata_file,
            });
        }

        let raw = fs::read_to_string(&metadata_file)?;
        let metadata: Self =
            serde_json::from_str(&raw).map_err(|err| BlockError::MetadataInvalid {
                path: metadata_file.clone(),
                message: err.to_string(),
            })?;

        if metadata.name.is_empty() {
            return Err(BlockError::MetadataInvalid {
                path: metadata_file,
                message: "block name is missing or empty".to_string(),
            });
        }

        let dir = metadata_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok((metadata, dir))
    }
}
