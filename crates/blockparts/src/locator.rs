//! Template file location with style qualification and extension priority.
//!
//! Blocks resolve their markup from template part files named after the block
//! identity. Resolution follows a two-phase approach:
//!
//! 1. Candidate listing: [`candidate_paths`] computes every path a lookup may
//!    match, in priority order, without touching the filesystem.
//! 2. Location: [`locate_template`] returns the first candidate that exists.
//!
//! The split keeps the ordering rules testable without disk fixtures.
//!
//! # Candidate Order
//!
//! For identity `acme/card` with style `rounded` under `template-parts/blocks`:
//!
//! ```text
//! template-parts/blocks/acme/card-rounded.jinja
//! template-parts/blocks/acme/card-rounded.jinja2
//! template-parts/blocks/acme/card-rounded.j2
//! template-parts/blocks/acme/card-rounded.txt
//! template-parts/blocks/acme/card.jinja
//! template-parts/blocks/acme/card.jinja2
//! template-parts/blocks/acme/card.j2
//! template-parts/blocks/acme/card.txt
//! ```
//!
//! Every style-qualified name is tried before any bare name, so a lower
//! priority extension on the qualified template still beats the plain one.

use std::path::{Path, PathBuf};

/// Default directory, relative to the search root, where block template
/// parts live. Overridable per block identity through the template-dir hook.
pub const DEFAULT_TEMPLATE_PARTS_DIR: &str = "template-parts/blocks";

/// Recognized template file extensions in priority order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &[".jinja", ".jinja2", ".j2", ".txt"];

/// Strips leading and trailing path separators from a template-parts dir.
///
/// Hook callbacks may hand back values like `"/custom/parts/"`; the
/// separators are trimmed before the dir is joined onto the search root.
pub fn normalize_template_parts_dir(dir: &str) -> String {
    dir.trim_matches(|c| c == '/' || c == '\\').to_string()
}

/// Computes the ordered candidate paths for a template lookup.
///
/// The `base` name may contain `/` separators (namespaced identities such as
/// `acme/card` map to nested directories). When `qualifier` is present, all
/// qualified candidates (`{base}-{qualifier}{ext}`) precede all bare ones.
pub fn candidate_paths(dir: &Path, base: &str, qualifier: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(qualifier) = qualifier {
        for ext in TEMPLATE_EXTENSIONS {
            candidates.push(dir.join(format!("{base}-{qualifier}{ext}")));
        }
    }
    for ext in TEMPLATE_EXTENSIONS {
        candidates.push(dir.join(format!("{base}{ext}")));
    }

    candidates
}

/// Locates the best-matching template file for a block.
///
/// Returns the first path from [`candidate_paths`] that exists as a file, or
/// `None` when no candidate is present on disk.
pub fn locate_template(dir: &Path, base: &str, qualifier: Option<&str>) -> Option<PathBuf> {
    candidate_paths(dir, base, qualifier)
        .into_iter()
        .find(|path| path.is_file())
}
