//! The dynamic block render pipeline.
//!
//! [`DynamicBlock`] ties the other modules together: it loads a block's
//! metadata, registers the identity with a [`BlockRegistry`], and resolves
//! each render request to a template file with a layered fallback strategy:
//!
//! 1. `{search_root}/{template-parts dir}/{identity}-{style}{ext}`
//! 2. `{search_root}/{template-parts dir}/{identity}{ext}`
//! 3. the block's fallback template (default `{block dir}/template.jinja`)
//!
//! Every step is overridable through the block's [`HookRegistry`] entry.
//!
//! # Failure Semantics
//!
//! Nothing escapes the render boundary. A failed construction leaves the
//! block unregistered and every render returns `""` without touching the
//! filesystem; a missing or failing template degrades to the next stage.
//! The host embeds block output into surrounding content, and a broken
//! block must not take the page down with it. Each swallowed failure emits
//! a `tracing` event instead.
//!
//! # Example
//!
//! ```rust,no_run
//! use blockparts::{Attributes, DynamicBlock};
//!
//! let mut block = DynamicBlock::builder("blocks/card").build();
//!
//! let mut attributes = Attributes::new();
//! attributes.insert("className", "foo is-style-rounded");
//! attributes.insert("align", "wide");
//!
//! let markup = block.render(&attributes, Some("hi"), None);
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::args::{class_names, Attributes, TemplateArguments, BLOCK_ARG, CLASS_NAME_ARG, CONTENT_ARG};
use crate::engine::{MiniJinjaEngine, TemplateEngine};
use crate::error::BlockError;
use crate::hooks::HookRegistry;
use crate::locator::{locate_template, normalize_template_parts_dir, DEFAULT_TEMPLATE_PARTS_DIR};
use crate::metadata::BlockMetadata;
use crate::registry::BlockRegistry;
use crate::style::style_name;

/// Default file name of a block's fallback template, relative to the
/// directory containing its `block.json`.
pub const FALLBACK_TEMPLATE_FILE: &str = "template.jinja";

/// Immutable identity and location data captured at registration.
///
/// Hook callbacks receive the descriptor so they can key their behavior on
/// the block without access to the pipeline's mutable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDescriptor {
    /// Unique namespaced identity, e.g. `acme/card`.
    pub name: String,
    /// Directory containing the block's `block.json`.
    pub dir: PathBuf,
    /// Default fallback template path (before hook overrides).
    pub fallback_template: PathBuf,
}

impl BlockDescriptor {
    /// Creates a descriptor with the default fallback template path.
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let fallback_template = dir.join(FALLBACK_TEMPLATE_FILE);
        Self {
            name: name.into(),
            dir,
            fallback_template,
        }
    }
}

/// A host-registered block that renders itself from template files.
///
/// Constructed through [`DynamicBlock::builder`]. Construction failures
/// (missing metadata, duplicate identity) leave the block in an
/// unregistered state where [`render`](DynamicBlock::render) returns `""`;
/// use [`DynamicBlockBuilder::try_build`] to observe the error instead.
pub struct DynamicBlock {
    descriptor: Option<BlockDescriptor>,
    args: TemplateArguments,
    hooks: Rc<RefCell<HookRegistry>>,
    engine: Rc<dyn TemplateEngine>,
    registry: Rc<RefCell<BlockRegistry>>,
    search_root: PathBuf,
}

impl DynamicBlock {
    /// Starts building a block from a metadata file or its folder.
    pub fn builder(file_or_folder: impl Into<PathBuf>) -> DynamicBlockBuilder {
        DynamicBlockBuilder::new(file_or_folder)
    }

    /// Builds a block with default collaborators.
    ///
    /// Shorthand for `DynamicBlock::builder(path).build()`.
    pub fn new(file_or_folder: impl Into<PathBuf>) -> Self {
        Self::builder(file_or_folder).build()
    }

    /// The registered identity, or `None` when construction failed.
    pub fn name(&self) -> Option<&str> {
        self.descriptor.as_ref().map(|d| d.name.as_str())
    }

    /// Returns true if the block registered successfully.
    pub fn is_registered(&self) -> bool {
        self.descriptor.is_some()
    }

    /// The registration descriptor, when registered.
    pub fn descriptor(&self) -> Option<&BlockDescriptor> {
        self.descriptor.as_ref()
    }

    /// The registry this block registered with.
    pub fn registry(&self) -> Rc<RefCell<BlockRegistry>> {
        Rc::clone(&self.registry)
    }

    /// The hook registry consulted on each render.
    pub fn hooks(&self) -> Rc<RefCell<HookRegistry>> {
        Rc::clone(&self.hooks)
    }

    /// Seeds or overwrites an instance-level template argument.
    ///
    /// The value persists across renders of this block and is visible to
    /// every template the block executes.
    pub fn set_template_argument(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.args.set(key, value);
    }

    /// The accumulated template arguments (defaults plus the values computed
    /// and merged by the most recent render).
    pub fn template_arguments(&self) -> &TemplateArguments {
        &self.args
    }

    /// Renders the block for one request.
    ///
    /// Resolves the template as described in the module docs and returns the
    /// captured markup, or `""` when no stage produces output. Never panics
    /// or returns an error: resolution misses and template failures degrade
    /// to the next stage.
    pub fn render(
        &mut self,
        attributes: &Attributes,
        content: Option<&str>,
        context: Option<Value>,
    ) -> String {
        let Some(descriptor) = self.descriptor.clone() else {
            debug!("render called on an unregistered block");
            return String::new();
        };

        let class_name = class_names(attributes).join(" ");
        let style = style_name(&class_name)
            .filter(|style| !style.is_empty())
            .map(str::to_string);

        let hooks = Rc::clone(&self.hooks);
        let hooks = hooks.borrow();

        let parts_dir = hooks.run_template_dir(
            &descriptor.name,
            DEFAULT_TEMPLATE_PARTS_DIR.to_string(),
            &descriptor,
        );
        let parts_dir = normalize_template_parts_dir(&parts_dir);

        self.args.set(CLASS_NAME_ARG, class_name);
        self.args.set(CONTENT_ARG, content.unwrap_or_default());
        self.args.set(BLOCK_ARG, context.unwrap_or(Value::Null));

        let additional = hooks.run_template_args(
            &descriptor.name,
            TemplateArguments::new(),
            attributes,
            &descriptor,
        );
        self.args.merge(additional);

        let search_dir = self.search_root.join(&parts_dir);
        if let Some(path) = locate_template(&search_dir, &descriptor.name, style.as_deref()) {
            match self.engine.render_file(&path, &self.args) {
                Ok(output) if !output.is_empty() => return output,
                Ok(_) => debug!(path = %path.display(), "primary template produced no output"),
                Err(error) => warn!(path = %path.display(), %error, "primary template failed"),
            }
        } else {
            debug!(
                block = %descriptor.name,
                dir = %search_dir.display(),
                "no primary template found"
            );
        }

        let fallback = hooks.run_fallback_path(
            &descriptor.name,
            descriptor.fallback_template.clone(),
            &descriptor,
        );
        if fallback.is_file() {
            match self.engine.render_file(&fallback, &self.args) {
                Ok(output) => return output,
                Err(error) => warn!(path = %fallback.display(), %error, "fallback template failed"),
            }
        } else {
            debug!(path = %fallback.display(), "no fallback template found");
        }

        String::new()
    }
}

impl std::fmt::Debug for DynamicBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBlock")
            .field("descriptor", &self.descriptor)
            .field("args", &self.args)
            .field("search_root", &self.search_root)
            .finish()
    }
}

/// Builder for [`DynamicBlock`].
///
/// All collaborators are optional; defaults are a fresh [`BlockRegistry`],
/// an empty [`HookRegistry`], a [`MiniJinjaEngine`], and `"."` as the
/// search root. Share a registry across blocks by passing the same
/// `Rc<RefCell<...>>` to each builder.
#[derive(Clone)]
pub struct DynamicBlockBuilder {
    source: PathBuf,
    search_root: PathBuf,
    arguments: TemplateArguments,
    hooks: Option<Rc<RefCell<HookRegistry>>>,
    engine: Option<Rc<dyn TemplateEngine>>,
    registry: Option<Rc<RefCell<BlockRegistry>>>,
}

impl DynamicBlockBuilder {
    fn new(file_or_folder: impl Into<PathBuf>) -> Self {
        Self {
            source: file_or_folder.into(),
            search_root: PathBuf::from("."),
            arguments: TemplateArguments::new(),
            hooks: None,
            engine: None,
            registry: None,
        }
    }

    /// Sets the directory the relative template-parts dir is resolved
    /// against. Defaults to the current directory.
    pub fn search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = root.into();
        self
    }

    /// Seeds an instance-level template argument.
    pub fn argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.set(key, value);
        self
    }

    /// Uses a shared hook registry.
    pub fn hooks(mut self, hooks: Rc<RefCell<HookRegistry>>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Uses a custom template engine.
    pub fn engine<E: TemplateEngine + 'static>(mut self, engine: E) -> Self {
        self.engine = Some(Rc::new(engine));
        self
    }

    /// Uses a shared, already-wrapped engine.
    pub fn engine_rc(mut self, engine: Rc<dyn TemplateEngine>) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Uses a shared block registry.
    pub fn registry(mut self, registry: Rc<RefCell<BlockRegistry>>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds the block, surfacing construction errors.
    ///
    /// # Errors
    ///
    /// Returns the metadata or registration error that `build` would have
    /// swallowed.
    pub fn try_build(self) -> Result<DynamicBlock, BlockError> {
        let (metadata, dir) = BlockMetadata::load(&self.source)?;
        let registry = self.registry.unwrap_or_default();
        registry.borrow_mut().register(&metadata, &dir)?;

        Ok(DynamicBlock {
            descriptor: Some(BlockDescriptor::new(metadata.name, dir)),
            args: self.arguments,
            hooks: self.hooks.unwrap_or_default(),
            engine: self
                .engine
                .unwrap_or_else(|| Rc::new(MiniJinjaEngine::new())),
            registry,
            search_root: self.search_root,
        })
    }

    /// Builds the block, degrading construction failures to an unregistered
    /// instance whose `render` always returns `""`.
    pub fn build(self) -> DynamicBlock {
        let source = self.source.clone();
        match self.clone().try_build() {
            Ok(block) => block,
            Err(error) => {
                debug!(
                    source = %source.display(),
                    %error,
                    "block registration failed; renders will be empty"
                );
                self.into_unregistered()
            }
        }
    }

    fn into_unregistered(self) -> DynamicBlock {
        DynamicBlock {
            descriptor: None,
            args: self.arguments,
            hooks: self.hooks.unwrap_or_default(),
            engine: self
                .engine
                .unwrap_or_else(|| Rc::new(MiniJinjaEngine::new())),
            registry: self.registry.unwrap_or_default(),
            search_root: self.search_root,
        }
    }
}

impl std::fmt::Debug for DynamicBlockBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBlockBuilder")
            .field("source", &self.source)
            .field("search_root", &self.search_root)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_descriptor_default_fallback_path() {
        let descriptor = BlockDescriptor::new("acme/card", "/blocks/card");
        assert_eq!(
            descriptor.fallback_template,
            Path::new("/blocks/card/template.jinja")
        );
    }

    #[test]
    fn test_unregistered_block_renders_empty() {
        let mut block = DynamicBlock::new("/nonexistent/block");
        assert!(!block.is_registered());
        assert_eq!(block.name(), None);

        let mut attributes = Attributes::new();
        attributes.insert("className", "foo");
        assert_eq!(block.render(&attributes, Some("hi"), None), "");
    }

    #[test]
    fn test_try_build_surfaces_missing_metadata() {
        let result = DynamicBlock::builder("/nonexistent/block").try_build();
        assert!(matches!(result, Err(BlockError::MetadataNotFound { .. })));
    }

    #[test]
    fn test_builder_seeds_arguments() {
        let block = DynamicBlock::builder("/nonexistent/block")
            .argument("badge", "new")
            .build();
        assert_eq!(
            block.template_arguments().get("badge"),
            Some(&serde_json::json!("new"))
        );
    }
}
