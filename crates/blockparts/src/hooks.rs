//! Hook chains for overriding template resolution.
//!
//! Hooks let outside code intercept each step of a block's template
//! resolution without touching the pipeline itself. Dispatch is explicit: a
//! [`HookRegistry`] maps a block identity to its [`BlockHooks`], and each
//! hook point is an ordered chain of callbacks invoked synchronously in
//! registration order. Every callback receives the current value and returns
//! the (possibly replaced) value, so a chain composes as a fold.
//!
//! # Hook Points
//!
//! - Template dir: overrides the relative directory searched for the
//!   primary template. `Fn(String, &BlockDescriptor) -> String`.
//! - Template args: contributes additional template arguments. Receives an
//!   empty dictionary, the render request's attributes, and the descriptor;
//!   whatever it returns is merged into the computed arguments, winning on
//!   key collision. `Fn(TemplateArguments, &Attributes, &BlockDescriptor) ->
//!   TemplateArguments`.
//! - Fallback path: overrides the absolute fallback template path.
//!   `Fn(PathBuf, &BlockDescriptor) -> PathBuf`.
//!
//! Callbacks are infallible; a hook cannot abort a render, only reshape its
//! inputs.
//!
//! # Example
//!
//! ```rust
//! use blockparts::{BlockHooks, HookRegistry};
//!
//! let mut registry = HookRegistry::new();
//! registry.add(
//!     "acme/card",
//!     BlockHooks::new().template_dir(|_, _| "custom/parts".to_string()),
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use crate::args::{Attributes, TemplateArguments};
use crate::block::BlockDescriptor;

/// Type alias for template-dir hook callbacks.
pub type TemplateDirFn = Rc<dyn Fn(String, &BlockDescriptor) -> String>;

/// Type alias for template-arguments hook callbacks.
pub type TemplateArgsFn =
    Rc<dyn Fn(TemplateArguments, &Attributes, &BlockDescriptor) -> TemplateArguments>;

/// Type alias for fallback-path hook callbacks.
pub type FallbackPathFn = Rc<dyn Fn(PathBuf, &BlockDescriptor) -> PathBuf>;

/// Hook chains for one block identity.
///
/// Built with chained registration calls; each call appends to the
/// corresponding chain.
#[derive(Clone, Default)]
pub struct BlockHooks {
    template_dir: Vec<TemplateDirFn>,
    template_args: Vec<TemplateArgsFn>,
    fallback_path: Vec<FallbackPathFn>,
}

impl BlockHooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.template_dir.is_empty()
            && self.template_args.is_empty()
            && self.fallback_path.is_empty()
    }

    /// Adds a template-dir hook.
    pub fn template_dir<F>(mut self, f: F) -> Self
    where
        F: Fn(String, &BlockDescriptor) -> String + 'static,
    {
        self.template_dir.push(Rc::new(f));
        self
    }

    /// Adds a template-arguments hook.
    pub fn template_args<F>(mut self, f: F) -> Self
    where
        F: Fn(TemplateArguments, &Attributes, &BlockDescriptor) -> TemplateArguments + 'static,
    {
        self.template_args.push(Rc::new(f));
        self
    }

    /// Adds a fallback-path hook.
    pub fn fallback_path<F>(mut self, f: F) -> Self
    where
        F: Fn(PathBuf, &BlockDescriptor) -> PathBuf + 'static,
    {
        self.fallback_path.push(Rc::new(f));
        self
    }

    /// Appends every chain from `other` after this set's chains.
    pub fn extend(&mut self, other: BlockHooks) {
        self.template_dir.extend(other.template_dir);
        self.template_args.extend(other.template_args);
        self.fallback_path.extend(other.fallback_path);
    }

    /// Runs the template-dir chain over `dir`.
    pub fn run_template_dir(&self, dir: String, block: &BlockDescriptor) -> String {
        let mut current = dir;
        for hook in &self.template_dir {
            current = hook(current, block);
        }
        current
    }

    /// Runs the template-arguments chain over `args`.
    pub fn run_template_args(
        &self,
        args: TemplateArguments,
        attributes: &Attributes,
        block: &BlockDescriptor,
    ) -> TemplateArguments {
        let mut current = args;
        for hook in &self.template_args {
            current = hook(current, attributes, block);
        }
        current
    }

    /// Runs the fallback-path chain over `path`.
    pub fn run_fallback_path(&self, path: PathBuf, block: &BlockDescriptor) -> PathBuf {
        let mut current = path;
        for hook in &self.fallback_path {
            current = hook(current, block);
        }
        current
    }
}

impl fmt::Debug for BlockHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockHooks")
            .field("template_dir_count", &self.template_dir.len())
            .field("template_args_count", &self.template_args.len())
            .field("fallback_path_count", &self.fallback_path.len())
            .finish()
    }
}

/// Identity-keyed hook storage.
///
/// An identity with no registered hooks passes every value through
/// unchanged; the `run_*` methods encode that so the pipeline never has to
/// special-case "no hooks".
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<String, BlockHooks>,
}

impl HookRegistry {
    /// Creates an empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers hooks for a block identity.
    ///
    /// Repeated calls for the same identity append, preserving registration
    /// order across calls.
    pub fn add(&mut self, name: impl Into<String>, hooks: BlockHooks) {
        self.hooks.entry(name.into()).or_default().extend(hooks);
    }

    /// Returns the hooks registered for an identity, if any.
    pub fn for_block(&self, name: &str) -> Option<&BlockHooks> {
        self.hooks.get(name)
    }

    /// Returns true if no identity has hooks.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Runs the template-dir chain registered for `name` over `dir`.
    pub fn run_template_dir(&self, name: &str, dir: String, block: &BlockDescriptor) -> String {
        match self.hooks.get(name) {
            Some(hooks) => hooks.run_template_dir(dir, block),
            None => dir,
        }
    }

    /// Runs the template-arguments chain registered for `name` over `args`.
    pub fn run_template_args(
        &self,
        name: &str,
        args: TemplateArguments,
        attributes: &Attributes,
        block: &BlockDescriptor,
    ) -> TemplateArguments {
        match self.hooks.get(name) {
            Some(hooks) => hooks.run_template_args(args, attributes, block),
            None => args,
        }
    }

    /// Runs the fallback-path chain registered for `name` over `path`.
    pub fn run_fallback_path(&self, name: &str, path: PathBuf, block: &BlockDescriptor) -> PathBuf {
        match self.hooks.get(name) {
            Some(hooks) => hooks.run_fallback_path(path, block),
            None => path,
        }
    }
}
