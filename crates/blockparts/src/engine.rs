//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which allows the render
//! pipeline to work with different template backends. The default
//! implementation is [`MiniJinjaEngine`].
//!
//! Engines execute template *files*: the pipeline has already decided which
//! file to run and with which arguments; the engine reads it, renders it into
//! a caller-provided sink, and reports failures as [`BlockError`] values the
//! pipeline downgrades to "no output". Files are read from disk on every
//! render, so template edits are visible without re-registration.

use std::io::Write;
use std::path::Path;

use minijinja::{Environment, Value};

use crate::args::TemplateArguments;
use crate::capture::capture;
use crate::error::BlockError;

/// A template engine that can execute a template file with arguments.
pub trait TemplateEngine {
    /// Renders the template file at `path` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or the template fails
    /// to compile or render. Callers treat any error as "this resolution
    /// stage produced no output".
    fn render_to(
        &self,
        path: &Path,
        args: &TemplateArguments,
        sink: &mut dyn Write,
    ) -> Result<(), BlockError>;

    /// Renders the template file at `path` with buffered capture.
    ///
    /// On error the partial output is discarded.
    fn render_file(&self, path: &Path, args: &TemplateArguments) -> Result<String, BlockError> {
        capture(|sink| self.render_to(path, args, sink))
    }
}

/// MiniJinja-based template engine.
///
/// # Example
///
/// ```rust,no_run
/// use blockparts::{MiniJinjaEngine, TemplateArguments, TemplateEngine};
/// use std::path::Path;
///
/// let engine = MiniJinjaEngine::new();
/// let mut args = TemplateArguments::new();
/// args.set("class_name", "foo alignwide");
///
/// let markup = engine.render_file(Path::new("card.jinja"), &args).unwrap();
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine with a default environment.
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// Use this to register custom filters or functions templates may call.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_to(
        &self,
        path: &Path,
        args: &TemplateArguments,
        sink: &mut dyn Write,
    ) -> Result<(), BlockError> {
        let source = std::fs::read_to_string(path)?;

        // Compile against a clone so per-render templates never accumulate
        // in the shared environment, while registered filters stay visible.
        let name = path.display().to_string();
        let mut env = self.env.clone();
        env.add_template_owned(name.clone(), source)?;

        let template = env.get_template(&name)?;
        template.render_to_write(Value::from_serialize(args), sink)?;
        Ok(())
    }
}
