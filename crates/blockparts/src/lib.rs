//! # Blockparts - Dynamic Block Template Resolution
//!
//! `blockparts` lets a content-management host render a registered block by
//! resolving its markup from external template files, with a layered
//! fallback strategy and hook points for overriding each resolution step.
//!
//! ## Core Concepts
//!
//! - [`DynamicBlock`]: loads a block's `block.json`, registers its identity,
//!   and resolves each render request to a template file
//! - [`Attributes`]: the caller-supplied attribute dictionary for one render
//! - [`TemplateArguments`]: the ordered name→value dictionary a template
//!   receives
//! - [`HookRegistry`] / [`BlockHooks`]: identity-keyed callback chains that
//!   override the template directory, the argument dictionary, and the
//!   fallback path
//! - [`TemplateEngine`] / [`MiniJinjaEngine`]: the template execution seam
//!   and its default MiniJinja backend
//!
//! ## Resolution Order
//!
//! For a block named `acme/card` whose class names select the `rounded`
//! style, a render tries, in order:
//!
//! ```text
//! {search_root}/template-parts/blocks/acme/card-rounded.jinja
//! {search_root}/template-parts/blocks/acme/card.jinja
//! {block dir}/template.jinja
//! ```
//!
//! (plus the lower-priority extensions `.jinja2`, `.j2`, `.txt` at each
//! step). The first stage that produces output wins; if none does, `render`
//! returns an empty string. Failures never escape the render boundary.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blockparts::{Attributes, BlockHooks, DynamicBlock, HookRegistry};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let hooks = Rc::new(RefCell::new(HookRegistry::new()));
//! hooks.borrow_mut().add(
//!     "acme/card",
//!     BlockHooks::new().template_args(|mut args, _, _| {
//!         args.set("badge", "new");
//!         args
//!     }),
//! );
//!
//! let mut block = DynamicBlock::builder("blocks/card")
//!     .search_root("theme")
//!     .hooks(hooks)
//!     .build();
//!
//! let mut attributes = Attributes::new();
//! attributes.insert("className", "foo is-style-rounded");
//! attributes.insert("align", "wide");
//!
//! // class_name, content and block are set by the pipeline; badge comes
//! // from the hook above.
//! let markup = block.render(&attributes, Some("hi"), None);
//! ```

pub mod args;
pub mod block;
pub mod capture;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod locator;
pub mod metadata;
pub mod registry;
pub mod style;

pub use args::{
    class_names, Attributes, TemplateArguments, ALIGN_ATTR, BLOCK_ARG, CLASS_NAME_ARG,
    CLASS_NAME_ATTR, CONTENT_ARG,
};
pub use block::{
    BlockDescriptor, DynamicBlock, DynamicBlockBuilder, FALLBACK_TEMPLATE_FILE,
};
pub use capture::capture;
pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use error::BlockError;
pub use hooks::{BlockHooks, HookRegistry};
pub use locator::{
    candidate_paths, locate_template, normalize_template_parts_dir, DEFAULT_TEMPLATE_PARTS_DIR,
    TEMPLATE_EXTENSIONS,
};
pub use metadata::{metadata_path, BlockMetadata, BLOCK_METADATA_FILE};
pub use registry::{BlockRegistry, BlockType};
pub use style::{style_name, STYLE_CLASS_PREFIX};
