//! Block attributes and the template argument dictionary.
//!
//! Two insertion-ordered dictionaries flow through a render:
//!
//! - [`Attributes`]: the caller-supplied attribute dictionary for one render
//!   request. The `className` and `align` keys get dedicated accessors
//!   because the pipeline derives the rendered class-name string from them.
//! - [`TemplateArguments`]: the named values handed to the selected template.
//!   Built per render by merging instance-level defaults, computed values,
//!   and hook-supplied additions — later writes win on key collision.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute key carrying the free-form class-name string.
pub const CLASS_NAME_ATTR: &str = "className";

/// Attribute key carrying the alignment token.
pub const ALIGN_ATTR: &str = "align";

/// Argument key for the computed class-name string.
pub const CLASS_NAME_ARG: &str = "class_name";

/// Argument key for the render request's inner content.
pub const CONTENT_ARG: &str = "content";

/// Argument key for the opaque execution context.
pub const BLOCK_ARG: &str = "block";

/// Caller-supplied attributes for a single render request.
///
/// # Example
///
/// ```rust
/// use blockparts::Attributes;
///
/// let mut attributes = Attributes::new();
/// attributes.insert("className", "foo is-style-rounded");
/// attributes.insert("align", "wide");
///
/// assert_eq!(attributes.class_name(), Some("foo is-style-rounded"));
/// assert_eq!(attributes.align(), Some("wide"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, Value>);

impl Attributes {
    /// Creates an empty attribute dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute, replacing any previous value at the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets an attribute value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `className` attribute as a string, if present and a string.
    pub fn class_name(&self) -> Option<&str> {
        self.0.get(CLASS_NAME_ATTR).and_then(Value::as_str)
    }

    /// The `align` attribute as a string, if present and a string.
    pub fn align(&self) -> Option<&str> {
        self.0.get(ALIGN_ATTR).and_then(Value::as_str)
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for Attributes {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Computes the class-name tokens for a render request.
///
/// The `className` attribute is split on single spaces (tokens are preserved
/// verbatim, duplicates included), then an `align{value}` token is appended
/// when the `align` attribute is present. That fixed order is part of the
/// rendered class-name contract.
pub fn class_names(attributes: &Attributes) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    if let Some(class_name) = attributes.class_name() {
        if !class_name.is_empty() {
            classes.extend(class_name.split(' ').map(str::to_string));
        }
    }
    if let Some(align) = attributes.align() {
        if !align.is_empty() {
            classes.push(format!("align{align}"));
        }
    }
    classes
}

/// The named values a template receives, in insertion order.
///
/// The dictionary doubles as per-instance state: values set on a block via
/// [`set_template_argument`](crate::DynamicBlock::set_template_argument)
/// persist across renders, while computed keys are overwritten fresh on each
/// render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateArguments(IndexMap<String, Value>);

impl TemplateArguments {
    /// Creates an empty argument dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an argument, replacing any previous value at the same key.
    ///
    /// Replacing keeps the key's original insertion position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets an argument value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Merges every pair from `additional` into this dictionary.
    ///
    /// Collisions are overwritten: the incoming value wins. This is how
    /// hook-supplied arguments take precedence over computed ones.
    pub fn merge(&mut self, additional: TemplateArguments) {
        for (key, value) in additional.0 {
            self.0.insert(key, value);
        }
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no arguments are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<IndexMap<String, Value>> for TemplateArguments {
    fn from(map: IndexMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for TemplateArguments {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TemplateArguments {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
