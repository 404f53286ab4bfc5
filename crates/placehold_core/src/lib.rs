//! # placehold_core
//!
//! Placeholder resolution engine: substitutes `{? expression}` markers
//! embedded in strings, or recursively in nested JSON-like values,
//! against a model value.
//!
//! Placeholder rules:
//!
//! - `{? person/name}` resolves the `/`-separated path against the model
//! - `{? .}` (also `./` and `/`) resolves to the model itself
//! - `{? $PATH}` resolves to an environment variable, only under
//!   [`ResolveOptions::trusted`]
//! - `{? who : stranger}` falls back to a default when the lookup finds
//!   nothing (only a missing value or an explicit null counts as nothing)
//! - `{? when | type: [day]}` attaches structured metadata, handed to the
//!   replacer alongside the resolved value
//!
//! ## Example
//!
//! ```rust
//! use placehold_core::{resolve_str, ResolveOptions};
//! use serde_json::json;
//!
//! let model = json!({"person": {"name": "Juanito"}});
//! let options = ResolveOptions::new();
//! let out = resolve_str("Hello, {? person/name}!", &model, &options).unwrap();
//! assert_eq!(out, "Hello, Juanito!");
//! ```
//!
//! A [`Template`] parses its value once up front and can then be rendered
//! against any number of models.

pub mod error;
pub mod literal;
pub mod path;
pub mod placeholder;
pub mod resolver;
pub mod template;

pub use error::{LiteralError, PlaceholderError, PlaceholderResult};
pub use literal::parse_literal;
pub use path::lookup;
pub use placeholder::Placeholder;
pub use resolver::{
    has, has_str, placeholders, placeholders_str, resolve, resolve_str, EnvReader, Replacer,
    ResolveOptions,
};
pub use template::Template;
