//! Value sources and template rendering for casper
//!
//! Resolves an ordered list of source descriptors into one set of values
//! (later sources win) and renders a template with them.

pub mod descriptor;
pub mod error;
pub mod resolve;
pub mod template;
pub mod values;

pub use descriptor::{CONFIG_SCHEME, FILE_SCHEME, SourceSpec};
pub use error::{Error, Result};
pub use resolve::{load, resolve};
pub use template::{Placeholders, TemplateEngine};
pub use values::Values;
