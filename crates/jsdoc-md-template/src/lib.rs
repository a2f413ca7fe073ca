#![deny(clippy::all)]

//! Markdown output for enriched doclets.
//!
//! This crate provides:
//! - Assembly of the flat doclet collection into a module/class tree.
//! - A types index and `{@link}` rewriting to markdown links.
//! - Template rendering with minijinja, from a template folder or the
//!   built-in templates.
//! - A table of contents grouped by category.

pub mod error;
pub mod generator;
pub mod helpers;
pub mod links;
pub mod naming;
pub mod resources;
pub mod templates;
pub mod toc;
pub mod tree;

pub use error::{RenderError, Result};
pub use generator::{PublishReport, TemplateOptions, publish};
pub use links::TypesIndex;
pub use naming::doc_file_name;
pub use templates::Templates;
pub use toc::{TocCategory, build_toc};
pub use tree::build_tree;
