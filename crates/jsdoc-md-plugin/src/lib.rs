#![deny(clippy::all)]

//! Doclet enrichment for markdown documentation output.
//!
//! This crate provides:
//! - A doclet model matching the JSDoc JSON dump, unknown keys preserved.
//! - An ordered rule table deriving template-facing properties
//!   (`category`, `access`, `included`, `valuecode`, ...) for each doclet.
//! - A post-parse pass that synthesizes missing module doclets and
//!   re-parents global classes and functions under them.
//! - The `@category` tag and a recovery path for `{type}` expressions the
//!   host parser cannot read.

pub mod error;
pub mod hierarchy;
pub mod host;
pub mod inspect;
pub mod model;
pub mod plugin;
pub mod rules;
pub mod source;
pub mod tags;
pub mod typeexpr;

pub use error::{DocletError, Result};
pub use hierarchy::reconstruct;
pub use host::{DocletHandlers, run};
pub use inspect::{DeclarationInfo, DeclarationInspector, NodeInspector};
pub use model::{
    Access, CodeInfo, DecoratorNode, Doclet, DocletKind, Meta, NodeExpression, Param, Position,
    Property, SourceRange, SyntaxNode, Tag, TypeSpec,
};
pub use plugin::{DocletPlugin, PluginOptions};
pub use rules::{ExportedClasses, Rule, RuleContext, RuleTable};
pub use tags::{TagDefinition, TagDictionary, define_tags};
pub use typeexpr::{ParamLine, TypeExpression, TypedLine, extract_param_line, extract_type_expression, extract_typed_line};

#[cfg(feature = "oxc-inspector")]
pub use inspect::OxcInspector;
