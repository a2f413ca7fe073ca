use std::fmt;
use std::ops::Not;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DocletError, Result};

/// One documented code entity, as delivered by the comment parser.
///
/// Field names follow the JSDoc JSON dump so a `jsdoc -X` output can be read
/// directly. Keys this crate does not interpret are kept in `extra` and written
/// back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Doclet {
    /// Kind of entity (`module`, `class`, `function`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocletKind>,
    /// Short name as written in the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Fully qualified name, unique across the dump.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longname: Option<String>,
    /// Longname of the parent doclet. A lookup key, not an ownership edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,
    /// `global`, `static`, `instance` or `inner`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Main description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Class description, separate from the constructor description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classdesc: Option<String>,
    /// Raw comment text, delimiters included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Set by the parser when no doc comment was found.
    #[serde(default, skip_serializing_if = "Not::not")]
    pub undocumented: bool,
    /// Tags the parser kept as raw title/text pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Parameters, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Return value entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Param>,
    /// Declared type of a member or constant.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,
    /// Access level, explicit or derived.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
    /// Source location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    // Derived properties, written by the rule table only.
    /// Lower-cased `@category`, `other` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Badge color of the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorycolor: Option<String>,
    /// Text shown in the table of contents.
    #[serde(default, rename = "tocDescription", skip_serializing_if = "Option::is_none")]
    pub toc_description: Option<String>,
    /// Initializer source of a constant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuecode: Option<String>,
    /// Screenshot file name, when one exists in the destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Whether `scope` is `static`.
    #[serde(default, rename = "static", skip_serializing_if = "Option::is_none")]
    pub is_static: Option<bool>,
    /// Whether any params or returns are documented.
    #[serde(default, rename = "hasParameters", skip_serializing_if = "Option::is_none")]
    pub has_parameters: Option<bool>,
    /// Source file relative to the destination folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relativepath: Option<String>,
    /// Whether the doclet is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<bool>,
    /// Set on a default export, whose name becomes `default`.
    #[serde(default, rename = "isDefault", skip_serializing_if = "Not::not")]
    pub is_default: bool,
    /// Whether the class carries an `inject` decorator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inject: Option<bool>,

    // Children collections, filled by tree assembly.
    /// Child modules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Doclet>,
    /// Child classes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<Doclet>,
    /// Child functions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Doclet>,
    /// Child members.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Doclet>,
    /// Child constants.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<Doclet>,
    /// Child namespaces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Doclet>,
    /// Child mixins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Doclet>,
    /// Child events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Doclet>,

    /// Keys not interpreted here, written back as read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Doclet {
    pub fn new(kind: DocletKind, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attach the source location (`meta.path` / `meta.filename`).
    pub fn at(mut self, path: impl Into<String>, filename: impl Into<String>) -> Self {
        let meta = self.meta.get_or_insert_with(Meta::default);
        meta.path = Some(path.into());
        meta.filename = Some(filename.into());
        self
    }

    pub fn is(&self, kind: DocletKind) -> bool {
        self.kind == Some(kind)
    }

    pub fn is_any(&self, kinds: &[DocletKind]) -> bool {
        self.kind.is_some_and(|kind| kinds.contains(&kind))
    }

    /// Name used in logs and errors.
    pub fn label(&self) -> &str {
        self.longname
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<anonymous>")
    }

    /// Absolute or host-relative path of the source file, when known.
    pub fn file_path(&self) -> Option<PathBuf> {
        let meta = self.meta.as_ref()?;
        Some(Path::new(meta.path.as_deref()?).join(meta.filename.as_deref()?))
    }

    /// Like [`Doclet::file_path`], but a missing location is an error.
    pub fn require_file_path(&self) -> Result<PathBuf> {
        self.file_path().ok_or_else(|| DocletError::MissingLocation {
            longname: self.label().to_string(),
        })
    }

    /// Source file name without its extension.
    pub fn file_stem(&self) -> Option<String> {
        let filename = self.meta.as_ref()?.filename.as_deref()?;
        Path::new(filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    /// Raw declaration text recorded by the parser (`meta.code.name`).
    pub fn code_name(&self) -> Option<&str> {
        self.meta.as_ref()?.code.as_ref()?.name.as_deref()
    }

    pub fn node(&self) -> Option<&SyntaxNode> {
        self.meta.as_ref()?.code.as_ref()?.node.as_ref()
    }

    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|tag| tag.title == title)
    }

    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name.as_deref().is_some_and(|name| name.starts_with(prefix))
    }

    /// Assign a derived property.
    pub fn set(&mut self, property: Property) {
        match property {
            Property::TocDescription(value) => self.toc_description = value,
            Property::ValueCode(value) => self.valuecode = Some(value),
            Property::Screenshot(value) => self.screenshot = Some(value),
            Property::Category(value) => self.category = Some(value),
            Property::CategoryColor(value) => self.categorycolor = Some(value),
            Property::Static(value) => self.is_static = Some(value),
            Property::HasParameters(value) => self.has_parameters = Some(value),
            Property::RelativePath(value) => self.relativepath = Some(value),
            Property::Type(value) => self.type_spec = Some(value),
            Property::MemberOf(value) => self.memberof = Some(value),
            Property::Access(value) => self.access = Some(value),
            Property::Included(value) => self.included = Some(value),
            Property::Inject(value) => self.inject = Some(value),
        }
    }
}

/// A typed write of one derived property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    TocDescription(Option<String>),
    ValueCode(String),
    Screenshot(String),
    Category(String),
    CategoryColor(String),
    Static(bool),
    HasParameters(bool),
    RelativePath(String),
    Type(TypeSpec),
    MemberOf(String),
    Access(Access),
    Included(bool),
    Inject(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocletKind {
    Module,
    Class,
    Function,
    Member,
    Constant,
    Namespace,
    Mixin,
    Event,
    Package,
    Typedef,
    External,
    File,
    Interface,
    Param,
    #[serde(other)]
    Other,
}

impl DocletKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Class => "class",
            Self::Function => "function",
            Self::Member => "member",
            Self::Constant => "constant",
            Self::Namespace => "namespace",
            Self::Mixin => "mixin",
            Self::Event => "event",
            Self::Package => "package",
            Self::Typedef => "typedef",
            Self::External => "external",
            Self::File => "file",
            Self::Interface => "interface",
            Self::Param => "param",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DocletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Protected,
    Private,
    Package,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
        }
    }

    /// Position when listing members: public first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Public => 0,
            Self::Protected => 1,
            Self::Private => 2,
            Self::Package => 3,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ names: [...] }` type record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Type names, one per union member.
    #[serde(default)]
    pub names: Vec<String>,
    /// Keys not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TypeSpec {
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            extra: Map::new(),
        }
    }
}

/// A `@param` or `@returns` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name; absent on return entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,
    /// Description text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter may be omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Keys not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block tag kept by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name without the `@`, normalized by the parser.
    pub title: String,
    /// Text following the tag name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Tag name as written, before synonym resolution.
    #[serde(default, rename = "originalTitle", skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    /// Keys not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Source location data attached by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Character offsets (UTF-16 code units) of the declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[u32; 2]>,
    /// Base name of the source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// One-based line of the declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineno: Option<u32>,
    /// Zero-based column of the declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columnno: Option<u32>,
    /// Folder holding the source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Declaration details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeInfo>,
    /// Keys not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What the parser recorded about the declaration itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeInfo {
    /// Declaration text the parser matched, e.g. `exports.add`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Syntax node of the declaration, when the host keeps it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<SyntaxNode>,
    /// Keys not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The subset of an ESTree node the rules look at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<DecoratorNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Line is one-based, column zero-based (ESTree convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoratorNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<NodeExpression>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `Identifier` or `CallExpression` as found under a decorator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeExpression {
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callee: Option<Box<NodeExpression>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_jsdoc_dump_entry_and_keeps_unknown_keys() {
        let doclet: Doclet = serde_json::from_str(
            r#"{
                "comment": "/** Adds. */",
                "meta": {
                    "range": [10, 40],
                    "filename": "math.js",
                    "lineno": 2,
                    "columnno": 0,
                    "path": "/src",
                    "code": { "id": "astnode1", "name": "exports.add", "type": "FunctionExpression" }
                },
                "description": "Adds.",
                "kind": "function",
                "name": "add",
                "longname": "module:math.add",
                "memberof": "module:math",
                "scope": "static",
                "___id": "T000002R000002"
            }"#,
        )
        .unwrap();

        assert!(doclet.is(DocletKind::Function));
        assert_eq!(doclet.code_name(), Some("exports.add"));
        assert_eq!(doclet.file_path(), Some(PathBuf::from("/src/math.js")));
        assert_eq!(doclet.meta.as_ref().unwrap().range, Some([10, 40]));

        let value = serde_json::to_value(&doclet).unwrap();
        assert_eq!(value["___id"], "T000002R000002");
        assert_eq!(value["meta"]["code"]["id"], "astnode1");
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let doclet: Doclet = serde_json::from_str(r#"{ "kind": "enum" }"#).unwrap();
        assert_eq!(doclet.kind, Some(DocletKind::Other));
    }

    #[test]
    fn missing_location_is_a_checked_error() {
        let doclet = Doclet::new(DocletKind::Class, "Widget");
        let error = doclet.require_file_path().unwrap_err();
        assert!(matches!(error, DocletError::MissingLocation { longname } if longname == "Widget"));
    }

    #[test]
    fn derived_properties_use_host_names() {
        let mut doclet = Doclet::new(DocletKind::Module, "m");
        doclet.set(Property::TocDescription(Some("d".to_string())));
        doclet.set(Property::Static(false));
        doclet.is_default = true;

        let value = serde_json::to_value(&doclet).unwrap();
        assert_eq!(value["tocDescription"], "d");
        assert_eq!(value["static"], false);
        assert_eq!(value["isDefault"], true);
    }
}
