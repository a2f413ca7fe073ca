//! Declaration inspection: export markers and decorator names.
//!
//! The rules never look at syntax nodes directly. They ask a
//! [`DeclarationInspector`], which either reads the node shape the host
//! attached to the doclet ([`NodeInspector`]) or re-parses the source file
//! ([`OxcInspector`], behind the `oxc-inspector` feature).

use std::path::PathBuf;

use crate::model::{Doclet, DocletKind, NodeExpression, SyntaxNode};

/// What an inspector may look at for one doclet.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationInfo<'d> {
    pub kind: Option<DocletKind>,
    /// Raw declaration text (`meta.code.name`).
    pub code_name: Option<&'d str>,
    pub node: Option<&'d SyntaxNode>,
    pub doclet: &'d Doclet,
}

impl<'d> DeclarationInfo<'d> {
    pub fn of(doclet: &'d Doclet) -> Self {
        Self {
            kind: doclet.kind,
            code_name: doclet.code_name(),
            node: doclet.node(),
            doclet,
        }
    }

    pub fn file(&self) -> Option<PathBuf> {
        self.doclet.file_path()
    }
}

pub trait DeclarationInspector {
    /// Whether the declaration is a language-level export.
    fn is_exported(&self, info: &DeclarationInfo<'_>) -> bool;

    /// Names of the decorators applied to the declaration, in source order.
    fn decorator_names(&self, info: &DeclarationInfo<'_>) -> Vec<String>;
}

impl<T: DeclarationInspector + ?Sized> DeclarationInspector for Box<T> {
    fn is_exported(&self, info: &DeclarationInfo<'_>) -> bool {
        (**self).is_exported(info)
    }

    fn decorator_names(&self, info: &DeclarationInfo<'_>) -> Vec<String> {
        (**self).decorator_names(info)
    }
}

/// Answers from the host-provided data only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeInspector;

impl DeclarationInspector for NodeInspector {
    fn is_exported(&self, info: &DeclarationInfo<'_>) -> bool {
        info.code_name.is_some_and(has_export_marker)
    }

    fn decorator_names(&self, info: &DeclarationInfo<'_>) -> Vec<String> {
        info.node
            .map(|node| {
                node.decorators
                    .iter()
                    .map(|decorator| decorator.expression.as_ref().map(expression_name).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// `export …`, `exports.…` and `module.exports` declarations.
pub fn has_export_marker(code_name: &str) -> bool {
    code_name.starts_with("export ") || code_name.starts_with("exports.") || code_name == "module.exports"
}

fn expression_name(expression: &NodeExpression) -> String {
    match expression.node_type.as_str() {
        "Identifier" => expression.name.clone().unwrap_or_default(),
        "CallExpression" => expression
            .callee
            .as_ref()
            .and_then(|callee| callee.name.clone())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

#[cfg(feature = "oxc-inspector")]
pub use oxc_inspector::OxcInspector;

#[cfg(feature = "oxc-inspector")]
mod oxc_inspector {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use oxc_allocator::Allocator;
    use oxc_ast::ast::{
        Class, Declaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
        ExportNamedDeclaration, Expression,
    };
    use oxc_ast_visit::{Visit, walk};
    use oxc_parser::Parser;
    use oxc_span::{GetSpan, SourceType};
    use rustc_hash::{FxHashMap, FxHashSet};
    use tracing::{debug, warn};

    use super::{DeclarationInfo, DeclarationInspector, NodeInspector};
    use crate::error::{DocletError, Result};
    use crate::model::{DocletKind, Position};
    use crate::source::{LineIndex, read_source};

    /// Parses each referenced source file once and answers from what the
    /// parse found, falling back to [`NodeInspector`].
    #[derive(Debug, Default)]
    pub struct OxcInspector {
        fallback: NodeInspector,
        files: RefCell<FxHashMap<PathBuf, Rc<FileFacts>>>,
    }

    #[derive(Debug, Default)]
    struct FileFacts {
        index: LineIndex,
        /// Byte offsets where an exported declaration (or declarator) starts.
        export_anchors: FxHashSet<u32>,
        classes: Vec<ClassFacts>,
    }

    #[derive(Debug)]
    struct ClassFacts {
        /// Includes leading decorators.
        start: u32,
        end: u32,
        exported: bool,
        decorators: Vec<String>,
    }

    impl FileFacts {
        /// Innermost class whose text contains `offset`.
        fn class_at(&self, offset: u32) -> Option<&ClassFacts> {
            self.classes
                .iter()
                .filter(|class| class.start <= offset && offset < class.end)
                .min_by_key(|class| class.end - class.start)
        }
    }

    impl OxcInspector {
        pub fn new() -> Self {
            Self::default()
        }

        fn facts(&self, path: &Path) -> Rc<FileFacts> {
            if let Some(facts) = self.files.borrow().get(path) {
                return Rc::clone(facts);
            }
            let facts = match collect_facts(path) {
                Ok(facts) => facts,
                Err(error) => {
                    warn!("declaration inspection skipped: {error}");
                    FileFacts::default()
                }
            };
            let facts = Rc::new(facts);
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), Rc::clone(&facts));
            facts
        }

        fn locate(&self, info: &DeclarationInfo<'_>) -> Option<(Rc<FileFacts>, u32)> {
            let file = info.file()?;
            let facts = self.facts(&file);
            let offset = declaration_offset(&facts.index, info)?;
            Some((facts, offset))
        }
    }

    impl DeclarationInspector for OxcInspector {
        fn is_exported(&self, info: &DeclarationInfo<'_>) -> bool {
            if self.fallback.is_exported(info) {
                return true;
            }
            self.locate(info).is_some_and(|(facts, offset)| {
                facts.export_anchors.contains(&offset)
                    || (info.kind == Some(DocletKind::Class)
                        && facts.class_at(offset).is_some_and(|class| class.exported))
            })
        }

        fn decorator_names(&self, info: &DeclarationInfo<'_>) -> Vec<String> {
            let from_node = self.fallback.decorator_names(info);
            if !from_node.is_empty() {
                return from_node;
            }
            let Some((facts, offset)) = self.locate(info) else {
                return Vec::new();
            };
            facts
                .class_at(offset)
                .map(|class| class.decorators.clone())
                .unwrap_or_default()
        }
    }

    /// Byte offset where the doclet's declaration starts.
    fn declaration_offset(index: &LineIndex, info: &DeclarationInfo<'_>) -> Option<u32> {
        let meta = info.doclet.meta.as_ref()?;
        let offset = if let Some([start, _]) = meta.range {
            index.offset_of_char(start)
        } else if let Some(loc) = info.node.and_then(|node| node.loc) {
            index.offset(loc.start)
        } else {
            index.offset(Position {
                line: meta.lineno?,
                column: meta.columnno.unwrap_or(0),
            })
        }?;
        u32::try_from(offset).ok()
    }

    fn collect_facts(path: &Path) -> Result<FileFacts> {
        let source = read_source(path)?;
        let collector = {
            let allocator = Allocator::default();
            let source_type = SourceType::from_path(path).unwrap_or(SourceType::mjs());
            let parsed = Parser::new(&allocator, &source, source_type).parse();
            if parsed.panicked {
                let diagnostics: Vec<String> = parsed.errors.iter().map(|error| error.to_string()).collect();
                return Err(DocletError::parse_error(path.to_path_buf(), &diagnostics));
            }
            let mut collector = FactCollector::default();
            collector.visit_program(&parsed.program);
            collector
        };
        debug!(
            file = %path.display(),
            classes = collector.classes.len(),
            exports = collector.export_anchors.len(),
            "inspected source"
        );

        Ok(FileFacts {
            export_anchors: collector.export_anchors,
            classes: collector.classes,
            index: LineIndex::new(source),
        })
    }

    #[derive(Default)]
    struct FactCollector {
        export_anchors: FxHashSet<u32>,
        /// Span starts of exported class declarations.
        exported_classes: FxHashSet<u32>,
        classes: Vec<ClassFacts>,
    }

    impl FactCollector {
        fn anchor_declaration(&mut self, declaration: &Declaration<'_>) {
            self.export_anchors.insert(declaration.span().start);
            match declaration {
                Declaration::VariableDeclaration(variable) => {
                    for declarator in variable.declarations.iter() {
                        self.export_anchors.insert(declarator.span.start);
                        self.export_anchors.insert(declarator.id.span().start);
                    }
                }
                Declaration::ClassDeclaration(class) => {
                    self.exported_classes.insert(class.span.start);
                }
                _ => {}
            }
        }
    }

    impl<'a> Visit<'a> for FactCollector {
        fn visit_export_named_declaration(&mut self, export: &ExportNamedDeclaration<'a>) {
            if let Some(declaration) = &export.declaration {
                self.export_anchors.insert(export.span.start);
                self.anchor_declaration(declaration);
            }
            walk::walk_export_named_declaration(self, export);
        }

        fn visit_export_default_declaration(&mut self, export: &ExportDefaultDeclaration<'a>) {
            self.export_anchors.insert(export.span.start);
            self.export_anchors.insert(export.declaration.span().start);
            if let ExportDefaultDeclarationKind::ClassDeclaration(class) = &export.declaration {
                self.exported_classes.insert(class.span.start);
            }
            walk::walk_export_default_declaration(self, export);
        }

        fn visit_class(&mut self, class: &Class<'a>) {
            let start = class
                .decorators
                .iter()
                .map(|decorator| decorator.span.start)
                .chain(std::iter::once(class.span.start))
                .min()
                .unwrap_or(class.span.start);
            let decorators = class
                .decorators
                .iter()
                .map(|decorator| decorator_name(&decorator.expression))
                .collect();
            self.classes.push(ClassFacts {
                start,
                end: class.span.end,
                exported: self.exported_classes.contains(&class.span.start),
                decorators,
            });
            walk::walk_class(self, class);
        }
    }

    fn decorator_name(expression: &Expression<'_>) -> String {
        match expression {
            Expression::Identifier(ident) => ident.name.to_string(),
            Expression::CallExpression(call) => match &call.callee {
                Expression::Identifier(ident) => ident.name.to_string(),
                _ => String::new(),
            },
            _ => String::new(),
        }
    }
}
