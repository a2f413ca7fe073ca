use crate::error::{DocletError, Result};
use crate::inspect::DeclarationInfo;
use crate::model::{Access, Doclet, DocletKind, Property, TypeSpec};
use crate::source::{LineIndex, read_source, relative_path};
use crate::typeexpr::{extract_param_line, extract_typed_line, tag_lines};

use super::{Rule, RuleContext};

const MODULE_PREFIX: &str = "module:";
const DEFAULT_CATEGORY: &str = "other";
const DEFAULT_BADGE_COLOR: &str = "blue";
const SCREENSHOT_FOLDER: &str = "images/screenshots";

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule::process("isExportedClass", Some(is_exported_class), record_exported_class),
        Rule::value("tocDescription", Some(lacks_toc_description), toc_description),
        Rule::process("valuecode", Some(is_constant), valuecode),
        Rule::value("screenshot", Some(has_screenshot), screenshot),
        Rule::value("category", Some(lacks_category), |_, _| {
            Ok(Property::Category(DEFAULT_CATEGORY.to_string()))
        }),
        Rule::value("categorycolor", None, category_color),
        Rule::value("static", None, |doclet, _| {
            Ok(Property::Static(doclet.scope.as_deref() == Some("static")))
        }),
        Rule::value("hasParameters", None, |doclet, _| {
            Ok(Property::HasParameters(
                !doclet.params.is_empty() || !doclet.returns.is_empty(),
            ))
        }),
        Rule::value("relativepath", None, relativepath),
        Rule::process("type", Some(is_untyped_member), member_type),
        Rule::value("memberof", Some(lacks_memberof), |doclet, _| {
            Ok(Property::MemberOf(doclet.longname.clone().unwrap_or_default()))
        }),
        Rule::value("access", Some(lacks_access), access),
        Rule::value("included", None, included),
        Rule::process("isDefault", Some(is_default_export), |doclet, _| {
            doclet.is_default = true;
            doclet.name = Some("default".to_string());
            Ok(())
        }),
        Rule::value("fixUndocumented", Some(is_undocumented), |_, _| {
            Ok(Property::Included(false))
        }),
        Rule::process("acceptTypeScriptType", Some(accepts_typescript_type), typescript_types),
        Rule::process("fixDottedPath", Some(has_dotted_path), fix_dotted_path),
        Rule::value("inject", Some(is_decorated_class), |doclet, ctx| {
            let names = ctx.inspector.decorator_names(&DeclarationInfo::of(doclet));
            Ok(Property::Inject(names.iter().any(|name| name == "inject")))
        }),
    ]
}

fn is_module_or_class(doclet: &Doclet) -> bool {
    doclet.is_any(&[DocletKind::Module, DocletKind::Class])
}

fn is_exported_class(doclet: &Doclet, ctx: &RuleContext<'_>) -> bool {
    doclet.is(DocletKind::Class)
        && (ctx.inspector.is_exported(&DeclarationInfo::of(doclet)) || doclet.has_tag("export"))
}

fn record_exported_class(doclet: &mut Doclet, ctx: &mut RuleContext<'_>) -> Result<()> {
    if let Some(longname) = doclet.longname.as_deref().or(doclet.name.as_deref()) {
        ctx.exported.record(longname);
    }
    Ok(())
}

fn lacks_toc_description(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.is(DocletKind::Module) && doclet.toc_description.is_none()
}

fn toc_description(doclet: &Doclet, _: &RuleContext<'_>) -> Result<Property> {
    Ok(Property::TocDescription(doclet.description.clone()))
}

fn is_constant(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.is(DocletKind::Constant)
}

/// Source text of a constant's initializer.
fn valuecode(doclet: &mut Doclet, _: &mut RuleContext<'_>) -> Result<()> {
    let path = doclet.require_file_path()?;
    let index = LineIndex::new(read_source(&path)?);

    let bounds = match (doclet.node().and_then(|node| node.loc), doclet.meta.as_ref().and_then(|meta| meta.range)) {
        (Some(loc), _) => index.offset(loc.start).zip(index.offset(loc.end)),
        (None, Some([start, end])) => index.offset_of_char(start).zip(index.offset_of_char(end)),
        (None, None) => return Ok(()),
    };
    let (start, end) = match bounds {
        Some((start, end)) if start <= end => (start, end),
        _ => {
            let (start, end) = bounds.unwrap_or_default();
            return Err(DocletError::InvalidRange { path, start, end });
        }
    };

    doclet.set(Property::ValueCode(initializer(&index.source()[start..end]).to_string()));
    Ok(())
}

/// Strip the `name = ` part of a declaration and one terminating `;`.
fn initializer(code: &str) -> &str {
    let value = match code.find(" =") {
        Some(idx) => code[idx + 2..].trim_start(),
        None => code,
    };
    let value = value.trim_end();
    value.strip_suffix(';').unwrap_or(value)
}

fn screenshot_name(doclet: &Doclet) -> Option<String> {
    let kind = doclet.kind?;
    Some(format!("{kind}_{}.png", doclet.file_stem()?))
}

fn has_screenshot(doclet: &Doclet, ctx: &RuleContext<'_>) -> bool {
    is_module_or_class(doclet)
        && screenshot_name(doclet).is_some_and(|name| {
            ctx.options
                .doc_folder
                .join(SCREENSHOT_FOLDER)
                .join(name)
                .exists()
        })
}

fn screenshot(doclet: &Doclet, _: &RuleContext<'_>) -> Result<Property> {
    let name = screenshot_name(doclet).ok_or_else(|| DocletError::MissingLocation {
        longname: doclet.label().to_string(),
    })?;
    Ok(Property::Screenshot(name))
}

fn lacks_category(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    is_module_or_class(doclet) && doclet.category.as_deref().is_none_or(str::is_empty)
}

fn category_color(doclet: &Doclet, ctx: &RuleContext<'_>) -> Result<Property> {
    let color = doclet
        .category
        .as_deref()
        .and_then(|category| ctx.options.badge_colors.get(category))
        .map(String::as_str)
        .unwrap_or(DEFAULT_BADGE_COLOR);
    Ok(Property::CategoryColor(color.to_string()))
}

fn relativepath(doclet: &Doclet, ctx: &RuleContext<'_>) -> Result<Property> {
    let file = doclet.require_file_path()?;
    Ok(Property::RelativePath(relative_path(&ctx.options.doc_folder, &file)))
}

fn is_untyped_member(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.is(DocletKind::Member) && doclet.has_comment() && doclet.type_spec.is_none()
}

fn member_type(doclet: &mut Doclet, _: &mut RuleContext<'_>) -> Result<()> {
    let comment = doclet.comment.as_deref().unwrap_or_default();
    let found = tag_lines(comment, &["type"])
        .into_iter()
        .find_map(extract_typed_line);
    if let Some(line) = found {
        doclet.set(Property::Type(TypeSpec::single(line.type_expr)));
    }
    Ok(())
}

fn lacks_memberof(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    !doclet.is(DocletKind::Module)
        && doclet.memberof.is_none()
        && doclet
            .longname
            .as_deref()
            .is_some_and(|longname| longname.starts_with(MODULE_PREFIX))
}

fn lacks_access(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.access.is_none()
}

fn access(doclet: &Doclet, ctx: &RuleContext<'_>) -> Result<Property> {
    let exported_member = doclet
        .memberof
        .as_deref()
        .is_some_and(|parent| ctx.exported.contains(parent));
    if exported_member && !doclet.name_starts_with("_") {
        return Ok(Property::Access(Access::Public));
    }
    if doclet.is_any(&[DocletKind::Constant, DocletKind::Function, DocletKind::Member])
        && ctx.inspector.is_exported(&DeclarationInfo::of(doclet))
    {
        return Ok(Property::Access(Access::Public));
    }
    Ok(Property::Access(Access::Private))
}

fn included(doclet: &Doclet, ctx: &RuleContext<'_>) -> Result<Property> {
    let included = is_module_or_class(doclet)
        || doclet.access.is_some_and(|access| {
            ctx.options
                .includes
                .iter()
                .any(|level| level == access.as_str())
        });
    Ok(Property::Included(included))
}

fn is_default_export(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    !doclet.is(DocletKind::Module) && doclet.name_starts_with(MODULE_PREFIX)
}

fn is_undocumented(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.undocumented
}

fn accepts_typescript_type(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.is_any(&[DocletKind::Function, DocletKind::Constant]) && doclet.has_comment()
}

/// Re-read `@param` and `@returns` types from the raw comment when the host
/// parser produced as many entries as there are tag lines.
fn typescript_types(doclet: &mut Doclet, _: &mut RuleContext<'_>) -> Result<()> {
    let Some(comment) = doclet.comment.clone() else {
        return Ok(());
    };

    let lines = tag_lines(&comment, &["param"]);
    if !lines.is_empty() && lines.len() == doclet.params.len() {
        for (param, line) in doclet.params.iter_mut().zip(lines) {
            if let Some(parsed) = extract_param_line(line) {
                param.type_spec = Some(TypeSpec::single(parsed.type_expr));
                if parsed.description.is_some() {
                    param.description = parsed.description;
                }
            }
        }
    }

    let lines = tag_lines(&comment, &["returns", "return"]);
    if !lines.is_empty() && lines.len() == doclet.returns.len() {
        for (entry, line) in doclet.returns.iter_mut().zip(lines) {
            if let Some(parsed) = extract_typed_line(line) {
                entry.type_spec = Some(TypeSpec::single(parsed.type_expr));
                if parsed.description.is_some() {
                    entry.description = parsed.description;
                }
            }
        }
    }
    Ok(())
}

fn has_dotted_path(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
    doclet.longname.as_deref().and_then(corrupted_prefix).is_some()
}

/// Byte index of a `module:` marker that does not start the name.
fn corrupted_prefix(name: &str) -> Option<usize> {
    name.find(MODULE_PREFIX).filter(|&idx| idx > 0)
}

fn fix_dotted_path(doclet: &mut Doclet, _: &mut RuleContext<'_>) -> Result<()> {
    for name in [&mut doclet.longname, &mut doclet.memberof].into_iter().flatten() {
        if let Some(idx) = corrupted_prefix(name) {
            name.replace_range(..idx, "");
        }
    }
    Ok(())
}

fn is_decorated_class(doclet: &Doclet, ctx: &RuleContext<'_>) -> bool {
    doclet.is(DocletKind::Class) && !ctx.inspector.decorator_names(&DeclarationInfo::of(doclet)).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializer_is_stripped_once() {
        assert_eq!(initializer("answer = 42;"), "42");
        assert_eq!(initializer("const colors = ['red', 'blue'];"), "['red', 'blue']");
        assert_eq!(initializer("42"), "42");
        assert_eq!(initializer("fn = (a) => a >= 1"), "(a) => a >= 1");
    }

    #[test]
    fn dotted_prefix_is_located() {
        assert_eq!(corrupted_prefix("src/a.module:b"), Some(8));
        assert_eq!(corrupted_prefix("module:b"), None);
        assert_eq!(corrupted_prefix("Widget"), None);
    }
}
