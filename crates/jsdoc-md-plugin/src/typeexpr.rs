//! Recovery of `{type}` expressions from raw comment text.
//!
//! The comment parser of the host rejects some type syntaxes (function types
//! with arrows, for instance) and leaves the matching `params`/`returns`
//! entries without a type. These helpers re-read the raw comment one line at a
//! time. They are intentionally line-oriented and do not implement the tag
//! grammar.

/// A balanced `{...}` expression found in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeExpression<'a> {
    /// Text between the outer braces, untouched (escapes are kept).
    pub expr: &'a str,
    /// Byte index of the opening brace.
    pub start: usize,
    /// Byte index just after the closing brace.
    pub end: usize,
}

/// Type, name and description of a `@param` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamLine {
    pub type_expr: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Type and description of a `@returns` or `@type` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedLine {
    pub type_expr: String,
    pub description: Option<String>,
}

/// Returns the first balanced `{...}` expression whose opening brace is not
/// preceded by `@`.
///
/// A backslash skips the following character, braces included. `None` when
/// there is no opening brace or it is never closed.
pub fn extract_type_expression(text: &str) -> Option<TypeExpression<'_>> {
    let bytes = text.as_bytes();
    let start = (0..bytes.len()).find(|&idx| bytes[idx] == b'{' && (idx == 0 || bytes[idx - 1] != b'@'))?;

    let mut depth = 0usize;
    let mut idx = start;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => {
                idx += 2;
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(TypeExpression {
                        expr: &text[start + 1..idx],
                        start,
                        end: idx + 1,
                    });
                }
            }
            _ => {}
        }
        idx += 1;
    }
    None
}

/// Split a `@param {type} name description` line.
pub fn extract_param_line(line: &str) -> Option<ParamLine> {
    let found = extract_type_expression(line)?;
    let rest = line[found.end..].trim_start();
    let (name, description) = match rest.split_once(char::is_whitespace) {
        Some((name, description)) => (name, description),
        None => (rest, ""),
    };

    Some(ParamLine {
        type_expr: found.expr.to_string(),
        name: non_empty(name),
        description: clean_description(description),
    })
}

/// Split a `@returns {type} description` (or `@type {type}`) line.
pub fn extract_typed_line(line: &str) -> Option<TypedLine> {
    let found = extract_type_expression(line)?;
    Some(TypedLine {
        type_expr: found.expr.to_string(),
        description: clean_description(&line[found.end..]),
    })
}

/// Lines of a raw comment starting with one of the given block tags, with the
/// comment decoration (`/**`, `*`, `*/`) removed.
pub fn tag_lines<'a>(comment: &'a str, titles: &[&str]) -> Vec<&'a str> {
    comment
        .lines()
        .map(strip_decoration)
        .filter(|line| tag_title(line).is_some_and(|title| titles.contains(&title)))
        .collect()
}

fn strip_decoration(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix("/**").unwrap_or(line);
    let line = line.strip_suffix("*/").unwrap_or(line);
    let line = line.trim_start();
    let line = line.strip_prefix('*').unwrap_or(line);
    line.trim()
}

fn tag_title(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('@')?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

fn clean_description(text: &str) -> Option<String> {
    let text = text.trim();
    let text = text.strip_prefix("- ").unwrap_or(text);
    non_empty(text.trim())
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_arrow_function_param() {
        let line = extract_param_line("@param {(text: string) => void} p1 a p1 description").unwrap();
        assert_eq!(line.type_expr, "(text: string) => void");
        assert_eq!(line.name.as_deref(), Some("p1"));
        assert_eq!(line.description.as_deref(), Some("a p1 description"));
    }

    #[test]
    fn handles_nested_braces() {
        let found = extract_type_expression("@returns {{ a: { b: number } }} nested").unwrap();
        assert_eq!(found.expr, "{ a: { b: number } }");
        assert_eq!(found.start, 9);
    }

    #[test]
    fn backslash_skips_the_next_brace() {
        let found = extract_type_expression(r"@type {a\}b} rest").unwrap();
        assert_eq!(found.expr, r"a\}b");
    }

    #[test]
    fn skips_brace_preceded_by_at() {
        let found = extract_type_expression("x @{ignored} {kept}").unwrap();
        assert_eq!(found.expr, "kept");
    }

    #[test]
    fn unbalanced_expression_is_not_found() {
        assert!(extract_type_expression("@param {(a: string => void p1").is_none());
        assert!(extract_type_expression("no braces here").is_none());
        assert!(extract_param_line("@param p1 untyped").is_none());
    }

    #[test]
    fn strips_hyphen_separator_from_description() {
        let line = extract_param_line("@param {string} name - the name").unwrap();
        assert_eq!(line.description.as_deref(), Some("the name"));

        let typed = extract_typed_line("@returns {Promise<void>}").unwrap();
        assert_eq!(typed.type_expr, "Promise<void>");
        assert_eq!(typed.description, None);
    }

    #[test]
    fn collects_tag_lines_from_raw_comment() {
        let comment = "/**\n * Run it.\n * @param {(a: number) => void} cb callback\n * @param {string} id identifier\n * @returns {boolean} done\n * see {@link Other}\n */";
        assert_eq!(
            tag_lines(comment, &["param"]),
            vec!["@param {(a: number) => void} cb callback", "@param {string} id identifier"]
        );
        assert_eq!(tag_lines(comment, &["returns", "return"]), vec!["@returns {boolean} done"]);
        assert!(tag_lines(comment, &["parameter"]).is_empty());
    }

    #[test]
    fn single_line_comment_is_decoded() {
        assert_eq!(tag_lines("/** @type {() => void} */", &["type"]), vec!["@type {() => void}"]);
    }
}
