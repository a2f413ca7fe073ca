//! Property tests for the type-expression extractor.

use jsdoc_md_plugin::{extract_param_line, extract_type_expression};
use proptest::prelude::*;

/// Type text without braces, backslashes or line breaks.
fn plain_type() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 <>()|:,=.\\[\\]]{1,30}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A braced expression is returned verbatim, whatever precedes it.
    #[test]
    fn prop_plain_expression_is_returned(prefix in "[a-z @]{0,10}", body in plain_type()) {
        let text = format!("{prefix} {{{body}}} rest");
        let found = extract_type_expression(&text).unwrap();
        prop_assert_eq!(found.expr, body.as_str());
        prop_assert_eq!(&text[found.end..], " rest");
    }

    /// Nesting depth does not matter as long as braces balance.
    #[test]
    fn prop_nested_braces_balance(depth in 1usize..8, body in plain_type()) {
        let inner = format!("{}{}{}", "{".repeat(depth), body, "}".repeat(depth));
        let text = format!("@returns {{{inner}}} done");
        let found = extract_type_expression(&text).unwrap();
        prop_assert_eq!(found.expr, inner.as_str());
    }

    /// An expression that never closes is not found.
    #[test]
    fn prop_unclosed_expression_is_none(body in plain_type(), extra in 1usize..4) {
        let text = format!("@param {}{} name", "{".repeat(extra), body);
        prop_assert!(extract_type_expression(&text).is_none());
    }

    /// `@param {type} name description` splits into its three parts.
    #[test]
    fn prop_param_line_parts(
        body in plain_type(),
        name in "[a-z][a-zA-Z0-9_]{0,8}",
        description in "[a-zA-Z][a-zA-Z ]{0,20}[a-zA-Z]",
    ) {
        let line = format!("@param {{{body}}} {name} {description}");
        let parsed = extract_param_line(&line).unwrap();
        prop_assert_eq!(parsed.type_expr, body);
        prop_assert_eq!(parsed.name, Some(name));
        prop_assert_eq!(parsed.description, Some(description));
    }
}
