//! Filters and functions available to every template.

use std::sync::Arc;

use minijinja::value::Kwargs;
use minijinja::{Environment, Error, Value};

use crate::links::TypesIndex;

/// `{{ params | join_names(on="name") }}`
///
/// Joins the entries (or their `on` attribute) with `, `. Entries containing
/// a `.` are nested properties and are dropped.
pub fn join_names(value: Value, kwargs: Kwargs) -> Result<String, Error> {
    let on: Option<String> = kwargs.get("on")?;
    kwargs.assert_all_used()?;
    if value.is_undefined() || value.is_none() {
        return Ok(String::new());
    }

    let mut names = Vec::new();
    for item in value.try_iter()? {
        let target = match on.as_deref() {
            Some(attr) => item.get_attr(attr)?,
            None => item,
        };
        if target.is_undefined() || target.is_none() {
            continue;
        }
        let name = target.to_string();
        if !name.contains('.') {
            names.push(name);
        }
    }
    Ok(names.join(", "))
}

/// Escape `|` so the text fits in a markdown table cell.
pub fn in_md_table(value: Option<String>) -> String {
    value.map(|text| text.replace('|', "\\|")).unwrap_or_default()
}

/// Register `join_names`, `in_md_table`, `link` and `options`.
pub fn register(env: &mut Environment<'static>, index: Arc<TypesIndex>, imageext: String) {
    env.add_filter("join_names", join_names);
    env.add_filter("in_md_table", in_md_table);
    env.add_function("link", move |item: Option<String>| -> String {
        match item {
            Some(name) => match index.get(&name) {
                Some(file) => format!("[{name}]({file})"),
                None => format!("`{name}`"),
            },
            None => String::new(),
        }
    });
    env.add_function("options", move |key: String| -> Value {
        match key.as_str() {
            "imageext" => Value::from(imageext.clone()),
            _ => Value::UNDEFINED,
        }
    });
}
