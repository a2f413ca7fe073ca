//! Custom block tags.

use indexmap::IndexMap;
use tracing::debug;

use crate::model::{Doclet, Tag};

/// Called with the doclet and the tag that carried a registered title.
pub type TagHandler = fn(&mut Doclet, &Tag);

#[derive(Debug, Clone, Copy)]
pub struct TagDefinition {
    pub on_tagged: TagHandler,
}

/// Registered tag titles and their handlers.
#[derive(Debug, Clone, Default)]
pub struct TagDictionary {
    definitions: IndexMap<String, TagDefinition>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_tag(&mut self, title: impl Into<String>, definition: TagDefinition) -> &mut Self {
        self.definitions.insert(title.into(), definition);
        self
    }

    pub fn lookup(&self, title: &str) -> Option<&TagDefinition> {
        self.definitions.get(title)
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Run the handler of every registered tag found on the doclet. Returns
    /// how many tags were handled.
    pub fn apply(&self, doclet: &mut Doclet) -> usize {
        let tagged: Vec<(TagHandler, Tag)> = doclet
            .tags
            .iter()
            .filter_map(|tag| {
                self.lookup(&tag.title)
                    .map(|definition| (definition.on_tagged, tag.clone()))
            })
            .collect();

        for (handler, tag) in &tagged {
            debug!(tag = %tag.title, doclet = doclet.label(), "handling tag");
            handler(doclet, tag);
        }
        tagged.len()
    }
}

/// Register the tags this plugin contributes: `@category <text>`.
pub fn define_tags(dictionary: &mut TagDictionary) {
    dictionary.define_tag(
        "category",
        TagDefinition {
            on_tagged: on_category,
        },
    );
}

fn on_category(doclet: &mut Doclet, tag: &Tag) {
    if let Some(text) = tag.text.as_deref() {
        doclet.category = Some(text.to_lowercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocletKind;

    #[test]
    fn category_tag_is_lowercased() {
        let mut dictionary = TagDictionary::new();
        define_tags(&mut dictionary);

        let mut doclet = Doclet::new(DocletKind::Class, "Widget");
        doclet.tags.push(Tag::new("category", "User Interface"));
        doclet.tags.push(Tag::new("since", "1.0"));

        assert_eq!(dictionary.apply(&mut doclet), 1);
        assert_eq!(doclet.category.as_deref(), Some("user interface"));
    }

    #[test]
    fn any_text_is_accepted() {
        let mut dictionary = TagDictionary::new();
        define_tags(&mut dictionary);

        let mut doclet = Doclet::new(DocletKind::Module, "m");
        doclet.tags.push(Tag::new("category", "ÉTAT #1 / misc"));
        dictionary.apply(&mut doclet);
        assert_eq!(doclet.category.as_deref(), Some("état #1 / misc"));
    }
}
