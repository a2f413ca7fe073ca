//! The callback seam between a documentation host and the plugin.

use tracing::info;

use crate::error::Result;
use crate::model::{Doclet, DocletKind};
use crate::tags::TagDictionary;

/// Handlers a host fires while building its doclet collection.
pub trait DocletHandlers {
    /// Called once per doclet, as it is created.
    fn new_doclet(&mut self, doclet: &mut Doclet) -> Result<()>;

    /// Called once over the whole collection after parsing. May append.
    fn parse_complete(&mut self, doclets: &mut Vec<Doclet>) -> Result<()>;
}

/// Replay the host callback order over an already-parsed collection: tag
/// handlers then `new_doclet` for each doclet, then `parse_complete`.
///
/// `package` doclets are created by the host after parsing and never go
/// through `new_doclet`.
pub fn run<H>(handlers: &mut H, dictionary: &TagDictionary, mut doclets: Vec<Doclet>) -> Result<Vec<Doclet>>
where
    H: DocletHandlers + ?Sized,
{
    let delivered = doclets.len();
    for doclet in doclets.iter_mut().filter(|doclet| !doclet.is(DocletKind::Package)) {
        dictionary.apply(doclet);
        handlers.new_doclet(doclet)?;
    }
    handlers.parse_complete(&mut doclets)?;

    info!(
        delivered,
        synthesized = doclets.len() - delivered,
        "doclets processed"
    );
    Ok(doclets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::define_tags;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl DocletHandlers for Recorder {
        fn new_doclet(&mut self, doclet: &mut Doclet) -> Result<()> {
            self.calls.push(format!(
                "new:{}:{}",
                doclet.label(),
                doclet.category.as_deref().unwrap_or("-")
            ));
            Ok(())
        }

        fn parse_complete(&mut self, doclets: &mut Vec<Doclet>) -> Result<()> {
            self.calls.push(format!("complete:{}", doclets.len()));
            doclets.push(Doclet::new(DocletKind::Module, "extra"));
            Ok(())
        }
    }

    #[test]
    fn fires_callbacks_in_host_order() {
        let mut dictionary = TagDictionary::new();
        define_tags(&mut dictionary);

        let mut tagged = Doclet::new(DocletKind::Class, "A");
        tagged.tags.push(crate::model::Tag::new("category", "Core"));
        let doclets = vec![
            tagged,
            Doclet::new(DocletKind::Package, "pkg"),
            Doclet::new(DocletKind::Function, "b"),
        ];

        let mut recorder = Recorder::default();
        let out = run(&mut recorder, &dictionary, doclets).unwrap();

        assert_eq!(recorder.calls, vec!["new:A:core", "new:b:-", "complete:3"]);
        assert_eq!(out.len(), 4);
    }
}
