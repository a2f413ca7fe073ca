use jsdoc_md_plugin::{Doclet, DocletKind, DocletPlugin, PluginOptions, TagDictionary, define_tags, run};

fn options() -> PluginOptions {
    PluginOptions {
        doc_folder: "/project/docs".into(),
        source_root: "/project/src".into(),
        ..PluginOptions::default()
    }
}

fn located(kind: DocletKind, name: &str, dir: &str, file: &str) -> Doclet {
    let mut doclet = Doclet::new(kind, name).at(dir, file);
    doclet.longname = Some(name.to_string());
    doclet
}

fn global(kind: DocletKind, name: &str, dir: &str, file: &str) -> Doclet {
    let mut doclet = located(kind, name, dir, file);
    doclet.scope = Some("global".to_string());
    doclet
}

fn enrich(doclets: Vec<Doclet>) -> Vec<Doclet> {
    let mut dictionary = TagDictionary::new();
    define_tags(&mut dictionary);
    let mut plugin = DocletPlugin::new(options());
    run(&mut plugin, &dictionary, doclets).expect("run should succeed")
}

fn modules(doclets: &[Doclet]) -> Vec<&Doclet> {
    doclets.iter().filter(|d| d.is(DocletKind::Module)).collect()
}

#[test]
fn synthesizes_one_module_for_file_without_module_doclet() {
    let doclets = vec![
        located(DocletKind::Module, "module:a", "/project/src", "a.js"),
        global(DocletKind::Function, "helper", "/project/src", "b.js"),
    ];
    let out = enrich(doclets);

    let modules = modules(&out);
    assert_eq!(modules.len(), 2);
    let synthesized = modules[1];
    assert_eq!(synthesized.longname.as_deref(), Some("module:b"));
    assert_eq!(synthesized.toc_description.as_deref(), Some("Module b"));
    assert_eq!(synthesized.category.as_deref(), Some("other"));
    assert_eq!(synthesized.included, Some(true));
    assert_eq!(synthesized.relativepath.as_deref(), Some("../src/b.js"));

    let helper = out.iter().find(|d| d.name.as_deref() == Some("helper")).unwrap();
    assert_eq!(helper.memberof, synthesized.longname);
}

#[test]
fn explicit_module_file_is_never_touched() {
    let mut explicit = located(DocletKind::Module, "module:core/api", "/project/src/core", "api.js");
    explicit.name = Some("core/api".to_string());
    let doclets = vec![
        explicit,
        global(DocletKind::Function, "call", "/project/src/core", "api.js"),
    ];
    let out = enrich(doclets);

    assert_eq!(modules(&out).len(), 1);
    let call = out.iter().find(|d| d.name.as_deref() == Some("call")).unwrap();
    assert_eq!(call.memberof.as_deref(), Some("module:core/api"));
}

#[test]
fn class_file_module_borrows_description_and_category() {
    let mut class = global(DocletKind::Class, "Widget", "/project/src/ui", "widget.js");
    class.classdesc = Some("Renders things.".to_string());
    class.tags.push(jsdoc_md_plugin::Tag::new("category", "UI"));
    let mut helper = global(DocletKind::Function, "measure", "/project/src/ui", "widget.js");
    helper.undocumented = true;

    let out = enrich(vec![class, helper]);

    let modules = modules(&out);
    assert_eq!(modules.len(), 1);
    let module = modules[0];
    assert_eq!(module.longname.as_deref(), Some("module:ui/widget"));
    assert_eq!(module.toc_description.as_deref(), Some("Renders things."));
    assert_eq!(module.category.as_deref(), Some("ui"));

    let widget = out.iter().find(|d| d.name.as_deref() == Some("Widget")).unwrap();
    assert_eq!(widget.memberof.as_deref(), Some("module:ui/widget"));
    // undocumented globals keep their parent
    let measure = out.iter().find(|d| d.name.as_deref() == Some("measure")).unwrap();
    assert_eq!(measure.memberof, None);
    assert_eq!(measure.included, Some(false));
}

#[test]
fn index_files_are_named_after_their_folder() {
    let out = enrich(vec![
        global(DocletKind::Function, "boot", "/project/src/app", "index.js"),
        global(DocletKind::Function, "start", "/project/src", "index.js"),
    ]);

    let names: Vec<_> = modules(&out)
        .iter()
        .filter_map(|m| m.longname.as_deref())
        .collect();
    assert_eq!(names, vec!["module:app", "module:src"]);
}

#[test]
fn files_with_only_undocumented_symbols_get_no_module() {
    let mut hidden = global(DocletKind::Function, "internal", "/project/src", "hidden.js");
    hidden.undocumented = true;
    let out = enrich(vec![hidden]);
    assert!(modules(&out).is_empty());
}

#[test]
fn reconstruction_is_stable_on_rerun() {
    let out = enrich(vec![global(DocletKind::Function, "helper", "/project/src", "b.js")]);
    let mut plugin = DocletPlugin::new(options());
    let mut again = out.clone();
    plugin.complete(&mut again).unwrap();
    assert_eq!(again.len(), out.len());
}
