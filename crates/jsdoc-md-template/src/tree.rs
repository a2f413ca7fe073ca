//! Assembly of the documentation tree from the flat doclet collection.

use std::cmp::Ordering;

use jsdoc_md_plugin::{Doclet, DocletKind};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

/// Children collection a doclet kind lands in, and whether its own children
/// are attached in turn.
fn collection(kind: DocletKind) -> Option<(Collection, bool)> {
    match kind {
        DocletKind::Namespace => Some((Collection::Namespaces, true)),
        DocletKind::Module => Some((Collection::Modules, true)),
        DocletKind::Class => Some((Collection::Classes, true)),
        DocletKind::Mixin => Some((Collection::Mixins, true)),
        DocletKind::Function => Some((Collection::Functions, false)),
        DocletKind::Member => Some((Collection::Members, false)),
        DocletKind::Event => Some((Collection::Events, false)),
        DocletKind::Constant => Some((Collection::Constants, false)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Namespaces,
    Modules,
    Classes,
    Mixins,
    Functions,
    Members,
    Events,
    Constants,
}

impl Collection {
    fn of(self, node: &mut Doclet) -> &mut Vec<Doclet> {
        match self {
            Self::Namespaces => &mut node.namespaces,
            Self::Modules => &mut node.modules,
            Self::Classes => &mut node.classes,
            Self::Mixins => &mut node.mixins,
            Self::Functions => &mut node.functions,
            Self::Members => &mut node.members,
            Self::Events => &mut node.events,
            Self::Constants => &mut node.constants,
        }
    }
}

/// Build the tree. The root is an anonymous doclet whose collections hold
/// every doclet without `memberof`; children are attached under the doclet
/// whose longname equals their `memberof`.
///
/// Doclets with `included == false` and `package` doclets are dropped.
pub fn build_tree(doclets: &[Doclet]) -> Doclet {
    let kept: Vec<&Doclet> = doclets
        .iter()
        .filter(|doclet| doclet.included != Some(false) && !doclet.is(DocletKind::Package))
        .collect();

    let mut by_parent: FxHashMap<Option<&str>, Vec<&Doclet>> = FxHashMap::default();
    for doclet in kept {
        by_parent
            .entry(doclet.memberof.as_deref())
            .or_default()
            .push(doclet);
    }

    let mut root = Doclet::default();
    let mut path = FxHashSet::default();
    attach_children(&mut root, None, &by_parent, &mut path);
    root
}

fn attach_children<'a>(
    node: &mut Doclet,
    parent: Option<&'a str>,
    by_parent: &FxHashMap<Option<&'a str>, Vec<&'a Doclet>>,
    path: &mut FxHashSet<&'a str>,
) {
    let Some(children) = by_parent.get(&parent) else {
        return;
    };
    for &child in children {
        let Some((target, recurse)) = child.kind.and_then(collection) else {
            continue;
        };
        let mut attached = child.clone();
        if recurse {
            if let Some(longname) = child.longname.as_deref() {
                if path.insert(longname) {
                    attach_children(&mut attached, Some(longname), by_parent, path);
                    path.remove(longname);
                } else {
                    warn!(doclet = longname, "doclet is its own ancestor, children not attached twice");
                }
            }
        }
        target.of(node).push(attached);
    }
}

/// Public first, then protected, private, package; doclets without access
/// last. Stable.
pub fn sort_by_access(doclets: &mut [Doclet]) {
    doclets.sort_by(|a, b| match (a.access, b.access) {
        (Some(a), Some(b)) => a.rank().cmp(&b.rank()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Sort a module's functions and constants, and each of its classes'
/// functions and members.
pub fn sort_module_children(module: &mut Doclet) {
    sort_by_access(&mut module.functions);
    sort_by_access(&mut module.constants);
    for class in &mut module.classes {
        sort_by_access(&mut class.functions);
        sort_by_access(&mut class.members);
    }
}
