//! The doclet rule table.
//!
//! Rules are plain data: a key naming the derived property, an optional
//! condition and an effect. [`RuleTable::apply`] evaluates them in
//! declaration order against one doclet. Later rules read what earlier ones
//! wrote (`included` reads `access`, `categorycolor` reads `category`), so
//! the order of [`RuleTable::standard`] must not change.

mod catalogue;

use tracing::debug;

use crate::error::Result;
use crate::inspect::DeclarationInspector;
use crate::model::{Doclet, Property};
use crate::plugin::PluginOptions;

pub type Condition = fn(&Doclet, &RuleContext<'_>) -> bool;
pub type Process = fn(&mut Doclet, &mut RuleContext<'_>) -> Result<()>;
pub type Value = fn(&Doclet, &RuleContext<'_>) -> Result<Property>;

/// What a rule does once its condition holds.
#[derive(Clone, Copy)]
pub enum Effect {
    /// Arbitrary mutation, possibly of several fields or of the run state.
    Process(Process),
    /// Computes the value of the derived property named by the rule key.
    Value(Value),
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub key: &'static str,
    pub condition: Option<Condition>,
    pub effect: Effect,
}

impl Rule {
    pub const fn process(key: &'static str, condition: Option<Condition>, process: Process) -> Self {
        Self {
            key,
            condition,
            effect: Effect::Process(process),
        }
    }

    pub const fn value(key: &'static str, condition: Option<Condition>, value: Value) -> Self {
        Self {
            key,
            condition,
            effect: Effect::Value(value),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("key", &self.key)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

/// Longnames of classes detected as language-level exports during a run.
///
/// Written by the `isExportedClass` rule, read by `access`. Append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedClasses {
    longnames: Vec<String>,
}

impl ExportedClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a class longname. Returns false when it was already known.
    pub fn record(&mut self, longname: &str) -> bool {
        if self.contains(longname) {
            return false;
        }
        self.longnames.push(longname.to_string());
        true
    }

    pub fn contains(&self, longname: &str) -> bool {
        self.longnames.iter().any(|known| known == longname)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.longnames.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.longnames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longnames.is_empty()
    }
}

/// Everything a rule may consult besides the doclet itself.
pub struct RuleContext<'r> {
    pub options: &'r PluginOptions,
    pub exported: &'r mut ExportedClasses,
    pub inspector: &'r dyn DeclarationInspector,
}

impl<'r> RuleContext<'r> {
    pub fn new(
        options: &'r PluginOptions,
        exported: &'r mut ExportedClasses,
        inspector: &'r dyn DeclarationInspector,
    ) -> Self {
        Self {
            options,
            exported,
            inspector,
        }
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The full catalogue, in evaluation order.
    pub fn standard() -> Self {
        Self::new(catalogue::rules())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.key)
    }

    /// Apply every rule whose condition holds, in order. The doclet is
    /// mutated in place and handed back.
    pub fn apply<'d>(&self, doclet: &'d mut Doclet, ctx: &mut RuleContext<'_>) -> Result<&'d mut Doclet> {
        for rule in &self.rules {
            if let Some(condition) = rule.condition {
                if !condition(doclet, ctx) {
                    continue;
                }
            }
            debug!(rule = rule.key, doclet = doclet.label(), "applying rule");
            match rule.effect {
                Effect::Process(process) => process(doclet, ctx)?,
                Effect::Value(value) => {
                    let property = value(doclet, ctx)?;
                    doclet.set(property);
                }
            }
        }
        Ok(doclet)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::NodeInspector;
    use crate::model::DocletKind;

    #[test]
    fn catalogue_order_is_fixed() {
        let keys: Vec<_> = RuleTable::standard().keys().collect();
        assert_eq!(
            keys,
            vec![
                "isExportedClass",
                "tocDescription",
                "valuecode",
                "screenshot",
                "category",
                "categorycolor",
                "static",
                "hasParameters",
                "relativepath",
                "type",
                "memberof",
                "access",
                "included",
                "isDefault",
                "fixUndocumented",
                "acceptTypeScriptType",
                "fixDottedPath",
                "inject",
            ]
        );
    }

    #[test]
    fn skips_rules_whose_condition_fails() {
        fn only_modules(doclet: &Doclet, _: &RuleContext<'_>) -> bool {
            doclet.is(DocletKind::Module)
        }
        fn mark(_: &Doclet, _: &RuleContext<'_>) -> Result<Property> {
            Ok(Property::Category("marked".to_string()))
        }

        let table = RuleTable::new(vec![Rule::value("category", Some(only_modules), mark)]);
        let options = PluginOptions::default();
        let mut exported = ExportedClasses::new();
        let mut ctx = RuleContext::new(&options, &mut exported, &NodeInspector);

        let mut module = Doclet::new(DocletKind::Module, "m");
        let mut function = Doclet::new(DocletKind::Function, "f");
        table.apply(&mut module, &mut ctx).unwrap();
        table.apply(&mut function, &mut ctx).unwrap();

        assert_eq!(module.category.as_deref(), Some("marked"));
        assert_eq!(function.category, None);
    }

    #[test]
    fn exported_classes_are_recorded_once() {
        let mut exported = ExportedClasses::new();
        assert!(exported.record("module:ui~Widget"));
        assert!(!exported.record("module:ui~Widget"));
        assert_eq!(exported.len(), 1);
        assert!(exported.contains("module:ui~Widget"));
    }
}
