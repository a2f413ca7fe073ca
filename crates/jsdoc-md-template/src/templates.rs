//! Template loading: a template directory on disk, or the embedded defaults.

use std::fs;
use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};
use rust_embed::RustEmbed;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::{debug, error};

use crate::error::{RenderError, Result};

#[derive(RustEmbed)]
#[folder = "templates/"]
struct DefaultTemplates;

/// Compiled templates, addressable by file basename.
///
/// Partials are registered in the same environment so templates can
/// `{% include %}` them, but only top-level templates can be rendered.
pub struct Templates {
    env: Environment<'static>,
    renderable: FxHashSet<String>,
}

impl Templates {
    fn empty() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_trim_blocks(true);
        Self {
            env,
            renderable: FxHashSet::default(),
        }
    }

    /// Templates from `<dir>/templates`, or the embedded defaults.
    pub fn load(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Built-in templates shipped with the crate.
    pub fn embedded() -> Self {
        let mut templates = Self::empty();
        for path in DefaultTemplates::iter() {
            let Some(file) = DefaultTemplates::get(&path) else {
                continue;
            };
            let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
            let (partial, file_name) = match path.strip_prefix("partials/") {
                Some(rest) => (true, rest),
                None => (false, &*path),
            };
            templates.add(template_name(Path::new(file_name)), source, !partial);
        }
        templates
    }

    /// Partials from `<dir>/templates/partials`, then templates from
    /// `<dir>/templates`. Unreadable or invalid files are logged and skipped;
    /// the partials folder is optional.
    pub fn from_dir(dir: &Path) -> Self {
        let mut templates = Self::empty();
        let folder = dir.join("templates");
        if let Err(err) = templates.add_folder(&folder.join("partials"), false) {
            debug!("no partials loaded: {err}");
        }
        if let Err(err) = templates.add_folder(&folder, true) {
            error!("Unable to enumerate and compile template files: {err}");
        }
        templates
    }

    fn add_folder(&mut self, folder: &Path, renderable: bool) -> Result<()> {
        let entries = fs::read_dir(folder).map_err(|e| RenderError::io(folder, e))?;
        for entry in entries {
            let path = entry.map_err(|e| RenderError::io(folder, e))?.path();
            if path.is_dir() {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(source) => self.add(template_name(&path), source, renderable),
                Err(err) => error!(
                    "Unable to compile the template file {}: {err}",
                    path.display()
                ),
            }
        }
        Ok(())
    }

    fn add(&mut self, name: String, source: String, renderable: bool) {
        match self.env.add_template_owned(name.clone(), source) {
            Ok(()) => {
                debug!(template = %name, renderable, "compiled template");
                if renderable {
                    self.renderable.insert(name);
                }
            }
            Err(err) => error!("Unable to compile the template file {name}: {err}"),
        }
    }

    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }

    pub fn contains(&self, name: &str) -> bool {
        self.renderable.contains(name)
    }

    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String> {
        if !self.contains(name) {
            return Err(RenderError::MissingTemplate(name.to_string()));
        }
        let template = self
            .env
            .get_template(name)
            .map_err(|e| RenderError::template(name, e))?;
        template
            .render(context)
            .map_err(|e| RenderError::template(name, e))
    }
}

fn template_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
