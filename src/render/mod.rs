//! Template rendering and report output.
//!
//! Auto-escaping is off for every template: post messages are inserted into
//! the report as written, markup included.

use crate::error::{ReportError, ReportResult};
use minijinja::{AutoEscape, Environment, path_loader};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ReportRenderer {
    env: Environment<'static>,
    template_dir: PathBuf,
}

impl ReportRenderer {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        let template_dir = template_dir.into();

        let mut env = Environment::new();
        env.set_loader(path_loader(&template_dir));
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self { env, template_dir }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// Render template `name` against `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: &S) -> ReportResult<String> {
        debug!("Rendering {} from {:?}", name, self.template_dir);
        let tmpl = self.env.get_template(name)?;
        Ok(tmpl.render(ctx)?)
    }
}

/// Write rendered markup as UTF-8, replacing any existing file.
pub fn write_report(path: &Path, html: &str) -> ReportResult<()> {
    std::fs::write(path, html.as_bytes()).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
