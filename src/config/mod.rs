use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TEMPLATE_DIR_NAME: &str = "report_templates";

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
}

/// Report rendering and output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Explicit template directory; see [`ReportConfig::resolve_template_dir`].
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_page_template")]
    pub page_template: String,

    #[serde(default = "default_post_template")]
    pub post_template: String,

    #[serde(default = "default_page_output")]
    pub page_output: String,

    #[serde(default = "default_post_output")]
    pub post_output: String,

    #[serde(default = "default_top_posts")]
    pub top_posts: usize,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_page_template() -> String {
    "page_report.html".to_string()
}
fn default_post_template() -> String {
    "post_report.html".to_string()
}
fn default_page_output() -> String {
    "fb_page_report_out.html".to_string()
}
fn default_post_output() -> String {
    "fb_post_report_out.html".to_string()
}
fn default_top_posts() -> usize {
    10
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            template_dir: None,
            output_dir: default_output_dir(),
            page_template: default_page_template(),
            post_template: default_post_template(),
            page_output: default_page_output(),
            post_output: default_post_output(),
            top_posts: default_top_posts(),
        }
    }
}

impl ReportConfig {
    pub fn page_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.page_output)
    }

    pub fn post_output_path(&self) -> PathBuf {
        self.output_dir.join(&self.post_output)
    }

    /// Where templates are read from: the configured directory, else
    /// `report_templates/` beside the executable, else the one shipped with
    /// the crate sources, else `./report_templates`.
    pub fn resolve_template_dir(&self) -> PathBuf {
        if let Some(dir) = &self.template_dir {
            return dir.clone();
        }

        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|p| p.join(TEMPLATE_DIR_NAME)));

        let candidates = beside_exe
            .into_iter()
            .chain(std::iter::once(
                PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_DIR_NAME),
            ));

        for dir in candidates {
            if dir.is_dir() {
                return dir;
            }
        }

        PathBuf::from(TEMPLATE_DIR_NAME)
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::Environment::with_prefix("FB_REPORT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        cfg.try_deserialize().context("Invalid configuration")
    }
}
