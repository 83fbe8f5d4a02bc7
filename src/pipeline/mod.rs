//! Pipeline orchestrator: ties loader → report → render together.
//!
//! ## Pipelines
//!
//! `run_page()` — page-metrics export:
//!   1. Load per-day records (numeric cells default to 0, dates are strict)
//!   2. Compute date range + reach / impressions / engaged / likes series
//!   3. Render the page template and write the page report
//!
//! `run_post()` — post-engagement export:
//!   1. Load per-post records (every field strict)
//!   2. Compute date range, rank by total reach, keep the top N
//!   3. Render the post template and write the post report
//!
//! Everything is parsed and rendered before the output file is touched, so a
//! failing run leaves no partial report behind.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::loader::{load_page_csv, load_post_csv};
use crate::render::{ReportRenderer, write_report};
use crate::report::{build_page_context, build_post_context};
use crate::utils::Timer;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct Pipeline {
    config: ReportConfig,
    renderer: ReportRenderer,
}

impl Pipeline {
    pub fn new(config: ReportConfig) -> Self {
        let renderer = ReportRenderer::new(config.resolve_template_dir());
        info!("Templates: {:?}", renderer.template_dir());
        Self { config, renderer }
    }

    pub fn run_page(&self, page_file: &Path) -> Result<PipelineStats> {
        let _t = Timer::start("FB Page report");
        ensure_exists("page", page_file)?;
        info!("Analyzing Facebook Page file {:?}", page_file);

        let records = load_page_csv(page_file)
            .with_context(|| format!("Failed to load page data from {:?}", page_file))?;
        let ctx = build_page_context(&records)?;

        info!("Start Date: {}", ctx.start_date);
        info!("End Date: {}", ctx.end_date);

        let html = self.renderer.render(&self.config.page_template, &ctx)?;

        let out = self.config.page_output_path();
        info!("Generating FB Page Report {:?}", out);
        write_report(&out, &html)?;

        Ok(PipelineStats {
            records: records.len(),
            reported: records.len(),
            output: out,
        })
    }

    pub fn run_post(&self, post_file: &Path) -> Result<PipelineStats> {
        let _t = Timer::start("FB Post report");
        ensure_exists("post", post_file)?;
        info!("Analyzing Facebook Post file {:?}", post_file);

        let posts = load_post_csv(post_file)
            .with_context(|| format!("Failed to load post data from {:?}", post_file))?;
        let ctx = build_post_context(&posts, self.config.top_posts)?;

        info!("Start Date: {}", ctx.start_date);
        info!("End Date: {}", ctx.end_date);

        let html = self.renderer.render(&self.config.post_template, &ctx)?;

        let out = self.config.post_output_path();
        info!("Generating FB Post Report {:?}", out);
        write_report(&out, &html)?;

        Ok(PipelineStats {
            records: posts.len(),
            reported: ctx.top_posts.len(),
            output: out,
        })
    }
}

/// Fail before parsing when the input path does not name a file.
pub fn ensure_exists(kind: &'static str, path: &Path) -> Result<(), ReportError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ReportError::MissingFile {
            kind,
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug)]
pub struct PipelineStats {
    /// Data rows parsed from the input file.
    pub records: usize,
    /// Rows that made it into the report.
    pub reported: usize,
    pub output: PathBuf,
}
