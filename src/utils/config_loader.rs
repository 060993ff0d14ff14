use crate::core::models::{BuildConfig, HtmlOptions, JsOptions};
use crate::utils::{Logger, Result, ShrinkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "shrinkray.config.json";

/// Configuration file format (shrinkray.config.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ShrinkrayConfig {
    /// Source directory (default: "src")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_dir: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    /// Files processed at once, 0 for one per CPU (default: 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Rename top-level JS identifiers (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mangle_toplevel: Option<bool>,

    /// Remove console calls from JS (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_console: Option<bool>,

    /// Minify `<style>` content in HTML (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify_inline_css: Option<bool>,

    /// Minify `<script>` content in HTML (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minify_inline_js: Option<bool>,

    /// Keep HTML comments (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_html_comments: Option<bool>,
}

/// Values given on the command line; `None` defers to the file, then the default
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub src: Option<String>,
    pub outdir: Option<String>,
    pub jobs: Option<usize>,
    pub keep_console: bool,
    pub no_mangle_toplevel: bool,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `shrinkray.config.json` from `dir` if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<ShrinkrayConfig>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
            return Ok(None);
        }

        Self::load_from_file(&config_path).map(Some)
    }

    /// Load an explicit config file; a missing file is an error here
    pub fn load_from_file(config_path: &Path) -> Result<ShrinkrayConfig> {
        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(config_path)
            .map_err(|e| ShrinkError::fs(config_path, e))?;

        serde_json::from_str(&content).map_err(|e| {
            ShrinkError::config(format!(
                "Failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(file_config: Option<ShrinkrayConfig>, cli: &CliOverrides) -> BuildConfig {
        let base = file_config.unwrap_or_default();
        let defaults = BuildConfig::default();

        let source_root = cli
            .src
            .clone()
            .or(base.src_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.source_root);

        let dest_root = cli
            .outdir
            .clone()
            .or(base.out_dir)
            .map(PathBuf::from)
            .unwrap_or(defaults.dest_root);

        let jobs = match cli.jobs.or(base.jobs).unwrap_or(defaults.jobs) {
            0 => num_cpus::get(),
            n => n,
        };

        let js = JsOptions {
            mangle_toplevel: !cli.no_mangle_toplevel
                && base.mangle_toplevel.unwrap_or(defaults.js.mangle_toplevel),
            drop_console: !cli.keep_console
                && base.drop_console.unwrap_or(defaults.js.drop_console),
        };

        let html = HtmlOptions {
            minify_css: base.minify_inline_css.unwrap_or(defaults.html.minify_css),
            minify_js: base.minify_inline_js.unwrap_or(defaults.html.minify_js),
            keep_comments: base.keep_html_comments.unwrap_or(defaults.html.keep_comments),
        };

        BuildConfig {
            source_root,
            dest_root,
            jobs,
            js,
            html,
        }
    }

    /// Example config file with every default spelled out
    pub fn generate_example() -> Result<String> {
        let example = ShrinkrayConfig {
            src_dir: Some("src".to_string()),
            out_dir: Some("dist".to_string()),
            jobs: Some(1),
            mangle_toplevel: Some(true),
            drop_console: Some(true),
            minify_inline_css: Some(true),
            minify_inline_js: Some(true),
            keep_html_comments: Some(false),
        };
        Ok(serde_json::to_string_pretty(&example)?)
    }
}
