use crate::core::{interfaces::HtmlProcessor, models::HtmlOptions};
use crate::utils::{ParseKind, Result, ShrinkError, Timer};
use minify_html::{minify, Cfg};
use std::path::Path;
use std::sync::Arc;

/// HTML minification using minify-html.
///
/// Whitespace is always collapsed and the doctype is always shortened to
/// `<!doctype html>`. Inline `<style>`/`<script>` and comment handling follow
/// [`HtmlOptions`].
pub struct MinifyHtmlProcessor {
    cfg: Arc<Cfg>,
}

impl MinifyHtmlProcessor {
    pub fn new(options: &HtmlOptions) -> Self {
        let mut cfg = Cfg::new();
        cfg.do_not_minify_doctype = false;
        cfg.keep_comments = options.keep_comments;
        cfg.minify_css = options.minify_css;
        cfg.minify_js = options.minify_js;
        cfg.keep_input_type_text_attr = false;
        cfg.remove_processing_instructions = true;

        Self { cfg: Arc::new(cfg) }
    }

    pub fn minify(&self, content: &str, path: &Path) -> Result<String> {
        minify_with(&self.cfg, content, path)
    }
}

fn minify_with(cfg: &Cfg, content: &str, path: &Path) -> Result<String> {
    let minified = minify(content.as_bytes(), cfg);

    String::from_utf8(minified).map_err(|e| {
        ShrinkError::parse_in_file(
            ParseKind::Html,
            format!("minified output is not valid UTF-8: {}", e),
            path,
        )
    })
}

impl Default for MinifyHtmlProcessor {
    fn default() -> Self {
        Self::new(&HtmlOptions::default())
    }
}

#[async_trait::async_trait]
impl HtmlProcessor for MinifyHtmlProcessor {
    async fn process_html(&self, content: &str, path: &Path) -> Result<String> {
        let _timer = Timer::start(&format!("Minifying HTML {}", path.display()));

        let cfg = self.cfg.clone();
        let content = content.to_string();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || minify_with(&cfg, &content, &path)).await?
    }
}
