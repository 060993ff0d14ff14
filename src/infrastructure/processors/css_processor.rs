use crate::core::interfaces::CssProcessor;
use crate::utils::{ErrorContext, ParseKind, Result, ShrinkError, Timer};
use lightningcss::{
    error::ErrorLocation,
    printer::PrinterOptions,
    stylesheet::{MinifyOptions, ParserOptions as CssParserOptions, StyleSheet},
};
use std::path::Path;

pub struct LightningCssProcessor;

impl LightningCssProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parse, optimize and print a stylesheet. Comments do not survive printing.
    pub fn minify(&self, content: &str, path: &Path) -> Result<String> {
        let options = CssParserOptions {
            filename: path.display().to_string(),
            error_recovery: false,
            ..Default::default()
        };

        let mut stylesheet = StyleSheet::parse(content, options)
            .map_err(|e| css_error(e.to_string(), e.loc, path))?;

        stylesheet
            .minify(MinifyOptions::default())
            .map_err(|e| css_error(e.to_string(), e.loc, path))?;

        let result = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| css_error(e.to_string(), e.loc, path))?;

        Ok(result.code)
    }
}

fn css_error(message: String, loc: Option<ErrorLocation>, path: &Path) -> ShrinkError {
    let mut context = ErrorContext::new().with_file(path.to_path_buf());
    if let Some(loc) = loc {
        // lightningcss lines are zero-based
        context = context.with_location(loc.line as usize + 1, loc.column as usize);
    }

    ShrinkError::Parse {
        kind: ParseKind::Css,
        message,
        context: Some(context),
    }
}

impl Default for LightningCssProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CssProcessor for LightningCssProcessor {
    async fn process_css(&self, content: &str, path: &Path) -> Result<String> {
        let _timer = Timer::start(&format!("Minifying CSS {}", path.display()));

        let content = content.to_string();
        let path = path.to_path_buf();

        tokio::task::spawn_blocking(move || LightningCssProcessor::new().minify(&content, &path))
            .await?
    }
}
