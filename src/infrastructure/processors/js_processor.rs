use crate::core::{interfaces::JsProcessor, models::JsOptions};
use crate::utils::{ParseKind, Result, ShrinkError, Timer};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::path::Path;
use std::sync::Arc;

/// JavaScript minification and mangling using oxc
pub struct OxcMinifier {
    options: JsOptions,
}

impl OxcMinifier {
    pub fn new(options: JsOptions) -> Self {
        Self { options }
    }

    fn minifier_options(&self) -> MinifierOptions {
        MinifierOptions {
            mangle: Some(MangleOptions {
                top_level: self.options.mangle_toplevel,
                ..MangleOptions::default()
            }),
            compress: Some(CompressOptions {
                drop_console: self.options.drop_console,
                ..CompressOptions::default()
            }),
        }
    }

    /// Minify JavaScript source. Any parser diagnostic fails the file.
    pub fn minify(&self, source_code: &str, path: &Path) -> Result<String> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_default();

        let parse_result = Parser::new(&allocator, source_code, source_type).parse();

        if parse_result.panicked || !parse_result.errors.is_empty() {
            let errors: Vec<String> = parse_result
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect();
            return Err(ShrinkError::parse_in_file(
                ParseKind::Js,
                errors.join("\n"),
                path,
            ));
        }

        let mut program = parse_result.program;
        let minified = Minifier::new(self.minifier_options()).minify(&allocator, &mut program);

        // Minify mode also drops every comment
        let code = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(code)
    }
}

impl Default for OxcMinifier {
    fn default() -> Self {
        Self::new(JsOptions::default())
    }
}

#[derive(Clone)]
pub struct OxcJsProcessor {
    minifier: Arc<OxcMinifier>,
}

impl OxcJsProcessor {
    pub fn new(options: JsOptions) -> Self {
        Self {
            minifier: Arc::new(OxcMinifier::new(options)),
        }
    }
}

impl Default for OxcJsProcessor {
    fn default() -> Self {
        Self::new(JsOptions::default())
    }
}

#[async_trait::async_trait]
impl JsProcessor for OxcJsProcessor {
    async fn process_js(&self, content: &str, path: &Path) -> Result<String> {
        let _timer = Timer::start(&format!("Minifying JS {}", path.display()));

        let minifier = self.minifier.clone();
        let content = content.to_string();
        let path = path.to_path_buf();

        // oxc is CPU-bound; keep it off the async workers
        tokio::task::spawn_blocking(move || minifier.minify(&content, &path)).await?
    }
}
