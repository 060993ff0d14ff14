use crate::core::{interfaces::*, models::*};
use crate::infrastructure::{
    LightningCssProcessor, MinifyHtmlProcessor, OxcJsProcessor, TokioFileSystemService,
};
use crate::utils::{Logger, Result, ShrinkError, Timer};
use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};

/// Mirrors a source tree into a destination tree, minifying HTML, CSS and JS
/// and copying everything else.
pub struct TreeProcessorService {
    fs_service: Arc<dyn FileSystemService>,
    html_processor: Arc<dyn HtmlProcessor>,
    css_processor: Arc<dyn CssProcessor>,
    js_processor: Arc<dyn JsProcessor>,
}

/// State shared by every task of a single run
struct RunState<'a> {
    config: &'a BuildConfig,
    /// Canonical destination root, skipped when it lies inside the source tree
    dest_canonical: Option<PathBuf>,
    permits: Semaphore,
    result: Mutex<BuildResult>,
}

impl TreeProcessorService {
    pub fn new(
        fs_service: Arc<dyn FileSystemService>,
        html_processor: Arc<dyn HtmlProcessor>,
        css_processor: Arc<dyn CssProcessor>,
        js_processor: Arc<dyn JsProcessor>,
    ) -> Self {
        Self {
            fs_service,
            html_processor,
            css_processor,
            js_processor,
        }
    }

    /// Default services: tokio file system, minify-html, lightningcss and oxc
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(
            Arc::new(TokioFileSystemService),
            Arc::new(MinifyHtmlProcessor::new(&config.html)),
            Arc::new(LightningCssProcessor::new()),
            Arc::new(OxcJsProcessor::new(config.js.clone())),
        )
    }

    /// Depth-first pre-order walk of `dir`.
    ///
    /// Children are driven through `buffer_unordered(jobs)`; with one job this
    /// is a plain sequential pass in listing order. The first error ends the
    /// stream and drops the siblings still in flight.
    fn walk<'a>(&'a self, run: &'a RunState<'a>, dir: &'a Path) -> BoxFuture<'a, Result<()>> {
        async move {
            Logger::entering_directory(dir);
            let entries = self.fs_service.list_directory(dir).await?;

            stream::iter(entries.into_iter().map(|entry| self.visit(run, entry)))
                .buffer_unordered(run.config.jobs.max(1))
                .try_for_each(|()| future::ready(Ok(())))
                .await
        }
        .boxed()
    }

    fn visit<'a>(&'a self, run: &'a RunState<'a>, entry: TreeEntry) -> BoxFuture<'a, Result<()>> {
        async move {
            match entry.kind {
                EntryKind::Directory => {
                    if self.is_output_root(run, &entry.path).await {
                        Logger::skipping_output_root(&entry.path);
                        return Ok(());
                    }

                    let destination =
                        entry.destination(&run.config.source_root, &run.config.dest_root);

                    // The directory exists before anything beneath it is written
                    if !self.fs_service.exists(&destination).await {
                        self.fs_service.create_directory(&destination).await?;
                        run.result.lock().await.directories_created += 1;
                    }

                    self.walk(run, &entry.path).await
                }
                EntryKind::File(kind) => self.process_file(run, &entry, kind).await,
            }
        }
        .boxed()
    }

    async fn is_output_root(&self, run: &RunState<'_>, dir: &Path) -> bool {
        match (&run.dest_canonical, tokio::fs::canonicalize(dir).await) {
            (Some(dest), Ok(dir)) => *dest == dir,
            _ => false,
        }
    }

    async fn process_file(&self, run: &RunState<'_>, entry: &TreeEntry, kind: AssetKind) -> Result<()> {
        let source = &entry.path;
        let destination = entry.destination(&run.config.source_root, &run.config.dest_root);

        let _permit = run
            .permits
            .acquire()
            .await
            .map_err(|e| ShrinkError::Task(e.to_string()))?;

        let (input_size, output_size) = match kind {
            AssetKind::Other => {
                let bytes = self.fs_service.copy_file(source, &destination).await?;
                (bytes, bytes)
            }
            AssetKind::Html | AssetKind::Css | AssetKind::Js => {
                let content = self.fs_service.read_file(source).await?;
                let minified = self.minify(kind, &content, source).await?;
                self.fs_service.write_file(&destination, &minified).await?;
                (content.len() as u64, minified.len() as u64)
            }
        };

        Logger::file_processed(kind, source);

        run.result.lock().await.files.push(ProcessedFile {
            source: source.clone(),
            destination,
            kind,
            input_size,
            output_size,
        });

        Ok(())
    }

    async fn minify(&self, kind: AssetKind, content: &str, path: &Path) -> Result<String> {
        match kind {
            AssetKind::Html => self.html_processor.process_html(content, path).await,
            AssetKind::Css => self.css_processor.process_css(content, path).await,
            AssetKind::Js => self.js_processor.process_js(content, path).await,
            AssetKind::Other => Ok(content.to_string()),
        }
    }
}

#[async_trait::async_trait]
impl BuildService for TreeProcessorService {
    async fn build(&self, config: &BuildConfig) -> Result<BuildResult> {
        let timer = Timer::start("Tree processing");
        Logger::build_start(&config.source_root, &config.dest_root, config.jobs);

        // Only the root itself is created here; its parent must exist
        if !self.fs_service.exists(&config.dest_root).await {
            self.fs_service.create_root(&config.dest_root).await?;
            Logger::created_root(&config.dest_root);
        }

        let dest_canonical = tokio::fs::canonicalize(&config.dest_root).await.ok();

        // Writing a file onto itself truncates it before it is read
        if let (Some(dest), Ok(source)) = (
            &dest_canonical,
            tokio::fs::canonicalize(&config.source_root).await,
        ) {
            if *dest == source {
                return Err(ShrinkError::config(format!(
                    "source and output directories are the same: {}",
                    source.display()
                )));
            }
        }

        let run = RunState {
            config,
            dest_canonical,
            permits: Semaphore::new(config.jobs.max(1)),
            result: Mutex::new(BuildResult::default()),
        };

        self.walk(&run, &config.source_root).await?;

        let mut result = run.result.into_inner();
        result.files.sort_by(|a, b| a.source.cmp(&b.source));
        result.build_time = timer.elapsed();

        Logger::debug(&format!("Build finished: {}", result));
        Ok(result)
    }
}
