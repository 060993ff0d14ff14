use std::path::{Path, PathBuf};
use std::time::Duration;

/// File classification that picks the handler for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Html,
    Css,
    Js,
    Other,
}

impl AssetKind {
    /// Only the exact extensions `html`, `css` and `js` (any case) are minified
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" => AssetKind::Html,
            "css" => AssetKind::Css,
            "js" => AssetKind::Js,
            _ => AssetKind::Other,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .map(Self::from_extension)
            .unwrap_or(AssetKind::Other)
    }

    pub fn action_label(&self) -> &'static str {
        match self {
            AssetKind::Html => "Compressed HTML",
            AssetKind::Css => "Compressed CSS",
            AssetKind::Js => "Obfuscated and compressed JS",
            AssetKind::Other => "Copied non-code file",
        }
    }

    pub fn is_minified(&self) -> bool {
        !matches!(self, AssetKind::Other)
    }
}

/// Kind of a node found while listing a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File(AssetKind),
}

/// A filesystem node discovered during traversal
#[derive(Debug, Clone)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn directory(path: PathBuf) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(path: PathBuf) -> Self {
        let asset = AssetKind::from_path(&path);
        Self {
            path,
            kind: EntryKind::File(asset),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Mirror this entry's path from `source_root` into `dest_root`
    pub fn destination(&self, source_root: &Path, dest_root: &Path) -> PathBuf {
        match self.path.strip_prefix(source_root) {
            Ok(relative) => dest_root.join(relative),
            // Entries are always listed from beneath the source root
            Err(_) => dest_root.join(self.path.file_name().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JsOptions {
    /// Rename module-scope identifiers
    pub mangle_toplevel: bool,
    /// Remove `console.*` calls
    pub drop_console: bool,
}

impl Default for JsOptions {
    fn default() -> Self {
        Self {
            mangle_toplevel: true,
            drop_console: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlOptions {
    pub minify_css: bool,
    pub minify_js: bool,
    pub keep_comments: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            minify_css: true,
            minify_js: true,
            keep_comments: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    /// Files transformed at once; 1 walks the tree sequentially
    pub jobs: usize,
    pub js: JsOptions,
    pub html: HtmlOptions,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            dest_root: PathBuf::from("dist"),
            jobs: 1,
            js: JsOptions::default(),
            html: HtmlOptions::default(),
        }
    }
}

impl BuildConfig {
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            ..Default::default()
        }
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }
}

/// Record of a single written output file
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: AssetKind,
    pub input_size: u64,
    pub output_size: u64,
}

impl ProcessedFile {
    pub fn saved_bytes(&self) -> u64 {
        self.input_size.saturating_sub(self.output_size)
    }
}

#[derive(Debug, Default)]
pub struct BuildResult {
    pub files: Vec<ProcessedFile>,
    pub directories_created: usize,
    pub build_time: Duration,
}

impl BuildResult {
    pub fn count(&self, kind: AssetKind) -> usize {
        self.files.iter().filter(|f| f.kind == kind).count()
    }

    pub fn total_input(&self) -> u64 {
        self.files.iter().map(|f| f.input_size).sum()
    }

    pub fn total_output(&self) -> u64 {
        self.files.iter().map(|f| f.output_size).sum()
    }

    pub fn reduction_percentage(&self) -> f64 {
        let input = self.total_input() as f64;
        if input == 0.0 {
            return 0.0;
        }
        ((input - self.total_output() as f64) / input) * 100.0
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files ({} HTML, {} CSS, {} JS, {} copied), {:.1}% smaller",
            self.files.len(),
            self.count(AssetKind::Html),
            self.count(AssetKind::Css),
            self.count(AssetKind::Js),
            self.count(AssetKind::Other),
            self.reduction_percentage()
        )
    }
}
