use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which handler rejected its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseKind {
    Html,
    Css,
    Js,
}

impl fmt::Display for ParseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseKind::Html => write!(f, "HTML"),
            ParseKind::Css => write!(f, "CSS"),
            ParseKind::Js => write!(f, "JS"),
        }
    }
}

/// Error with file location context
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub file_path: Option<PathBuf>,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: PathBuf) -> Self {
        self.file_path = Some(path);
        self
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

#[derive(Error, Debug)]
pub enum ShrinkError {
    #[error("IO error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} parse error: {message}")]
    Parse {
        kind: ParseKind,
        message: String,
        context: Option<ErrorContext>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Worker task failed: {0}")]
    Task(String),
}

impl ShrinkError {
    /// Wrap an I/O error with the path it concerns
    pub fn fs(path: &Path, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse_in_file(kind: ParseKind, message: String, path: &Path) -> Self {
        Self::Parse {
            kind,
            message,
            context: Some(ErrorContext::new().with_file(path.to_path_buf())),
        }
    }

    pub fn config(message: String) -> Self {
        Self::Config(message)
    }

    pub fn is_file_system(&self) -> bool {
        matches!(self, Self::FileSystem { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Format error with file context for the terminal
    pub fn format_detailed(&self) -> String {
        match self {
            ShrinkError::Parse {
                kind,
                message,
                context,
            } => {
                let mut output = format!("❌ {} Parse Error: {}", kind, message);

                if let Some(ctx) = context {
                    if let Some(ref file_path) = ctx.file_path {
                        output.push_str(&format!("\n📁 File: {}", file_path.display()));
                    }

                    if let (Some(line), Some(column)) = (ctx.line, ctx.column) {
                        output.push_str(&format!(
                            "\n📍 Location: line {}, column {}",
                            line, column
                        ));
                    }
                }

                output
            }
            ShrinkError::FileSystem { path, source } => {
                format!("❌ File System Error: {}\n📁 Path: {}", source, path.display())
            }
            _ => format!("❌ {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ShrinkError>;

impl From<tokio::task::JoinError> for ShrinkError {
    fn from(err: tokio::task::JoinError) -> Self {
        ShrinkError::Task(err.to_string())
    }
}

impl From<serde_json::Error> for ShrinkError {
    fn from(err: serde_json::Error) -> Self {
        ShrinkError::config(err.to_string())
    }
}
