use crate::core::models::{AssetKind, BuildResult};
use colored::*;
use std::path::Path;

/// Terminal summary printed after a build
pub struct BuildSummary<'a> {
    result: &'a BuildResult,
    dest_root: &'a Path,
}

impl<'a> BuildSummary<'a> {
    pub fn new(result: &'a BuildResult, dest_root: &'a Path) -> Self {
        Self { result, dest_root }
    }

    pub fn print(&self) {
        println!();
        for kind in [AssetKind::Html, AssetKind::Css, AssetKind::Js, AssetKind::Other] {
            let count = self.result.count(kind);
            if count == 0 {
                continue;
            }
            let noun = if count == 1 { "file" } else { "files" };
            println!(
                "  {:<6} {} {}",
                kind_label(kind).bright_cyan(),
                count.to_string().bright_white().bold(),
                noun.bright_black()
            );
        }

        println!();
        println!(
            "  {} {} → {} {}",
            self.dest_root.display().to_string().bright_black(),
            format_size(self.result.total_input()),
            format_size(self.result.total_output()).bright_white(),
            format!("(-{:.1}%)", self.result.reduction_percentage()).bright_green()
        );
        println!(
            "  {} built in {}",
            "✓".bright_green(),
            format!("{:.0}ms", self.result.build_time.as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );
    }
}

fn kind_label(kind: AssetKind) -> &'static str {
    match kind {
        AssetKind::Html => "html",
        AssetKind::Css => "css",
        AssetKind::Js => "js",
        AssetKind::Other => "copied",
    }
}

pub fn format_size(bytes: u64) -> String {
    let size_kb = bytes as f64 / 1024.0;
    if size_kb < 1.0 {
        format!("{} B", bytes)
    } else if size_kb < 1024.0 {
        format!("{:.2} kB", size_kb)
    } else {
        format!("{:.2} MB", size_kb / 1024.0)
    }
}
