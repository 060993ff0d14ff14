use crate::core::{interfaces::BuildService, services::TreeProcessorService};
use crate::utils::{BuildSummary, CliOverrides, ConfigLoader, Logger, Result, ShrinkError, CONFIG_FILE_NAME};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "shrinkray")]
#[command(version, about = "Mirror a static site into a minified output directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Minify a source tree into an output tree (the default command)
    Build(BuildArgs),
    /// Write an example shrinkray.config.json to the current directory
    Init,
    /// Show how files are handled
    Info,
}

#[derive(clap::Args, Debug, Default)]
pub struct BuildArgs {
    /// Source directory [default: src]
    #[arg(short, long)]
    pub src: Option<String>,
    /// Output directory [default: dist]
    #[arg(short, long)]
    pub outdir: Option<String>,
    /// Files processed at once, 0 for one per CPU [default: 1]
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Config file [default: ./shrinkray.config.json if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Keep console.* calls in JavaScript
    #[arg(long)]
    pub keep_console: bool,
    /// Do not rename top-level JavaScript identifiers
    #[arg(long)]
    pub no_mangle_toplevel: bool,
    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.dispatch(cli).await
    }

    pub async fn dispatch(&self, cli: Cli) -> Result<()> {
        match cli.command {
            None => self.handle_build_command(BuildArgs::default()).await,
            Some(Commands::Build(args)) => self.handle_build_command(args).await,
            Some(Commands::Init) => {
                Logger::init(false);
                self.handle_init_command(Path::new("."))
            }
            Some(Commands::Info) => {
                Logger::init(false);
                self.handle_info_command();
                Ok(())
            }
        }
    }

    async fn handle_build_command(&self, args: BuildArgs) -> Result<()> {
        Logger::init(args.quiet);

        let file_config = match &args.config {
            Some(path) => Some(ConfigLoader::load_from_file(path)?),
            None => ConfigLoader::load_from_dir(Path::new("."))?,
        };

        let overrides = CliOverrides {
            src: args.src,
            outdir: args.outdir,
            jobs: args.jobs,
            keep_console: args.keep_console,
            no_mangle_toplevel: args.no_mangle_toplevel,
        };
        let config = ConfigLoader::merge_with_cli(file_config, &overrides);

        let service = TreeProcessorService::from_config(&config);
        let result = service.build(&config).await?;

        if !args.quiet {
            BuildSummary::new(&result, &config.dest_root).print();
        }

        Ok(())
    }

    fn handle_init_command(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Err(ShrinkError::config(format!(
                "{} already exists",
                path.display()
            )));
        }

        let example = ConfigLoader::generate_example()?;
        std::fs::write(&path, example + "\n").map_err(|e| ShrinkError::fs(&path, e))?;
        Logger::info(&format!("✅ Wrote {}", path.display()));
        Ok(())
    }

    fn handle_info_command(&self) {
        Logger::info(&format!("🦀 shrinkray v{}", env!("CARGO_PKG_VERSION")));
        Logger::info("");
        Logger::info("📄 Handlers:");
        Logger::info("  • .html → minify-html (whitespace, comments, inline CSS/JS, doctype)");
        Logger::info("  • .css  → Lightning CSS (optimize + minify, comments dropped)");
        Logger::info("  • .js   → oxc (compress, drop console, mangle top-level)");
        Logger::info("  • other → copied byte for byte");
        Logger::info("");
        Logger::info(&format!(
            "⚙️  Config: {} (camelCase keys, CLI flags take precedence)",
            CONFIG_FILE_NAME
        ));
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
