use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use type_deps::cli::{self, OutputFormat, Overrides};

/// Type-level dependency analysis for Java source trees
#[derive(Parser, Debug)]
#[command(name = "tdtool", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze every unit below a root directory
    Analyze {
        root: PathBuf,
        #[command(flatten)]
        options: CommonOptions,
    },
    /// Analyze the units directly inside one directory
    Package {
        dir: PathBuf,
        #[command(flatten)]
        options: CommonOptions,
    },
    /// Analyze a single source file
    Unit {
        file: PathBuf,
        #[command(flatten)]
        options: CommonOptions,
    },
}

#[derive(Args, Debug)]
struct CommonOptions {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Collect unit failures instead of aborting on the first one
    #[arg(long)]
    best_effort: bool,

    /// Report single-type imports as dependencies
    #[arg(long)]
    include_imports: bool,

    /// Skip test sources
    #[arg(long)]
    exclude_tests: bool,

    /// Additional excluded namespace prefix (repeatable)
    #[arg(long = "exclude", value_name = "PREFIX")]
    exclude: Vec<String>,

    /// Maximum units scheduled but not yet merged
    #[arg(long, value_name = "N")]
    backpressure: Option<usize>,
}

impl CommonOptions {
    fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            best_effort: self.best_effort,
            include_imports: self.include_imports,
            exclude_tests: self.exclude_tests,
            exclude: self.exclude.clone(),
            backpressure: self.backpressure,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { root, options } => {
            let config = options.overrides().resolve()?;
            cli::analyze_tree(&root, config, options.format).await
        }
        Commands::Package { dir, options } => {
            let config = options.overrides().resolve()?;
            cli::analyze_package(&dir, config, options.format).await
        }
        Commands::Unit { file, options } => {
            let config = options.overrides().resolve()?;
            cli::analyze_unit(&file, config, options.format).await
        }
    }
}
