//! Command-line front end.
//!
//! Each demo is its own subcommand. Without `--attempt` only the safe path
//! runs and the process exits 0. With it, the violation is induced and the
//! exit status names the first fault caught at runtime (see
//! [`ViolationError::exit_code`](faultline_core::ViolationError::exit_code)),
//! or 1 when the violation only exists as a compile error.

use clap::{Args, Parser, Subcommand};
use faultline_core::{Console, ViolationClass};
use faultline_demos::{Catalogue, CatalogueRun, DemoConfig, DemoConfigError};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit status when a registered demo is missing (`EX_SOFTWARE`).
const EXIT_INTERNAL: u8 = 70;

/// Top-level arguments.
#[derive(Debug, Parser)]
#[command(name = "faultline")]
#[command(about = "Memory-safety violations, and how Rust contains each one")]
#[command(version)]
pub struct Cli {
    /// Diagnostic log filter, written to stderr (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    /// Greeting copied into the demo buffers
    #[arg(long, global = true, default_value = DemoConfig::DEFAULT_GREETING)]
    pub greeting: String,
    /// Index of the spatial demo's out-of-bounds write
    #[arg(long, global = true)]
    pub overflow_index: Option<usize>,
    /// Which demo to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// One subcommand per demo, plus catalogue-wide commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// A reference outliving the scope that owns its referent
    Scope(DemoArgs),
    /// A write past the end of a buffer
    Spatial(DemoArgs),
    /// Use and double release of a freed buffer
    Temporal(DemoArgs),
    /// A union payload read under the wrong tag
    TypeConfusion(DemoArgs),
    /// Run every demo in catalogue order
    All(DemoArgs),
    /// List the catalogue, or describe one class
    List {
        /// Class slug to describe, e.g. `type-confusion`
        class: Option<ViolationClass>,
    },
}

/// Options shared by the demo subcommands.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Also commit the violation and report how it was contained
    #[arg(long)]
    pub attempt: bool,
}

impl Cli {
    /// Demo configuration described by the global options.
    pub fn config(&self) -> DemoConfig {
        let mut config = DemoConfig::new(self.greeting.as_str());
        if let Some(index) = self.overflow_index {
            config.overflow_index = index;
        }
        config
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`; an unparsable filter falls back
/// to `warn`. Calling this twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the parsed command, writing demo output to `console`.
///
/// Returns the process exit status, or the configuration error if the
/// options describe a catalogue that cannot run.
pub fn run(cli: &Cli, console: &mut dyn Console) -> Result<u8, DemoConfigError> {
    let (class, args) = match &cli.command {
        Commands::List { class } => {
            list(*class, console);
            return Ok(0);
        }
        Commands::All(args) => {
            let catalogue = Catalogue::standard(&cli.config())?;
            let runs = catalogue.execute_all(console, args.attempt);
            let codes: Vec<u8> = runs.iter().map(|run| finish(run, console)).collect();
            return Ok(codes.into_iter().find(|&c| c != 0).unwrap_or(0));
        }
        Commands::Scope(args) => (ViolationClass::Scope, args),
        Commands::Spatial(args) => (ViolationClass::Spatial, args),
        Commands::Temporal(args) => (ViolationClass::Temporal, args),
        Commands::TypeConfusion(args) => (ViolationClass::TypeConfusion, args),
    };
    let catalogue = Catalogue::standard(&cli.config())?;
    let code = match catalogue.execute(class, console, args.attempt) {
        Some(run) => finish(&run, console),
        None => EXIT_INTERNAL,
    };
    Ok(code)
}

fn list(class: Option<ViolationClass>, console: &mut dyn Console) {
    let classes = match class {
        Some(class) => vec![class],
        None => ViolationClass::ALL.to_vec(),
    };
    for class in classes {
        console.line(&format!("{:<15} {}", class.slug(), class.summary()));
    }
}

fn finish(run: &CatalogueRun, console: &mut dyn Console) -> u8 {
    if let Err(err) = &run.result {
        error!(class = %run.class, error = %err, "demo failed");
        console.line(&format!("[{}] failed: {err}", run.class));
    }
    run.exit_code()
}
