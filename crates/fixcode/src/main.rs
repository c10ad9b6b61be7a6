//! Fixcode - resolves test-fixture code fields into EVM bytecode
//!
//! Usage: fixcode [OPTIONS] <COMMAND>

use anyhow::Context;
use clap::{Parser, Subcommand};
use fixcode::fixture::{self, FieldError};
use fixcode::{CodeResolver, DiagnosticReporter, ResolveError, ResolverConfig, SolContracts};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "fixcode")]
#[command(author = "Fixcode Team")]
#[command(version)]
#[command(about = "Resolves test-fixture code fields into EVM bytecode", long_about = None)]
struct Args {
    /// Resolver configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fill mode: warn about raw bytecode without source
    #[arg(long, global = true)]
    fill: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a single code string and print its bytecode
    Resolve {
        /// Code string (hex, directive or source)
        code: String,

        /// Solidity source compiled first, for `:solidity <name>` lookups
        #[arg(long)]
        solidity: Option<PathBuf>,
    },
    /// Resolve every code and data field of a filler
    Fill {
        /// Filler file (.json)
        filler: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Failure of a command, rendered before exiting
enum Failure {
    Resolve { name: String, code: String, error: ResolveError },
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(error: anyhow::Error) -> Self {
        Failure::Other(error)
    }
}

impl From<FieldError> for Failure {
    fn from(error: FieldError) -> Self {
        Failure::Resolve {
            name: format!("{} ({})", error.test, error.field),
            code: error.code,
            error: error.source,
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => {}
        Err(Failure::Resolve { name, code, error }) => {
            let mut reporter = DiagnosticReporter::new();
            let file_id = reporter.add_file(name, code);
            reporter.report_error(file_id, &error);
            process::exit(1);
        }
        Err(Failure::Other(e)) => {
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<ResolverConfig> {
    let config = match &args.config {
        Some(path) => ResolverConfig::from_path(path)?,
        None => ResolverConfig::default(),
    };
    if args.fill {
        return Ok(config.with_fill_raw_bytecode(true));
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), Failure> {
    let config = load_config(args)?;
    let resolver = CodeResolver::new(&config);
    log::info!("{} custom compiler(s) registered", resolver.registry().len());

    match &args.command {
        Command::Resolve { code, solidity } => {
            let pre_solidity = match solidity {
                Some(path) => compile_solidity_file(&resolver, path)?,
                None => SolContracts::new(),
            };
            let bytecode = resolver
                .resolve(code, &pre_solidity)
                .map_err(|error| Failure::Resolve {
                    name: "code".to_string(),
                    code: code.clone(),
                    error,
                })?;
            println!("{bytecode}");
        }
        Command::Fill { filler, output } => {
            let text = fs::read_to_string(filler)
                .with_context(|| format!("failed to read {}", filler.display()))?;
            let mut document: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", filler.display()))?;
            let tests = document
                .as_object_mut()
                .with_context(|| format!("{}: filler must be a JSON object", filler.display()))?;

            let count = fixture::fill_document(tests, &resolver)?;
            log::info!("resolved {count} code fields in {}", filler.display());

            let filled = serde_json::to_string_pretty(&document).context("failed to serialize filler")?;
            match output {
                Some(path) => fs::write(path, filled)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{filled}"),
            }
        }
    }

    Ok(())
}

fn compile_solidity_file(resolver: &CodeResolver, path: &Path) -> Result<SolContracts, Failure> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    resolver
        .backends()
        .solidity
        .compile(&source)
        .map_err(|e| Failure::Resolve {
            name: path.display().to_string(),
            error: ResolveError::backend("solidity", &source, e),
            code: source.clone(),
        })
}
