//! Tinkey CLI
//!
//! Usage:
//!   tinkey [OPTIONS] <COMMAND>
//!
//! Commands:
//!   create-key-template  Create a key template in text format
//!   list-key-types       List the type URLs that accept a key format
//!
//! Options:
//!   -v, --verbose  Enable debug logging
//!   -h, --help     Print help

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use keytemplate::{resolve, write_template, SchemaLookup, SchemaRegistry, TemplateError, WriterConfig};

#[derive(Parser)]
#[command(name = "tinkey")]
#[command(about = "Create key templates for Tink keysets")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a key template in text format
    CreateKeyTemplate {
        /// Type URL of the primitive's key
        #[arg(long)]
        type_url: String,

        /// Key format in protobuf text format
        #[arg(long)]
        key_format: Option<String>,

        /// Output file, must not exist yet (writes to stdout if not provided)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Schema registry file replacing the built-in key formats (TOML format)
        #[arg(long)]
        schemas: Option<PathBuf>,
    },

    /// List the type URLs that accept a key format
    ListKeyTypes {
        /// Schema registry file replacing the built-in key formats (TOML format)
        #[arg(long)]
        schemas: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::CreateKeyTemplate {
            type_url,
            key_format,
            out,
            schemas,
        } => {
            let registry = load_registry(schemas.as_deref());
            let result = create_command(&type_url, key_format.as_deref(), out.as_deref(), &registry);

            if let Err(e) = result {
                eprintln!("Error: {}", e);
                if let CommandError::Template(TemplateError::MalformedParameters { text, errors }) = &e {
                    for error in errors {
                        eprintln!("{}", error.format(text, "<key-format>"));
                    }
                }
                std::process::exit(1);
            }
        }
        Command::ListKeyTypes { schemas } => {
            let registry = load_registry(schemas.as_deref());
            for type_url in registry.type_urls() {
                println!("{}", type_url);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_registry(path: Option<&Path>) -> SchemaRegistry {
    match path {
        Some(path) => match SchemaRegistry::from_file(path) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Error loading schemas '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => SchemaRegistry::default(),
    }
}

/// Errors of the create-key-template command
#[derive(Debug, Error)]
enum CommandError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("failed to create output file '{}': {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
}

/// Resolve the template, then write it to `out` (which must not exist) or stdout
///
/// The output file is only created once resolution has succeeded.
fn create_command<L>(
    type_url: &str,
    key_format: Option<&str>,
    out: Option<&Path>,
    lookup: &L,
) -> Result<(), CommandError>
where
    L: SchemaLookup + ?Sized,
{
    let template = resolve(type_url, key_format, lookup)?;
    let config = WriterConfig::default();

    match out {
        Some(path) => {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|source| CommandError::Output {
                    path: path.to_path_buf(),
                    source,
                })?;
            write_template(&mut file, type_url, key_format, &template, &config)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_template(&mut lock, type_url, key_format, &template, &config)?;
            lock.flush().map_err(TemplateError::from)?;
        }
    }
    Ok(())
}
