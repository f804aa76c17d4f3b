//! oxide-query CLI
//!
//! Compiles JSON statement descriptions to parameterized SQL.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_query::{ConnectionConfig, QueryBuilder, DIALECT_NAMES};
use oxide_query_cli::compile_file;

/// Dialect-aware SQL statement compiler.
#[derive(Parser)]
#[command(name = "oxide-query")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dialect (mysql, pgsql, sqlite, generic).
    #[arg(short, long, env = "OXIDE_QUERY_DIALECT", default_value = "mysql")]
    dialect: String,

    /// Table prefix.
    #[arg(short, long, env = "OXIDE_QUERY_PREFIX")]
    prefix: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON statement description file.
    Compile {
        /// Path to the description file.
        file: PathBuf,

        /// Print SQL with bindings inlined instead of JSON.
        #[arg(long)]
        raw: bool,
    },

    /// List the available dialects.
    Dialects,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Dialects => {
            for name in DIALECT_NAMES {
                println!("{name}");
            }
        }

        Commands::Compile { file, raw } => {
            let config = ConnectionConfig {
                driver: cli.dialect,
                prefix: cli.prefix,
            };
            let base = QueryBuilder::new(&config)?;
            let queries = compile_file(&file, &base)?;

            for query in &queries {
                if raw {
                    println!("{}", query.raw_sql());
                } else {
                    println!("{}", serde_json::to_string(query)?);
                }
            }
            info!(
                "Compiled {} statement(s) for {}",
                queries.len(),
                base.dialect().name()
            );
        }
    }

    Ok(())
}
