use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use syntax_tblgen::{
    Action, DEFAULT_RUNTIME_CRATE, Generator, GeneratorConfig, Language, RecordKeeper, Target,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "syntax-tblgen",
    about = "Generate typed syntax node views and data types from a schema"
)]
struct Cli {
    /// Evaluated schema records (JSON)
    schema: PathBuf,
    /// Which half of the code to generate
    #[arg(long, value_enum)]
    action: Action,
    /// Category to emit: Decl, Stmt, Expr, Type, Pattern, SyntaxCollection,
    /// Token, SyntaxFactory or SyntaxRewriter
    #[arg(long)]
    category: Target,
    /// Language of the generated code
    #[arg(long, value_enum, default_value_t = Language::Rust)]
    language: Language,
    /// Path the generated code imports the runtime prelude from
    #[arg(long, default_value = DEFAULT_RUNTIME_CRATE)]
    runtime_crate: String,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::debug!(schema = %cli.schema.display(), "loading records");
    let records = RecordKeeper::load(&cli.schema)?;
    let config = GeneratorConfig::builder()
        .runtime_crate(cli.runtime_crate)
        .language(cli.language)
        .build();
    let source = Generator::new(&records, config).generate(cli.action, cli.category)?;

    match cli.output {
        Some(path) => std::fs::write(&path, source)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{source}"),
    }
    Ok(())
}
