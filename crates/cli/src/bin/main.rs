use anyhow::Context;
use clap::Parser;
use sproc_call_catalog::{ParameterCatalog, StaticCatalog};
use sproc_call_cli::{CliConfig, OutputFormat, run};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "sproc-call")]
#[command(version)]
#[command(about = "Parse a stored-procedure call and bind it to declared parameters")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Static catalog of declared parameters (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Output format for the report
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Call text, e.g. "EXEC @ret = dbo.GetUser @Id = 5". Read from stdin when omitted
    call_text: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("error: Failed to set tracing subscriber: {}", err);
        return ExitCode::FAILURE;
    }

    let call_text = match read_call_text(args.call_text).await {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    let catalog = match config.catalog.as_deref().map(StaticCatalog::from_file).transpose() {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Some(catalog) = &catalog {
        tracing::debug!(procedures = catalog.len(), "Loaded static catalog");
    }

    let report = match run(
        &call_text,
        catalog.as_ref().map(|c| c as &dyn ParameterCatalog),
    )
    .await
    {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {}", err.render(&call_text));
            return ExitCode::FAILURE;
        }
    };

    match report.render(config.format) {
        Ok(rendered) => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<CliConfig> {
    let config = match &args.config {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("Could not load config {}", path.display()))?,
        None => CliConfig::default(),
    };
    Ok(config.with_overrides(args.catalog.clone(), args.format))
}

async fn read_call_text(arg: Option<String>) -> anyhow::Result<String> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read call text from stdin")?;
            buffer
        }
    };
    Ok(text.trim_end().to_string())
}
