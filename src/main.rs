use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ntmx::{ExportFormat, ImporterConfig, export_bulletin, load_bulletin};

/// Import a legacy EfS Notice-to-Mariners HTML bulletin
#[derive(Parser, Debug)]
#[command(name = "ntmx", version, about)]
struct Cli {
    /// Bulletin file (.html or .htm)
    #[arg(value_name = "FILE", required_unless_present = "init_config")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Config file, instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Message series for the imported NMs
    #[arg(long)]
    series: Option<String>,

    /// Tag attached to the imported NMs
    #[arg(long)]
    tag: Option<String>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log each paragraph decision
    #[arg(short, long)]
    verbose: bool,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init_config {
        ImporterConfig::init_default()?;
        if let Some(path) = ImporterConfig::get_config_path() {
            println!("Wrote default config to {}", path.display());
        }
        return Ok(());
    }

    let mut config = ImporterConfig::load(cli.config.as_deref())?;
    if let Some(series) = cli.series {
        config.series_id = series;
    }
    if cli.tag.is_some() {
        config.tag_id = cli.tag;
    }

    let Some(file) = cli.file else {
        anyhow::bail!("No bulletin file given");
    };
    let bulletin = load_bulletin(&file, &config).await?;
    let rendered = export_bulletin(&bulletin, &cli.format)?;

    match cli.output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;
            info!(path = %path.display(), messages = bulletin.messages.len(), "Wrote bulletin");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
