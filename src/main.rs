use std::path::PathBuf;

use clap::Parser;
use imgsync::Result;
use imgsync::config::Config;
use imgsync::run;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(error) = execute(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let entries = run::run_all(&config)?;
    run::write_summary(&config, &entries)?;

    println!("\nSync Summary");
    println!("{}", entries.join("\n"));
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Sync metadata-referenced images into a class/sheet-organized tree."
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}
