use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dinamo_transfers::data::{export, loader};

/// Write the bundled transfer dataset as CSV and Parquet, to exercise the
/// non-JSON loaders.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = loader::load_bundled()?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let csv_path = args.out_dir.join("sample_transfers.csv");
    let file = std::fs::File::create(&csv_path)
        .with_context(|| format!("creating {}", csv_path.display()))?;
    export::write_csv(&dataset.records, file)?;

    let parquet_path = args.out_dir.join("sample_transfers.parquet");
    export::write_parquet(&dataset.records, &parquet_path)?;

    println!(
        "Wrote {} transfers ({} seasons) to {} and {}",
        dataset.len(),
        dataset.seasons.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
