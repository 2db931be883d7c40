use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::{Arg, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;

use oddsheet::{Config, SheetGenerator};

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the info default.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let matches = Command::new("oddsheet")
        .about("Generate odd-one-out perception test sheets from a directory of images")
        .arg(
            Arg::new("in_dir")
                .help("Directory containing the source images")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("out_dir")
                .help("Directory the sheets are written to (created if absent)")
                .required(true)
                .index(2),
        )
        .get_matches();

    let in_dir = matches.get_one::<String>("in_dir").unwrap();
    let out_dir = matches.get_one::<String>("out_dir").unwrap();

    let config = Config::new(PathBuf::from(in_dir), PathBuf::from(out_dir));
    let generator = SheetGenerator::new(config);

    // Each invocation shuffles differently; tests inject fixed seeds instead.
    let seed = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
    let mut rng = StdRng::seed_from_u64(seed);

    match generator.run(&mut rng) {
        Ok(summary) => {
            println!(
                "Generated {} sheets ({} pairs skipped)",
                summary.pages_written, summary.pairs_skipped
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Sheet generation failed: {}", e);
            std::process::exit(1);
        }
    }
}
