use clap::Parser;
use preset_source::app;
use preset_source::utils::logger;
use preset_source::{CommonArgs, Strategy, TomlConfig};
use std::path::Path;

/// Adds `source: 'BUILT_IN'` to every preset in theme-presets.ts that lacks it.
#[derive(Parser)]
#[command(name = "add-source")]
#[command(about = "Add the default source field to an extracted preset table, in place")]
struct Args {
    /// Preset table to rewrite (default: theme-presets.ts)
    #[arg(long)]
    path: Option<String>,

    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.common.verbose, args.common.log_json);

    let root = Path::new(&args.common.root);
    let result = TomlConfig::discover(root, args.common.config.as_deref()).and_then(|mut config| {
        config.override_augment(args.path, args.strategy);
        app::run_augment(config, root, args.common.dry_run)
    });

    match result {
        Ok(report) => {
            for line in report.summary_lines() {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => std::process::exit(app::report_failure(&e)),
    }
}
