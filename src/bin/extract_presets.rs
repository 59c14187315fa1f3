use clap::Parser;
use preset_source::app;
use preset_source::utils::logger;
use preset_source::{CommonArgs, Strategy, TomlConfig};
use std::path::Path;

#[derive(Parser)]
#[command(name = "extract-presets")]
#[command(about = "Write app/config/presets.ts from the table in docs/PRESETS.md")]
struct Args {
    /// Documentation file (default: docs/PRESETS.md)
    #[arg(long)]
    input: Option<String>,

    /// Destination (default: app/config/presets.ts)
    #[arg(long)]
    output: Option<String>,

    /// Only use the first fenced block with this language tag, e.g. `ts`
    #[arg(long)]
    code_fence: Option<String>,

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
        config.override_extract(args.input, args.output, args.code_fence, args.strategy);
        app::run_extract(config, root, args.common.dry_run)
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
