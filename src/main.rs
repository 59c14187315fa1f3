use clap::Parser;
use preset_source::app;
use preset_source::config::Command;
use preset_source::utils::logger;
use preset_source::{CliConfig, TomlConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init(cli.common.verbose, cli.common.log_json);
    tracing::debug!("CLI config: {:?}", cli);

    let root = Path::new(&cli.common.root);
    let mut config = match TomlConfig::discover(root, cli.common.config.as_deref()) {
        Ok(config) => config,
        Err(e) => std::process::exit(app::report_failure(&e)),
    };

    let lines = match cli.command {
        Command::Augment(args) => {
            config.override_augment(args.path, args.strategy);
            app::run_augment(config, root, cli.common.dry_run).map(|r| r.summary_lines())
        }
        Command::Extract(args) => {
            config.override_extract(args.input, args.output, args.code_fence, args.strategy);
            app::run_extract(config, root, cli.common.dry_run).map(|r| r.summary_lines())
        }
        Command::Audit { path } => {
            match app::run_audit(&config, root, path.as_deref()) {
                Ok(report) => {
                    for line in report.summary_lines(&config.field.key) {
                        println!("{}", line);
                    }
                    if !report.is_complete() {
                        std::process::exit(1);
                    }
                    return Ok(());
                }
                Err(e) => Err(e),
            }
        }
    };

    match lines {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            Ok(())
        }
        Err(e) => std::process::exit(app::report_failure(&e)),
    }
}
