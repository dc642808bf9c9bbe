use clap::Parser;

use topics_cli::{AppConfig, Cli, Command, Services, scenario};
use topics_core::Context;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    topics_observability::init(cli.log_format);

    let config = AppConfig::from_cli(&cli)?;
    let services = Services::build(&config)?;
    let ctx = Context::background();

    match cli.command {
        Command::Scenario { kind } => {
            tracing::info!(?kind, "running scenario");
            let report = scenario::run(&services, &ctx, &config.tenancy, kind)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
