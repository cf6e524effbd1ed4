use clap::Parser;

use paye_cli::{app, cli::Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = app::resolve_config(&cli)?;
    logging::init_logging(&config.log_level, cli.log_file.as_deref())?;

    app::run(&cli, &config)
}
