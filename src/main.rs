use acm_filter::cli::{cli_parse, Commands};
use acm_filter::config::DriverConfig;
use acm_filter::{driver, repl};
use std::io;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = cli_parse();

    let config = cli.apply_overrides(DriverConfig::load(cli.config.as_deref())?);
    log::debug!("effective config: {:?}", config);

    match &cli.command {
        Commands::Parse { file } => {
            let stdout = io::stdout();
            let stderr = io::stderr();
            driver::run_file(file, &config, &mut stdout.lock(), &mut stderr.lock())?;
        }
        Commands::Repl => repl::run(&config)?,
    }

    Ok(())
}
