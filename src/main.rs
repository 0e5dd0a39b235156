use clap::Parser;
use tfc_ops::app::{handle_fatal_error, init_logging, AppConfig};
use tfc_ops::cli::{execute_command, Cli};
use tfc_ops::config::resolve_config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let config = resolve_config(&cli.config_overrides(), |key| std::env::var(key).ok());
    let debug = config.as_ref().is_ok_and(|c| c.debug);
    init_logging(&AppConfig::new(verbose).with_debug(debug));

    if let Err(e) = execute_command(cli, config).await {
        handle_fatal_error(e, verbose);
    }
}
