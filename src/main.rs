use clap::Parser;
use insightboard::cli::commands::Cli;
use insightboard::cli::handlers;
use insightboard::logging;

fn main() {
    let cli = Cli::parse();

    if cli.command.is_none() {
        // No subcommand → launch TUI
        let result = handlers::resolve_config(&cli)
            .map_err(Box::<dyn std::error::Error>::from)
            .and_then(|config| {
                logging::init_tui(config.log.file.as_deref());
                insightboard::tui::run(config)
            });
        if let Err(e) = result {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    logging::init_cli();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
