mod cli;
mod error;
mod observers;
mod session;
mod style;

use clap::Parser;
use cli::Args;
use error::ConsoleError;
use servery_core::journal::FileJournal;
use servery_core::menu::Menu;
use servery_core::service::OrderService;
use session::Session;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "servery stopped");
            eprintln!("{}error: {err}{}", style::RED, style::RESET);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ConsoleError> {
    let menu = match &args.menu {
        Some(path) => servery_data::load_menu_from(path)?,
        None => Menu::house(),
    };
    let journal = FileJournal::open(&args.log_file).map_err(|source| ConsoleError::Journal {
        path: args.log_file.clone(),
        source,
    })?;
    info!(items = menu.len(), journal = %journal.path().display(), "starting console");

    let service = OrderService::with_journal(menu, Box::new(journal));
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut session = Session::new(service, stdin, stdout, args.delay());
    session.run(args.role)?;

    let service = session.service();
    info!(
        served = service.served_count(),
        earnings = %service.total_earnings(),
        "console closed"
    );
    Ok(())
}
