//! termfolio - a developer portfolio for the terminal
//!
//! Runs one session on the local terminal, or with `--serve` accepts telnet
//! clients and gives each its own session.

use anyhow::Context;
use clap::Parser;
use libtermfolio::{
    logging::{LogTarget, LoggingConfig},
    Config, FolioError,
};
use termfolio::{
    cli::Cli,
    remote::{self, SessionTemplate},
    runtime::{run_session, InputThread, Scheduler},
    services::{ServiceHandle, Services},
    terminal::{install_panic_hook, restore_terminal, setup_terminal, Tui},
    ui::theme::ThemeId,
    Dispatcher, Event, ScreenSettings, TuiError,
};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(e) = error.downcast_ref::<TuiError>() {
        e.exit_code()
    } else if let Some(e) = error.downcast_ref::<FolioError>() {
        e.exit_code()
    } else {
        1
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    cli.apply_overrides(&mut config);

    let target = if cli.serve {
        LogTarget::Stderr
    } else {
        LogTarget::default_file()?
    };
    LoggingConfig::new(cli.log_format, cli.log_level.clone(), cli.verbose, target).init()?;

    let services = Services::from_config(&config)?;
    let theme = services.initial_theme(cli.theme, &config);
    let settings = ScreenSettings::from_config(&config);
    let handle = ServiceHandle::new(services)?;

    tracing::info!(
        user = %config.github.username,
        theme = %theme,
        mode = if cli.serve { "serve" } else { "local" },
        "starting termfolio"
    );

    if cli.serve {
        let template = SessionTemplate {
            services: handle.services(),
            settings,
            theme,
        };
        handle
            .block_on(remote::serve(&config.server.listen, template))
            .with_context(|| format!("serving on {}", config.server.listen))?;
        return Ok(());
    }

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run_local(&mut terminal, &handle, theme, settings);
    restore_terminal(terminal)?;
    result.map_err(Into::into)
}

fn run_local(
    terminal: &mut Tui,
    handle: &ServiceHandle,
    theme: ThemeId,
    settings: ScreenSettings,
) -> termfolio::Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();

    let size = terminal.size()?;
    let _ = tx.send(Event::Resize(size.width, size.height));
    let _input = InputThread::spawn(tx.clone())?;

    let mut scheduler = Scheduler::new(handle.handle(), handle.services(), tx);
    let mut dispatcher = Dispatcher::new(theme, settings);
    run_session(terminal, &mut dispatcher, &mut scheduler, &rx)
}
