// std imports
use std::{
    io::{IsTerminal, stdin},
    process,
    time::Duration,
};

// third-party imports
use clap::{CommandFactory, Parser};
use env_logger::{self as logger};
use pager::SystemEnv;

// local imports
use pagesink::{App, InputReference, Options, cli, config, error::*, signal::SignalHandler};

const PAGESINK_DEBUG_LOG: &str = "PAGESINK_DEBUG_LOG";
const PAGESINK_DEBUG_LOG_STYLE: &str = "PAGESINK_DEBUG_LOG_STYLE";

// ---

fn bootstrap() {
    if std::env::var(PAGESINK_DEBUG_LOG).is_ok() {
        logger::Builder::from_env(
            logger::Env::new()
                .filter(PAGESINK_DEBUG_LOG)
                .write_style(PAGESINK_DEBUG_LOG_STYLE),
        )
        .format_timestamp_micros()
        .init();
        log::debug!("logging initialized");
    } else {
        logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .format_timestamp_millis()
            .init()
    }
}

fn run() -> Result<()> {
    bootstrap();

    let opt = cli::Opt::parse_from(wild::args());
    let settings = config::load(&opt)?;

    let inputs = if opt.files.is_empty() {
        if stdin().is_terminal() {
            let mut cmd = cli::Opt::command();
            return cmd.print_help().map_err(Error::Io);
        }
        vec![InputReference::Stdin]
    } else {
        opt.files.iter().cloned().map(InputReference::from).collect()
    };

    let paging = if opt.paging_never {
        cli::PagingOption::Never
    } else {
        opt.paging.unwrap_or(settings.pager.paging)
    };

    let app = App::new(Options {
        pager: opt.pager.clone(),
        fallback_pager: settings.pager.command.clone(),
        pager_env: settings
            .pager
            .env_vars()
            .map(|(name, value)| (name.to_owned(), value.to_owned()))
            .collect(),
        paging: paging.into(),
        buffer_size: opt.buffer_size,
    });

    log::debug!("open {} inputs", inputs.len());
    let inputs = inputs.iter().map(|input| input.open()).collect::<Result<Vec<_>>>()?;

    let mut output = app.pager(SystemEnv).open()?;
    let interrupt_ignore_count = match output.is_paging() {
        true => opt.interrupt_ignore_count.unwrap_or(settings.interrupt_ignore_count),
        false => 0,
    };

    log::debug!("run the app");
    let result = SignalHandler::run(interrupt_ignore_count, Duration::from_secs(1), || {
        app.run(inputs, &mut output)
    });

    if let Err(err) = result {
        if !matches!(output.error(), Some(pager::Error::ClosedByConsumer)) {
            return Err(err);
        }
        log::debug!("pager was closed before all data was written");
    }

    match output.close() {
        Ok(()) | Err(pager::Error::ClosedByConsumer) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn main() {
    if let Err(err) = run() {
        err.log();
        process::exit(err.exit_code());
    }
}
