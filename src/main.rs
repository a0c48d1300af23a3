mod app;
mod calendar;
mod config;
mod form;
mod help;
mod schedule;
mod theme;
mod weekplan;
use crate::app::App;
use crate::calendar::Planner;
use anyhow::Context;
use flexi_logger::{FileSpec, Logger};
use lexopt::{Arg, Parser, ValueExt};
use log::info;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{format_description::FormatItem, macros::format_description, Date, OffsetDateTime};

static YMD_FMT: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]");

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                log_file,
            } => {
                // Without a log file there is no sink: the terminal belongs
                // to the calendar.  The handle must outlive the session, as
                // dropping it shuts the logger down.
                let _logger = match log_file {
                    Some(path) => Some(
                        Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
                            .context("invalid log specification")?
                            .log_to_file(
                                FileSpec::try_from(path).context("invalid log file path")?,
                            )
                            .start()
                            .context("failed to start logger")?,
                    ),
                    None => None,
                };
                info!(
                    "{} {} starting up",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                );
                let plan =
                    config::load(config.as_deref()).context("failed to load the study plan")?;
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut planner = Planner::new(today, plan);
                if let Some(date) = date {
                    planner
                        .jump_to_date(date)
                        .context("start date is out of calendar range")?;
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(planner).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: studycal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal study scheduler: a monthly calendar of recurring subjects and one-off events");
                println!();
                println!("Arguments:");
                println!("  [YYYY-MM-DD]          Month to show at startup (defaults to the current month)");
                println!();
                println!("Options:");
                println!("  -c, --config <FILE>   Read the study plan from <FILE>");
                println!("      --log-file <FILE> Append log output to <FILE>");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
