mod app;
mod command;
mod config;
mod consts;
mod game;
mod leaderboard;
mod util;
use crate::app::App;
use crate::config::{Config, LoggingConfig};
use crate::game::Game;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: scoresnake [<options>]\n",
    "\n",
    "Play Snake in the terminal and keep a top-ten leaderboard\n",
    "\n",
    "Options:\n",
    "  -c, --config <file>   Read configuration from the given file\n",
    "      --log-file <file> Append log messages to the given file\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run { config, log_file }) => match run(config, log_file) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                eprintln!("Error: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("scoresnake: {e}");
            eprintln!("Run `scoresnake --help` for usage information");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<PathBuf>, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => Config::load(&path, false)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
    };
    init_logging(&config.logging, log_file)?;
    log::debug!("Loaded configuration: {config:?}");
    let leaderboard = config.leaderboard()?;
    match leaderboard {
        Some(ref board) => log::info!("Recording scores in {}", board.path().display()),
        None => log::info!("Score recording is disabled"),
    }
    let game = Game::new(leaderboard);
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableFocusChange)
        .map_err(anyhow::Error::from)
        .and_then(|()| App::new(game).run(terminal));
    if let Err(e) = execute!(io::stdout(), DisableFocusChange) {
        log::warn!("Failed to disable focus change reporting: {e}");
    }
    ratatui::restore();
    r
}

/// Start logging to the file given on the command line or, failing that, in
/// the configuration.  If neither is set, logging stays disabled.
fn init_logging(cfg: &LoggingConfig, log_file: Option<PathBuf>) -> anyhow::Result<()> {
    let Some(path) = log_file.or_else(|| cfg.file.clone()) else {
        return Ok(());
    };
    let fp = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("failed to open log file")?;
    env_logger::builder()
        .filter_level(cfg.level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(fp)))
        .try_init()
        .context("failed to initialize logging")?;
    log::info!(
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}
