mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod screen;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::util::StopToken;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

static USAGE: &str = "\
Usage: gridsnake [<options>]

Snake on a wraparound board, drawn in the terminal.

Options:
  -c, --config <path>     Read configuration from the given file
      --width <cells>     Board width
      --height <cells>    Board height
      --length <n>        Initial length of the snake
      --scale <n>         Size of each board cell in pixels
      --delay <ms>        Pause between frames in milliseconds
      --log-file <path>   Write log messages to the given file
  -h, --help              Show this help and exit
  -V, --version           Show the program version and exit

Steer with the arrow keys, hjkl, or wasd.  Quit with q, Esc, or Ctrl-C.
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("width") => args.width = Some(parser.value()?.parse()?),
                Arg::Long("height") => args.height = Some(parser.value()?.parse()?),
                Arg::Long("length") => args.length = Some(parser.value()?.parse()?),
                Arg::Long("scale") => args.scale = Some(parser.value()?.parse()?),
                Arg::Long("delay") => args.delay = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

/// Settings given on the command line, overriding the configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    width: Option<u16>,
    height: Option<u16>,
    length: Option<NonZeroUsize>,
    scale: Option<u16>,
    delay: Option<u64>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    /// Load the configuration file (the one given with `--config`, or else
    /// the default one if it exists), apply the command-line overrides, and
    /// validate the result.
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::load(&Config::default_path()?, true),
        }
        .context("failed to load configuration")?;
        let game = &mut config.game;
        game.width = self.width.unwrap_or(game.width);
        game.height = self.height.unwrap_or(game.height);
        game.initial_length = self.length.unwrap_or(game.initial_length);
        game.scale = self.scale.unwrap_or(game.scale);
        game.frame_delay_ms = self.delay.unwrap_or(game.frame_delay_ms);
        if self.log_file.is_some() {
            config.logging.file = self.log_file;
        }
        config.game.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => match run(args) {
            Ok(outcome) => {
                println!("{outcome}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = ?e, "exiting on error");
                eprintln!("gridsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Try 'gridsnake --help' for more information.");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<game::Outcome> {
    let config = args.into_config()?;
    logging::init(&config.logging)?;
    let stop = StopToken::new();
    stop.stop_on_signals().context("failed to install signal handlers")?;
    let terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let r = App::new(config, stop).run(terminal);
    ratatui::restore();
    r
}
