use crate::config::Config;
use crate::game::{Game, Outcome, TerminalInput};
use crate::screen::TerminalScreen;
use crate::util::StopToken;
use anyhow::Context;
use ratatui::{backend::Backend, Terminal};

/// Ties a game to the terminal it is shown on
#[derive(Clone, Debug)]
pub(crate) struct App {
    config: Config,
    stop: StopToken,
}

impl App {
    pub(crate) fn new(config: Config, stop: StopToken) -> App {
        App { config, stop }
    }

    pub(crate) fn run<B: Backend>(self, terminal: Terminal<B>) -> anyhow::Result<Outcome> {
        let game_config = &self.config.game;
        let mut screen = TerminalScreen::new(
            terminal,
            game_config.size(),
            game_config.scale,
            self.config.colors,
        )
        .context("failed to set up screen")?;
        let mut game = Game::new(game_config, self.stop.clone()).context("failed to start game")?;
        game.run(&mut TerminalInput, &mut screen)
            .context("error while running game")
    }
}
