mod board;
mod direction;
mod food;
mod snake;
pub(crate) use self::board::Bounds;
use self::direction::Direction;
pub(crate) use self::snake::SnakeError;
use self::snake::Snake;
use crate::command::Command;
use crate::config::GameConfig;
use crate::consts;
use crate::screen::Screen;
use crate::util::StopToken;
use crossterm::event::{poll, read};
use rand::Rng;
use ratatui::layout::Position;
use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// A source of player commands
pub(crate) trait InputSource {
    /// Return all commands received since the previous call, oldest first,
    /// without waiting for new ones
    fn poll_commands(&mut self) -> io::Result<Vec<Command>>;
}

/// Reads commands from the terminal's pending key events
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_commands(&mut self) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while poll(Duration::ZERO)? {
            commands.extend(Command::from_event(&read()?));
        }
        Ok(commands)
    }
}

/// The game director: owns the snake, the food, and the direction of travel,
/// and advances them one tick at a time.
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    bounds: Bounds,
    snake: Snake,
    food: Position,
    /// The direction the snake moved in on the most recent tick
    heading: Direction,
    /// The direction the snake will move in on the next tick
    pending: Direction,
    state: GameState,
    frame_delay: Duration,
    stop: StopToken,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: &GameConfig, stop: StopToken) -> Result<Self, InitError> {
        Game::new_with_rng(config, stop, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    /// Start a new game with the snake in the middle of the board, heading
    /// east, and one piece of food placed at random.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the snake cannot be created or if it leaves no room
    /// for the food.
    pub(crate) fn new_with_rng(
        config: &GameConfig,
        stop: StopToken,
        mut rng: R,
    ) -> Result<Game<R>, InitError> {
        let bounds = config.bounds();
        let snake = Snake::new(bounds.center(), config.initial_length)?;
        let food = food::generate(&mut rng, bounds, &snake).ok_or(InitError::NoFood)?;
        tracing::info!(
            width = bounds.width,
            height = bounds.height,
            length = snake.len(),
            ?food,
            "starting new game"
        );
        Ok(Game {
            rng,
            bounds,
            snake,
            food,
            heading: Direction::East,
            pending: Direction::East,
            state: GameState::Running,
            frame_delay: config.frame_delay(),
            stop,
        })
    }

    /// Play until the game ends, pausing for the frame delay after each
    /// rendered frame.
    pub(crate) fn run<I: InputSource, S: Screen>(
        &mut self,
        input: &mut I,
        screen: &mut S,
    ) -> io::Result<Outcome> {
        loop {
            match self.tick(input, screen)? {
                GameState::Running => std::thread::sleep(self.frame_delay),
                _ => break,
            }
        }
        let outcome = self.outcome();
        tracing::info!(%outcome, "game finished");
        Ok(outcome)
    }

    /// Run one step of the game: check for a stop request, apply input, move
    /// the snake, resolve collisions & eating, and draw the result.  Returns
    /// the state of the game afterwards.
    pub(crate) fn tick<I: InputSource, S: Screen>(
        &mut self,
        input: &mut I,
        screen: &mut S,
    ) -> io::Result<GameState> {
        if !self.running() {
            return Ok(self.state);
        }
        if self.stop.is_stopped() {
            self.state = GameState::Quit;
            return Ok(self.state);
        }
        for cmd in input.poll_commands()? {
            self.handle_command(cmd);
        }
        self.advance();
        if self.running() {
            self.draw(screen);
            screen.present()?;
        }
        Ok(self.state)
    }

    fn advance(&mut self) {
        self.heading = self.pending;
        self.snake.advance(self.heading, self.bounds);
        if self.snake.is_collision(self.bounds) {
            self.state = GameState::Collided;
            return;
        }
        if self.snake.head() == self.food {
            self.snake.grow(self.food);
            if let Some(food) = food::generate(&mut self.rng, self.bounds, &self.snake) {
                tracing::debug!(length = self.snake.len(), next = ?food, "food eaten");
                self.food = food;
            } else {
                self.state = GameState::Exhausted;
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn outcome(&self) -> Outcome {
        Outcome {
            state: self.state,
            length: self.snake.len(),
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.stop.stop(),
            Command::Up => self.turn(Direction::North),
            Command::Down => self.turn(Direction::South),
            Command::Left => self.turn(Direction::West),
            Command::Right => self.turn(Direction::East),
        }
    }

    /// Set the direction for the next tick, unless it would send the snake
    /// straight back into its own neck.
    ///
    /// Every turn is checked against the direction of the last move, so of
    /// several turns received in one tick the last allowed one is taken (Up
    /// then Down while heading East goes Down).
    fn turn(&mut self, direction: Direction) {
        if direction != self.heading.reverse() {
            self.pending = direction;
        }
    }

    fn draw<S: Screen>(&self, screen: &mut S) {
        screen.clear(consts::BACKGROUND);
        for pos in self.snake.segments() {
            screen.set_pixel(pos, consts::SNAKE);
        }
        screen.set_pixel(self.food, consts::FOOD);
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    /// The snake ran into itself
    Collided,
    /// The snake has filled the board and there is nowhere left to place food
    Exhausted,
    /// The player or the environment asked the game to stop
    Quit,
}

/// How a finished game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Outcome {
    pub(crate) state: GameState,
    pub(crate) length: usize,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            GameState::Running => write!(f, "Still running at length {}", self.length),
            GameState::Collided => write!(f, "Game over: collided at length {}", self.length),
            GameState::Exhausted => write!(f, "Board filled at length {}", self.length),
            GameState::Quit => write!(f, "Quit at length {}", self.length),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum InitError {
    #[error("failed to create snake")]
    Snake(#[from] SnakeError),
    #[error("no free cell on the board for food")]
    NoFood,
}
