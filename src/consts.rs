//! Assorted constants & default configuration
use ratatui::style::Color;

/// Default board width in cells
pub(crate) const DEFAULT_WIDTH: u16 = 80;

/// Default board height in cells
pub(crate) const DEFAULT_HEIGHT: u16 = 40;

/// Default number of segments in a newly-created snake
pub(crate) const DEFAULT_INITIAL_LENGTH: usize = 4;

/// Default edge length, in device pixels, of the block drawn for each board
/// cell
pub(crate) const DEFAULT_SCALE: u16 = 10;

/// Default pause after each rendered frame, in milliseconds
pub(crate) const DEFAULT_FRAME_DELAY_MS: u64 = 50;

/// Colour index for empty cells
pub(crate) const BACKGROUND: u8 = 0;

/// Colour index for the snake's segments
pub(crate) const SNAKE: u8 = 1;

/// Colour index for the food
pub(crate) const FOOD: u8 = 2;

pub(crate) const DEFAULT_BACKGROUND_COLOR: Color = Color::Reset;

pub(crate) const DEFAULT_SNAKE_COLOR: Color = Color::Green;

pub(crate) const DEFAULT_FOOD_COLOR: Color = Color::LightRed;

/// Glyph used to draw two vertically-stacked device pixels in one terminal
/// cell: the foreground colour paints the upper pixel, the background colour
/// paints the lower one.
pub(crate) const PIXEL_PAIR_SYMBOL: &str = "▀";

/// How many random cells to try when placing food before falling back to
/// scanning the board for free cells
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 64;
