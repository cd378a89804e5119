//! The drawing surface: a fixed-size buffer of colour indices that is blitted
//! to the terminal with every board cell scaled up to a block of pixels
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect, Size},
    style::Color,
    widgets::Widget,
    Terminal,
};
use serde::Deserialize;
use std::io;
use thiserror::Error;

/// Something the game can draw a frame on
pub(crate) trait Screen {
    /// Set every pixel to `color`
    fn clear(&mut self, color: u8);

    /// Set the pixel at `pos` to `color`.  Positions outside the screen are
    /// ignored.
    fn set_pixel(&mut self, pos: Position, color: u8);

    /// Show the current contents of the screen
    fn present(&mut self) -> io::Result<()>;
}

/// The logical pixel grid, one colour index per board cell
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FrameBuffer {
    size: Size,
    cells: Vec<u8>,
}

impl FrameBuffer {
    pub(crate) fn new(size: Size) -> FrameBuffer {
        let len = usize::from(size.width) * usize::from(size.height);
        FrameBuffer {
            size,
            cells: vec![consts::BACKGROUND; len],
        }
    }

    pub(crate) fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn get(&self, pos: Position) -> Option<u8> {
        self.index(pos).and_then(|i| self.cells.get(i)).copied()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.size.width && pos.y < self.size.height)
            .then(|| usize::from(pos.y) * usize::from(self.size.width) + usize::from(pos.x))
    }
}

impl Screen for FrameBuffer {
    fn clear(&mut self, color: u8) {
        self.cells.fill(color);
    }

    fn set_pixel(&mut self, pos: Position, color: u8) {
        if let Some(cell) = self.index(pos).and_then(|i| self.cells.get_mut(i)) {
            *cell = color;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Mapping from colour indices to terminal colours
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Palette {
    pub(crate) background: Color,
    pub(crate) snake: Color,
    pub(crate) food: Color,
}

impl Palette {
    /// Index [`BACKGROUND`][consts::BACKGROUND] is the background; every other
    /// index is an "on" pixel, drawn in the snake colour unless it is
    /// [`FOOD`][consts::FOOD].
    pub(crate) fn color(&self, index: u8) -> Color {
        match index {
            consts::BACKGROUND => self.background,
            consts::FOOD => self.food,
            _ => self.snake,
        }
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            background: consts::DEFAULT_BACKGROUND_COLOR,
            snake: consts::DEFAULT_SNAKE_COLOR,
            food: consts::DEFAULT_FOOD_COLOR,
        }
    }
}

/// Widget that draws a [`FrameBuffer`] centred in its area.  Each board cell
/// becomes a `scale`×`scale` block of device pixels, and each terminal cell
/// shows two device pixels stacked vertically.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PixelView<'a> {
    pub(crate) frame: &'a FrameBuffer,
    pub(crate) palette: &'a Palette,
    pub(crate) scale: u16,
}

impl PixelView<'_> {
    /// The largest scale no greater than `self.scale` at which the whole
    /// frame fits in `area`, but never less than 1
    pub(crate) fn fit_scale(&self, area: Size) -> u16 {
        let Size { width, height } = self.frame.size();
        let across = area.width.checked_div(width).unwrap_or(u16::MAX);
        let down = (u32::from(area.height) * 2)
            .checked_div(u32::from(height))
            .and_then(|d| u16::try_from(d).ok())
            .unwrap_or(u16::MAX);
        self.scale.min(across).min(down).max(1)
    }

    /// Size in terminal cells of the frame drawn at `scale`
    fn drawn_size(&self, scale: u16) -> Size {
        let Size { width, height } = self.frame.size();
        Size {
            width: width.saturating_mul(scale),
            height: height.saturating_mul(scale).div_ceil(2),
        }
    }

    fn pixel_color(&self, col: u16, device_y: u16, scale: u16) -> Color {
        let pos = Position::new(col / scale, device_y / scale);
        self.palette
            .color(self.frame.get(pos).unwrap_or(consts::BACKGROUND))
    }
}

impl Widget for PixelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scale = self.fit_scale(area.as_size());
        let target = center_rect(area, self.drawn_size(scale));
        for row in 0..target.height {
            let upper_y = row.saturating_mul(2);
            let lower_y = upper_y.saturating_add(1);
            for col in 0..target.width {
                let upper = self.pixel_color(col, upper_y, scale);
                let lower = self.pixel_color(col, lower_y, scale);
                if let Some(cell) = buf.cell_mut((target.x + col, target.y + row)) {
                    cell.set_symbol(consts::PIXEL_PAIR_SYMBOL)
                        .set_fg(upper)
                        .set_bg(lower);
                }
            }
        }
    }
}

/// A [`Screen`] that draws to a terminal
#[derive(Debug)]
pub(crate) struct TerminalScreen<B: Backend> {
    terminal: Terminal<B>,
    frame: FrameBuffer,
    palette: Palette,
    scale: u16,
}

impl<B: Backend> TerminalScreen<B> {
    /// Set up a screen showing a board of the given size on `terminal`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the terminal could not be queried or cleared, or if it
    /// is too small to show the board even at a scale of 1.
    pub(crate) fn new(
        mut terminal: Terminal<B>,
        size: Size,
        scale: u16,
        palette: Palette,
    ) -> Result<TerminalScreen<B>, SetupError> {
        let available = terminal.size().map_err(SetupError::Terminal)?;
        let needed = Size {
            width: size.width,
            height: size.height.div_ceil(2),
        };
        if available.width < needed.width || available.height < needed.height {
            return Err(SetupError::TooSmall { needed, available });
        }
        terminal.clear().map_err(SetupError::Terminal)?;
        tracing::debug!(
            width = available.width,
            height = available.height,
            "terminal screen ready"
        );
        Ok(TerminalScreen {
            terminal,
            frame: FrameBuffer::new(size),
            palette,
            scale,
        })
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Screen for TerminalScreen<B> {
    fn clear(&mut self, color: u8) {
        self.frame.clear(color);
    }

    fn set_pixel(&mut self, pos: Position, color: u8) {
        self.frame.set_pixel(pos, color);
    }

    fn present(&mut self) -> io::Result<()> {
        let view = PixelView {
            frame: &self.frame,
            palette: &self.palette,
            scale: self.scale,
        };
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub(crate) enum SetupError {
    #[error("failed to set up terminal")]
    Terminal(#[source] io::Error),
    #[error(
        "terminal is {}x{} but needs to be at least {}x{}",
        .available.width,
        .available.height,
        .needed.width,
        .needed.height
    )]
    TooSmall { needed: Size, available: Size },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, style::Style};

    fn frame_with(size: Size, pixels: &[((u16, u16), u8)]) -> FrameBuffer {
        let mut frame = FrameBuffer::new(size);
        for &((x, y), color) in pixels {
            frame.set_pixel(Position::new(x, y), color);
        }
        frame
    }

    fn pair(upper: Color, lower: Color) -> Style {
        Style::new().fg(upper).bg(lower)
    }

    mod frame_buffer {
        use super::*;

        #[test]
        fn out_of_bounds_is_ignored() {
            let mut frame = FrameBuffer::new(Size::new(4, 3));
            frame.set_pixel(Position::new(4, 0), consts::SNAKE);
            frame.set_pixel(Position::new(0, 3), consts::SNAKE);
            frame.set_pixel(Position::new(u16::MAX, u16::MAX), consts::SNAKE);
            assert_eq!(frame, FrameBuffer::new(Size::new(4, 3)));
            assert_eq!(frame.get(Position::new(4, 0)), None);
        }

        #[test]
        fn set_and_clear() {
            let mut frame = FrameBuffer::new(Size::new(4, 3));
            frame.set_pixel(Position::new(3, 2), consts::FOOD);
            assert_eq!(frame.get(Position::new(3, 2)), Some(consts::FOOD));
            assert_eq!(frame.get(Position::new(2, 3)), None);
            assert_eq!(frame.get(Position::new(2, 2)), Some(consts::BACKGROUND));
            frame.clear(consts::SNAKE);
            assert_eq!(frame.get(Position::new(3, 2)), Some(consts::SNAKE));
            assert_eq!(frame.get(Position::new(0, 0)), Some(consts::SNAKE));
        }
    }

    mod pixel_view {
        use super::*;

        #[test]
        fn two_pixels_per_cell() {
            let frame = frame_with(
                Size::new(4, 2),
                &[
                    ((0, 0), consts::SNAKE),
                    ((1, 1), consts::FOOD),
                    ((3, 0), consts::SNAKE),
                    ((3, 1), 7),
                ],
            );
            let palette = Palette::default();
            let view = PixelView {
                frame: &frame,
                palette: &palette,
                scale: 1,
            };
            let area = Rect::new(0, 0, 4, 1);
            let mut buffer = Buffer::empty(area);
            view.render(area, &mut buffer);
            let mut expected = Buffer::with_lines(["▀▀▀▀"]);
            expected.set_style(Rect::new(0, 0, 1, 1), pair(Color::Green, Color::Reset));
            expected.set_style(Rect::new(1, 0, 1, 1), pair(Color::Reset, Color::LightRed));
            expected.set_style(Rect::new(2, 0, 1, 1), pair(Color::Reset, Color::Reset));
            expected.set_style(Rect::new(3, 0, 1, 1), pair(Color::Green, Color::Green));
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn scaled_and_shrunk_to_fit() {
            let frame = frame_with(
                Size::new(2, 2),
                &[((0, 0), consts::SNAKE), ((1, 1), consts::FOOD)],
            );
            let palette = Palette::default();
            let view = PixelView {
                frame: &frame,
                palette: &palette,
                scale: 10,
            };
            let area = Rect::new(0, 0, 4, 2);
            assert_eq!(view.fit_scale(area.as_size()), 2);
            let mut buffer = Buffer::empty(area);
            view.render(area, &mut buffer);
            let mut expected = Buffer::with_lines(["▀▀▀▀", "▀▀▀▀"]);
            expected.set_style(Rect::new(0, 0, 2, 1), pair(Color::Green, Color::Green));
            expected.set_style(Rect::new(2, 0, 2, 1), pair(Color::Reset, Color::Reset));
            expected.set_style(Rect::new(0, 1, 2, 1), pair(Color::Reset, Color::Reset));
            expected.set_style(
                Rect::new(2, 1, 2, 1),
                pair(Color::LightRed, Color::LightRed),
            );
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn centered() {
            let frame = frame_with(Size::new(2, 2), &[((1, 0), consts::SNAKE)]);
            let palette = Palette::default();
            let view = PixelView {
                frame: &frame,
                palette: &palette,
                scale: 1,
            };
            let area = Rect::new(0, 0, 6, 3);
            let mut buffer = Buffer::empty(area);
            view.render(area, &mut buffer);
            let mut expected = Buffer::with_lines(["      ", "  ▀▀  ", "      "]);
            expected.set_style(Rect::new(3, 1, 1, 1), pair(Color::Green, Color::Reset));
            pretty_assertions::assert_eq!(buffer, expected);
        }

        #[test]
        fn odd_height_pads_with_background() {
            let frame = frame_with(
                Size::new(1, 3),
                &[((0, 0), consts::SNAKE), ((0, 2), consts::SNAKE)],
            );
            let palette = Palette::default();
            let view = PixelView {
                frame: &frame,
                palette: &palette,
                scale: 1,
            };
            let area = Rect::new(0, 0, 1, 2);
            let mut buffer = Buffer::empty(area);
            view.render(area, &mut buffer);
            let mut expected = Buffer::with_lines(["▀", "▀"]);
            expected.set_style(Rect::new(0, 0, 1, 1), pair(Color::Green, Color::Reset));
            expected.set_style(Rect::new(0, 1, 1, 1), pair(Color::Green, Color::Reset));
            pretty_assertions::assert_eq!(buffer, expected);
        }
    }

    mod terminal_screen {
        use super::*;

        #[test]
        fn present_draws_frame() {
            let terminal = Terminal::new(TestBackend::new(4, 1)).expect("test terminal");
            let mut screen =
                TerminalScreen::new(terminal, Size::new(2, 2), 10, Palette::default())
                    .expect("terminal is big enough");
            screen.clear(consts::BACKGROUND);
            screen.set_pixel(Position::new(0, 1), consts::SNAKE);
            screen.set_pixel(Position::new(5, 5), consts::FOOD);
            screen.present().expect("drawing to a test backend");
            // fit_scale: min(4 / 2, 2 / 2) = 1, so the 2x1 frame is centred
            let mut expected = Buffer::with_lines([" ▀▀ "]);
            expected.set_style(Rect::new(1, 0, 1, 1), pair(Color::Reset, Color::Green));
            expected.set_style(Rect::new(2, 0, 1, 1), pair(Color::Reset, Color::Reset));
            pretty_assertions::assert_eq!(screen.backend().buffer(), &expected);
        }

        #[test]
        fn too_small() {
            let terminal = Terminal::new(TestBackend::new(10, 3)).expect("test terminal");
            let r = TerminalScreen::new(terminal, Size::new(80, 40), 10, Palette::default());
            assert!(matches!(
                r,
                Err(SetupError::TooSmall {
                    needed: Size {
                        width: 80,
                        height: 20
                    },
                    available: Size {
                        width: 10,
                        height: 3
                    },
                })
            ));
        }
    }
}
