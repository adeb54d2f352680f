use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use othello_core::{Board, Cell, Player};
use std::io::{self, Write};

/// Draws a board. Renderers only ever read the board.
pub trait Renderer {
    fn draw(&mut self, board: &Board) -> io::Result<()>;
}

/// Renderer for headless games.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _board: &Board) -> io::Result<()> {
        Ok(())
    }
}

/// Colored grid with column letters and row numbers, as used by
/// `Move`'s notation.
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Redraw in place instead of scrolling.
    clear: bool,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(clear: bool) -> Self {
        Self::new(io::stdout(), clear)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, board: &Board) -> io::Result<()> {
        if self.clear {
            self.out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        }

        let files: String = (0..board.size())
            .map(|col| format!(" {} ", (b'a' + col as u8) as char))
            .collect();
        self.out.queue(Print(format!("\n   {files}\n")))?;

        for (row, cells) in board.rows().enumerate() {
            self.out.queue(Print(format!("{:>2} ", row + 1)))?;

            for &cell in cells {
                self.out.queue(SetBackgroundColor(TermColor::DarkGreen))?;
                match cell {
                    Cell::Light => self
                        .out
                        .queue(SetForegroundColor(TermColor::White))?
                        .queue(Print(" ● "))?,
                    Cell::Dark => self
                        .out
                        .queue(SetForegroundColor(TermColor::Black))?
                        .queue(Print(" ● "))?,
                    Cell::Empty => self.out.queue(Print("   "))?,
                };
                self.out.queue(ResetColor)?;
            }

            self.out.queue(Print(format!(" {}\n", row + 1)))?;
        }

        self.out.queue(Print(format!(
            "   {files}\n\n{}: {}  {}: {}\n",
            Player::Light,
            board.count(Player::Light),
            Player::Dark,
            board.count(Player::Dark)
        )))?;

        self.out.flush()
    }
}
