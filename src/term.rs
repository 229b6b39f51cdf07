use crate::render::Surface;
use crate::{Coords, TermInt};
use std::{io::{Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyCode, KeyEvent, read, poll};

/// Owns stdout for the lifetime of the game. Drawing is confined to a fixed
/// `width` x `height` viewport in the top-left corner.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new(viewport: Coords) -> Self {
        TermManager { width: viewport.0, height: viewport.1, stdout: stdout(), active: false }
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.active = true;
        Ok(())
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Returns at most one pending key without waiting.
    pub fn poll_key(&self) -> crossterm::Result<Option<KeyEvent>> {
        if poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    /// Line editor for raw mode: echoes at `pos`, handles Backspace, ends on Enter.
    pub fn read_line(&mut self, pos: Coords, max_len: usize) -> crossterm::Result<String> {
        let mut line = String::new();
        execute!(self.stdout, cursor::MoveTo(pos.0, pos.1), cursor::Show)?;

        loop {
            match self.read_key_blocking()?.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    if line.pop().is_some() {
                        let x = pos.0 + line.chars().count() as TermInt;
                        queue!(self.stdout, cursor::MoveTo(x, pos.1), style::Print(' '), cursor::MoveTo(x, pos.1))?;
                    }
                }
                KeyCode::Char(ch) if line.chars().count() < max_len => {
                    line.push(ch);
                    queue!(self.stdout, style::Print(ch))?;
                }
                _ => {}
            }
            self.stdout.flush()?;
        }

        execute!(self.stdout, cursor::Hide)?;
        Ok(line)
    }

    /// Clears the screen and writes `lines` from the top-left corner.
    pub fn show_lines(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        self.clear()?;
        for (i, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, i as TermInt), style::Print(line))?;
        }
        self.flush()
    }

    pub fn print_at(&mut self, pos: Coords, text: &str) -> crossterm::Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(text))
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Surface for TermManager {
    fn print_str(&mut self, pos: Coords, text: &str) -> crossterm::Result<()> {
        self.print_at(pos, text)
    }

    fn flush(&mut self) -> crossterm::Result<()> {
        TermManager::flush(self)
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
