use std::io::{BufRead, Write};

use colored::Colorize;
use lemonade_game::{GameEvent, INVALID_QUANTITY_MESSAGE, InputError, StandIo, parse_quantity};

/// Renders game events as colored text.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render(&mut self, event: &GameEvent) {
        let text = event.to_string();
        let styled = match event {
            GameEvent::DayStarted { .. } => format!("\n{}", text.bright_cyan().bold()),
            GameEvent::Forecast(_) => text.yellow().to_string(),
            GameEvent::Purchased(_) => text.green().to_string(),
            GameEvent::PurchaseDenied(_) => text.red().to_string(),
            GameEvent::SoldOut { .. } => text.bright_yellow().to_string(),
            GameEvent::DayClosed(_) => text.bold().to_string(),
            GameEvent::GameOver(_) => format!("\n{}", text.bright_cyan().bold()),
            GameEvent::PricesPosted(_) | GameEvent::Status(_) => text,
        };
        if let Err(err) = writeln!(self.out, "{styled}") {
            log::warn!("failed to write game output: {err}");
        }
    }

    pub fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.out, "{line}")
    }

    pub fn write_prompt(&mut self, prompt: &str) -> std::io::Result<()> {
        write!(self.out, "{prompt} ")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Interactive player on a line-oriented reader.
pub struct ConsoleIo<R: BufRead, W: Write> {
    input: R,
    view: ConsoleView<W>,
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    pub const fn new(input: R, out: W) -> Self {
        Self {
            input,
            view: ConsoleView::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.view.into_inner()
    }
}

impl<R: BufRead, W: Write> StandIo for ConsoleIo<R, W> {
    fn prompt_quantity(&mut self, prompt: &str) -> Result<u32, InputError> {
        let mut line = String::new();
        loop {
            self.view.write_prompt(prompt)?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(InputError::Closed);
            }
            if let Some(quantity) = parse_quantity(&line) {
                return Ok(quantity);
            }
            log::debug!("rejected quantity answer {:?}", line.trim());
            self.view.write_line(INVALID_QUANTITY_MESSAGE)?;
        }
    }

    fn notify(&mut self, event: &GameEvent) {
        self.view.render(event);
    }
}
