//! Terminal surface
//!
//! Prints highlighted buffer renders, labels and errors to any writer,
//! coloring style classes with crossterm when enabled.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};

use super::{Label, RenderSurface};
use crate::listing::TableEntry;
use crate::syntax::{StyleClass, StyleSpans};

const PROGRESS_WIDTH: usize = 30;

fn class_color(class: StyleClass) -> Option<Color> {
    match class {
        StyleClass::DataType => Some(Color::Magenta),
        StyleClass::Ddl => Some(Color::Red),
        StyleClass::Dml => Some(Color::Blue),
        StyleClass::Keyword => Some(Color::Cyan),
        StyleClass::Literal => Some(Color::Green),
        StyleClass::Operator => Some(Color::Yellow),
        StyleClass::Default => None,
    }
}

pub struct ConsoleSurface<W: Write> {
    out: W,
    color: bool,
    /// Last whole percent drawn, to skip redundant redraws
    drawn_percent: Option<u8>,
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            drawn_percent: None,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_spans(&mut self, spans: &StyleSpans) -> io::Result<()> {
        let source = spans.source();
        let color = self.color;
        queue!(
            self.out,
            Print(format!("-- revision {} --\n", spans.revision()))
        )?;

        for (range, class) in spans.ranges() {
            let text = &source[range];
            match class.and_then(class_color).filter(|_| color) {
                Some(color) => queue!(
                    self.out,
                    SetForegroundColor(color),
                    Print(text),
                    ResetColor
                )?,
                None => queue!(self.out, Print(text))?,
            }
        }

        if !source.ends_with('\n') {
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }

    fn write_label(&mut self, label: Label, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let prefix = match label {
            Label::Status => "status",
            Label::Feedback => "feedback",
        };
        if self.color {
            queue!(
                self.out,
                SetAttribute(Attribute::Dim),
                Print(format!("[{}] ", prefix)),
                SetAttribute(Attribute::Reset),
                Print(format!("{}\n", text))
            )?;
        } else {
            queue!(self.out, Print(format!("[{}] {}\n", prefix, text)))?;
        }
        self.out.flush()
    }

    fn write_progress(&mut self, fraction: f64) -> io::Result<()> {
        let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u8;
        if self.drawn_percent == Some(percent) {
            return Ok(());
        }
        self.drawn_percent = Some(percent);

        let filled = PROGRESS_WIDTH * percent as usize / 100;
        let bar = format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            " ".repeat(PROGRESS_WIDTH - filled),
            percent
        );

        if self.color {
            queue!(
                self.out,
                cursor::MoveToColumn(0),
                terminal::Clear(terminal::ClearType::CurrentLine),
                Print(bar)
            )?;
            if percent == 100 {
                queue!(self.out, Print("\n"))?;
            }
        } else if percent == 100 {
            queue!(self.out, Print(format!("{}\n", bar)))?;
        }
        self.out.flush()
    }

    fn write_error(&mut self, title: &str, message: &str) -> io::Result<()> {
        if self.color {
            queue!(
                self.out,
                SetForegroundColor(Color::Red),
                Print(format!("{}: ", title)),
                ResetColor,
                Print(format!("{}\n", message))
            )?;
        } else {
            queue!(self.out, Print(format!("{}: {}\n", title, message)))?;
        }
        self.out.flush()
    }

    fn write_listing(&mut self, entries: &[TableEntry]) -> io::Result<()> {
        queue!(self.out, Print(format!("-- {} table(s) --\n", entries.len())))?;
        for entry in entries {
            queue!(
                self.out,
                Print(format!("  {} ({})\n", entry.name, entry.columns.join(", ")))
            )?;
        }
        self.out.flush()
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            tracing::warn!("Console write failed: {}", e);
        }
    }
}

impl<W: Write> RenderSurface for ConsoleSurface<W> {
    fn apply_styles(&mut self, _offset: usize, spans: &StyleSpans) {
        Self::report(self.write_spans(spans));
    }

    fn replace_text(&mut self, _text: &str) {
        // The next highlight pass renders the new text
        self.drawn_percent = None;
    }

    fn set_label(&mut self, label: Label, text: &str) {
        Self::report(self.write_label(label, text));
    }

    fn set_progress(&mut self, fraction: f64) {
        Self::report(self.write_progress(fraction));
    }

    fn show_error(&mut self, title: &str, message: &str) {
        Self::report(self.write_error(title, message));
    }

    fn refresh_listing(&mut self, entries: &[TableEntry]) {
        Self::report(self.write_listing(entries));
    }
}
