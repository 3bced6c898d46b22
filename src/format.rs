#![cfg_attr(not(feature = "colored"), allow(unused_variables))]

#[cfg(feature = "chrono")]
use chrono::{DateTime, Local, Utc};
#[cfg(feature = "colored")]
use colored::{Color, Colorize};
use core::fmt;

/// Which stack an entry lives on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Undo,
    Redo,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Format {
    #[cfg(feature = "colored")]
    pub colored: bool,
    pub detailed: bool,
    pub head: bool,
    pub saved: bool,
}

impl Default for Format {
    fn default() -> Self {
        Format {
            #[cfg(feature = "colored")]
            colored: true,
            detailed: true,
            head: true,
            saved: true,
        }
    }
}

impl Format {
    pub fn message(self, f: &mut fmt::Formatter, msg: &impl ToString) -> fmt::Result {
        let msg = msg.to_string();
        let lines = msg.lines();
        if self.detailed {
            for line in lines {
                writeln!(f, "    {}", line.trim())?;
            }
        } else if let Some(line) = lines.map(str::trim).find(|s| !s.is_empty()) {
            f.write_str(line)?;
        }
        Ok(())
    }

    pub fn position(self, f: &mut fmt::Formatter, at: usize) -> fmt::Result {
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, "{}", at.to_string().yellow().bold());
        }
        write!(f, "{at}")
    }

    pub fn side(self, f: &mut fmt::Formatter, side: Side) -> fmt::Result {
        let text = match side {
            Side::Undo => "undo",
            Side::Redo => "redo",
        };
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", text.color(color_of_side(side)));
        }
        write!(f, " {text}")
    }

    pub fn labels(
        self,
        f: &mut fmt::Formatter,
        at: usize,
        head: usize,
        saved: Option<usize>,
    ) -> fmt::Result {
        let labels: Vec<&str> = [
            (self.head && at == head).then_some("HEAD"),
            (self.saved && saved == Some(at)).then_some("SAVED"),
        ]
        .into_iter()
        .flatten()
        .collect();
        if labels.is_empty() {
            return Ok(());
        }
        #[cfg(feature = "colored")]
        if self.colored {
            let labels: Vec<String> = labels
                .iter()
                .map(|&label| label.color(color_of_label(label)).bold().to_string())
                .collect();
            let separator = ", ".yellow().to_string();
            return write!(
                f,
                " {}{}{}",
                "[".yellow(),
                labels.join(separator.as_str()),
                "]".yellow()
            );
        }
        write!(f, " [{}]", labels.join(", "))
    }

    #[cfg(feature = "chrono")]
    pub fn timestamp(self, f: &mut fmt::Formatter, timestamp: &DateTime<Utc>) -> fmt::Result {
        let local = timestamp.with_timezone(&Local).format("%H:%M:%S");
        #[cfg(feature = "colored")]
        if self.colored {
            return write!(f, " {}", local.to_string().yellow());
        }
        write!(f, " {local}")
    }
}

#[cfg(feature = "colored")]
fn color_of_side(side: Side) -> Color {
    match side {
        Side::Undo => Color::Cyan,
        Side::Redo => Color::Magenta,
    }
}

#[cfg(feature = "colored")]
fn color_of_label(label: &str) -> Color {
    match label {
        "HEAD" => Color::Cyan,
        _ => Color::Green,
    }
}
