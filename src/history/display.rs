use crate::format::{Format, Side};
use crate::{Entry, History};
use core::fmt::{self, Write};

/// Configurable display formatting for the [`History`].
///
/// Entries are listed from the bottom of the redo stack down to the bottom of
/// the undo stack. An entry listed at position `n` moves the target between
/// positions `n - 1` and `n`, and is followed by the stack it is on.
///
/// # Examples
/// ```
/// # use opposite::{Edit, History};
/// let mut target = String::from("ab");
/// let mut history = History::new();
/// history.execute(&mut target, Edit::AppendAtEnd('c')).unwrap();
/// history.execute(&mut target, Edit::CapitalizeAt(0)).unwrap();
/// history.undo(&mut target).unwrap().unwrap();
///
/// let mut display = history.display();
/// # #[cfg(feature = "colored")]
/// # display.colored(false);
/// let text = display.detailed(false).to_string();
/// let mut lines = text.lines();
/// assert_eq!(lines.next(), Some("2 redo Capitalize at 0"));
/// assert_eq!(lines.next(), Some("1 undo [HEAD] Remove from end"));
/// assert_eq!(lines.next(), Some("0 [SAVED]"));
/// ```
pub struct Display<'a, C, S> {
    history: &'a History<C, S>,
    format: Format,
}

impl<C, S> Display<'_, C, S> {
    /// Show colored output (on by default).
    ///
    /// Requires the `colored` feature to be enabled.
    #[cfg(feature = "colored")]
    pub fn colored(&mut self, on: bool) -> &mut Self {
        self.format.colored = on;
        self
    }

    /// Show detailed output (on by default).
    pub fn detailed(&mut self, on: bool) -> &mut Self {
        self.format.detailed = on;
        self
    }

    /// Show the current position in the output (on by default).
    pub fn head(&mut self, on: bool) -> &mut Self {
        self.format.head = on;
        self
    }

    /// Show the saved position (on by default).
    pub fn saved(&mut self, on: bool) -> &mut Self {
        self.format.saved = on;
        self
    }
}

impl<C: fmt::Display, S> Display<'_, C, S> {
    fn fmt_list(
        &self,
        f: &mut fmt::Formatter,
        at: usize,
        entry: Option<(Side, &Entry<C>)>,
    ) -> fmt::Result {
        self.format.position(f, at)?;
        if let Some((side, _)) = entry {
            self.format.side(f, side)?;
        }

        #[cfg(feature = "chrono")]
        if let Some((_, entry)) = entry {
            if self.format.detailed {
                self.format.timestamp(f, &entry.timestamp())?;
            }
        }

        self.format
            .labels(f, at, self.history.head(), self.history.saved)?;

        match entry {
            Some((_, entry)) if self.format.detailed => {
                writeln!(f)?;
                self.format.message(f, entry)
            }
            Some((_, entry)) => {
                f.write_char(' ')?;
                self.format.message(f, entry)?;
                writeln!(f)
            }
            None => Ok(()),
        }
    }
}

impl<'a, C, S> From<&'a History<C, S>> for Display<'a, C, S> {
    fn from(history: &'a History<C, S>) -> Self {
        Display {
            history,
            format: Format::default(),
        }
    }
}

impl<C: fmt::Display, S> fmt::Display for Display<'_, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let head = self.history.head();
        for (i, entry) in self.history.redo.iter().enumerate() {
            let at = head + self.history.redo.len() - i;
            self.fmt_list(f, at, Some((Side::Redo, entry)))?;
        }
        for (i, entry) in self.history.undo.iter().enumerate().rev() {
            self.fmt_list(f, i + 1, Some((Side::Undo, entry)))?;
        }
        self.fmt_list(f, 0, None)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Edit, History};

    #[test]
    fn head_and_saved_share_a_line() {
        let mut target = String::from("ab");
        let mut history = History::new();
        history.execute(&mut target, Edit::AppendAtStart('c')).unwrap();
        history.set_saved(true);
        let mut display = history.display();
        #[cfg(feature = "colored")]
        display.colored(false);
        display.detailed(false);
        assert_eq!(
            display.to_string(),
            "1 undo [HEAD, SAVED] Remove from start\n0"
        );
        display.head(false).saved(false);
        assert_eq!(display.to_string(), "1 undo Remove from start\n0");
    }
}
