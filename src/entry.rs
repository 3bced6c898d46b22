#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrapper around a command that contains additional metadata.
///
/// Every command stored in a [`History`](crate::History) is wrapped in an entry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Entry<C> {
    command: C,
    #[cfg(feature = "chrono")]
    timestamp: DateTime<Utc>,
}

impl<C> Entry<C> {
    /// Returns a reference to the stored command.
    pub fn get(&self) -> &C {
        &self.command
    }

    /// Consumes the entry, returning the stored command.
    pub fn into_command(self) -> C {
        self.command
    }

    /// Returns the time the command was stored.
    #[cfg(feature = "chrono")]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub(crate) fn get_mut(&mut self) -> &mut C {
        &mut self.command
    }
}

impl<C> From<C> for Entry<C> {
    fn from(command: C) -> Self {
        Entry {
            command,
            #[cfg(feature = "chrono")]
            timestamp: Utc::now(),
        }
    }
}

impl<C: Display> Display for Entry<C> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        (&self.command as &dyn Display).fmt(f)
    }
}
