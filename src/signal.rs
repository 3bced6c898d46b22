//! Notifications about state changes in the history.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Sender, SyncSender};

/// A change in what the history can do or in its saved state.
///
/// Every signal carries the new value. See [`Slot`] for how to receive them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
#[non_exhaustive]
pub enum Signal {
    /// Undoing became possible (`true`) or impossible (`false`).
    Undo(bool),
    /// Redoing became possible (`true`) or impossible (`false`).
    Redo(bool),
    /// The target entered (`true`) or left (`false`) the saved state.
    Saved(bool),
}

/// Receiver of the signals emitted by a [`History`](crate::History).
///
/// Signals are only emitted when something changed, and a batch of
/// operations such as [`go_to`](crate::History::go_to) emits once at the end.
///
/// # Examples
/// ```
/// # use std::sync::mpsc;
/// # use opposite::{Edit, History, Signal};
/// let (sender, receiver) = mpsc::channel();
/// let mut iter = receiver.try_iter();
///
/// let mut target = String::new();
/// let mut history = History::builder().connect(sender).build();
///
/// history.execute(&mut target, Edit::AppendAtEnd('a')).unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(false)));
/// assert_eq!(iter.next(), None);
///
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(iter.next(), Some(Signal::Undo(false)));
/// assert_eq!(iter.next(), Some(Signal::Redo(true)));
/// assert_eq!(iter.next(), Some(Signal::Saved(true)));
/// assert_eq!(iter.next(), None);
/// ```
pub trait Slot {
    /// Handles one signal.
    fn on_emit(&mut self, signal: Signal);
}

impl Slot for () {
    fn on_emit(&mut self, _: Signal) {}
}

impl<F: FnMut(Signal)> Slot for F {
    fn on_emit(&mut self, signal: Signal) {
        self(signal)
    }
}

// A disconnected receiver just stops listening.
impl Slot for Sender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}

impl Slot for SyncSender<Signal> {
    fn on_emit(&mut self, signal: Signal) {
        let _ = self.send(signal);
    }
}
