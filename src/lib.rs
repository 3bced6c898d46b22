//! Undo-redo functionality built on commands that know their own opposite.
//!
//! It is an implementation of the command pattern where every modification of
//! a target is done by applying a [`Command`]. After a command has been applied
//! it can produce its [`opposite`](Command::opposite): a new command that, when
//! applied to the target, moves it back to the state it was in before.
//!
//! The [`History`] keeps two stacks of such opposites. Executing a command
//! applies it, stores its opposite on the undo stack, and discards the redo
//! stack. Undoing applies the top of the undo stack and stores *its* opposite on
//! the redo stack, and redoing does the same in the other direction.
//!
//! # Features
//!
//! * [`Command`] provides the base functionality for all commands.
//! * [`Edit`] is a family of reversible edits on a [`String`] buffer.
//! * [`History`] provides the undo and redo stacks.
//! * [`Queue`] wraps a [`History`] and extends it with batch functionality.
//! * [`Checkpoint`] wraps a [`History`] and extends it with rollback functionality.
//! * [`Editor`] binds a history to the target it owns, and [`Shared`] makes
//!   it usable from several threads.
//! * The target can be marked as saved and the history tracks the saved state
//!   and notifies a connected [`Slot`] when it changes.
//! * Configurable display formatting with colors when the `colored` feature is enabled.
//! * Time stamps on every entry when the `chrono` feature is enabled.
//! * Serialization of edits and entries when the `serde` feature is enabled.
//!
//! # Examples
//!
//! ```
//! use opposite::{Edit, History};
//!
//! let mut target = String::from("hello");
//! let mut history = History::new();
//! history.execute(&mut target, Edit::AppendAtEnd('W')).unwrap();
//! history.execute(&mut target, Edit::AppendAtEnd('o')).unwrap();
//! assert_eq!(target, "helloWo");
//! history.undo(&mut target).unwrap().unwrap();
//! history.undo(&mut target).unwrap().unwrap();
//! assert_eq!(target, "hello");
//! history.redo(&mut target).unwrap().unwrap();
//! assert_eq!(target, "helloW");
//! ```

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod edit;
mod editor;
mod entry;
mod format;
pub mod history;
mod shared;
mod signal;

pub use edit::{Edit, EditError};
pub use editor::Editor;
pub use entry::Entry;
pub use history::{Checkpoint, History, Queue};
pub use shared::Shared;
pub use signal::{Signal, Slot};

/// A specialized result type for history operations.
pub type Result<C> = core::result::Result<(), <C as Command>::Error>;

/// Base functionality for all commands.
///
/// # Examples
/// ```
/// use opposite::{Command, History};
///
/// enum Counter {
///     Add(u32),
///     Sub(u32),
/// }
///
/// impl Command for Counter {
///     type Target = u32;
///     type Error = &'static str;
///
///     fn apply(&mut self, n: &mut u32) -> opposite::Result<Counter> {
///         *n = match *self {
///             Counter::Add(k) => n.checked_add(k).ok_or("overflow")?,
///             Counter::Sub(k) => n.checked_sub(k).ok_or("underflow")?,
///         };
///         Ok(())
///     }
///
///     fn opposite(&self) -> Option<Counter> {
///         Some(match *self {
///             Counter::Add(k) => Counter::Sub(k),
///             Counter::Sub(k) => Counter::Add(k),
///         })
///     }
/// }
///
/// let mut n = 1;
/// let mut history = History::new();
/// history.execute(&mut n, Counter::Add(2)).unwrap();
/// assert!(history.execute(&mut n, Counter::Sub(5)).is_err());
/// assert_eq!(n, 3);
/// history.undo(&mut n).unwrap().unwrap();
/// assert_eq!(n, 1);
/// ```
pub trait Command {
    /// The target type.
    type Target;
    /// The error type.
    type Error;

    /// Applies the command on the target.
    ///
    /// Implementations must validate before they mutate: when an error is
    /// returned the target is left exactly as it was. They should not panic
    /// after mutating either, since [`Shared`] keeps using an editor whose
    /// lock was poisoned.
    fn apply(&mut self, target: &mut Self::Target) -> core::result::Result<(), Self::Error>;

    /// Returns the command that reverts the effect of the last [`apply`](Command::apply).
    ///
    /// Commands that only learn what to restore while they are applied
    /// return `None` until they have been applied once.
    fn opposite(&self) -> Option<Self>
    where
        Self: Sized;
}
