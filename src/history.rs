//! The undo and redo stacks.

mod builder;
mod checkpoint;
mod display;
mod queue;

pub use builder::Builder;
pub use checkpoint::Checkpoint;
pub use display::Display;
pub use queue::Queue;

use crate::{Command, Entry, Signal, Slot};
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::{debug, trace, warn};

/// The undo and redo stacks of a target.
///
/// The history never stores the commands it is given. It applies them and
/// stores their [`opposite`](Command::opposite) instead, so the top of the
/// undo stack always takes the target one step back and the top of the redo
/// stack one step forward. The target itself is owned by the caller and passed
/// to every operation, see [`Editor`](crate::Editor) for a history bound to
/// its target.
///
/// The history can notify the user about changes to the stacks or the saved
/// state through a [`Slot`] given to the [`builder`](History::builder).
///
/// # Examples
/// ```
/// # use opposite::{Edit, History};
/// let mut target = String::from("hello world");
/// let mut history = History::new();
/// history.execute(&mut target, Edit::CapitalizeAt(2)).unwrap();
/// history.execute(&mut target, Edit::CapitalizeAt(0)).unwrap();
/// assert_eq!(target, "HeLlo world");
/// history.undo(&mut target).unwrap().unwrap();
/// history.undo(&mut target).unwrap().unwrap();
/// assert_eq!(target, "hello world");
/// history.redo(&mut target).unwrap().unwrap();
/// assert_eq!(target, "heLlo world");
/// ```
#[derive(Clone)]
pub struct History<C, S = ()> {
    undo: VecDeque<Entry<C>>,
    redo: Vec<Entry<C>>,
    limit: NonZeroUsize,
    saved: Option<usize>,
    slot: Option<S>,
}

impl<C> History<C> {
    /// Returns a new history.
    pub fn new() -> History<C> {
        History::builder().build()
    }

    /// Returns a new history builder.
    pub fn builder() -> Builder<C> {
        Builder::default()
    }
}

impl<C, S> History<C, S> {
    /// Reserves capacity for at least `additional` more undo entries.
    ///
    /// # Panics
    /// Panics if the new capacity overflows usize.
    pub fn reserve(&mut self, additional: usize) {
        self.undo.reserve(additional);
    }

    /// Shrinks the capacity of the stacks as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.undo.shrink_to_fit();
        self.redo.shrink_to_fit();
    }

    /// Returns the number of entries on both stacks.
    pub fn len(&self) -> usize {
        self.undo.len() + self.redo.len()
    }

    /// Returns `true` if both stacks are empty.
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.redo.is_empty()
    }

    /// Returns the number of entries on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Returns the number of entries on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Returns the limit of the undo stack.
    pub fn limit(&self) -> usize {
        self.limit.get()
    }

    /// Sets how the signal should be handled when the state changes.
    ///
    /// The previous slot is returned if it exists.
    pub fn connect(&mut self, slot: S) -> Option<S> {
        self.slot.replace(slot)
    }

    /// Removes and returns the slot if it exists.
    pub fn disconnect(&mut self) -> Option<S> {
        self.slot.take()
    }

    /// Returns `true` if the history can undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Returns `true` if the history can redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Returns `true` if the target is in a saved state, `false` otherwise.
    pub fn is_saved(&self) -> bool {
        self.saved == Some(self.head())
    }

    /// Returns the position of the target, which is the number of steps it can be undone.
    pub fn head(&self) -> usize {
        self.undo.len()
    }

    /// Returns an iterator over the undo stack, starting with the entry applied by the next undo.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Entry<C>> {
        self.undo.iter().rev()
    }

    /// Returns an iterator over the redo stack, starting with the entry applied by the next redo.
    pub fn redo_entries(&self) -> impl Iterator<Item = &Entry<C>> {
        self.redo.iter().rev()
    }

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        Queue::from(self)
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        Checkpoint::from(self)
    }

    /// Returns a structure for configurable formatting of the history.
    pub fn display(&self) -> Display<C, S> {
        Display::from(self)
    }
}

impl<C: Command, S: Slot> History<C, S> {
    /// Applies the command and pushes its opposite on the undo stack.
    ///
    /// The redo stack is cleared. If the undo stack is at its limit the oldest
    /// entry is dropped. A command without an opposite after being applied
    /// can not be undone, so both stacks are cleared in that case.
    ///
    /// # Errors
    /// If an error occurs when applying the command it is returned
    /// and neither the target nor the stacks are changed.
    pub fn execute(&mut self, target: &mut C::Target, command: C) -> crate::Result<C> {
        self.__execute(target, command).map(|_| ())
    }

    /// Returns the discarded redo stack and the entry evicted by the limit.
    #[allow(clippy::type_complexity)]
    pub(crate) fn __execute(
        &mut self,
        target: &mut C::Target,
        mut command: C,
    ) -> Result<(Vec<Entry<C>>, Option<Entry<C>>), C::Error> {
        command.apply(target)?;
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        let head = self.head();
        let tail = std::mem::take(&mut self.redo);
        let mut evicted = None;
        match command.opposite() {
            Some(opposite) => {
                // The saved state can not be reached once the redo stack is gone.
                self.saved = self.saved.filter(|&saved| saved <= head);
                if self.undo.len() == self.limit() {
                    evicted = self.undo.pop_front();
                    self.saved = self.saved.and_then(|saved| saved.checked_sub(1));
                    warn!(limit = self.limit(), "evicted oldest entry");
                }
                self.undo.push_back(Entry::from(opposite));
            }
            None => {
                warn!("command has no opposite, clearing history");
                self.undo.clear();
                self.saved = None;
            }
        }
        debug!(undo = self.undo.len(), redo = 0, "execute");
        self.emit_changes(could_undo, could_redo, was_saved);
        Ok((tail, evicted))
    }

    /// Applies the top of the undo stack and pushes its opposite on the redo stack.
    ///
    /// Returns `None` if there is nothing to undo.
    ///
    /// # Errors
    /// If an error occurs when applying the entry it is returned,
    /// the entry is put back and the target is not changed.
    pub fn undo(&mut self, target: &mut C::Target) -> Option<crate::Result<C>> {
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        let mut entry = self.undo.pop_back()?;
        if let Err(err) = entry.get_mut().apply(target) {
            self.undo.push_back(entry);
            return Some(Err(err));
        }
        match entry.get().opposite() {
            Some(opposite) => self.redo.push(Entry::from(opposite)),
            None => {
                warn!("undone entry has no opposite, clearing redo stack");
                self.redo.clear();
                let head = self.head();
                self.saved = self.saved.filter(|&saved| saved <= head);
            }
        }
        debug!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        self.emit_changes(true, could_redo, was_saved);
        Some(Ok(()))
    }

    /// Applies the top of the redo stack and pushes its opposite on the undo stack.
    ///
    /// Returns `None` if there is nothing to redo.
    ///
    /// # Errors
    /// If an error occurs when applying the entry it is returned,
    /// the entry is put back and the target is not changed.
    pub fn redo(&mut self, target: &mut C::Target) -> Option<crate::Result<C>> {
        let could_undo = self.can_undo();
        let was_saved = self.is_saved();
        let mut entry = self.redo.pop()?;
        if let Err(err) = entry.get_mut().apply(target) {
            self.redo.push(entry);
            return Some(Err(err));
        }
        match entry.get().opposite() {
            Some(opposite) => self.undo.push_back(Entry::from(opposite)),
            None => {
                warn!("redone entry has no opposite, clearing undo stack");
                let head = self.head() + 1;
                self.undo.clear();
                self.saved = self.saved.and_then(|saved| saved.checked_sub(head));
            }
        }
        debug!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        self.emit_changes(could_undo, true, was_saved);
        Some(Ok(()))
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        let was_saved = self.is_saved();
        self.saved = saved.then(|| self.head());
        self.emit_changes(self.can_undo(), self.can_redo(), was_saved);
    }

    /// Removes all entries from the history without applying them.
    pub fn clear(&mut self) {
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        self.undo.clear();
        self.redo.clear();
        self.saved = was_saved.then_some(0);
        self.emit_changes(could_undo, could_redo, was_saved);
    }

    /// Revert the changes done to the target since the saved state.
    pub fn revert(&mut self, target: &mut C::Target) -> Option<crate::Result<C>> {
        self.saved.and_then(|saved| self.go_to(target, saved))
    }

    /// Repeatedly calls [`undo`](History::undo) or [`redo`](History::redo)
    /// until the undo stack holds `head` entries.
    ///
    /// Returns `None` if `head` is beyond the redo stack.
    ///
    /// # Errors
    /// If an error occurs when applying an entry the error is returned
    /// and the history stays at the position reached so far.
    pub fn go_to(&mut self, target: &mut C::Target, head: usize) -> Option<crate::Result<C>> {
        if head > self.len() {
            return None;
        }
        let could_undo = self.can_undo();
        let could_redo = self.can_redo();
        let was_saved = self.is_saved();
        // Signals are emitted once for the whole walk.
        let slot = self.slot.take();
        // Decide if we need to undo or redo to reach head.
        let f = if head > self.head() {
            History::redo
        } else {
            History::undo
        };
        let mut result = Ok(());
        while self.head() != head {
            match f(self, target) {
                Some(Ok(())) => (),
                Some(Err(err)) => {
                    result = Err(err);
                    break;
                }
                None => break,
            }
        }
        self.slot = slot;
        self.emit_changes(could_undo, could_redo, was_saved);
        Some(result)
    }

    fn emit_changes(&mut self, could_undo: bool, could_redo: bool, was_saved: bool) {
        let (can_undo, can_redo, is_saved) = (self.can_undo(), self.can_redo(), self.is_saved());
        let changes = [
            (could_undo != can_undo, Signal::Undo(can_undo)),
            (could_redo != can_redo, Signal::Redo(can_redo)),
            (was_saved != is_saved, Signal::Saved(is_saved)),
        ];
        let Some(slot) = &mut self.slot else {
            return;
        };
        for (changed, signal) in changes {
            if changed {
                trace!(?signal, "emit");
                slot.on_emit(signal);
            }
        }
    }
}

impl<C: core::fmt::Display, S> History<C, S> {
    /// Returns the string of the entry which will be applied
    /// in the next call to [`undo`](History::undo).
    pub fn undo_text(&self) -> Option<String> {
        self.undo.back().map(ToString::to_string)
    }

    /// Returns the string of the entry which will be applied
    /// in the next call to [`redo`](History::redo).
    pub fn redo_text(&self) -> Option<String> {
        self.redo.last().map(ToString::to_string)
    }
}

impl<C> Default for History<C> {
    fn default() -> History<C> {
        History::new()
    }
}

impl<C: core::fmt::Debug, S> core::fmt::Debug for History<C, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("History")
            .field("undo", &self.undo)
            .field("redo", &self.redo)
            .field("limit", &self.limit)
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Command, Edit, EditError, History, Signal};
    use std::sync::mpsc;

    /// Appends, removes, then appends again with no way back.
    #[derive(Debug)]
    enum Fading {
        Push,
        Pop,
        Repush,
    }

    impl Command for Fading {
        type Target = String;
        type Error = EditError;

        fn apply(&mut self, s: &mut String) -> crate::Result<Fading> {
            match self {
                Fading::Push | Fading::Repush => s.push('x'),
                Fading::Pop => {
                    s.pop().ok_or(EditError::Empty)?;
                }
            }
            Ok(())
        }

        fn opposite(&self) -> Option<Fading> {
            match self {
                Fading::Push => Some(Fading::Pop),
                Fading::Pop => Some(Fading::Repush),
                Fading::Repush => None,
            }
        }
    }

    fn push(ch: char) -> Edit {
        Edit::AppendAtEnd(ch)
    }

    #[test]
    fn execute_clears_redo() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, push('a')).unwrap();
        history.execute(&mut target, push('b')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(history.redo_len(), 1);
        history.execute(&mut target, push('c')).unwrap();
        assert_eq!(history.redo_len(), 0);
        assert!(history.redo(&mut target).is_none());
        assert_eq!(target, "ac");
    }

    #[test]
    fn empty_stacks() {
        let mut target = String::from("abc");
        let mut history = History::<Edit>::new();
        assert!(history.undo(&mut target).is_none());
        assert!(history.redo(&mut target).is_none());
        assert_eq!(target, "abc");
        assert!(history.is_empty());
    }

    #[test]
    fn failed_execute_changes_nothing() {
        let mut target = String::from("ab");
        let mut history = History::new();
        history.execute(&mut target, push('c')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(
            history.execute(&mut target, Edit::CapitalizeAt(2)),
            Err(EditError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(target, "ab");
        assert_eq!(history.undo_len(), 0);
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn failed_undo_keeps_entry() {
        let mut target = String::from("ab");
        let mut history = History::new();
        history.execute(&mut target, push('c')).unwrap();
        // Edits behind the history's back break the stored opposites.
        target.clear();
        assert_eq!(history.undo(&mut target), Some(Err(EditError::Empty)));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
        target.push('x');
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "");
        assert_eq!(history.redo_len(), 1);
    }

    #[test]
    fn failed_redo_keeps_entry() {
        let mut target = String::from("ab");
        let mut history = History::new();
        history.execute(&mut target, Edit::CapitalizeAt(1)).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        target.clear();
        assert!(matches!(
            history.redo(&mut target),
            Some(Err(EditError::IndexOutOfBounds { index: 1, len: 0 }))
        ));
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.undo_len(), 0);
    }

    #[test]
    fn stacks_hold_opposites() {
        let mut target = String::from("hello");
        let mut history = History::new();
        history.execute(&mut target, push('W')).unwrap();
        assert_eq!(history.undo_text().as_deref(), Some("Remove from end"));
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(history.undo_text(), None);
        assert_eq!(history.redo_text().as_deref(), Some("Append 'W' at end"));
    }

    #[test]
    fn limit() {
        let mut target = String::new();
        let mut history = History::builder().limit(2).build();
        history.execute(&mut target, push('a')).unwrap();
        history.execute(&mut target, push('b')).unwrap();
        history.execute(&mut target, push('c')).unwrap();
        assert_eq!(history.undo_len(), 2);
        history.undo(&mut target).unwrap().unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert!(history.undo(&mut target).is_none());
        assert_eq!(target, "a");
    }

    #[test]
    fn limit_drops_saved_state() {
        let mut target = String::new();
        let mut history = History::builder().limit(1).build();
        assert!(history.is_saved());
        history.execute(&mut target, push('a')).unwrap();
        history.execute(&mut target, push('b')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert!(!history.is_saved());
    }

    #[test]
    fn saved() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, push('a')).unwrap();
        history.execute(&mut target, push('b')).unwrap();
        history.set_saved(true);
        history.execute(&mut target, push('c')).unwrap();
        assert!(!history.is_saved());
        history.undo(&mut target).unwrap().unwrap();
        assert!(history.is_saved());
        history.undo(&mut target).unwrap().unwrap();
        assert!(!history.is_saved());
        // The saved state is on the redo stack, which is discarded.
        history.execute(&mut target, push('x')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert!(!history.is_saved());
        assert!(history.revert(&mut target).is_none());
    }

    #[test]
    fn revert() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, push('a')).unwrap();
        history.set_saved(true);
        history.execute(&mut target, push('b')).unwrap();
        history.execute(&mut target, push('c')).unwrap();
        history.revert(&mut target).unwrap().unwrap();
        assert_eq!(target, "a");
        assert!(history.is_saved());
        assert_eq!(history.redo_len(), 2);
    }

    #[test]
    fn go_to() {
        let mut target = String::new();
        let mut history = History::new();
        for ch in "abcde".chars() {
            history.execute(&mut target, push(ch)).unwrap();
        }
        history.go_to(&mut target, 0).unwrap().unwrap();
        assert_eq!(history.head(), 0);
        assert_eq!(target, "");
        history.go_to(&mut target, 5).unwrap().unwrap();
        assert_eq!(history.head(), 5);
        assert_eq!(target, "abcde");
        history.go_to(&mut target, 1).unwrap().unwrap();
        assert_eq!(history.head(), 1);
        assert_eq!(target, "a");
        history.go_to(&mut target, 4).unwrap().unwrap();
        assert_eq!(history.head(), 4);
        assert_eq!(target, "abcd");
        assert!(history.go_to(&mut target, 6).is_none());
        assert_eq!(history.head(), 4);
    }

    #[test]
    fn irreversible_command_clears_both_stacks() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, Fading::Push).unwrap();
        history.execute(&mut target, Fading::Push).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!((history.undo_len(), history.redo_len()), (1, 1));
        history.execute(&mut target, Fading::Repush).unwrap();
        assert_eq!(target, "xx");
        assert!(history.is_empty());
        assert!(!history.is_saved());
        assert!(history.undo(&mut target).is_none());
        assert!(history.redo(&mut target).is_none());
    }

    #[test]
    fn redo_without_opposite_keeps_reached_saved_state() {
        let mut target = String::new();
        let mut history = History::<Fading>::new();
        history.execute(&mut target, Fading::Pop).unwrap_err();
        target.push_str("ab");
        history.execute(&mut target, Fading::Push).unwrap();
        history.execute(&mut target, Fading::Push).unwrap();
        history.set_saved(true);
        // Undoing pushes a `Repush` on the redo stack, which has no opposite.
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "abx");
        assert_eq!(history.redo_len(), 1);
        history.redo(&mut target).unwrap().unwrap();
        assert_eq!(target, "abxx");
        assert!(history.is_empty());
        // The saved state was the one just reached.
        assert!(history.is_saved());
    }

    #[test]
    fn redo_without_opposite_forgets_older_saved_state() {
        let mut target = String::new();
        let mut history = History::<Fading>::new();
        history.execute(&mut target, Fading::Push).unwrap();
        assert!(!history.is_saved());
        history.undo(&mut target).unwrap().unwrap();
        assert!(history.is_saved());
        history.redo(&mut target).unwrap().unwrap();
        assert_eq!(target, "x");
        assert_eq!((history.undo_len(), history.redo_len()), (0, 0));
        assert!(!history.is_saved());
        assert!(history.revert(&mut target).is_none());
    }

    #[test]
    fn undone_entry_without_opposite_clears_redo() {
        let mut target = String::from("ab");
        let mut history = History::<Fading>::new();
        history.execute(&mut target, Fading::Pop).unwrap();
        history.execute(&mut target, Fading::Pop).unwrap();
        assert_eq!(target, "");
        history.set_saved(true);
        // The undo stack holds `Repush` entries.
        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(target, "x");
        assert_eq!((history.undo_len(), history.redo_len()), (1, 0));
        assert!(!history.is_saved());
        assert!(history.redo(&mut target).is_none());
    }

    #[test]
    fn clear() {
        let mut target = String::new();
        let mut history = History::new();
        history.execute(&mut target, push('a')).unwrap();
        history.execute(&mut target, push('b')).unwrap();
        history.undo(&mut target).unwrap().unwrap();
        history.clear();
        assert!(history.is_empty());
        assert_eq!(target, "a");
    }

    #[test]
    fn signals() {
        let (sender, receiver) = mpsc::channel();
        let mut iter = receiver.try_iter();
        let mut target = String::new();
        let mut history = History::builder().connect(sender).build();

        history.execute(&mut target, push('a')).unwrap();
        assert_eq!(iter.next(), Some(Signal::Undo(true)));
        assert_eq!(iter.next(), Some(Signal::Saved(false)));
        assert_eq!(iter.next(), None);

        history.execute(&mut target, push('b')).unwrap();
        assert_eq!(iter.next(), None);

        history.undo(&mut target).unwrap().unwrap();
        assert_eq!(iter.next(), Some(Signal::Redo(true)));
        assert_eq!(iter.next(), None);

        history.go_to(&mut target, 0).unwrap().unwrap();
        assert_eq!(iter.next(), Some(Signal::Undo(false)));
        assert_eq!(iter.next(), Some(Signal::Saved(true)));
        assert_eq!(iter.next(), None);

        history.execute(&mut target, push('c')).unwrap();
        assert_eq!(iter.next(), Some(Signal::Undo(true)));
        assert_eq!(iter.next(), Some(Signal::Redo(false)));
        assert_eq!(iter.next(), Some(Signal::Saved(false)));
        assert_eq!(iter.next(), None);
    }
}
