use super::Queue;
use crate::{Command, Entry, History, Slot};

#[derive(Debug)]
enum CheckpointEntry<C> {
    Execute {
        saved: Option<usize>,
        redo: Vec<Entry<C>>,
        evicted: Option<Entry<C>>,
    },
    Undo,
    Redo,
}

/// Wraps a history and gives it checkpoint functionality.
///
/// Operations are performed right away, but can be rolled back with
/// [`cancel`](Checkpoint::cancel). Cancelling also restores the redo stack
/// and any entry that was discarded by an execute inside the checkpoint.
///
/// # Examples
/// ```
/// # use opposite::{Edit, History};
/// let mut string = String::from("ab");
/// let mut history = History::new();
/// history.execute(&mut string, Edit::AppendAtEnd('c')).unwrap();
/// history.undo(&mut string).unwrap().unwrap();
///
/// let mut checkpoint = history.checkpoint();
/// checkpoint.execute(&mut string, Edit::to_title_case()).unwrap();
/// assert_eq!(string, "Ab");
/// checkpoint.cancel(&mut string).unwrap().unwrap();
///
/// assert_eq!(string, "ab");
/// history.redo(&mut string).unwrap().unwrap();
/// assert_eq!(string, "abc");
/// ```
#[derive(Debug)]
pub struct Checkpoint<'a, C, S> {
    history: &'a mut History<C, S>,
    entries: Vec<CheckpointEntry<C>>,
}

impl<C, S> Checkpoint<'_, C, S> {
    /// Commits the changes and consumes the checkpoint.
    pub fn commit(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        self.history.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        self.history.checkpoint()
    }
}

impl<C: Command, S: Slot> Checkpoint<'_, C, S> {
    /// Calls the [`execute`](History::execute) method.
    pub fn execute(&mut self, target: &mut C::Target, command: C) -> crate::Result<C> {
        let saved = self.history.saved;
        let (redo, evicted) = self.history.__execute(target, command)?;
        self.entries.push(CheckpointEntry::Execute {
            saved,
            redo,
            evicted,
        });
        Ok(())
    }

    /// Calls the [`undo`](History::undo) method.
    pub fn undo(&mut self, target: &mut C::Target) -> Option<crate::Result<C>> {
        let result = self.history.undo(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Undo);
        }
        Some(result)
    }

    /// Calls the [`redo`](History::redo) method.
    pub fn redo(&mut self, target: &mut C::Target) -> Option<crate::Result<C>> {
        let result = self.history.redo(target)?;
        if result.is_ok() {
            self.entries.push(CheckpointEntry::Redo);
        }
        Some(result)
    }

    /// Cancels the changes and consumes the checkpoint.
    ///
    /// Returns `None` if a change can no longer be rolled back, which happens
    /// when a command without an opposite cleared the history.
    ///
    /// # Errors
    /// If an error occurs when cancelling the changes, the error is returned
    /// and the remaining changes are not cancelled.
    pub fn cancel(self, target: &mut C::Target) -> Option<crate::Result<C>> {
        let could_undo = self.history.can_undo();
        let could_redo = self.history.can_redo();
        let was_saved = self.history.is_saved();
        let slot = self.history.slot.take();
        let mut result = Some(Ok(()));
        for entry in self.entries.into_iter().rev() {
            let step = match entry {
                CheckpointEntry::Execute {
                    saved,
                    redo,
                    evicted,
                } => match self.history.undo(target) {
                    Some(Ok(())) => {
                        self.history.redo = redo;
                        if let Some(evicted) = evicted {
                            self.history.undo.push_front(evicted);
                        }
                        self.history.saved = saved;
                        Some(Ok(()))
                    }
                    o => o,
                },
                CheckpointEntry::Undo => self.history.redo(target),
                CheckpointEntry::Redo => self.history.undo(target),
            };
            if !matches!(step, Some(Ok(()))) {
                result = step;
                break;
            }
        }
        self.history.slot = slot;
        self.history
            .emit_changes(could_undo, could_redo, was_saved);
        result
    }
}

impl<'a, C, S> From<&'a mut History<C, S>> for Checkpoint<'a, C, S> {
    fn from(history: &'a mut History<C, S>) -> Self {
        Checkpoint {
            history,
            entries: Vec::new(),
        }
    }
}
