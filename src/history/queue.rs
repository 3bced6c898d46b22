use super::Checkpoint;
use crate::{Command, History, Slot};

#[derive(Debug)]
enum QueueEntry<C> {
    Execute(C),
    Undo,
    Redo,
}

/// Wraps a history and gives it batch queue functionality.
///
/// # Examples
/// ```
/// # use opposite::{Edit, History};
/// let mut string = String::new();
/// let mut history = History::new();
/// let mut queue = history.queue();
///
/// queue.execute(Edit::AppendAtEnd('a'));
/// queue.execute(Edit::AppendAtEnd('b'));
/// queue.execute(Edit::AppendAtEnd('c'));
/// assert_eq!(string, "");
///
/// queue.commit(&mut string).unwrap().unwrap();
/// assert_eq!(string, "abc");
/// ```
#[derive(Debug)]
pub struct Queue<'a, C, S> {
    history: &'a mut History<C, S>,
    entries: Vec<QueueEntry<C>>,
}

impl<C, S> Queue<'_, C, S> {
    /// Queues an `execute` operation.
    pub fn execute(&mut self, command: C) {
        self.entries.push(QueueEntry::Execute(command));
    }

    /// Queues an `undo` operation.
    pub fn undo(&mut self) {
        self.entries.push(QueueEntry::Undo);
    }

    /// Queues a `redo` operation.
    pub fn redo(&mut self) {
        self.entries.push(QueueEntry::Redo);
    }

    /// Cancels the queued operations.
    pub fn cancel(self) {}

    /// Returns a queue.
    pub fn queue(&mut self) -> Queue<C, S> {
        self.history.queue()
    }

    /// Returns a checkpoint.
    pub fn checkpoint(&mut self) -> Checkpoint<C, S> {
        self.history.checkpoint()
    }
}

impl<C: Command, S: Slot> Queue<'_, C, S> {
    /// Performs the queued operations in order.
    ///
    /// Returns `None` if an undo or redo was queued while there was nothing
    /// to undo or redo.
    ///
    /// # Errors
    /// If an error occurs, it stops performing the operations and returns the error.
    pub fn commit(self, target: &mut C::Target) -> Option<crate::Result<C>> {
        for entry in self.entries {
            let result = match entry {
                QueueEntry::Execute(command) => Some(self.history.execute(target, command)),
                QueueEntry::Undo => self.history.undo(target),
                QueueEntry::Redo => self.history.redo(target),
            };
            match result {
                Some(Ok(())) => (),
                o @ Some(Err(_)) | o @ None => return o,
            }
        }
        Some(Ok(()))
    }
}

impl<'a, C, S> From<&'a mut History<C, S>> for Queue<'a, C, S> {
    fn from(history: &'a mut History<C, S>) -> Self {
        Queue {
            history,
            entries: Vec::new(),
        }
    }
}
