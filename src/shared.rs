use crate::{Command, Editor, Slot};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An [`Editor`] that can be shared between threads.
///
/// Every operation holds the lock for its whole duration, so an execute,
/// undo or redo is never interleaved with another one and the target always
/// matches the stacks.
///
/// # Examples
/// ```
/// # use opposite::{Edit, Shared};
/// # use std::thread;
/// let shared = Shared::new(String::from("ab"));
/// let handles: Vec<_> = ['x', 'y', 'z']
///     .into_iter()
///     .map(|ch| {
///         let shared = shared.clone();
///         thread::spawn(move || shared.execute(Edit::AppendAtStart(ch)).unwrap())
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(shared.snapshot().len(), 5);
/// ```
pub struct Shared<C: Command, S = ()>(Arc<Mutex<Editor<C, S>>>);

impl<C: Command> Shared<C> {
    /// Returns a new shared editor with an empty history.
    pub fn new(target: C::Target) -> Shared<C> {
        Shared::from(Editor::new(target))
    }
}

impl<C: Command, S> Shared<C, S> {
    /// Calls `f` with the locked editor.
    pub fn with<T>(&self, f: impl FnOnce(&Editor<C, S>) -> T) -> T {
        f(&self.lock())
    }

    /// Returns a copy of the current target.
    pub fn snapshot(&self) -> C::Target
    where
        C::Target: Clone,
    {
        self.lock().target().clone()
    }

    // A poisoned lock is still usable as long as `apply` validated before it mutated.
    fn lock(&self) -> MutexGuard<'_, Editor<C, S>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Command, S: Slot> Shared<C, S> {
    /// Executes the command on the target, see [`History::execute`](crate::History::execute).
    pub fn execute(&self, command: C) -> crate::Result<C> {
        self.lock().execute(command)
    }

    /// Undoes the last change, see [`History::undo`](crate::History::undo).
    pub fn undo(&self) -> Option<crate::Result<C>> {
        self.lock().undo()
    }

    /// Redoes the last undone change, see [`History::redo`](crate::History::redo).
    pub fn redo(&self) -> Option<crate::Result<C>> {
        self.lock().redo()
    }
}

impl<C: Command, S> Clone for Shared<C, S> {
    fn clone(&self) -> Self {
        Shared(Arc::clone(&self.0))
    }
}

impl<C: Command, S> From<Editor<C, S>> for Shared<C, S> {
    fn from(editor: Editor<C, S>) -> Self {
        Shared(Arc::new(Mutex::new(editor)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Edit, Shared};
    use std::thread;

    #[test]
    fn concurrent_edits_undo_cleanly() {
        let shared = Shared::new(String::from("hello"));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        let edit = if i % 2 == 0 {
                            Edit::AppendAtEnd('e')
                        } else {
                            Edit::AppendAtStart('s')
                        };
                        shared.execute(edit).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.snapshot().len(), 5 + 8 * 25);
        while let Some(result) = shared.undo() {
            result.unwrap();
        }
        assert_eq!(shared.snapshot(), "hello");
        assert_eq!(shared.with(|editor| editor.history().redo_len()), 8 * 25);
        shared.redo().unwrap().unwrap();
        assert_eq!(shared.snapshot().len(), 6);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let shared = Shared::new(String::from("ab"));
        let poisoner = shared.clone();
        let panicked = thread::spawn(move || poisoner.with(|_| panic!("reader panicked")))
            .join()
            .is_err();
        assert!(panicked);
        shared.execute(Edit::AppendAtEnd('c')).unwrap();
        assert_eq!(shared.snapshot(), "abc");
        shared.undo().unwrap().unwrap();
        assert_eq!(shared.snapshot(), "ab");
    }
}
