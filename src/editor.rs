use crate::{Command, History, Slot};
use core::fmt;

/// A target bound to its history.
///
/// The editor owns the target, so executing, undoing and redoing through
/// the editor are the only ways to change it and the history always matches
/// the target. Several editors with their own targets and histories can live
/// side by side.
///
/// # Examples
/// ```
/// # use opposite::{Edit, Editor};
/// let mut editor = Editor::new(String::from("hello world"));
/// editor.execute(Edit::to_title_case()).unwrap();
/// assert_eq!(editor.target(), "Hello World");
/// editor.undo().unwrap().unwrap();
/// assert_eq!(editor.target(), "hello world");
/// editor.redo().unwrap().unwrap();
/// assert_eq!(editor.target(), "Hello World");
/// ```
pub struct Editor<C: Command, S = ()> {
    target: C::Target,
    history: History<C, S>,
}

impl<C: Command> Editor<C> {
    /// Returns a new editor with an empty history.
    pub fn new(target: C::Target) -> Editor<C> {
        Editor::with_history(target, History::new())
    }
}

impl<C: Command, S> Editor<C, S> {
    /// Returns a new editor using the provided history.
    ///
    /// The history must be empty or describe how `target` came to be.
    pub fn with_history(target: C::Target, history: History<C, S>) -> Editor<C, S> {
        Editor { target, history }
    }

    /// Returns a reference to the target.
    pub fn target(&self) -> &C::Target {
        &self.target
    }

    /// Returns a reference to the history.
    pub fn history(&self) -> &History<C, S> {
        &self.history
    }

    /// Consumes the editor, returning the target.
    pub fn into_target(self) -> C::Target {
        self.target
    }

    /// Consumes the editor, returning the target and the history.
    pub fn into_parts(self) -> (C::Target, History<C, S>) {
        (self.target, self.history)
    }
}

impl<C: Command, S: Slot> Editor<C, S> {
    /// Executes the command on the target, see [`History::execute`].
    pub fn execute(&mut self, command: C) -> crate::Result<C> {
        self.history.execute(&mut self.target, command)
    }

    /// Undoes the last change, see [`History::undo`].
    pub fn undo(&mut self) -> Option<crate::Result<C>> {
        self.history.undo(&mut self.target)
    }

    /// Redoes the last undone change, see [`History::redo`].
    pub fn redo(&mut self) -> Option<crate::Result<C>> {
        self.history.redo(&mut self.target)
    }

    /// Moves to the position `head`, see [`History::go_to`].
    pub fn go_to(&mut self, head: usize) -> Option<crate::Result<C>> {
        self.history.go_to(&mut self.target, head)
    }

    /// Reverts the changes since the saved state, see [`History::revert`].
    pub fn revert(&mut self) -> Option<crate::Result<C>> {
        self.history.revert(&mut self.target)
    }

    /// Marks the target as currently being in a saved or unsaved state.
    pub fn set_saved(&mut self, saved: bool) {
        self.history.set_saved(saved);
    }
}

impl<C: Command> Default for Editor<C>
where
    C::Target: Default,
{
    fn default() -> Self {
        Editor::new(Default::default())
    }
}

impl<C, S> fmt::Debug for Editor<C, S>
where
    C: Command + fmt::Debug,
    C::Target: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Editor")
            .field("target", &self.target)
            .field("history", &self.history)
            .finish()
    }
}
