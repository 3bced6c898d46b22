//! Reversible edits of a text buffer.

use crate::Command;
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error returned when an [`Edit`] can not be applied to the buffer.
///
/// The buffer is never modified when an error is returned.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EditError {
    /// The index does not point at a character in the buffer.
    #[error("index {index} is out of bounds for a buffer of {len} characters")]
    IndexOutOfBounds {
        /// The requested character index.
        index: usize,
        /// The number of characters in the buffer.
        len: usize,
    },
    /// There is no character to remove.
    #[error("the buffer is empty")]
    Empty,
}

/// An edit of a [`String`] buffer.
///
/// Indices are zero-based and count characters, not bytes.
///
/// The removing variants and [`ToTitleCase`](Edit::ToTitleCase) remember what
/// they removed or replaced when they are applied, so their
/// [`opposite`](Command::opposite) is only available after that.
///
/// # Examples
/// ```
/// use opposite::{Command, Edit};
///
/// let mut buffer = String::from("hello world");
/// let mut edit = Edit::to_title_case();
/// assert_eq!(edit.opposite(), None);
///
/// edit.apply(&mut buffer).unwrap();
/// assert_eq!(buffer, "Hello World");
///
/// let mut undo = edit.opposite().unwrap();
/// undo.apply(&mut buffer).unwrap();
/// assert_eq!(buffer, "hello world");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Edit {
    /// Appends the character to the end of the buffer.
    AppendAtEnd(char),
    /// Prepends the character to the start of the buffer.
    AppendAtStart(char),
    /// Removes the last character.
    ///
    /// The payload is the removed character. It is overwritten on every
    /// apply, so build this with [`Edit::remove_from_end`].
    RemoveFromEnd(Option<char>),
    /// Removes the first character.
    ///
    /// The payload is the removed character. It is overwritten on every
    /// apply, so build this with [`Edit::remove_from_start`].
    RemoveFromStart(Option<char>),
    /// Uppercases the character at the index.
    CapitalizeAt(usize),
    /// Lowercases the character at the index.
    LowercaseAt(usize),
    /// Uppercases the first letter of every space separated word and lowercases
    /// the rest.
    ///
    /// The payload is the buffer before the edit. It is overwritten on every
    /// apply, so build this with [`Edit::to_title_case`].
    ToTitleCase(Option<String>),
    /// Overwrites the buffer with the snapshot.
    RestoreSnapshot(String),
}

impl Edit {
    /// Returns an edit that removes the last character.
    pub const fn remove_from_end() -> Edit {
        Edit::RemoveFromEnd(None)
    }

    /// Returns an edit that removes the first character.
    pub const fn remove_from_start() -> Edit {
        Edit::RemoveFromStart(None)
    }

    /// Returns an edit that converts the buffer to title case.
    pub const fn to_title_case() -> Edit {
        Edit::ToTitleCase(None)
    }
}

impl Command for Edit {
    type Target = String;
    type Error = EditError;

    fn apply(&mut self, buffer: &mut String) -> crate::Result<Edit> {
        match self {
            Edit::AppendAtEnd(ch) => buffer.push(*ch),
            Edit::AppendAtStart(ch) => buffer.insert(0, *ch),
            Edit::RemoveFromEnd(removed) => {
                *removed = Some(buffer.pop().ok_or(EditError::Empty)?);
            }
            Edit::RemoveFromStart(removed) => {
                let first = buffer.chars().next().ok_or(EditError::Empty)?;
                buffer.replace_range(..first.len_utf8(), "");
                *removed = Some(first);
            }
            Edit::CapitalizeAt(index) => {
                map_char_at(buffer, *index, |ch, s| s.extend(ch.to_uppercase()))?
            }
            Edit::LowercaseAt(index) => {
                map_char_at(buffer, *index, |ch, s| s.extend(ch.to_lowercase()))?
            }
            Edit::ToTitleCase(previous) => {
                let title = title_case(buffer);
                *previous = Some(core::mem::replace(buffer, title));
            }
            Edit::RestoreSnapshot(snapshot) => buffer.clone_from(snapshot),
        }
        Ok(())
    }

    fn opposite(&self) -> Option<Edit> {
        match self {
            Edit::AppendAtEnd(_) => Some(Edit::remove_from_end()),
            Edit::AppendAtStart(_) => Some(Edit::remove_from_start()),
            Edit::RemoveFromEnd(removed) => removed.map(Edit::AppendAtEnd),
            Edit::RemoveFromStart(removed) => removed.map(Edit::AppendAtStart),
            Edit::CapitalizeAt(index) => Some(Edit::LowercaseAt(*index)),
            Edit::LowercaseAt(index) => Some(Edit::CapitalizeAt(*index)),
            Edit::ToTitleCase(previous) => previous.clone().map(Edit::RestoreSnapshot),
            // Only the inverse of a title casing if it was created by one.
            Edit::RestoreSnapshot(_) => Some(Edit::to_title_case()),
        }
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Edit::AppendAtEnd(ch) => write!(f, "Append {ch:?} at end"),
            Edit::AppendAtStart(ch) => write!(f, "Append {ch:?} at start"),
            Edit::RemoveFromEnd(Some(ch)) => write!(f, "Remove {ch:?} from end"),
            Edit::RemoveFromEnd(None) => f.write_str("Remove from end"),
            Edit::RemoveFromStart(Some(ch)) => write!(f, "Remove {ch:?} from start"),
            Edit::RemoveFromStart(None) => f.write_str("Remove from start"),
            Edit::CapitalizeAt(index) => write!(f, "Capitalize at {index}"),
            Edit::LowercaseAt(index) => write!(f, "Lowercase at {index}"),
            Edit::ToTitleCase(_) => f.write_str("Title case"),
            Edit::RestoreSnapshot(snapshot) => write!(f, "Restore {snapshot:?}"),
        }
    }
}

/// Replaces the character at `index` with what `f` writes in its place.
fn map_char_at(
    buffer: &mut String,
    index: usize,
    f: impl FnOnce(char, &mut String),
) -> Result<(), EditError> {
    let (at, ch) = buffer
        .char_indices()
        .nth(index)
        .ok_or_else(|| EditError::IndexOutOfBounds {
            index,
            len: buffer.chars().count(),
        })?;
    let mut mapped = String::new();
    f(ch, &mut mapped);
    buffer.replace_range(at..at + ch.len_utf8(), &mapped);
    Ok(())
}

fn title_case(s: &str) -> String {
    let mut title = String::with_capacity(s.len());
    let mut capitalize = true;
    for ch in s.chars() {
        if capitalize {
            title.extend(ch.to_uppercase());
            capitalize = false;
        } else {
            title.extend(ch.to_lowercase());
        }
        if ch == ' ' {
            capitalize = true;
        }
    }
    title
}
