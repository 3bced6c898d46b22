use crate::History;
use core::marker::PhantomData;
use core::num::NonZeroUsize;
use std::collections::VecDeque;

/// Builder for a [`History`].
///
/// # Examples
/// ```
/// # use opposite::{Edit, History, Signal};
/// # let mut target = String::new();
/// let mut history = History::builder()
///     .limit(100)
///     .capacity(100)
///     .connect(|s: Signal| { dbg!(s); })
///     .build();
/// # history.execute(&mut target, Edit::AppendAtEnd('a')).unwrap();
/// ```
#[derive(Debug)]
pub struct Builder<C, S = ()> {
    capacity: usize,
    limit: NonZeroUsize,
    saved: bool,
    slot: Option<S>,
    pd: PhantomData<C>,
}

impl<C, S> Builder<C, S> {
    /// Sets the capacity of the undo stack.
    pub fn capacity(mut self, capacity: usize) -> Builder<C, S> {
        self.capacity = capacity;
        self
    }

    /// Sets the `limit` of the undo stack.
    ///
    /// # Panics
    /// Panics if `limit` is `0`.
    pub fn limit(mut self, limit: usize) -> Builder<C, S> {
        self.limit = NonZeroUsize::new(limit).expect("limit can not be `0`");
        self
    }

    /// Sets if the target is initially in a saved state.
    /// By default the target is in a saved state.
    pub fn saved(mut self, saved: bool) -> Builder<C, S> {
        self.saved = saved;
        self
    }

    /// Connects the slot.
    pub fn connect<T>(self, slot: T) -> Builder<C, T> {
        Builder {
            capacity: self.capacity,
            limit: self.limit,
            saved: self.saved,
            slot: Some(slot),
            pd: PhantomData,
        }
    }

    /// Builds the history.
    pub fn build(self) -> History<C, S> {
        History {
            undo: VecDeque::with_capacity(self.capacity),
            redo: Vec::new(),
            limit: self.limit,
            saved: self.saved.then_some(0),
            slot: self.slot,
        }
    }
}

impl<C, S> Default for Builder<C, S> {
    fn default() -> Self {
        Builder {
            capacity: 0,
            limit: NonZeroUsize::MAX,
            saved: true,
            slot: None,
            pd: PhantomData,
        }
    }
}
