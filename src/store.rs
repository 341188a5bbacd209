// SPDX-License-Identifier: MPL-2.0
//! Explicitly owned state container.
//!
//! Instead of an ambient process-wide store, state lives in a [`Store`]
//! value that is constructed once, owned by whichever component needs it,
//! and handed around by reference. The store serializes dispatches (it takes
//! `&mut self`), keeps a timestamped log of every dispatched action, and can
//! rebuild its state purely from that log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A pure state-transition function.
///
/// `None` is the uninitialized marker; the store calls the reducer with it
/// exactly once to obtain the initial state. A `Cow::Borrowed` return marks
/// the dispatch as a no-op and leaves the stored state untouched.
pub type ReducerFn<S, A> = for<'a> fn(Option<&'a S>, &A) -> Cow<'a, S>;

/// One entry of the dispatch log: the action plus when it was dispatched.
///
/// The timestamp is metadata for display; replay folds only the actions, so
/// a serialized log reapplies bit-for-bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord<A> {
    pub at: DateTime<Utc>,
    pub action: A,
}

/// Owner of one slice of application state.
///
/// The default value of `A` serves as the initialization action: the reducer
/// ignores the action when handed the uninitialized marker, so any value
/// works, and the no-op default keeps `Store::new` free of magic sentinels.
pub struct Store<S: Clone, A> {
    reducer: ReducerFn<S, A>,
    state: S,
    log: Vec<DispatchRecord<A>>,
    subscribers: Vec<Box<dyn FnMut(&S)>>,
}

impl<S: fmt::Debug + Clone, A: fmt::Debug> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("log_len", &self.log.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S, A> Store<S, A>
where
    S: Clone,
    A: Clone + Default,
{
    /// Creates a store whose initial state is the reducer's answer to the
    /// uninitialized marker.
    pub fn new(reducer: ReducerFn<S, A>) -> Self {
        let state = reducer(None, &A::default()).into_owned();
        Self {
            reducer,
            state,
            log: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Reconstructs a store by replaying a previously recorded log.
    pub fn from_log(reducer: ReducerFn<S, A>, log: Vec<DispatchRecord<A>>) -> Self {
        let mut store = Self::new(reducer);
        for record in &log {
            let next = match (store.reducer)(Some(&store.state), &record.action) {
                Cow::Borrowed(_) => None,
                Cow::Owned(state) => Some(state),
            };
            if let Some(state) = next {
                store.state = state;
            }
        }
        store.log = log;
        store
    }

    /// Applies `action` through the reducer and records it in the log.
    ///
    /// Returns whether the state changed. Subscribers are notified only on
    /// change; no-op dispatches are still logged so the history stays a
    /// faithful record of everything that was dispatched.
    pub fn dispatch(&mut self, action: A) -> bool {
        let next = match (self.reducer)(Some(&self.state), &action) {
            Cow::Borrowed(_) => None,
            Cow::Owned(state) => Some(state),
        };

        let changed = next.is_some();
        if let Some(state) = next {
            self.state = state;
        }

        self.log.push(DispatchRecord {
            at: Utc::now(),
            action,
        });

        if changed {
            for subscriber in &mut self.subscribers {
                subscriber(&self.state);
            }
        }

        changed
    }

    /// Registers a callback invoked with the latest state after each
    /// dispatch that changed it.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&S) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Current state of the slice.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Every dispatched action, in order, with dispatch timestamps.
    pub fn log(&self) -> &[DispatchRecord<A>] {
        &self.log
    }

    /// Recomputes the state from scratch by folding the log through the
    /// reducer. For a pure reducer this always equals [`Self::state`]; the
    /// gestures screen surfaces that check to the user.
    pub fn replay(&self) -> S {
        let mut state = (self.reducer)(None, &A::default()).into_owned();
        for record in &self.log {
            state = (self.reducer)(Some(&state), &record.action).into_owned();
        }
        state
    }
}
