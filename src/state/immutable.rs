//! Shared, never-mutated state snapshots.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::error::PathError;
use super::lens::Lens;

/// An immutable snapshot of a state value.
///
/// Cloning is a reference-count bump. Every write returns a new snapshot and
/// leaves `self` untouched; fields that are themselves `Immutable` are shared
/// between the old and new snapshot unless the write went through them.
pub struct Immutable<S>(Arc<S>);

impl<S> Immutable<S> {
    pub fn new(state: S) -> Self {
        Self(Arc::new(state))
    }

    /// True when both snapshots are the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn try_get<'a, A>(&'a self, path: &Lens<S, A>) -> Result<&'a A, PathError>
    where
        S: 'static,
        A: 'static,
    {
        path.get(&self.0).ok_or_else(|| PathError::Missing {
            path: path.path().clone(),
        })
    }

    /// Read the value at `path`.
    ///
    /// # Panics
    /// If the path does not exist. Use [`try_get`](Self::try_get) when a
    /// missing path is a legitimate outcome.
    #[track_caller]
    pub fn get<'a, A>(&'a self, path: &Lens<S, A>) -> &'a A
    where
        S: 'static,
        A: 'static,
    {
        match self.try_get(path) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_set<A>(&self, path: &Lens<S, A>, value: A) -> Result<Self, PathError>
    where
        S: 'static,
        A: 'static,
    {
        path.set(&self.0, value)
            .map(Self::new)
            .ok_or_else(|| PathError::Missing {
                path: path.path().clone(),
            })
    }

    /// Replace the value at `path`.
    ///
    /// # Panics
    /// If the path does not exist.
    #[track_caller]
    pub fn set<A>(&self, path: &Lens<S, A>, value: A) -> Self
    where
        S: 'static,
        A: 'static,
    {
        match self.try_set(path, value) {
            Ok(next) => next,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_update<A, F>(&self, path: &Lens<S, A>, f: F) -> Result<Self, PathError>
    where
        S: 'static,
        A: Clone + 'static,
        F: FnOnce(A) -> A,
    {
        let current = self.try_get(path)?.clone();
        self.try_set(path, f(current))
    }

    /// Replace the value at `path` with `f(old)`.
    ///
    /// # Panics
    /// If the path does not exist.
    #[track_caller]
    pub fn update<A, F>(&self, path: &Lens<S, A>, f: F) -> Self
    where
        S: 'static,
        A: Clone + 'static,
        F: FnOnce(A) -> A,
    {
        match self.try_update(path, f) {
            Ok(next) => next,
            Err(err) => panic!("{}", err),
        }
    }

    /// Produce a new snapshot by editing a shallow copy.
    pub fn with<F>(&self, f: F) -> Self
    where
        S: Clone,
        F: FnOnce(&mut S),
    {
        let mut next = S::clone(&self.0);
        f(&mut next);
        Self::new(next)
    }
}

impl<S> Clone for Immutable<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S> Deref for Immutable<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S> From<S> for Immutable<S> {
    fn from(state: S) -> Self {
        Self::new(state)
    }
}

impl<S: Default> Default for Immutable<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: PartialEq> PartialEq for Immutable<S> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<S: Eq> Eq for Immutable<S> {}

impl<S: fmt::Debug> fmt::Debug for Immutable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<S: Serialize> Serialize for Immutable<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        self.0.serialize(serializer)
    }
}
