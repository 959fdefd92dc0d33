//! Typed paths into nested state.
//!
//! A [`Lens`] addresses one location inside a state value. It knows how to
//! read that location and how to produce a copy of the outer value with the
//! location replaced. The copy is shallow: anything not on the path is cloned
//! as-is, so fields held as [`Immutable`] keep pointing at the same
//! allocation.

use std::fmt;
use std::sync::Arc;

use super::Immutable;

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Field(&'static str),
    Index(usize),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Field(name) => write!(f, "{}", name),
            Key::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// The ordered key sequence of a lens, used in errors and logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<Key>);

impl KeyPath {
    pub fn new(keys: Vec<Key>) -> Self {
        Self(keys)
    }

    fn join(&self, other: &KeyPath) -> KeyPath {
        let mut keys = Vec::with_capacity(self.0.len() + other.0.len());
        keys.extend_from_slice(&self.0);
        keys.extend_from_slice(&other.0);
        KeyPath(keys)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, key) in self.0.iter().enumerate() {
            match key {
                Key::Field(name) if i > 0 => write!(f, ".{}", name)?,
                other => write!(f, "{}", other)?,
            }
        }
        Ok(())
    }
}

type Getter<S, A> = dyn for<'a> Fn(&'a S) -> Option<&'a A> + Send + Sync;
type Setter<S, A> = dyn Fn(&S, A) -> Option<S> + Send + Sync;

// Pins the higher-ranked signature so composed closures borrow correctly.
fn getter<S, A, F>(f: F) -> Arc<Getter<S, A>>
where
    F: for<'a> Fn(&'a S) -> Option<&'a A> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn setter<S, A, F>(f: F) -> Arc<Setter<S, A>>
where
    F: Fn(&S, A) -> Option<S> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A typed, composable path from `S` to `A`.
///
/// Both directions return `None` when the path does not exist in the given
/// value, e.g. an index past the end of a list or a variant that is not
/// currently active.
pub struct Lens<S, A> {
    path: KeyPath,
    get: Arc<Getter<S, A>>,
    set: Arc<Setter<S, A>>,
}

impl<S, A> Clone for Lens<S, A> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
        }
    }
}

impl<S, A> fmt::Debug for Lens<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Lens").field(&self.path.to_string()).finish()
    }
}

impl<S: 'static, A: 'static> Lens<S, A> {
    /// Build a lens from raw accessors. The key is only used for diagnostics.
    pub fn new<G, U>(key: Key, get: G, set: U) -> Self
    where
        G: for<'a> Fn(&'a S) -> Option<&'a A> + Send + Sync + 'static,
        U: Fn(&S, A) -> Option<S> + Send + Sync + 'static,
    {
        Self {
            path: KeyPath(vec![key]),
            get: getter(get),
            set: setter(set),
        }
    }

    /// A record field that always exists.
    ///
    /// Prefer the [`lens!`](crate::lens) macro, which fills in all three
    /// arguments from the field name.
    pub fn field(name: &'static str, get: fn(&S) -> &A, set: fn(&mut S, A)) -> Self
    where
        S: Clone,
    {
        Self::new(
            Key::Field(name),
            move |s| Some(get(s)),
            move |s, value| {
                let mut next = s.clone();
                set(&mut next, value);
                Some(next)
            },
        )
    }

    /// A location that may be absent, such as the payload of one enum variant.
    ///
    /// `set` returns `false` when the location does not exist in the value.
    pub fn optional(
        name: &'static str,
        get: fn(&S) -> Option<&A>,
        set: fn(&mut S, A) -> bool,
    ) -> Self
    where
        S: Clone,
    {
        Self::new(Key::Field(name), get, move |s, value| {
            let mut next = s.clone();
            set(&mut next, value).then_some(next)
        })
    }

    /// Compose with a lens into the focused value.
    pub fn then<B: 'static>(self, next: Lens<A, B>) -> Lens<S, B> {
        let path = self.path.join(&next.path);
        let outer_get = Arc::clone(&self.get);
        let outer_set = self.set;
        let inner_get = Arc::clone(&next.get);
        let inner_set = next.set;
        let read_outer = self.get;

        Lens {
            path,
            get: getter(move |s: &S| outer_get(s).and_then(|a| inner_get(a))),
            set: setter(move |s: &S, b: B| {
                let a = read_outer(s)?;
                let a = inner_set(a, b)?;
                outer_set(s, a)
            }),
        }
    }

    pub fn get<'a>(&self, s: &'a S) -> Option<&'a A> {
        (self.get)(s)
    }

    pub fn set(&self, s: &S, value: A) -> Option<S> {
        (self.set)(s, value)
    }

    pub fn path(&self) -> &KeyPath {
        &self.path
    }
}

impl<A: Clone + 'static> Lens<Vec<A>, A> {
    /// Element `index` of a list.
    pub fn index(index: usize) -> Self {
        Self::new(
            Key::Index(index),
            move |list: &Vec<A>| list.get(index),
            move |list: &Vec<A>, value| {
                if index >= list.len() {
                    return None;
                }
                let mut next = list.clone();
                next[index] = value;
                Some(next)
            },
        )
    }
}

impl<T: 'static> Lens<Immutable<T>, T> {
    /// Step through a shared snapshot. Adds no key to the path.
    pub fn inner() -> Self {
        Self {
            path: KeyPath::default(),
            get: getter(|shared: &Immutable<T>| Some(&**shared)),
            set: setter(|_: &Immutable<T>, value: T| Some(Immutable::new(value))),
        }
    }
}

/// Build a [`Lens`] for a named field of a `Clone` record.
///
/// ```ignore
/// let form = lens!(ProfileState, form);
/// ```
#[macro_export]
macro_rules! lens {
    ($ty:ty, $field:ident) => {
        $crate::state::Lens::<$ty, _>::field(
            stringify!($field),
            |s| &s.$field,
            |s, value| s.$field = value,
        )
    };
}
