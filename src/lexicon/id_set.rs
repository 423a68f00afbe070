//! `IdSetLexicon`: interned sets of non-negative integer ids.
//!
//! Set ids are encoded so that the common cases need no storage at all:
//! - the empty set is [`EMPTY_SET_ID`];
//! - a singleton `{x}` is represented by `x` itself;
//! - every larger set is stored in a [`SequenceLexicon`] and represented by
//!   the bitwise complement of its sequence id (always negative).

use std::iter::{Chain, Copied};
use std::option;
use std::slice;

use itertools::Itertools;

use super::sequence::SequenceLexicon;

/// Set id of the empty set.
pub const EMPTY_SET_ID: i32 = i32::MIN;

/// Maps integer handles to sorted, duplicate-free sets of ids.
#[derive(Clone, Debug, Default)]
pub struct IdSetLexicon {
    id_sets: SequenceLexicon,
    tmp: Vec<i32>,
}

impl IdSetLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns the set of ids produced by `ids` (order and duplicates are
    /// irrelevant) and returns its set id.
    ///
    /// All ids must be non-negative.
    pub fn add<I>(&mut self, ids: I) -> i32
    where
        I: IntoIterator<Item = i32>,
    {
        self.tmp.clear();
        self.tmp.extend(ids.into_iter().sorted_unstable().dedup());
        match self.tmp.as_slice() {
            [] => EMPTY_SET_ID,
            &[id] => {
                debug_assert!(id >= 0, "ids must be non-negative");
                id
            }
            many => {
                debug_assert!(many[0] >= 0, "ids must be non-negative");
                !(self.id_sets.add(many) as i32)
            }
        }
    }

    /// Returns the set id of `{id}` without touching the lexicon storage.
    #[inline]
    pub fn add_singleton(id: i32) -> i32 {
        debug_assert!(id >= 0, "ids must be non-negative");
        id
    }

    /// Returns the set id of the empty set.
    #[inline]
    pub const fn empty_set_id() -> i32 {
        EMPTY_SET_ID
    }

    /// Returns the set of ids represented by `set_id`.
    pub fn id_set(&self, set_id: i32) -> IdSet<'_> {
        if set_id >= 0 {
            IdSet::Single(set_id)
        } else if set_id == EMPTY_SET_ID {
            IdSet::Empty
        } else {
            IdSet::Many(self.id_sets.sequence(!set_id as u32))
        }
    }

    /// Removes every stored set; only singleton and empty ids remain valid.
    pub fn clear(&mut self) {
        self.id_sets.clear();
    }
}

/// A borrowed view of one interned id set, iterated in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdSet<'a> {
    Empty,
    Single(i32),
    Many(&'a [i32]),
}

/// Iterator over the ids of an [`IdSet`].
pub type IdSetIter<'a> = Chain<option::IntoIter<i32>, Copied<slice::Iter<'a, i32>>>;

impl<'a> IdSet<'a> {
    pub fn len(&self) -> usize {
        match self {
            IdSet::Empty => 0,
            IdSet::Single(_) => 1,
            IdSet::Many(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest id in the set.
    pub fn first(&self) -> Option<i32> {
        match self {
            IdSet::Empty => None,
            IdSet::Single(id) => Some(*id),
            IdSet::Many(ids) => ids.first().copied(),
        }
    }

    pub fn contains(&self, id: i32) -> bool {
        match self {
            IdSet::Empty => false,
            IdSet::Single(x) => *x == id,
            IdSet::Many(ids) => ids.binary_search(&id).is_ok(),
        }
    }

    pub fn iter(&self) -> IdSetIter<'a> {
        let (single, many): (Option<i32>, &'a [i32]) = match *self {
            IdSet::Empty => (None, &[]),
            IdSet::Single(id) => (Some(id), &[]),
            IdSet::Many(ids) => (None, ids),
        };
        single.into_iter().chain(many.iter().copied())
    }

    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for IdSet<'a> {
    type Item = i32;
    type IntoIter = IdSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
