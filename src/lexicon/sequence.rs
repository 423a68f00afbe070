//! Append-only arena of integer sequences, deduplicated on insertion.

use std::hash::BuildHasher;

use hashbrown::HashMap;

/// Interns sequences of `i32` and hands out dense `u32` ids.
///
/// Adding a sequence equal to one already present returns the existing id.
/// All sequences live in one flat buffer; `begins[id]..begins[id + 1]` is the
/// range of sequence `id`.
#[derive(Clone, Debug)]
pub struct SequenceLexicon {
    values: Vec<i32>,
    begins: Vec<usize>,
    /// Content hash -> ids of the sequences with that hash.
    by_hash: HashMap<u64, Vec<u32>>,
}

impl Default for SequenceLexicon {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            begins: vec![0],
            by_hash: HashMap::new(),
        }
    }
}

impl SequenceLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `seq` and returns its id; equal sequences share one id.
    pub fn add(&mut self, seq: &[i32]) -> u32 {
        let Self {
            values,
            begins,
            by_hash,
        } = self;
        let hash = by_hash.hasher().hash_one(seq);
        let bucket = by_hash.entry(hash).or_default();
        for &id in bucket.iter() {
            let id_usize = id as usize;
            if &values[begins[id_usize]..begins[id_usize + 1]] == seq {
                return id;
            }
        }
        let id = (begins.len() - 1) as u32;
        values.extend_from_slice(seq);
        begins.push(values.len());
        bucket.push(id);
        id
    }

    /// Returns the sequence with the given id.
    ///
    /// # Panics
    /// Panics if `id` was not returned by [`SequenceLexicon::add`].
    pub fn sequence(&self, id: u32) -> &[i32] {
        let id = id as usize;
        &self.values[self.begins[id]..self.begins[id + 1]]
    }

    /// Number of distinct sequences stored.
    pub fn len(&self) -> usize {
        self.begins.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every sequence; previously returned ids become invalid.
    pub fn clear(&mut self) {
        self.values.clear();
        self.begins.truncate(1);
        self.by_hash.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_sequences_share_an_id() {
        let mut lex = SequenceLexicon::new();
        let a = lex.add(&[1, 2, 3]);
        let b = lex.add(&[4, 5]);
        let c = lex.add(&[1, 2, 3]);
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(lex.len(), 2);
        assert_eq!(lex.sequence(b), &[4, 5]);
    }

    #[test]
    fn empty_sequence_is_storable() {
        let mut lex = SequenceLexicon::new();
        let e = lex.add(&[]);
        assert!(lex.sequence(e).is_empty());
        assert_eq!(lex.add(&[]), e);
    }

    #[test]
    fn clear_resets_ids() {
        let mut lex = SequenceLexicon::new();
        lex.add(&[9]);
        lex.clear();
        assert!(lex.is_empty());
        assert_eq!(lex.add(&[7, 8]), 0);
    }
}
