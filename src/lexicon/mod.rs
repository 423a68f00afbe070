//! Shared, immutable integer-set storage.
//!
//! Output edges record which input edges (and which labels) contributed to
//! them. Rather than storing a container per edge, each distinct set is
//! interned once and referred to by an integer handle, so edges formed the
//! same way share storage and handles copy like plain integers.

pub mod id_set;
pub mod sequence;

pub use id_set::{EMPTY_SET_ID, IdSet, IdSetIter, IdSetLexicon};
pub use sequence::SequenceLexicon;
