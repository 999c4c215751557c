//! Abstract simplicial complexes, oriented and unoriented.
//!
//! - Permutation classes of vertices (order modulo even permutations)
//! - Simplices with face/coface navigation and signed incidence
//! - Closure-preserving dimension-indexed complex container
//! - Sparse incidence-matrix assembly for downstream linear algebra

extern crate nalgebra as na;
extern crate nalgebra_sparse as nas;

pub mod complex;
pub mod io;
pub mod perm;
pub mod sign;
pub mod simplex;
pub mod sparse;

pub type Dim = usize;

/// Anything usable as a simplex vertex: orderable, hashable and
/// printable. Blanket-implemented; callers never implement it by hand.
pub trait Vertex: Clone + Ord + std::hash::Hash + std::fmt::Debug + std::fmt::Display {}
impl<V: Clone + Ord + std::hash::Hash + std::fmt::Debug + std::fmt::Display> Vertex for V {}
