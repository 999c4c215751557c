//! Ordered element lists considered modulo even permutations.

use crate::{
  sign::{sort_count_swaps, Sign},
  Vertex,
};

use itertools::Itertools;

/// An ordered sequence of elements, equal to every sequence reachable
/// from it by an even number of transpositions and opposite to every
/// sequence an odd number away.
///
/// Equality and hashing go through the canonical key
/// (sorted elements, parity). A sequence with repeated elements has
/// undefined parity and compares by its element multiset alone.
#[derive(Debug, Default, Clone)]
pub struct PermList<V: Vertex> {
  elements: Vec<V>,
}

impl<V: Vertex> PermList<V> {
  pub fn new(elements: Vec<V>) -> Self {
    Self { elements }
  }
  pub fn empty() -> Self {
    Self::new(Vec::new())
  }

  pub fn elements(&self) -> &[V] {
    &self.elements
  }
  pub fn into_elements(self) -> Vec<V> {
    self.elements
  }
  pub fn iter(&self) -> std::slice::Iter<'_, V> {
    self.elements.iter()
  }
  pub fn len(&self) -> usize {
    self.elements.len()
  }
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }
  pub fn is_singleton(&self) -> bool {
    self.elements.len() == 1
  }
  pub fn contains(&self, element: &V) -> bool {
    self.elements.contains(element)
  }

  pub fn sorted_elements(&self) -> Vec<V> {
    let mut sorted = self.elements.clone();
    sorted.sort();
    sorted
  }

  fn has_duplicates(&self) -> bool {
    let sorted = self.sorted_elements();
    sorted.windows(2).any(|w| w[0] == w[1])
  }

  /// Parity relative to the sorted sequence of the same elements.
  ///
  /// `None` is the degenerate "no defined orientation": the empty
  /// sequence or a sequence with repeated elements. A singleton is
  /// `Sign::Pos`.
  pub fn parity(&self) -> Option<Sign> {
    if self.is_empty() || self.has_duplicates() {
      return None;
    }
    let mut copy = self.elements.clone();
    Some(Sign::from_parity(sort_count_swaps(&mut copy)))
  }

  /// Parity of the permutation taking `other`'s order into `self`'s.
  ///
  /// Degenerate (`None`) whenever either sequence has repeats or the
  /// two element sets differ.
  pub fn relative_parity(&self, other: &Self) -> Option<Sign> {
    if self.is_empty() || other.is_empty() {
      return None;
    }
    if self.has_duplicates() || other.has_duplicates() {
      return None;
    }
    if self.sorted_elements() != other.sorted_elements() {
      return None;
    }

    // positions of other's elements within self
    let mut positions: Vec<usize> = other
      .iter()
      .map(|e| self.iter().position(|s| s == e).unwrap())
      .collect();
    Some(Sign::from_parity(sort_count_swaps(&mut positions)))
  }

  /// Elements of `self` also in `other`, in `self`'s order.
  pub fn intersection(&self, other: &Self) -> Self {
    let elements = self
      .iter()
      .filter(|e| other.contains(e))
      .cloned()
      .collect();
    Self::new(elements)
  }

  /// Elements of `self` not in `other`, in `self`'s order.
  pub fn difference(&self, other: &Self) -> Self {
    let elements = self
      .iter()
      .filter(|e| !other.contains(e))
      .cloned()
      .collect();
    Self::new(elements)
  }

  /// `self`'s elements followed by `other`'s elements not in `self`.
  pub fn union(&self, other: &Self) -> Self {
    let mut elements = self.elements.clone();
    elements.extend(other.iter().filter(|e| !self.contains(e)).cloned());
    Self::new(elements)
  }

  pub fn is_subset(&self, other: &Self) -> bool {
    self.iter().all(|e| other.contains(e))
  }
  pub fn is_superset(&self, other: &Self) -> bool {
    other.is_subset(self)
  }

  /// Swaps the first two elements, flipping parity.
  /// Identity on sequences shorter than two elements.
  pub fn negated(&self) -> Self {
    if self.len() < 2 {
      return self.clone();
    }
    let mut elements = self.elements.clone();
    elements.swap(0, 1);
    Self::new(elements)
  }

  /// All `k`-element subsequences, each in `self`'s relative order.
  pub fn combinations(&self, k: usize) -> impl Iterator<Item = PermList<V>> + '_ {
    self
      .elements
      .iter()
      .cloned()
      .combinations(k)
      .map(PermList::new)
  }
}

impl<V: Vertex> PartialEq for PermList<V> {
  fn eq(&self, other: &Self) -> bool {
    self.parity() == other.parity() && self.sorted_elements() == other.sorted_elements()
  }
}
impl<V: Vertex> Eq for PermList<V> {}

impl<V: Vertex> std::hash::Hash for PermList<V> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.parity().hash(state);
    self.sorted_elements().hash(state);
  }
}

impl<V: Vertex> std::ops::Neg for PermList<V> {
  type Output = Self;
  fn neg(self) -> Self::Output {
    self.negated()
  }
}

impl<V: Vertex> From<Vec<V>> for PermList<V> {
  fn from(elements: Vec<V>) -> Self {
    Self::new(elements)
  }
}
impl<V: Vertex, const N: usize> From<[V; N]> for PermList<V> {
  fn from(elements: [V; N]) -> Self {
    Self::new(elements.to_vec())
  }
}
impl<V: Vertex> FromIterator<V> for PermList<V> {
  fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl<V: Vertex> std::fmt::Display for PermList<V> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, e) in self.iter().enumerate() {
      if i > 0 {
        write!(f, ",")?;
      }
      write!(f, "{e}")?;
    }
    write!(f, "]")
  }
}
