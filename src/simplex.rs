//! Abstract (non-embedded) simplices, oriented and unoriented.

use crate::{perm::PermList, sign::Sign, Dim, Vertex};

use num_integer::binomial;

/// Marker for the two simplex variants.
///
/// Orientation compatibility and the sign component of the canonical
/// key are the only behaviors the variants do not share.
pub trait Orientation:
  Default + Clone + Copy + PartialEq + Eq + std::hash::Hash + std::fmt::Debug
{
  const ORIENTED: bool;

  /// Normalizes a raw vertex collection for this variant.
  fn prepare<V: Vertex>(vertices: PermList<V>) -> PermList<V>;

  /// Sign component of the canonical key. Always `None` for the
  /// unoriented variant, so equality degenerates to set equality.
  fn canonical_sign<V: Vertex>(vertices: &PermList<V>) -> Option<Sign>;

  /// Orientation compatibility of two vertex collections: extend each
  /// by the other's missing vertices and compare relative parity.
  /// Defined for every pair, meaningful for incident ones.
  fn compatibility<V: Vertex>(a: &PermList<V>, b: &PermList<V>) -> i32;
}

/// Set semantics: vertex order is forgotten, coefficients are 0/1.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unoriented;

/// Permutation-class semantics: vertex order modulo even permutations,
/// coefficients are signed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Oriented;

impl Orientation for Unoriented {
  const ORIENTED: bool = false;

  fn prepare<V: Vertex>(vertices: PermList<V>) -> PermList<V> {
    // set semantics: drop repeats, keeping first occurrences
    let mut elements: Vec<V> = Vec::with_capacity(vertices.len());
    for v in vertices.into_elements() {
      if !elements.contains(&v) {
        elements.push(v);
      }
    }
    PermList::new(elements)
  }

  fn canonical_sign<V: Vertex>(_vertices: &PermList<V>) -> Option<Sign> {
    None
  }

  fn compatibility<V: Vertex>(_a: &PermList<V>, _b: &PermList<V>) -> i32 {
    1
  }
}

impl Orientation for Oriented {
  const ORIENTED: bool = true;

  fn prepare<V: Vertex>(vertices: PermList<V>) -> PermList<V> {
    vertices
  }

  fn canonical_sign<V: Vertex>(vertices: &PermList<V>) -> Option<Sign> {
    vertices.parity()
  }

  fn compatibility<V: Vertex>(a: &PermList<V>, b: &PermList<V>) -> i32 {
    let ext_a = a.union(b);
    let ext_b = b.union(a);
    ext_a
      .relative_parity(&ext_b)
      .map(Sign::as_i32)
      .unwrap_or(0)
  }
}

/// Canonical identity of a simplex: sorted vertices plus the parity
/// sign for the oriented variant. `Ord` on this key fixes the
/// deterministic ordering of stored simplices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimplexKey<V: Vertex> {
  vertices: Vec<V>,
  sign: Option<Sign>,
}

impl<V: Vertex> SimplexKey<V> {
  pub fn vertices(&self) -> &[V] {
    &self.vertices
  }
  pub fn sign(&self) -> Option<Sign> {
    self.sign
  }

  pub fn negated(&self) -> Self {
    Self {
      vertices: self.vertices.clone(),
      sign: self.sign.map(|s| -s),
    }
  }
}

/// An abstract simplex of dimension `nvertices - 1`.
///
/// The variant is fixed by the `O` marker; mixing variants in one
/// operation is a type error.
#[derive(Debug, Default, Clone)]
pub struct Simplex<O: Orientation, V: Vertex> {
  vertices: PermList<V>,
  variant: O,
}

pub type UnorientedSimplex<V> = Simplex<Unoriented, V>;
pub type OrientedSimplex<V> = Simplex<Oriented, V>;

impl<O: Orientation, V: Vertex> Simplex<O, V> {
  pub fn new(vertices: impl Into<PermList<V>>) -> Self {
    Self {
      vertices: O::prepare(vertices.into()),
      variant: O::default(),
    }
  }
  pub fn empty() -> Self {
    Self::new(PermList::empty())
  }

  pub fn vertices(&self) -> &PermList<V> {
    &self.vertices
  }
  pub fn nvertices(&self) -> usize {
    self.vertices.len()
  }
  pub fn contains(&self, vertex: &V) -> bool {
    self.vertices.contains(vertex)
  }

  /// `None` only for the empty simplex.
  pub fn dim(&self) -> Option<Dim> {
    (!self.is_empty()).then(|| self.nvertices() - 1)
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }
  pub fn is_point(&self) -> bool {
    self.dim() == Some(0)
  }
  pub fn is_line(&self) -> bool {
    self.dim() == Some(1)
  }
  pub fn is_surface(&self) -> bool {
    self.dim() == Some(2)
  }
  pub fn is_volume(&self) -> bool {
    self.dim() == Some(3)
  }

  pub fn key(&self) -> SimplexKey<V> {
    SimplexKey {
      vertices: self.vertices.sorted_elements(),
      sign: O::canonical_sign(&self.vertices),
    }
  }

  pub fn intersection(&self, other: &Self) -> Self {
    Self::new(self.vertices.intersection(&other.vertices))
  }
  pub fn difference(&self, other: &Self) -> Self {
    Self::new(self.vertices.difference(&other.vertices))
  }
  pub fn union(&self, other: &Self) -> Self {
    Self::new(self.vertices.union(&other.vertices))
  }

  /// The empty simplex is a face of every simplex.
  pub fn is_face(&self, other: &Self) -> bool {
    self.vertices.is_subset(&other.vertices)
  }
  pub fn is_coface(&self, other: &Self) -> bool {
    other.is_face(self)
  }

  /// A face exactly one dimension lower. The empty simplex is the
  /// unique facet of every 0-simplex.
  pub fn is_facet(&self, other: &Self) -> bool {
    match (self.dim(), other.dim()) {
      (None, Some(0)) => true,
      (Some(d), Some(od)) => d + 1 == od && self.is_face(other),
      _ => false,
    }
  }
  pub fn is_cofacet(&self, other: &Self) -> bool {
    other.is_facet(self)
  }

  pub fn is_incident(&self, other: &Self) -> bool {
    self.is_face(other) || self.is_coface(other)
  }
  pub fn is_comparable(&self, other: &Self) -> bool {
    self.is_incident(other)
  }
  pub fn is_attached(&self, other: &Self) -> bool {
    self.is_facet(other) || self.is_cofacet(other)
  }

  /// Nonempty vertex intersection; the empty simplex is adjacent to
  /// everything by convention.
  pub fn is_adjacent(&self, other: &Self) -> bool {
    self.is_empty() || other.is_empty() || !self.intersection(other).is_empty()
  }

  /// All distinct `face_dim`-faces, empty when `face_dim` exceeds the
  /// simplex dimension. Oriented faces keep the receiver's relative
  /// vertex order.
  pub fn d_faces(&self, face_dim: Dim) -> Vec<Self> {
    match self.dim() {
      Some(dim) if face_dim <= dim => self
        .vertices
        .combinations(face_dim + 1)
        .map(Self::new)
        .collect(),
      _ => Vec::new(),
    }
  }

  pub fn facets(&self) -> Vec<Self> {
    match self.dim() {
      None => Vec::new(),
      Some(0) => vec![Self::empty()],
      Some(dim) => self.d_faces(dim - 1),
    }
  }

  /// The full downward closure, the simplex itself included.
  /// Reference implementation; the complex container maintains closure
  /// through its dimension-indexed storage instead.
  pub fn faces(&self) -> Vec<Self> {
    let mut faces = vec![self.clone()];
    for facet in self.facets() {
      for face in facet.faces() {
        if !faces.contains(&face) {
          faces.push(face);
        }
      }
    }
    faces
  }

  /// Orientation compatibility with `other`; 0 when degenerate.
  pub fn compatibility(&self, other: &Self) -> i32 {
    O::compatibility(&self.vertices, &other.vertices)
  }

  /// Compatibility scoped to incident pairs, 0 otherwise.
  pub fn incidence_coeff(&self, other: &Self) -> i32 {
    if self.is_incident(other) {
      self.compatibility(other)
    } else {
      0
    }
  }

  /// Compatibility scoped to attached pairs, 0 otherwise.
  pub fn attaching_coeff(&self, other: &Self) -> i32 {
    if self.is_attached(other) {
      self.compatibility(other)
    } else {
      0
    }
  }

  /// Compatibility scoped to adjacent pairs, 0 otherwise.
  pub fn adjacency_coeff(&self, other: &Self) -> i32 {
    if self.is_adjacent(other) {
      self.compatibility(other)
    } else {
      0
    }
  }
}

impl<V: Vertex> OrientedSimplex<V> {
  /// Parity of the vertex order: +1/-1, or `None` when degenerate.
  pub fn orientation(&self) -> Option<Sign> {
    self.vertices().parity()
  }
}

/// Number of distinct `face_dim`-faces of a `dim`-simplex.
pub fn nfaces(dim: Dim, face_dim: Dim) -> usize {
  binomial(dim + 1, face_dim + 1)
}

impl<O: Orientation, V: Vertex> PartialEq for Simplex<O, V> {
  fn eq(&self, other: &Self) -> bool {
    self.key() == other.key()
  }
}
impl<O: Orientation, V: Vertex> Eq for Simplex<O, V> {}

impl<O: Orientation, V: Vertex> std::hash::Hash for Simplex<O, V> {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.key().hash(state);
  }
}

impl<O: Orientation, V: Vertex> std::ops::Neg for Simplex<O, V> {
  type Output = Self;
  fn neg(self) -> Self::Output {
    Self {
      vertices: self.vertices.negated(),
      variant: self.variant,
    }
  }
}

impl<O: Orientation, V: Vertex> From<PermList<V>> for Simplex<O, V> {
  fn from(vertices: PermList<V>) -> Self {
    Self::new(vertices)
  }
}
impl<O: Orientation, V: Vertex> From<Vec<V>> for Simplex<O, V> {
  fn from(vertices: Vec<V>) -> Self {
    Self::new(PermList::new(vertices))
  }
}
impl<O: Orientation, V: Vertex, const N: usize> From<[V; N]> for Simplex<O, V> {
  fn from(vertices: [V; N]) -> Self {
    Self::new(PermList::new(vertices.to_vec()))
  }
}

impl<O: Orientation, V: Vertex> std::fmt::Display for Simplex<O, V> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let key = self.key();
    if let Some(sign) = key.sign() {
      write!(f, "{sign}")?;
    }
    write!(f, "[")?;
    for (i, v) in key.vertices().iter().enumerate() {
      if i > 0 {
        write!(f, ",")?;
      }
      write!(f, "{v}")?;
    }
    write!(f, "]")
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn oriented(vertices: &[usize]) -> OrientedSimplex<usize> {
    Simplex::from(vertices.to_vec())
  }
  fn unoriented(vertices: &[usize]) -> UnorientedSimplex<usize> {
    Simplex::from(vertices.to_vec())
  }

  #[test]
  fn dimension_queries() {
    let s = oriented(&[1, 2, 3]);
    assert_eq!(s.dim(), Some(2));
    assert!(s.is_surface());
    assert!(!s.is_volume());

    let e = OrientedSimplex::<usize>::empty();
    assert_eq!(e.dim(), None);
    assert!(e.is_empty());
  }

  #[test]
  fn unoriented_equality_is_set_equality() {
    assert_eq!(unoriented(&[1, 2, 3]), unoriented(&[2, 1, 3]));
    assert_eq!(unoriented(&[1, 1, 2]), unoriented(&[2, 1]));
    assert_eq!(unoriented(&[1, 1, 2]).dim(), Some(1));
  }

  #[test]
  fn oriented_equality_is_even_permutation() {
    assert_eq!(oriented(&[1, 2, 3]), oriented(&[2, 3, 1]));
    assert_ne!(oriented(&[1, 2, 3]), oriented(&[2, 1, 3]));
    assert_eq!(-oriented(&[1, 2, 3]), oriented(&[2, 1, 3]));
  }

  #[test]
  fn face_predicates() {
    let tri = oriented(&[1, 2, 3]);
    let edge = oriented(&[1, 2]);
    let empty = OrientedSimplex::<usize>::empty();
    let point = oriented(&[1]);

    assert!(edge.is_face(&tri));
    assert!(tri.is_coface(&edge));
    assert!(edge.is_facet(&tri));
    assert!(tri.is_cofacet(&edge));
    assert!(edge.is_incident(&tri));
    assert!(edge.is_attached(&tri));

    assert!(empty.is_face(&tri));
    assert!(empty.is_facet(&point));
    assert!(!empty.is_facet(&edge));
    assert!(!point.is_facet(&point));

    assert!(empty.is_adjacent(&tri));
    assert!(oriented(&[1, 4]).is_adjacent(&tri));
    assert!(!oriented(&[4, 5]).is_adjacent(&tri));
    assert!(!oriented(&[4, 5]).is_comparable(&tri));
  }

  #[test]
  fn d_faces_counts() {
    let tet = oriented(&[1, 2, 3, 4]);
    for k in 0..=3 {
      assert_eq!(tet.d_faces(k).len(), nfaces(3, k));
    }
    assert!(tet.d_faces(4).is_empty());

    assert_eq!(oriented(&[5]).facets(), vec![OrientedSimplex::empty()]);
    assert!(OrientedSimplex::<usize>::empty().facets().is_empty());
  }

  #[test]
  fn faces_closure() {
    let tri = unoriented(&[1, 2, 3]);
    let faces = tri.faces();
    // itself, 3 edges, 3 points, bottom
    assert_eq!(faces.len(), 8);
    assert!(faces.contains(&UnorientedSimplex::empty()));
  }

  #[test]
  fn oriented_coefficients() {
    let tri = oriented(&[1, 2, 3]);
    let p1 = oriented(&[1]);
    let p2 = oriented(&[2]);
    let edge = oriented(&[1, 2]);

    assert_eq!(p1.incidence_coeff(&edge), 1);
    assert_eq!(p2.incidence_coeff(&edge), -1);
    assert_eq!(edge.incidence_coeff(&tri), 1);
    assert_eq!(oriented(&[2, 3]).incidence_coeff(&tri), 1);
    assert_eq!(oriented(&[1, 3]).incidence_coeff(&tri), -1);

    // non-incident pairs have zero coefficient
    assert_eq!(oriented(&[4]).incidence_coeff(&tri), 0);
    assert_eq!(edge.attaching_coeff(&p1), p1.attaching_coeff(&edge));
    assert_ne!(oriented(&[1, 4]).adjacency_coeff(&tri), 0);
  }

  #[test]
  fn unoriented_coefficients_are_indicators() {
    let tri = unoriented(&[1, 2, 3]);
    let edge = unoriented(&[2, 1]);
    assert_eq!(edge.incidence_coeff(&tri), 1);
    assert_eq!(edge.attaching_coeff(&tri), 1);
    assert_eq!(unoriented(&[4]).incidence_coeff(&tri), 0);
  }

  #[test]
  fn compatibility_is_symmetric() {
    let a = oriented(&[1, 2]);
    let b = oriented(&[1, 2, 3]);
    assert_eq!(a.compatibility(&b), b.compatibility(&a));
    let c = oriented(&[3, 1]);
    assert_eq!(c.compatibility(&b), b.compatibility(&c));
  }
}
