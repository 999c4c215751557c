//! Dimension-indexed simplicial complex container.

use crate::{
  simplex::{Orientation, Oriented, Simplex, SimplexKey, Unoriented},
  sparse::SparseMatrix,
  Dim, Vertex,
};

use std::collections::BTreeMap;

/// All stored simplices of one dimension, keyed by canonical identity.
///
/// The `BTreeMap` order over [`SimplexKey`] is the deterministic order
/// of `d_simplices`, which assigns incidence-matrix row/column indices.
pub type Skeleton<O, V> = BTreeMap<SimplexKey<V>, Simplex<O, V>>;

#[derive(Debug, thiserror::Error)]
pub enum ComplexError {
  #[error("dimension {dim} out of range for complex of dimension {complex_dim:?}")]
  DimOutOfRange {
    dim: Dim,
    complex_dim: Option<Dim>,
  },
}

/// An abstract simplicial complex, oriented or unoriented per the `O`
/// marker, fixed at the type level.
///
/// Invariant: closure. Every face of every stored simplex is stored,
/// down to the implicit empty simplex (the bottom). The invariant is
/// established and preserved exclusively by [`Complex::add`] and
/// [`Complex::remove`]; the skeletons are never mutated directly.
#[derive(Debug, Clone)]
pub struct Complex<O: Orientation, V: Vertex> {
  name: String,
  skeletons: Vec<Skeleton<O, V>>,
}

pub type UnorientedComplex<V> = Complex<Unoriented, V>;
pub type OrientedComplex<V> = Complex<Oriented, V>;

impl<O: Orientation, V: Vertex> Default for Complex<O, V> {
  fn default() -> Self {
    Self::new("unnamed")
  }
}

impl<O: Orientation, V: Vertex> Complex<O, V> {
  /// Creates the empty complex, holding only the bottom.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      skeletons: Vec::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn set_name(&mut self, name: impl Into<String>) {
    self.name = name.into();
  }

  /// Clears back to the empty complex.
  ///
  /// The orientation mode lives in the type and never changes over the
  /// lifetime of a value.
  pub fn reset(&mut self) {
    self.skeletons.clear();
  }

  pub fn is_oriented(&self) -> bool {
    O::ORIENTED
  }

  /// The distinguished empty simplex, always present.
  pub fn bottom(&self) -> Simplex<O, V> {
    Simplex::empty()
  }

  /// Maximum dimension among stored non-empty simplices, `None` for
  /// the empty complex.
  pub fn dim(&self) -> Option<Dim> {
    (!self.skeletons.is_empty()).then(|| self.skeletons.len() - 1)
  }

  /// A complex is empty iff its only simplex is the bottom.
  pub fn is_empty(&self) -> bool {
    self.skeletons.is_empty()
  }

  /// Total number of stored simplices, the bottom included.
  pub fn size(&self) -> usize {
    1 + self.skeletons.iter().map(|s| s.len()).sum::<usize>()
  }

  pub fn contains(&self, simplex: &Simplex<O, V>) -> bool {
    match simplex.dim() {
      None => true,
      Some(dim) => self
        .skeletons
        .get(dim)
        .is_some_and(|skeleton| skeleton.contains_key(&simplex.key())),
    }
  }

  /// Stored `dim`-simplices in canonical-key order.
  pub fn d_simplices(&self, dim: Dim) -> Vec<Simplex<O, V>> {
    self
      .skeletons
      .get(dim)
      .map(|skeleton| skeleton.values().cloned().collect())
      .unwrap_or_default()
  }

  pub fn d_size(&self, dim: Dim) -> usize {
    self.skeletons.get(dim).map_or(0, |skeleton| skeleton.len())
  }

  /// All stored simplices, bottom first, then by ascending dimension.
  pub fn simplices(&self) -> Vec<Simplex<O, V>> {
    let mut simplices = vec![self.bottom()];
    for skeleton in &self.skeletons {
      simplices.extend(skeleton.values().cloned());
    }
    simplices
  }

  /// Stored `face_dim`-faces of `simplex`, which itself need not be
  /// stored.
  pub fn d_faces(&self, simplex: &Simplex<O, V>, face_dim: Dim) -> Vec<Simplex<O, V>> {
    self
      .d_simplices(face_dim)
      .into_iter()
      .filter(|face| face.is_face(simplex))
      .collect()
  }

  pub fn d_cofaces(&self, simplex: &Simplex<O, V>, coface_dim: Dim) -> Vec<Simplex<O, V>> {
    self
      .d_simplices(coface_dim)
      .into_iter()
      .filter(|coface| coface.is_coface(simplex))
      .collect()
  }

  /// Stored faces of `simplex` one dimension lower; the bottom for
  /// 0-simplices.
  pub fn facets(&self, simplex: &Simplex<O, V>) -> Vec<Simplex<O, V>> {
    match simplex.dim() {
      None => Vec::new(),
      Some(0) => vec![self.bottom()],
      Some(dim) => self.d_faces(simplex, dim - 1),
    }
  }

  pub fn cofacets(&self, simplex: &Simplex<O, V>) -> Vec<Simplex<O, V>> {
    let cofacet_dim = simplex.dim().map_or(0, |dim| dim + 1);
    self.d_cofaces(simplex, cofacet_dim)
  }

  /// Stored faces of `simplex` over all dimensions.
  pub fn faces(&self, simplex: &Simplex<O, V>) -> Vec<Simplex<O, V>> {
    self
      .simplices()
      .into_iter()
      .filter(|face| face.is_face(simplex))
      .collect()
  }

  pub fn cofaces(&self, simplex: &Simplex<O, V>) -> Vec<Simplex<O, V>> {
    self
      .simplices()
      .into_iter()
      .filter(|coface| coface.is_coface(simplex))
      .collect()
  }

  /// True when no stored simplex one dimension higher has `simplex` as
  /// a face. The bottom is maximal only in the empty complex.
  pub fn is_maximal(&self, simplex: &Simplex<O, V>) -> bool {
    match simplex.dim() {
      None => self.is_empty(),
      Some(dim) => self
        .d_simplices(dim + 1)
        .iter()
        .all(|sup| !simplex.is_face(sup)),
    }
  }

  /// A generating set: `add`ing these to an empty complex rebuilds
  /// this one.
  pub fn max_simplices(&self) -> Vec<Simplex<O, V>> {
    self
      .simplices()
      .into_iter()
      .filter(|simplex| self.is_maximal(simplex))
      .collect()
  }

  /// Inserts each given simplex together with all of its faces.
  ///
  /// In oriented mode, inserting a simplex whose negation is already
  /// stored is a no-op, so at most one of a simplex and its negation
  /// is ever held.
  pub fn add<I>(&mut self, simplices: I)
  where
    I: IntoIterator,
    I::Item: Into<Simplex<O, V>>,
  {
    for simplex in simplices {
      let simplex = simplex.into();
      let Some(dim) = simplex.dim() else { continue };
      for face_dim in 0..=dim {
        for face in simplex.d_faces(face_dim) {
          self.insert_unchecked(face);
        }
      }
    }
  }

  /// `add` applied to every element of every nested collection.
  pub fn add_batch<I>(&mut self, batches: I)
  where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: Into<Simplex<O, V>>,
  {
    for batch in batches {
      self.add(batch);
    }
  }

  /// Removes each given simplex together with all of its stored
  /// cofaces. In oriented mode, removing a simplex whose negation is
  /// stored removes the negation.
  pub fn remove<I>(&mut self, simplices: I)
  where
    I: IntoIterator,
    I::Item: Into<Simplex<O, V>>,
  {
    for simplex in simplices {
      let simplex = simplex.into();
      let Some(dim) = simplex.dim() else { continue };
      let Some(top) = self.dim() else { continue };
      for coface_dim in dim..=top {
        for coface in self.d_cofaces(&simplex, coface_dim) {
          self.remove_unchecked(&coface);
        }
      }
    }
  }

  /// `remove` applied to every element of every nested collection.
  pub fn remove_batch<I>(&mut self, batches: I)
  where
    I: IntoIterator,
    I::Item: IntoIterator,
    <I::Item as IntoIterator>::Item: Into<Simplex<O, V>>,
  {
    for batch in batches {
      self.remove(batch);
    }
  }

  /// Raw insert. Does not insert faces; callers must restore closure.
  fn insert_unchecked(&mut self, simplex: Simplex<O, V>) {
    let Some(dim) = simplex.dim() else { return };
    if self.skeletons.len() <= dim {
      self.skeletons.resize_with(dim + 1, Skeleton::default);
    }
    let key = simplex.key();
    if O::ORIENTED && self.skeletons[dim].contains_key(&key.negated()) {
      return;
    }
    self.skeletons[dim].insert(key, simplex);
  }

  /// Raw removal. Does not remove cofaces; callers must restore
  /// closure.
  fn remove_unchecked(&mut self, simplex: &Simplex<O, V>) {
    let Some(dim) = simplex.dim() else { return };
    if let Some(skeleton) = self.skeletons.get_mut(dim) {
      let key = simplex.key();
      skeleton.remove(&key);
      if O::ORIENTED {
        skeleton.remove(&key.negated());
      }
    }
    while self.skeletons.last().is_some_and(|s| s.is_empty()) {
      self.skeletons.pop();
    }
  }

  fn check_dim(&self, dim: Dim) -> Result<(), ComplexError> {
    let complex_dim = self.dim();
    if complex_dim.is_none_or(|top| dim > top) {
      return Err(ComplexError::DimOutOfRange { dim, complex_dim });
    }
    Ok(())
  }

  /// The sparse matrix of incidence coefficients between the stored
  /// `dim1`- and `dim2`-simplices, indexed in `d_simplices` order.
  ///
  /// `None` stands for the bottom dimension: both `None` gives the 1x1
  /// identity, one `None` a zero row/column vector. Equal dimensions
  /// give the identity. With `fast`, unequal dimensions are assembled
  /// by face enumeration and key lookup (transposed for
  /// `dim1 > dim2`); without, by the literal pairwise coefficient
  /// scan kept as the reference implementation. Both paths agree on
  /// any valid complex.
  pub fn incidence_matrix(
    &self,
    dim1: Option<Dim>,
    dim2: Option<Dim>,
    fast: bool,
  ) -> Result<SparseMatrix, ComplexError> {
    let (dim1, dim2) = match (dim1, dim2) {
      (None, None) => return Ok(SparseMatrix::identity(1)),
      (None, Some(dim2)) => {
        self.check_dim(dim2)?;
        return Ok(SparseMatrix::zeros(1, self.d_size(dim2)));
      }
      (Some(dim1), None) => {
        self.check_dim(dim1)?;
        return Ok(SparseMatrix::zeros(self.d_size(dim1), 1));
      }
      (Some(dim1), Some(dim2)) => {
        self.check_dim(dim1)?;
        self.check_dim(dim2)?;
        (dim1, dim2)
      }
    };

    if !fast {
      return Ok(self.incidence_matrix_pairwise(dim1, dim2));
    }

    use std::cmp::Ordering;
    match dim1.cmp(&dim2) {
      Ordering::Equal => Ok(SparseMatrix::identity(self.d_size(dim1))),
      Ordering::Less => Ok(self.incidence_matrix_fast(dim1, dim2)),
      Ordering::Greater => Ok(
        self
          .incidence_matrix(Some(dim2), Some(dim1), true)?
          .transpose(),
      ),
    }
  }

  /// For each `dim2`-simplex, enumerate its `dim1`-faces and look them
  /// up (and, oriented, their negations) among the stored simplices.
  /// Avoids the full pairwise scan. Requires `dim1 < dim2`.
  fn incidence_matrix_fast(&self, dim1: Dim, dim2: Dim) -> SparseMatrix {
    let keys1: Vec<SimplexKey<V>> = self.skeletons[dim1].keys().cloned().collect();
    let mut mat = SparseMatrix::zeros(keys1.len(), self.d_size(dim2));
    for (j, simplex2) in self.skeletons[dim2].values().enumerate() {
      for face in simplex2.d_faces(dim1) {
        let key = face.key();
        let coeff = face.incidence_coeff(simplex2);
        if let Ok(i) = keys1.binary_search(&key) {
          mat.push(i, j, coeff as f64);
        } else if let Ok(i) = keys1.binary_search(&key.negated()) {
          // the stored simplex is the negation of the derived face
          mat.push(i, j, (-coeff) as f64);
        }
      }
    }
    mat
  }

  fn incidence_matrix_pairwise(&self, dim1: Dim, dim2: Dim) -> SparseMatrix {
    let simplices1 = self.d_simplices(dim1);
    let simplices2 = self.d_simplices(dim2);
    let mut mat = SparseMatrix::zeros(simplices1.len(), simplices2.len());
    for (i, simplex1) in simplices1.iter().enumerate() {
      for (j, simplex2) in simplices2.iter().enumerate() {
        mat.push(i, j, simplex1.incidence_coeff(simplex2) as f64);
      }
    }
    mat
  }
}

impl<O: Orientation, V: Vertex> std::fmt::Display for Complex<O, V> {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{} = {{", self.name)?;
    for (i, simplex) in self.simplices().iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{simplex}")?;
    }
    write!(f, "}}")
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::simplex::nfaces;

  fn triangle_complex() -> UnorientedComplex<usize> {
    let mut complex = UnorientedComplex::new("triangles");
    complex.add([vec![1, 2, 3], vec![2, 3, 4]]);
    complex
  }

  #[test]
  fn empty_complex() {
    let complex = OrientedComplex::<usize>::new("empty");
    assert!(complex.is_empty());
    assert_eq!(complex.dim(), None);
    assert_eq!(complex.size(), 1);
    assert!(complex.contains(&complex.bottom()));
    assert!(complex.is_maximal(&complex.bottom()));
    assert_eq!(complex.max_simplices(), vec![complex.bottom()]);
  }

  #[test]
  fn add_inserts_closure() {
    let mut complex = OrientedComplex::<usize>::new("tet");
    complex.add([vec![1, 2, 3, 4]]);

    assert_eq!(complex.dim(), Some(3));
    for face_dim in 0..=3 {
      assert_eq!(complex.d_size(face_dim), nfaces(3, face_dim));
    }

    // every facet of every stored simplex is stored
    for dim in 1..=3 {
      for simplex in complex.d_simplices(dim) {
        for facet in simplex.facets() {
          assert!(complex.contains(&facet));
        }
      }
    }
  }

  #[test]
  fn bottom_not_maximal_in_nonempty() {
    let complex = triangle_complex();
    assert!(!complex.is_maximal(&complex.bottom()));
    assert!(complex.is_maximal(&Simplex::from(vec![1, 2, 3])));
    assert!(!complex.is_maximal(&Simplex::from(vec![2, 3])));
  }

  #[test]
  fn max_simplices_generate() {
    let complex = triangle_complex();
    let max = complex.max_simplices();
    assert_eq!(max.len(), 2);

    let mut rebuilt = UnorientedComplex::new("rebuilt");
    rebuilt.add(max);
    assert_eq!(rebuilt.size(), complex.size());
    for simplex in complex.simplices() {
      assert!(rebuilt.contains(&simplex));
    }
  }

  #[test]
  fn oriented_negation_add_is_noop() {
    let mut complex = OrientedComplex::<usize>::new("edges");
    complex.add([vec![1, 2]]);
    let before = complex.size();
    complex.add([vec![2, 1]]);
    assert_eq!(complex.size(), before);

    // the originally stored orientation survives
    assert!(complex.contains(&Simplex::from(vec![1, 2])));
    assert!(!complex.contains(&Simplex::from(vec![2, 1])));
  }

  #[test]
  fn oriented_remove_hits_negation() {
    let mut complex = OrientedComplex::<usize>::new("edges");
    complex.add([vec![1, 2]]);
    complex.remove([vec![2, 1]]);
    assert_eq!(complex.dim(), Some(0));
    assert!(!complex.contains(&Simplex::from(vec![1, 2])));
  }

  #[test]
  fn remove_cascades_to_cofaces() {
    let mut complex = triangle_complex();
    complex.remove([vec![1, 2]]);

    assert!(!complex.contains(&Simplex::from(vec![1, 2])));
    assert!(!complex.contains(&Simplex::from(vec![1, 2, 3])));
    // shared faces supported by the surviving triangle remain
    assert!(complex.contains(&Simplex::from(vec![2, 3])));
    assert!(complex.contains(&Simplex::from(vec![2, 3, 4])));
    // faces below the removed edge remain as well
    assert!(complex.contains(&Simplex::from(vec![1])));
    assert!(complex.contains(&Simplex::from(vec![1, 3])));
  }

  #[test]
  fn remove_vertex_drops_sole_support() {
    let mut complex = triangle_complex();
    complex.remove([vec![2]]);

    assert_eq!(complex.dim(), Some(1));
    assert!(!complex.contains(&Simplex::from(vec![2])));
    assert!(!complex.contains(&Simplex::from(vec![1, 2])));
    assert!(!complex.contains(&Simplex::from(vec![1, 2, 3])));
    assert!(!complex.contains(&Simplex::from(vec![2, 3, 4])));
    // edges not through the removed vertex survive
    assert!(complex.contains(&Simplex::from(vec![1, 3])));
    assert!(complex.contains(&Simplex::from(vec![3, 4])));
  }

  #[test]
  fn remove_all_leaves_empty() {
    let mut complex = triangle_complex();
    let vertices: Vec<Vec<usize>> = (1..=4).map(|v| vec![v]).collect();
    complex.remove(vertices);
    assert!(complex.is_empty());
    assert_eq!(complex.size(), 1);
  }

  #[test]
  fn d_simplices_order_is_deterministic() {
    let complex = triangle_complex();
    let edges = complex.d_simplices(1);
    let keys: Vec<_> = edges.iter().map(|e| e.key()).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
  }

  #[test]
  fn facets_and_cofacets_queries() {
    let complex = triangle_complex();
    let edge = Simplex::from(vec![2, 3]);
    assert_eq!(complex.cofacets(&edge).len(), 2);
    assert_eq!(complex.facets(&edge).len(), 2);
    assert_eq!(
      complex.facets(&Simplex::from(vec![1])),
      vec![complex.bottom()]
    );
    // queried simplex need not be stored
    let missing = Simplex::from(vec![1, 4]);
    assert!(!complex.contains(&missing));
    assert_eq!(complex.facets(&missing).len(), 2);
    assert_eq!(complex.cofacets(&complex.bottom()).len(), 4);
  }

  #[test]
  fn incidence_identity_and_edge_cases() {
    let complex = triangle_complex();
    for dim in 0..=2 {
      let id = complex.incidence_matrix(Some(dim), Some(dim), true).unwrap();
      assert_eq!(
        id.to_nalgebra_dense(),
        na::DMatrix::identity(complex.d_size(dim), complex.d_size(dim))
      );
    }

    let both_none = complex.incidence_matrix(None, None, true).unwrap();
    assert_eq!(both_none.to_nalgebra_dense(), na::DMatrix::identity(1, 1));

    let row = complex.incidence_matrix(None, Some(1), true).unwrap();
    assert_eq!((row.nrows(), row.ncols()), (1, complex.d_size(1)));
    assert_eq!(row.nnz(), 0);

    let col = complex.incidence_matrix(Some(1), None, true).unwrap();
    assert_eq!((col.nrows(), col.ncols()), (complex.d_size(1), 1));
    assert_eq!(col.nnz(), 0);
  }

  #[test]
  fn incidence_rejects_out_of_range() {
    let complex = triangle_complex();
    assert!(matches!(
      complex.incidence_matrix(Some(0), Some(3), true),
      Err(ComplexError::DimOutOfRange { dim: 3, .. })
    ));

    let empty = UnorientedComplex::<usize>::new("empty");
    assert!(empty.incidence_matrix(Some(0), Some(0), true).is_err());
    assert!(empty.incidence_matrix(None, None, true).is_ok());
  }

  #[test]
  fn fast_matches_pairwise_unoriented() {
    let complex = triangle_complex();
    for dim1 in 0..=2 {
      for dim2 in 0..=2 {
        let fast = complex
          .incidence_matrix(Some(dim1), Some(dim2), true)
          .unwrap();
        let slow = complex
          .incidence_matrix(Some(dim1), Some(dim2), false)
          .unwrap();
        assert_eq!(fast.to_nalgebra_dense(), slow.to_nalgebra_dense());
      }
    }
  }

  #[test]
  fn fast_matches_pairwise_with_flipped_shared_edge() {
    // the shared edge enters with opposite induced orientations, so
    // the fast path must consult the stored negation
    let mut complex = OrientedComplex::<usize>::new("strip");
    complex.add([vec![1, 2, 3], vec![3, 2, 4]]);
    for dim1 in 0..=2 {
      for dim2 in 0..=2 {
        let fast = complex
          .incidence_matrix(Some(dim1), Some(dim2), true)
          .unwrap();
        let slow = complex
          .incidence_matrix(Some(dim1), Some(dim2), false)
          .unwrap();
        assert_eq!(fast.to_nalgebra_dense(), slow.to_nalgebra_dense());
      }
    }
  }

  #[test]
  fn reset_clears() {
    let mut complex = triangle_complex();
    complex.reset();
    assert!(complex.is_empty());
    assert_eq!(complex.name(), "triangles");
  }

  #[test]
  fn add_batch_nested() {
    let mut complex = UnorientedComplex::new("batched");
    complex.add_batch([vec![vec![1, 2]], vec![vec![2, 3], vec![3, 4]]]);
    assert_eq!(complex.d_size(1), 3);
    complex.remove_batch([[vec![2]]]);
    assert_eq!(complex.d_size(1), 1);
  }
}
