//! Persistence and rendering adapters. Peripheral to the container;
//! nothing here is required to build or query a complex.

use crate::{complex::Complex, simplex::Orientation, Vertex};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use std::{
  fs::File,
  io::{BufReader, BufWriter},
  path::Path,
};

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

/// The on-disk description of a complex: its name, orientation flag
/// and a generating list of maximal simplices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexRecord<V> {
  pub name: String,
  pub oriented: bool,
  pub max_simplices: Vec<Vec<V>>,
}

impl<V: Vertex> ComplexRecord<V> {
  pub fn from_complex<O: Orientation>(complex: &Complex<O, V>) -> Self {
    let max_simplices = complex
      .max_simplices()
      .into_iter()
      .filter(|simplex| !simplex.is_empty())
      .map(|simplex| simplex.vertices().elements().to_vec())
      .collect();
    Self {
      name: complex.name().to_string(),
      oriented: complex.is_oriented(),
      max_simplices,
    }
  }

  /// Rebuilds the complex by `add`ing the recorded maximal simplices.
  ///
  /// The orientation mode is the caller's type choice; a mismatch with
  /// the recorded flag is reported but not fatal.
  pub fn build<O: Orientation>(&self) -> Complex<O, V> {
    if self.oriented != O::ORIENTED {
      tracing::warn!(
        record = self.oriented,
        requested = O::ORIENTED,
        "orientation flag of record does not match requested complex variant"
      );
    }
    let mut complex = Complex::new(self.name.clone());
    complex.add(self.max_simplices.iter().cloned());
    complex
  }
}

/// Writes a complex to `path`, dispatching on the extension: `.json`
/// gets the [`ComplexRecord`], `.dot` the rendered incidence graph.
/// An unrecognized extension is reported and nothing is written.
pub fn save_complex<O, V>(complex: &Complex<O, V>, path: impl AsRef<Path>) -> Result<(), PersistError>
where
  O: Orientation,
  V: Vertex + Serialize,
{
  let path = path.as_ref();
  match path.extension().and_then(|ext| ext.to_str()) {
    Some("json") => {
      let file = File::create(path)?;
      let writer = BufWriter::new(file);
      let record = ComplexRecord::from_complex(complex);
      serde_json::to_writer_pretty(writer, &record)?;
      Ok(())
    }
    Some("dot") => {
      std::fs::write(path, to_dot_string(complex))?;
      Ok(())
    }
    ext => {
      tracing::warn!(?ext, "file format not recognized, saving nothing");
      Ok(())
    }
  }
}

/// Reads a [`ComplexRecord`] from a `.json` file. An unrecognized
/// extension is reported and yields `None` without touching any state.
pub fn load_record<V>(path: impl AsRef<Path>) -> Result<Option<ComplexRecord<V>>, PersistError>
where
  V: Vertex + DeserializeOwned,
{
  let path = path.as_ref();
  match path.extension().and_then(|ext| ext.to_str()) {
    Some("json") => {
      let file = File::open(path)?;
      let reader = BufReader::new(file);
      let record = serde_json::from_reader(reader)?;
      Ok(Some(record))
    }
    ext => {
      tracing::warn!(?ext, "file format not recognized, loading nothing");
      Ok(None)
    }
  }
}

/// Renders the layered incidence diagram of a complex in Graphviz DOT
/// format: one rank per dimension, an edge for every nonzero incidence
/// coefficient between consecutive dimensions, sign labels in oriented
/// mode. Maximal simplices are highlighted.
pub fn to_dot_string<O: Orientation, V: Vertex>(complex: &Complex<O, V>) -> String {
  use std::fmt::Write;

  let mut dot = String::new();
  writeln!(dot, "digraph \"{}\" {{", complex.name()).unwrap();
  writeln!(dot, "  rankdir=BT;").unwrap();
  writeln!(dot, "  node [shape=circle, style=filled];").unwrap();
  writeln!(dot, "  edge [arrowsize=0.6];").unwrap();

  let bottom = complex.bottom();
  let fill = |maximal: bool| if maximal { "green" } else { "cyan" };
  writeln!(
    dot,
    "  \"{bottom}\" [fillcolor={}];",
    fill(complex.is_maximal(&bottom))
  )
  .unwrap();

  let complex_dim = complex.dim();
  if let Some(top) = complex_dim {
    for dim in 0..=top {
      writeln!(dot, "  {{ rank=same;").unwrap();
      for simplex in complex.d_simplices(dim) {
        writeln!(
          dot,
          "    \"{simplex}\" [fillcolor={}];",
          fill(complex.is_maximal(&simplex))
        )
        .unwrap();
      }
      writeln!(dot, "  }}").unwrap();
    }

    for vertex in complex.d_simplices(0) {
      writeln!(dot, "  \"{bottom}\" -> \"{vertex}\";").unwrap();
    }

    for dim in 0..top {
      for simplex1 in complex.d_simplices(dim) {
        for simplex2 in complex.d_simplices(dim + 1) {
          let coeff = simplex1.incidence_coeff(&simplex2);
          if coeff == 0 {
            continue;
          }
          if O::ORIENTED {
            let (label, color) = if coeff > 0 { ('+', "blue") } else { ('-', "red") };
            writeln!(
              dot,
              "  \"{simplex1}\" -> \"{simplex2}\" [label=\"{label}\", color={color}];"
            )
            .unwrap();
          } else {
            writeln!(dot, "  \"{simplex1}\" -> \"{simplex2}\";").unwrap();
          }
        }
      }
    }
  }

  writeln!(dot, "}}").unwrap();
  dot
}
