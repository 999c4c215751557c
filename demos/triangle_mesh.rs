extern crate nalgebra as na;

use simplicial::{complex::OrientedComplex, io};

fn main() {
  tracing_subscriber::fmt::init();

  let cells = vec![
    vec![3, 2, 1],
    vec![3, 4, 2],
    vec![3, 7, 4],
    vec![3, 1, 6],
    vec![3, 6, 7],
    vec![7, 10, 4],
    vec![7, 9, 10],
    vec![7, 8, 9],
    vec![7, 6, 8],
    vec![6, 1, 5],
    vec![6, 5, 8],
    vec![8, 10, 9],
  ];
  let mut complex = OrientedComplex::<usize>::new("mesh");
  complex.add(cells);
  println!("{complex}");

  let boundary = complex
    .incidence_matrix(Some(1), Some(2), true)
    .unwrap()
    .to_nalgebra_dense();
  println!("{boundary}");

  io::save_complex(&complex, "mesh.json").unwrap();
  io::save_complex(&complex, "mesh.dot").unwrap();
}
