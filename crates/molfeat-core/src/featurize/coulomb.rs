//! Pairwise Coulomb interaction terms.
//!
//! For every atom `i` in a view the interaction with each other atom `j` is
//! `q_i * q_j / |c_i - c_j|`, where the charge `q` is the atomic number.
//!
//! ## Neighbor layout
//!
//! The interaction tensor has shape `(molecules, views, atoms, atoms - 1)`.
//! Row `i` lists the other atoms in ascending index order with `i` itself
//! skipped, so slot `s` holds atom `s` when `s < i` and atom `s + 1`
//! otherwise (see [`neighbor_index`]). The Coulomb embedding copies these
//! rows verbatim, so the layout is part of the embedding format.
//!
//! Padding atoms are not special-cased. Their charge is zero, which zeroes
//! every term they take part in.
use super::{atom_record, check_atom_slots};
use crate::error::Result;
use ndarray::{Array4, ArrayView2, ArrayView4, ArrayViewMut2, Axis};
use rayon::prelude::*;

/// Coulomb interaction between two point charges.
///
/// Returns 0 when the two positions coincide.
pub fn coulomb_interaction(
    charge_i: f32,
    charge_j: f32,
    coord_i: [f32; 3],
    coord_j: [f32; 3],
) -> f32 {
    let dx = coord_i[0] - coord_j[0];
    let dy = coord_i[1] - coord_j[1];
    let dz = coord_i[2] - coord_j[2];
    let distance = (dx * dx + dy * dy + dz * dz).sqrt();
    if distance == 0.0 {
        return 0.0;
    }
    charge_i * charge_j / distance
}

/// Index of the atom stored in neighbor slot `slot` of atom `atom`'s row.
pub fn neighbor_index(atom: usize, slot: usize) -> usize {
    if slot < atom {
        slot
    } else {
        slot + 1
    }
}

/// Interaction tensor `(molecules, views, atoms, atoms - 1)` for a geometry
/// tensor `(molecules, views, atoms, 4)`.
pub fn coulomb_interactions(geometry: ArrayView4<f32>) -> Result<Array4<f32>> {
    let (n_molecules, n_views, n_atoms, n_slots) = geometry.dim();
    check_atom_slots(n_slots)?;
    let n_neighbors = n_atoms.saturating_sub(1);
    log::debug!(
        "computing coulomb interactions for {} molecules x {} views x {} atoms",
        n_molecules,
        n_views,
        n_atoms
    );

    let mut interactions = Array4::<f32>::zeros((n_molecules, n_views, n_atoms, n_neighbors));
    interactions
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .zip(geometry.axis_iter(Axis(0)).into_par_iter())
        .for_each(|(mut out_molecule, molecule)| {
            for (out_view, view) in out_molecule.outer_iter_mut().zip(molecule.outer_iter()) {
                fill_view_interactions(view, out_view);
            }
        });

    Ok(interactions)
}

fn fill_view_interactions(view: ArrayView2<f32>, mut out: ArrayViewMut2<f32>) {
    let n_atoms = view.nrows();
    for i in 0..n_atoms {
        let (charge_i, coord_i) = atom_record(&view, i);
        for slot in 0..n_atoms - 1 {
            let j = neighbor_index(i, slot);
            let (charge_j, coord_j) = atom_record(&view, j);
            out[[i, slot]] = coulomb_interaction(charge_i, charge_j, coord_i, coord_j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeaturizeError;
    use approx::assert_relative_eq;
    use ndarray::{arr2, Array4};

    fn single_view(atoms: &[[f32; 4]]) -> Array4<f32> {
        let data: Vec<f32> = atoms.iter().flatten().copied().collect();
        Array4::from_shape_vec((1, 1, atoms.len(), 4), data).unwrap()
    }

    #[test]
    fn test_unit_charges_unit_distance() {
        assert_eq!(
            coulomb_interaction(1.0, 1.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            1.0
        );
    }

    #[test]
    fn test_coincident_atoms() {
        assert_eq!(
            coulomb_interaction(8.0, 6.0, [1.5, -2.0, 0.3], [1.5, -2.0, 0.3]),
            0.0
        );
        assert_eq!(
            coulomb_interaction(0.0, 0.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            0.0
        );
    }

    #[test]
    fn test_neighbor_index() {
        let row_for_1: Vec<usize> = (0..3).map(|s| neighbor_index(1, s)).collect();
        assert_eq!(row_for_1, vec![0, 2, 3]);
        let row_for_0: Vec<usize> = (0..3).map(|s| neighbor_index(0, s)).collect();
        assert_eq!(row_for_0, vec![1, 2, 3]);
        let row_for_3: Vec<usize> = (0..3).map(|s| neighbor_index(3, s)).collect();
        assert_eq!(row_for_3, vec![0, 1, 2]);
    }

    #[test]
    fn test_three_atom_row_order() {
        // C at origin, O at x=2, H at y=4
        let geometry = single_view(&[
            [6.0, 0.0, 0.0, 0.0],
            [8.0, 2.0, 0.0, 0.0],
            [1.0, 0.0, 4.0, 0.0],
        ]);
        let interactions = coulomb_interactions(geometry.view()).unwrap();
        assert_eq!(interactions.dim(), (1, 1, 3, 2));

        let d_oh = 20.0f32.sqrt();
        let expected = arr2(&[
            [48.0 / 2.0, 6.0 / 4.0],
            [48.0 / 2.0, 8.0 / d_oh],
            [6.0 / 4.0, 8.0 / d_oh],
        ]);
        let view = interactions.slice(ndarray::s![0, 0, .., ..]);
        for (got, want) in view.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_padding_atoms_contribute_zero() {
        let geometry = single_view(&[
            [6.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
        ]);
        let interactions = coulomb_interactions(geometry.view()).unwrap();
        // carbon row: [padding, H]
        assert_eq!(interactions[[0, 0, 0, 0]], 0.0);
        assert_eq!(interactions[[0, 0, 0, 1]], 6.0);
        // padding row is all zero
        assert_eq!(interactions[[0, 0, 1, 0]], 0.0);
        assert_eq!(interactions[[0, 0, 1, 1]], 0.0);
    }

    #[test]
    fn test_views_are_independent() {
        let mut geometry = Array4::<f32>::zeros((2, 2, 2, 4));
        for m in 0..2 {
            for v in 0..2 {
                geometry[[m, v, 0, 0]] = 1.0;
                geometry[[m, v, 1, 0]] = 1.0;
                geometry[[m, v, 1, 1]] = (1 + m * 2 + v) as f32;
            }
        }
        let interactions = coulomb_interactions(geometry.view()).unwrap();
        assert_eq!(interactions.dim(), (2, 2, 2, 1));
        assert_relative_eq!(interactions[[0, 0, 0, 0]], 1.0);
        assert_relative_eq!(interactions[[0, 1, 1, 0]], 0.5);
        assert_relative_eq!(interactions[[1, 0, 0, 0]], 1.0 / 3.0);
        assert_relative_eq!(interactions[[1, 1, 1, 0]], 0.25);
    }

    #[test]
    fn test_batch_matches_pairwise_evaluation() {
        // enough molecules to be split across rayon workers, with padding slots
        let numbers = [6.0, 8.0, 1.0, 7.0, 0.0, 9.0, 1.0];
        let geometry = Array4::from_shape_fn((37, 3, 6, 4), |(m, v, a, k)| match k {
            0 => numbers[(m + 2 * a) % numbers.len()],
            _ => ((m * 7 + v * 3 + a * 5 + k) % 11) as f32 * 0.37 - 1.5,
        });
        let interactions = coulomb_interactions(geometry.view()).unwrap();
        assert_eq!(interactions.dim(), (37, 3, 6, 5));

        for m in 0..37 {
            for v in 0..3 {
                let view = geometry.slice(ndarray::s![m, v, .., ..]);
                for i in 0..6 {
                    let (q_i, c_i) = atom_record(&view, i);
                    for slot in 0..5 {
                        let (q_j, c_j) = atom_record(&view, neighbor_index(i, slot));
                        assert_eq!(
                            interactions[[m, v, i, slot]].to_bits(),
                            coulomb_interaction(q_i, q_j, c_i, c_j).to_bits(),
                            "molecule {m} view {v} atom {i} slot {slot}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_shapes() {
        let empty = Array4::<f32>::zeros((1, 1, 0, 4));
        assert_eq!(coulomb_interactions(empty.view()).unwrap().dim(), (1, 1, 0, 0));

        let lone = single_view(&[[6.0, 0.0, 0.0, 0.0]]);
        assert_eq!(coulomb_interactions(lone.view()).unwrap().dim(), (1, 1, 1, 0));

        let narrow = Array4::<f32>::zeros((1, 1, 2, 3));
        assert!(matches!(
            coulomb_interactions(narrow.view()),
            Err(FeaturizeError::InvalidShape(_))
        ));
    }
}
