//! Atom embeddings.
//!
//! Every atom becomes one row:
//!
//! ```text
//! [atomic_number, x, y, z, prop_1 .. prop_k, tail]
//! ```
//!
//! where the property block follows the order of the configured
//! [`PropertySelection`](crate::PropertySelection) and the tail depends on the mode:
//!
//! - [`EmbeddingMode::Fixed`]: zeros up to `embedding_size`.
//! - [`EmbeddingMode::Coulomb`]: the atom's `atoms - 1` Coulomb terms, in the
//!   neighbor order given by [`neighbor_index`](crate::neighbor_index).
//!
//! Padding atoms (atomic number 0) are encoded as all-zero rows. A real atom
//! whose raw record is entirely zero is indistinguishable from padding.
use super::{atom_record, check_atom_slots};
use crate::config::{EmbeddingConfig, UnknownElementPolicy};
use crate::error::{FeaturizeError, Result};
use crate::info::elements::{atomic_number_from_f32, Element, ElementProperties, Property};
use itertools::izip;
use ndarray::{s, Array4, ArrayView2, ArrayView4, ArrayViewMut2, Axis};
use rayon::prelude::*;

/// Leading columns shared by every embedding row.
const BASE_COLUMNS: [&str; 4] = ["atomic_number", "x", "y", "z"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingMode {
    /// Zero-padded rows of `embedding_size`.
    Fixed,
    /// Rows extended with the atom's pairwise Coulomb terms.
    Coulomb,
}

/// Builds atom embeddings from a geometry tensor `(molecules, views, atoms, 4)`.
#[derive(Debug, Clone)]
pub struct AtomEmbedder {
    properties: Vec<Property>,
    embedding_size: usize,
    policy: UnknownElementPolicy,
}

impl AtomEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            properties: config.properties.enabled(),
            embedding_size: config.embedding_size,
            policy: config.unknown_element_policy,
        }
    }

    /// Enabled properties in output order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Columns before the mode-specific tail: atomic number, coordinates and properties.
    pub fn base_width(&self) -> usize {
        BASE_COLUMNS.len() + self.properties.len()
    }

    /// Row width for `mode` when each view holds `n_atoms` atoms.
    pub fn width(&self, mode: EmbeddingMode, n_atoms: usize) -> Result<usize> {
        match mode {
            EmbeddingMode::Fixed => {
                let required = self.base_width();
                if required > self.embedding_size {
                    return Err(FeaturizeError::EmbeddingTooSmall {
                        required,
                        available: self.embedding_size,
                    });
                }
                Ok(self.embedding_size)
            }
            EmbeddingMode::Coulomb => Ok(self.base_width() + n_atoms.saturating_sub(1)),
        }
    }

    /// Column names of an embedding row, e.g. `["atomic_number", "x", "y", "z",
    /// "electronegativity", .., "coulomb_0", ..]`.
    pub fn layout(&self, mode: EmbeddingMode, n_atoms: usize) -> Result<Vec<String>> {
        let width = self.width(mode, n_atoms)?;
        let tail_prefix = match mode {
            EmbeddingMode::Fixed => "pad",
            EmbeddingMode::Coulomb => "coulomb",
        };
        let columns = itertools::chain!(
            BASE_COLUMNS.iter().map(|c| c.to_string()),
            self.properties().iter().map(|p| p.to_string()),
            (0..width - self.base_width()).map(|k| format!("{}_{}", tail_prefix, k)),
        )
        .collect();
        Ok(columns)
    }

    /// Fixed-width embeddings `(molecules, views, atoms, embedding_size)`.
    pub fn embed_fixed(&self, geometry: ArrayView4<f32>) -> Result<Array4<f32>> {
        let (_, _, n_atoms, _) = geometry.dim();
        let width = self.width(EmbeddingMode::Fixed, n_atoms)?;
        Ok(self.build(geometry, None, width)?.0)
    }

    /// Coulomb-extended embeddings `(molecules, views, atoms, 4 + k + atoms - 1)`.
    ///
    /// `interactions` must be the output of
    /// [`coulomb_interactions`](crate::coulomb_interactions) for the same geometry.
    pub fn embed_with_coulomb(
        &self,
        geometry: ArrayView4<f32>,
        interactions: ArrayView4<f32>,
    ) -> Result<Array4<f32>> {
        let (n_molecules, n_views, n_atoms, _) = geometry.dim();
        let expected = (n_molecules, n_views, n_atoms, n_atoms.saturating_sub(1));
        if interactions.dim() != expected {
            return Err(FeaturizeError::InvalidShape(format!(
                "coulomb interactions have shape {:?}, expected {:?}",
                interactions.shape(),
                expected
            )));
        }
        let width = self.width(EmbeddingMode::Coulomb, n_atoms)?;
        Ok(self.build(geometry, Some(interactions), width)?.0)
    }

    /// Pick the mode from the companion data: Coulomb-extended when
    /// interactions are supplied, fixed-width otherwise.
    pub fn embed(
        &self,
        geometry: ArrayView4<f32>,
        interactions: Option<ArrayView4<f32>>,
    ) -> Result<Array4<f32>> {
        match interactions {
            Some(interactions) => self.embed_with_coulomb(geometry, interactions),
            None => self.embed_fixed(geometry),
        }
    }

    /// Embeddings plus the number of atoms that took the fallback element.
    fn build(
        &self,
        geometry: ArrayView4<f32>,
        interactions: Option<ArrayView4<f32>>,
        width: usize,
    ) -> Result<(Array4<f32>, usize)> {
        let (n_molecules, n_views, n_atoms, n_slots) = geometry.dim();
        check_atom_slots(n_slots)?;
        log::debug!(
            "embedding {} molecules x {} views x {} atoms into rows of {}",
            n_molecules,
            n_views,
            n_atoms,
            width
        );

        let mut embeddings = Array4::<f32>::zeros((n_molecules, n_views, n_atoms, width));
        let fallbacks = embeddings
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .zip(geometry.axis_iter(Axis(0)).into_par_iter())
            .enumerate()
            .map(|(mol_idx, (mut out_molecule, molecule))| -> Result<usize> {
                let mut fallbacks = 0;
                for (view_idx, out_view, view) in
                    izip!(0.., out_molecule.outer_iter_mut(), molecule.outer_iter())
                {
                    let coulomb =
                        interactions.map(|i| i.slice_move(s![mol_idx, view_idx, .., ..]));
                    fallbacks += self.fill_view(view, coulomb, out_view)?;
                }
                Ok(fallbacks)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))?;

        if fallbacks > 0 {
            if let UnknownElementPolicy::FallbackTo(element) = self.policy {
                log::warn!(
                    "{} atoms had unrecognized atomic numbers and were given {} properties",
                    fallbacks,
                    element
                );
            }
        }
        Ok((embeddings, fallbacks))
    }

    /// Fill one view's rows. Returns how many atoms used the fallback element.
    fn fill_view(
        &self,
        view: ArrayView2<f32>,
        coulomb: Option<ArrayView2<f32>>,
        mut out: ArrayViewMut2<f32>,
    ) -> Result<usize> {
        let base = self.base_width();
        let mut fallbacks = 0;
        for atom_idx in 0..view.nrows() {
            let (atomic_number, coords) = atom_record(&view, atom_idx);
            if atomic_number == 0.0 {
                continue;
            }
            let (properties, fell_back) = self.resolve(atomic_number)?;
            if fell_back {
                fallbacks += 1;
            }

            let mut row = out.row_mut(atom_idx);
            row[0] = atomic_number;
            row[1] = coords[0];
            row[2] = coords[1];
            row[3] = coords[2];
            for (offset, property) in self.properties.iter().enumerate() {
                row[BASE_COLUMNS.len() + offset] = properties.get(*property);
            }
            if let Some(coulomb) = &coulomb {
                row.slice_mut(s![base..]).assign(&coulomb.row(atom_idx));
            }
        }
        Ok(fallbacks)
    }

    fn resolve(&self, atomic_number: f32) -> Result<(&'static ElementProperties, bool)> {
        match atomic_number_from_f32(atomic_number).and_then(Element::from_atomic_number) {
            Some(element) => Ok((element.properties(), false)),
            None => match self.policy {
                UnknownElementPolicy::Fail => Err(FeaturizeError::UnknownElement(format!(
                    "atomic number {}",
                    atomic_number
                ))),
                UnknownElementPolicy::FallbackTo(element) => Ok((element.properties(), true)),
            },
        }
    }
}
