//! Geometry Featurizer
//!
//! Turn multi-view molecular geometries into per-atom embeddings for
//! machine learning.
//!
//! The stages compose linearly:
//!
//! ```text
//! raw (molecules, views, D)
//!   -> reshape_views          (molecules, views, atoms, 4)
//!   -> coulomb_interactions   (molecules, views, atoms, atoms - 1)
//!   -> AtomEmbedder           (molecules, views, atoms, width)
//! ```
//!
//! Each stage can also be called on its own.
pub(crate) mod coulomb;
pub(crate) mod embedding;
pub(crate) mod reshape;

use crate::config::EmbeddingConfig;
use crate::error::{FeaturizeError, Result};
use coulomb::coulomb_interactions;
use embedding::{AtomEmbedder, EmbeddingMode};
use ndarray::{Array4, ArrayView2, ArrayView3, ArrayView4};
use reshape::reshape_views;

/// Atomic number plus three coordinates.
pub(crate) const ATOM_RECORD_LEN: usize = 4;

pub(crate) fn check_atom_slots(n_slots: usize) -> Result<()> {
    if n_slots < ATOM_RECORD_LEN {
        return Err(FeaturizeError::InvalidShape(format!(
            "atom records need {} slots (atomic number + xyz), found {}",
            ATOM_RECORD_LEN, n_slots
        )));
    }
    Ok(())
}

/// Atomic number and coordinates of atom `i` in a `(atoms, slots)` view.
pub(crate) fn atom_record(view: &ArrayView2<f32>, i: usize) -> (f32, [f32; 3]) {
    (
        view[[i, 0]],
        [view[[i, 1]], view[[i, 2]], view[[i, 3]]],
    )
}

/// Embed an already split geometry tensor `(molecules, views, atoms, 4)`.
pub fn featurize_atoms(
    geometry: ArrayView4<f32>,
    config: &EmbeddingConfig,
    mode: EmbeddingMode,
) -> Result<Array4<f32>> {
    let embedder = AtomEmbedder::new(config);
    match mode {
        EmbeddingMode::Fixed => embedder.embed_fixed(geometry),
        EmbeddingMode::Coulomb => {
            let interactions = coulomb_interactions(geometry)?;
            embedder.embed_with_coulomb(geometry, interactions.view())
        }
    }
}

/// Full pipeline from flat views `(molecules, views, atoms * piece_size)`.
pub fn featurize(
    raw: ArrayView3<f32>,
    config: &EmbeddingConfig,
    mode: EmbeddingMode,
) -> Result<Array4<f32>> {
    let geometry = reshape_views(raw, config.piece_size)?;
    featurize_atoms(geometry.view(), config, mode)
}
