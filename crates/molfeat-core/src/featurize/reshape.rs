//! Split flat per-view feature rows into per-atom records.
use crate::error::{FeaturizeError, Result};
use ndarray::{Array4, ArrayView3};

/// Reshape `(molecules, views, D)` into `(molecules, views, D / piece_size, piece_size)`.
///
/// The leading dimensions are unchanged. Each consecutive run of `piece_size`
/// values becomes one atom record (atomic number followed by coordinates when
/// `piece_size` is 4).
pub fn reshape_views(views: ArrayView3<f32>, piece_size: usize) -> Result<Array4<f32>> {
    let (n_molecules, n_views, width) = views.dim();
    if piece_size == 0 {
        return Err(FeaturizeError::InvalidShape(
            "piece size must be greater than zero".to_string(),
        ));
    }
    if width % piece_size != 0 {
        return Err(FeaturizeError::InvalidShape(format!(
            "View size {} is not divisible by piece size {}.",
            width, piece_size
        )));
    }
    let n_atoms = width / piece_size;
    log::debug!(
        "reshaping views ({}, {}, {}) into {} records of {}",
        n_molecules,
        n_views,
        width,
        n_atoms,
        piece_size
    );

    // iter() walks logical (row-major) order regardless of the input's strides
    let data: Vec<f32> = views.iter().copied().collect();
    Ok(Array4::from_shape_vec(
        (n_molecules, n_views, n_atoms, piece_size),
        data,
    )?)
}
