//! Embedding -> candle Tensor conversion for downstream models.
use crate::error::Result;
use candle_core::{Device, Tensor};
use ndarray::Array4;

/// Copy an embedding batch into a candle tensor with the same 4D shape.
pub fn to_tensor(embeddings: &Array4<f32>, device: &Device) -> Result<Tensor> {
    let shape = embeddings.dim();
    let data: Vec<f32> = embeddings.iter().copied().collect();
    Ok(Tensor::from_vec(data, shape, device)?)
}
