//! # molfeat-core
//!
//! Per-atom feature embeddings for multi-view molecular geometries.
//!
//! __molfeat-core__ provides:
//! * A static element property table for the common organic elements
//! * Splitting flat per-view rows into atom records
//! * Pairwise Coulomb interaction terms within each view
//! * Fixed-width and Coulomb-extended atom embeddings
//!
//! The main entry points are [`featurize()`], which runs the whole pipeline on
//! a `(molecules, views, atoms * 4)` array, and [`AtomEmbedder`] for finer
//! control.
//!
//! ```ignore
//! use molfeat_core::{featurize, EmbeddingConfig, EmbeddingMode};
//! let embeddings = featurize(raw.view(), &EmbeddingConfig::default(), EmbeddingMode::Coulomb)?;
//! ```
//!
mod config;
mod error;
mod featurize;
mod info;
mod tensor;

pub use self::config::{
    EmbeddingConfig, PropertySelection, UnknownElementPolicy, DEFAULT_EMBEDDING_SIZE,
    DEFAULT_PIECE_SIZE,
};
pub use self::error::{FeaturizeError, Result};
pub use self::featurize::coulomb::{coulomb_interaction, coulomb_interactions, neighbor_index};
pub use self::featurize::embedding::{AtomEmbedder, EmbeddingMode};
pub use self::featurize::reshape::reshape_views;
pub use self::featurize::{featurize, featurize_atoms};
pub use self::info::elements::{
    lookup, symbol_for_atomic_number, Element, ElementProperties, Property,
};
pub use self::tensor::to_tensor;
