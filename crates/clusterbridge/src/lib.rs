//! clusterbridge: run clustering code over lazily extracted matrices.
//!
//! Clustering routines want a dataset as "observations x dimensions" with
//! three ways to walk it. Matrix backends offer dense extraction of rows or
//! columns, optionally steered by an access-pattern oracle, in their own
//! value and index types. This crate connects the two.
//!
//! # Key Types
//!
//! - [`MatrixAdapter`] - Clustering view over any backend matrix handle
//! - [`backend::Matrix`] - Backend interface, with [`backend::DenseMatrix`],
//!   [`backend::CompressedSparseMatrix`] and [`backend::Transposed`]
//! - [`consumer::Matrix`] - Clustering interface, with the native
//!   [`consumer::SimpleMatrix`]
//! - [`AdapterError`] - Raised when an observation count does not fit the
//!   clustering index type
//!
//! # Example
//!
//! ```
//! use clusterbridge::backend::RowMatrix;
//! use clusterbridge::consumer::{ConsecutiveAccessExtractor, Matrix};
//! use clusterbridge::{AdapterParams, MatrixAdapter};
//!
//! let backend: RowMatrix<f32> = RowMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
//! let adapter = MatrixAdapter::<_, i32, f64>::with_params(&backend, AdapterParams::transposed()).unwrap();
//!
//! let mut ext = adapter.new_consecutive_extractor(0, 2);
//! assert_eq!(ext.get_observation(), &[1.0, 2.0]);
//! assert_eq!(ext.get_observation(), &[3.0, 4.0]);
//! ```

pub mod adapter;
pub mod backend;
pub mod consumer;
pub mod error;
pub mod index;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use adapter::{AdapterParams, MatrixAdapter};
pub use error::{AdapterError, ObservationAxis, Result};
pub use index::Index;
