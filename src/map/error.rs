//! Error types for grid construction and resizing.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// A grid must be at least one tile wide and one tile tall
    #[error("invalid map dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i64, height: i64 },
}
