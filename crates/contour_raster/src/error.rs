//! Raster error types

use contour_core::Diagnostic;
use thiserror::Error;

/// Errors raised inside the raster pipeline
///
/// These never leave the crate: [`crate::BorderRasterizer`] turns them into
/// diagnostics and substitutes a fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    /// A mask or pixmap could not be created
    #[error("failed to allocate {width}x{height} {what}")]
    Allocation {
        what: &'static str,
        width: u32,
        height: u32,
    },
}

impl RasterError {
    pub(crate) fn allocation(what: &'static str, width: u32, height: u32) -> Self {
        RasterError::Allocation {
            what,
            width,
            height,
        }
    }
}

impl From<RasterError> for Diagnostic {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::Allocation {
                what,
                width,
                height,
            } => Diagnostic::AllocationFailed {
                what,
                width,
                height,
            },
        }
    }
}
