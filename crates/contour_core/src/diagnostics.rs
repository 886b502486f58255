//! Diagnostic channel
//!
//! Path generation, rasterization and layer layout never fail across their
//! public boundary. When they detect misuse they report a [`Diagnostic`] and
//! carry on with the nearest safe behavior. Reports are logged through
//! `tracing` under the `contour::diagnostic` target and can be collected with
//! [`capture`].

use std::cell::RefCell;

use thiserror::Error;

use crate::{Rect, Size};

/// An anomaly detected and recovered from during rendering
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// Zero-area input where an area is required
    #[error("invalid geometry in {context}: {rect:?} has no area")]
    InvalidGeometry { context: &'static str, rect: Rect },

    /// A non-zero offset was requested from a shape that cannot grow or shrink
    #[error("{shape} does not support offsetting; offset {offset} ignored")]
    UnsupportedOffset { shape: &'static str, offset: f32 },

    /// Elliptical corner size handed to a generator that only supports circles
    #[error("corner size {size:?} must have equal width and height")]
    UnsupportedCornerAspect { size: Size },

    /// Stroke placement without an implementation
    #[error("stroke placement {placement} is not implemented; using inside")]
    UnsupportedPlacement { placement: &'static str },

    /// A pixel buffer could not be allocated
    #[error("failed to allocate {width}x{height} {what}")]
    AllocationFailed {
        what: &'static str,
        width: u32,
        height: u32,
    },

    /// An image provider returned an image of the wrong extent
    #[error("image provider returned {actual:?}, expected {expected:?}")]
    ImageExtentMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

thread_local! {
    static CAPTURES: RefCell<Vec<Vec<Diagnostic>>> = const { RefCell::new(Vec::new()) };
}

/// Report a diagnostic
///
/// The report is logged and handed to every active [`capture`] scope on the
/// current thread.
pub fn report(diagnostic: Diagnostic) {
    tracing::warn!(target: "contour::diagnostic", "{diagnostic}");

    CAPTURES.with(|captures| {
        for scope in captures.borrow_mut().iter_mut() {
            scope.push(diagnostic.clone());
        }
    });
}

/// Run `f`, collecting every diagnostic it reports on this thread
///
/// Scopes nest: an inner scope's diagnostics are also seen by outer scopes.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<Diagnostic>) {
    CAPTURES.with(|captures| captures.borrow_mut().push(Vec::new()));

    struct PopGuard;
    impl Drop for PopGuard {
        fn drop(&mut self) {
            CAPTURES.with(|captures| {
                captures.borrow_mut().pop();
            });
        }
    }

    let guard = PopGuard;
    let result = f();
    let collected = CAPTURES.with(|captures| {
        captures
            .borrow_mut()
            .last_mut()
            .map(std::mem::take)
            .unwrap_or_default()
    });
    drop(guard);

    (result, collected)
}

/// Check that `rect` has an area, reporting [`Diagnostic::InvalidGeometry`] if not
pub fn check_area(context: &'static str, rect: Rect) -> bool {
    if rect.is_empty() {
        report(Diagnostic::InvalidGeometry { context, rect });
        false
    } else {
        true
    }
}
