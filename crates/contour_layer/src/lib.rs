//! Contour border layers
//!
//! A retained layer model and the state machine that keeps a border ring
//! drawn on it. Hosts mirror [`Layer`] trees into their own layer hierarchy
//! and replay the recorded [`LayerChange`]s after each layout pass.
//!
//! # Example
//!
//! ```rust
//! use contour_core::{Color, ContourConfig, Rect};
//! use contour_layer::{BorderLayer, BorderMask, BorderRoute};
//!
//! let mut border = BorderLayer::new(
//!     Rect::new(0.0, 0.0, 100.0, 60.0),
//!     Color::RED.into(),
//!     BorderMask::corner_radius(12.0, 4.0),
//!     &ContourConfig::standard(),
//! );
//! border.layout_sublayers();
//!
//! assert_eq!(border.route(), Some(BorderRoute::Native));
//! assert_eq!(border.target().border().corner_radius, 12.0);
//! ```

pub mod border;
pub mod border_layer;
pub mod layer;

pub use border::{BorderContent, BorderMask};
pub use border_layer::{BorderLayer, BorderRoute, HostCapabilities};
pub use layer::{
    Animation, Layer, LayerChange, LayerFill, LayerId, LayerProperty, NativeBorder, ShapeGeometry,
};
