//! Border layer state machine
//!
//! A [`BorderLayer`] owns a target [`Layer`] and keeps its sublayers in sync
//! with a [`BorderContent`] and a [`BorderMask`]. Every layout pass picks one
//! of two routes:
//!
//! - **Native**: the host draws the ring itself through the target layer's
//!   [`NativeBorder`]. Only flat-colour corner-radius rings qualify, and an
//!   offset ring only when the host supports a native border offset.
//! - **Masked**: a content sublayer paints the fill and a mask layer attached
//!   to it leaves only the ring visible.
//!
//! The content and mask sublayers are created on the first masked pass and
//! reused afterwards. A native pass hides them rather than removing them.

use contour_core::{Color, ContourConfig, HostConfig, Rect};
use contour_paint::ShapePath;

use crate::border::{BorderContent, BorderMask};
use crate::layer::{
    Animation, Layer, LayerChange, LayerFill, LayerId, NativeBorder, ShapeGeometry,
};

/// What the host layer tree can draw by itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HostCapabilities {
    /// Layers have a native border stroke
    pub native_border: bool,
    /// The native border can be shifted outward or inward
    pub native_border_offset: bool,
}

impl From<&HostConfig> for HostCapabilities {
    fn from(config: &HostConfig) -> Self {
        Self {
            native_border: config.native_border,
            native_border_offset: config.native_border_offset,
        }
    }
}

/// Route taken by the last layout pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderRoute {
    Native,
    Masked,
}

/// A layer that draws a border ring around its bounds
#[derive(Debug)]
pub struct BorderLayer {
    target: Layer,
    content: BorderContent,
    mask: BorderMask,
    capabilities: HostCapabilities,
    animation: Animation,
    content_layer: Option<LayerId>,
    mask_layer: Option<LayerId>,
    route: Option<BorderRoute>,
    needs_layout: bool,
}

impl BorderLayer {
    pub fn new(
        bounds: Rect,
        content: BorderContent,
        mask: BorderMask,
        config: &ContourConfig,
    ) -> Self {
        let animation = Animation::for_layout(&config.host);
        let mut target = Layer::new(bounds).with_name("border");
        target.set_animation(animation);

        Self {
            target,
            content,
            mask,
            capabilities: HostCapabilities::from(&config.host),
            animation,
            content_layer: None,
            mask_layer: None,
            route: None,
            needs_layout: true,
        }
    }

    pub fn border_content(&self) -> &BorderContent {
        &self.content
    }

    pub fn set_border_content(&mut self, content: BorderContent) {
        self.content = content;
        self.needs_layout = true;
    }

    pub fn border_mask(&self) -> &BorderMask {
        &self.mask
    }

    pub fn set_border_mask(&mut self, mask: BorderMask) {
        self.mask = mask;
        self.needs_layout = true;
    }

    /// Move or resize the target layer
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.target.set_frame(bounds);
        self.needs_layout = true;
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Route taken by the last layout pass, if any ran
    pub fn route(&self) -> Option<BorderRoute> {
        self.route
    }

    pub fn target(&self) -> &Layer {
        &self.target
    }

    /// The content sublayer, once a masked pass has created it
    pub fn content_layer(&self) -> Option<&Layer> {
        self.content_layer.and_then(|id| self.target.sublayer(id))
    }

    /// The mask attached to the content sublayer
    pub fn mask_layer(&self) -> Option<&Layer> {
        let mask = self.content_layer()?.mask()?;
        (Some(mask.id()) == self.mask_layer).then_some(mask)
    }

    /// Drain the changes recorded since the last call
    pub fn take_changes(&mut self) -> Vec<LayerChange> {
        self.target.take_changes()
    }

    /// Bring the sublayers in line with the current content, mask and bounds
    ///
    /// Re-evaluates the route on every call. Passes with unchanged inputs
    /// record no changes.
    pub fn layout_sublayers(&mut self) {
        let route = match self.native_border() {
            Some(border) => {
                self.layout_native(border);
                BorderRoute::Native
            }
            None => {
                self.layout_masked();
                BorderRoute::Masked
            }
        };

        if self.route != Some(route) {
            tracing::debug!(
                layer = self.target.id().0,
                content = self.content.kind(),
                "border switched to {:?} route",
                route
            );
        }
        self.route = Some(route);
        self.needs_layout = false;
    }

    /// The native border to use, when the host can draw this ring itself
    fn native_border(&self) -> Option<NativeBorder> {
        let BorderMask::CornerRadius {
            radius,
            stroke_width,
            curve,
            offset,
        } = self.mask
        else {
            return None;
        };
        let BorderContent::Color(color) = self.content else {
            return None;
        };
        if !self.capabilities.native_border {
            return None;
        }
        if offset != 0.0 && !self.capabilities.native_border_offset {
            return None;
        }

        Some(NativeBorder {
            color,
            width: stroke_width,
            corner_radius: radius,
            curve,
            offset,
        })
    }

    fn layout_native(&mut self, border: NativeBorder) {
        self.target.set_border(border);
        if let Some(content) = self.content_layer.and_then(|id| self.target.sublayer_mut(id)) {
            content.set_visible(false);
        }
    }

    fn layout_masked(&mut self) {
        self.target.set_border(NativeBorder::NONE);

        let bounds = self.target.bounds();
        let extended = self.mask.bounds_extended_offset();
        let content_frame = bounds.expand(extended);
        // Where the target bounds sit inside the content sublayer
        let inner = Rect::new(extended, extended, bounds.width(), bounds.height());

        let id = self.ensure_content_layer(content_frame);
        let Some(content) = self.target.sublayer_mut(id) else {
            return;
        };
        content.set_frame(content_frame);
        content.set_visible(true);
        apply_content(content, &self.content, self.animation);

        let mask = ensure_mask_layer(content, &mut self.mask_layer, self.animation);
        apply_mask(mask, &self.mask, content_frame.size().to_rect(), inner, self.animation);
    }

    fn ensure_content_layer(&mut self, frame: Rect) -> LayerId {
        if let Some(id) = self.content_layer {
            if self.target.sublayer(id).is_some() {
                return id;
            }
        }

        let mut layer = Layer::new(frame).with_name("border content");
        layer.set_animation(self.animation);
        let id = layer.id();
        self.target.add_sublayer(layer);
        self.content_layer = Some(id);
        self.mask_layer = None;
        id
    }
}

fn apply_content(layer: &mut Layer, content: &BorderContent, animation: Animation) {
    match content {
        BorderContent::Color(color) => {
            layer.set_fill(LayerFill::Solid(*color));
            layer.set_sublayers(Vec::new());
        }
        BorderContent::Gradient(gradient) => {
            layer.set_fill(LayerFill::Gradient(gradient.clone()));
            layer.set_sublayers(Vec::new());
        }
        BorderContent::Layer(external) => {
            layer.set_fill(LayerFill::None);
            let bounds = layer.bounds();

            let reparented = matches!(layer.sublayers(), [child] if child.id() == external.id());
            if reparented {
                if let Some(child) = layer.sublayer_mut(external.id()) {
                    child.set_frame(bounds);
                }
            } else {
                let mut child = external.clone();
                child.take_changes();
                child.set_animation(animation);
                child.set_frame(bounds);
                layer.set_sublayers(vec![child]);
            }
        }
    }
}

/// The content layer's mask, created on first use
fn ensure_mask_layer<'a>(
    content: &'a mut Layer,
    slot: &mut Option<LayerId>,
    animation: Animation,
) -> &'a mut Layer {
    let bounds = content.bounds();
    let mask = content.mask_or_insert_with(|| {
        let mut mask = Layer::new(bounds).with_name("border mask");
        mask.set_animation(animation);
        mask
    });
    *slot = Some(mask.id());
    mask
}

/// Encode the ring geometry on the mask layer
///
/// `content_bounds` is the content layer's own space and `inner` the target
/// bounds within it.
fn apply_mask(
    mask_layer: &mut Layer,
    mask: &BorderMask,
    content_bounds: Rect,
    inner: Rect,
    animation: Animation,
) {
    match mask {
        BorderMask::CornerRadius {
            radius,
            stroke_width,
            curve,
            offset,
        } => {
            let corner_radius = if *radius > 0.0 {
                (radius + offset).max(0.0)
            } else {
                0.0
            };

            mask_layer.set_frame(inner.expand(*offset));
            mask_layer.set_geometry(None);
            mask_layer.set_mask(None);
            mask_layer.set_border(NativeBorder {
                color: Color::BLACK,
                width: *stroke_width,
                corner_radius,
                curve: *curve,
                offset: 0.0,
            });
        }
        BorderMask::Shape {
            shape,
            stroke_width,
            offset,
        } => {
            let path = shape.path_with_offset(content_bounds, *offset);

            mask_layer.set_frame(content_bounds);
            mask_layer.set_border(NativeBorder::NONE);
            // Centered on the outline; the fill mask below keeps the inner half
            mask_layer.set_geometry(Some(ShapeGeometry::stroked(
                path.clone(),
                Color::BLACK,
                2.0 * stroke_width,
            )));

            let fill = mask_layer.mask_or_insert_with(|| {
                let mut fill = Layer::new(content_bounds).with_name("border mask fill");
                fill.set_animation(animation);
                fill
            });
            fill.set_frame(content_bounds);
            fill.set_geometry(Some(ShapeGeometry::filled(path, Color::BLACK)));

            tracing::trace!(
                shape = shape.name(),
                offset = *offset,
                "regenerated border mask paths"
            );
        }
    }
}
