//! Retained layers
//!
//! A [`Layer`] mirrors one node of the host's layer tree. Setters compare
//! against the current value and record a [`LayerChange`] only when
//! something actually changed, so a host adapter can replay exactly the
//! mutations of a layout pass by draining [`Layer::take_changes`].

use std::sync::atomic::{AtomicU64, Ordering};

use contour_core::{Color, CornerCurve, Gradient, HostConfig, Path, Rect};

// ─────────────────────────────────────────────────────────────────────────────
// Layer Identifiers
// ─────────────────────────────────────────────────────────────────────────────

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl LayerId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocate a process-wide unique id
    pub fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer Properties
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the host may animate a property change
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Animation {
    /// Apply immediately; programmatic layout updates default to this
    #[default]
    Disabled,
    /// Let the host run its implicit animation
    Implicit,
}

impl Animation {
    /// Policy for geometry updates made during layout
    pub fn for_layout(config: &HostConfig) -> Self {
        if config.animate_layout {
            Animation::Implicit
        } else {
            Animation::Disabled
        }
    }
}

/// Background fill of a layer
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LayerFill {
    #[default]
    None,
    Solid(Color),
    Gradient(Gradient),
}

/// The host layer's own border stroke, drawn inside its bounds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeBorder {
    pub color: Color,
    pub width: f32,
    pub corner_radius: f32,
    pub curve: CornerCurve,
    /// Outward shift of the stroke; only honored by hosts that support it
    pub offset: f32,
}

impl NativeBorder {
    /// No border
    pub const NONE: NativeBorder = NativeBorder {
        color: Color::TRANSPARENT,
        width: 0.0,
        corner_radius: 0.0,
        curve: CornerCurve::Continuous,
        offset: 0.0,
    };

    pub fn is_none(&self) -> bool {
        self.width == 0.0
    }
}

impl Default for NativeBorder {
    fn default() -> Self {
        Self::NONE
    }
}

/// Vector geometry drawn by a shape layer
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeGeometry {
    pub path: Path,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f32,
}

impl ShapeGeometry {
    /// Fill `path` with `color`
    pub fn filled(path: Path, color: Color) -> Self {
        Self {
            path,
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    /// Stroke `path` with `color`, centered on the path
    pub fn stroked(path: Path, color: Color, line_width: f32) -> Self {
        Self {
            path,
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }
}

/// A property of a layer that changed
#[derive(Clone, Debug, PartialEq)]
pub enum LayerProperty {
    Frame(Rect),
    Visible(bool),
    Fill(LayerFill),
    Border(NativeBorder),
    Geometry(Option<ShapeGeometry>),
    Mask(Option<LayerId>),
    Sublayers(Vec<LayerId>),
}

impl LayerProperty {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            LayerProperty::Frame(_) => "frame",
            LayerProperty::Visible(_) => "visible",
            LayerProperty::Fill(_) => "fill",
            LayerProperty::Border(_) => "border",
            LayerProperty::Geometry(_) => "geometry",
            LayerProperty::Mask(_) => "mask",
            LayerProperty::Sublayers(_) => "sublayers",
        }
    }
}

/// A recorded mutation for the host to apply
#[derive(Clone, Debug, PartialEq)]
pub struct LayerChange {
    pub layer: LayerId,
    pub property: LayerProperty,
    pub animation: Animation,
}

// ─────────────────────────────────────────────────────────────────────────────
// Layer
// ─────────────────────────────────────────────────────────────────────────────

/// A node of the retained layer tree
///
/// `frame` is in the parent's coordinate space; sublayer and mask frames are
/// relative to this layer's [`bounds`](Layer::bounds).
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    id: LayerId,
    name: Option<String>,
    frame: Rect,
    visible: bool,
    fill: LayerFill,
    border: NativeBorder,
    geometry: Option<ShapeGeometry>,
    mask: Option<Box<Layer>>,
    sublayers: Vec<Layer>,
    animation: Animation,
    changes: Vec<LayerChange>,
}

impl Layer {
    /// Create a visible, empty layer with a fresh id
    pub fn new(frame: Rect) -> Self {
        Self::with_id(LayerId::next(), frame)
    }

    /// Create a layer with a host-assigned id
    pub fn with_id(id: LayerId, frame: Rect) -> Self {
        Self {
            id,
            name: None,
            frame,
            visible: true,
            fill: LayerFill::None,
            border: NativeBorder::NONE,
            geometry: None,
            mask: None,
            sublayers: Vec::new(),
            animation: Animation::Disabled,
            changes: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// The layer's own coordinate space: its frame size at the origin
    pub fn bounds(&self) -> Rect {
        self.frame.size().to_rect()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn fill(&self) -> &LayerFill {
        &self.fill
    }

    pub fn border(&self) -> &NativeBorder {
        &self.border
    }

    pub fn geometry(&self) -> Option<&ShapeGeometry> {
        self.geometry.as_ref()
    }

    pub fn mask(&self) -> Option<&Layer> {
        self.mask.as_deref()
    }

    pub fn sublayers(&self) -> &[Layer] {
        &self.sublayers
    }

    pub fn sublayer(&self, id: LayerId) -> Option<&Layer> {
        self.sublayers.iter().find(|layer| layer.id == id)
    }

    pub fn sublayer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.sublayers.iter_mut().find(|layer| layer.id == id)
    }

    /// Find a layer by id in this subtree, masks included
    pub fn find(&self, id: LayerId) -> Option<&Layer> {
        if self.id == id {
            return Some(self);
        }
        self.mask
            .iter()
            .map(|mask| &**mask)
            .chain(self.sublayers.iter())
            .find_map(|layer| layer.find(id))
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    /// Animation policy attached to subsequently recorded changes
    pub fn set_animation(&mut self, animation: Animation) {
        self.animation = animation;
    }

    fn record(&mut self, property: LayerProperty) {
        tracing::trace!(layer = self.id.0, "{} changed", property.name());
        self.changes.push(LayerChange {
            layer: self.id,
            property,
            animation: self.animation,
        });
    }

    pub fn set_frame(&mut self, frame: Rect) {
        if self.frame != frame {
            self.frame = frame;
            self.record(LayerProperty::Frame(frame));
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.record(LayerProperty::Visible(visible));
        }
    }

    pub fn set_fill(&mut self, fill: LayerFill) {
        if self.fill != fill {
            self.fill = fill.clone();
            self.record(LayerProperty::Fill(fill));
        }
    }

    pub fn set_border(&mut self, border: NativeBorder) {
        if self.border != border {
            self.border = border;
            self.record(LayerProperty::Border(border));
        }
    }

    pub fn set_geometry(&mut self, geometry: Option<ShapeGeometry>) {
        if self.geometry != geometry {
            self.geometry = geometry.clone();
            self.record(LayerProperty::Geometry(geometry));
        }
    }

    /// Attach `mask`, replacing any current mask
    ///
    /// Only a change of mask identity is recorded; the mask's own property
    /// changes are recorded on the mask layer.
    pub fn set_mask(&mut self, mask: Option<Layer>) {
        let old = self.mask.as_ref().map(|layer| layer.id);
        let new = mask.as_ref().map(|layer| layer.id);
        self.mask = mask.map(Box::new);
        if old != new {
            self.record(LayerProperty::Mask(new));
        }
    }

    /// The current mask, attaching one built by `make` if there is none
    pub fn mask_or_insert_with(&mut self, make: impl FnOnce() -> Layer) -> &mut Layer {
        let mask = match self.mask.take() {
            Some(mask) => mask,
            None => {
                let mask = Box::new(make());
                self.record(LayerProperty::Mask(Some(mask.id)));
                mask
            }
        };
        &mut **self.mask.insert(mask)
    }

    pub fn add_sublayer(&mut self, layer: Layer) {
        self.sublayers.push(layer);
        self.record_sublayers();
    }

    pub fn remove_sublayer(&mut self, id: LayerId) -> Option<Layer> {
        let index = self.sublayers.iter().position(|layer| layer.id == id)?;
        let layer = self.sublayers.remove(index);
        self.record_sublayers();
        Some(layer)
    }

    /// Replace all sublayers
    pub fn set_sublayers(&mut self, sublayers: Vec<Layer>) {
        let changed = self.sublayer_ids() != sublayers.iter().map(|l| l.id).collect::<Vec<_>>();
        self.sublayers = sublayers;
        if changed {
            self.record_sublayers();
        }
    }

    fn sublayer_ids(&self) -> Vec<LayerId> {
        self.sublayers.iter().map(|layer| layer.id).collect()
    }

    fn record_sublayers(&mut self) {
        let ids = self.sublayer_ids();
        self.record(LayerProperty::Sublayers(ids));
    }

    /// Changes recorded on this layer only
    pub fn pending_changes(&self) -> &[LayerChange] {
        &self.changes
    }

    /// Whether this subtree has recorded changes
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
            || self.mask.as_ref().is_some_and(|mask| mask.has_changes())
            || self.sublayers.iter().any(Layer::has_changes)
    }

    /// Drain the changes of this subtree, parents before children
    pub fn take_changes(&mut self) -> Vec<LayerChange> {
        let mut changes = std::mem::take(&mut self.changes);
        if let Some(mask) = self.mask.as_mut() {
            changes.extend(mask.take_changes());
        }
        for sublayer in &mut self.sublayers {
            changes.extend(sublayer.take_changes());
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Layer::new(Rect::ZERO);
        let b = Layer::new(Rect::ZERO);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_setters_record_only_real_changes() {
        let mut layer = Layer::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        layer.set_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
        layer.set_visible(true);
        layer.set_border(NativeBorder::NONE);
        assert!(!layer.has_changes());

        layer.set_frame(Rect::new(0.0, 0.0, 20.0, 10.0));
        layer.set_fill(LayerFill::Solid(Color::RED));
        layer.set_fill(LayerFill::Solid(Color::RED));

        let changes = layer.take_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].property, LayerProperty::Frame(Rect::new(0.0, 0.0, 20.0, 10.0)));
        assert_eq!(changes[1].animation, Animation::Disabled);
        assert!(layer.take_changes().is_empty());
    }

    #[test]
    fn test_changes_carry_animation_policy() {
        let mut layer = Layer::new(Rect::ZERO);
        layer.set_animation(Animation::Implicit);
        layer.set_visible(false);
        assert_eq!(layer.pending_changes()[0].animation, Animation::Implicit);
    }

    #[test]
    fn test_take_changes_is_recursive() {
        let mut child = Layer::new(Rect::ZERO);
        child.set_visible(false);
        let mut mask = Layer::new(Rect::ZERO);
        mask.set_fill(LayerFill::Solid(Color::BLACK));

        let mut parent = Layer::new(Rect::ZERO);
        parent.add_sublayer(child);
        parent.set_mask(Some(mask));

        let properties: Vec<&'static str> = parent
            .take_changes()
            .iter()
            .map(|change| change.property.name())
            .collect();
        assert_eq!(properties, vec!["sublayers", "mask", "fill", "visible"]);
        assert!(!parent.has_changes());
    }

    #[test]
    fn test_find_and_remove() {
        let child = Layer::new(Rect::ZERO).with_name("child");
        let child_id = child.id();
        let mask = Layer::new(Rect::ZERO);
        let mask_id = mask.id();

        let mut parent = Layer::new(Rect::ZERO);
        parent.add_sublayer(child);
        parent.set_mask(Some(mask));

        assert_eq!(parent.find(child_id).and_then(Layer::name), Some("child"));
        assert!(parent.find(mask_id).is_some());

        let removed = parent.remove_sublayer(child_id).unwrap();
        assert_eq!(removed.id(), child_id);
        assert!(parent.find(child_id).is_none());
        assert!(parent.remove_sublayer(child_id).is_none());
    }

    #[test]
    fn test_set_sublayers_same_ids_is_quiet() {
        let child = Layer::new(Rect::ZERO);
        let mut parent = Layer::new(Rect::ZERO);
        parent.set_sublayers(vec![child.clone()]);
        parent.take_changes();

        parent.set_sublayers(vec![child]);
        assert!(!parent.has_changes());
    }

    #[test]
    fn test_bounds_at_origin() {
        let layer = Layer::new(Rect::new(15.0, 20.0, 100.0, 60.0));
        assert_eq!(layer.bounds(), Rect::new(0.0, 0.0, 100.0, 60.0));
    }
}
