//! Canvas document and state management.

use crate::shapes::{Ellipse, ShapeId};
use crate::tools::{Mode, ToolManager, ToolState};
use kurbo::{Point, Size, Vec2};
use std::collections::HashMap;

/// All shapes on the canvas, in paint order.
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Ellipse>,
    /// Insertion order (back to front).
    z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of everything else.
    pub fn add_shape(&mut self, shape: Ellipse) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Ellipse> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Ellipse> {
        self.shapes.get(&id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Ellipse> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in insertion order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Ellipse> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// IDs in insertion order.
    pub fn z_order(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Topmost shape containing `point`: the latest inserted one wins.
    pub fn topmost_at(&self, point: Point) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.shapes
                .get(id)
                .is_some_and(|shape| shape.hit_test(point))
        })
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Document, selection and interaction state for one window.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Mode and gesture tracking.
    pub tool_manager: ToolManager,
    /// Currently selected shape; never refers to a removed shape.
    selection: Option<ShapeId>,
    /// Drawable area in device-independent units.
    pub viewport_size: Size,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_mode(Mode::default())
    }

    /// Create an empty canvas starting in `mode`.
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            document: CanvasDocument::new(),
            tool_manager: ToolManager::with_mode(mode),
            selection: None,
            viewport_size: Size::new(600.0, 600.0),
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width.max(0.0), height.max(0.0));
    }

    /// Append a new ellipse and return its handle.
    pub fn insert(&mut self, center: Point, radius_x: f64, radius_y: f64) -> ShapeId {
        let id = self.document.add_shape(Ellipse::new(center, radius_x, radius_y));
        log::debug!("Inserted shape {} at ({}, {})", id, center.x, center.y);
        id
    }

    /// Topmost shape under `point`, if any.
    pub fn find_topmost_hit(&self, point: Point) -> Option<ShapeId> {
        self.document.topmost_at(point)
    }

    /// Select a shape. Unknown IDs clear the selection.
    pub fn select(&mut self, id: ShapeId) {
        self.selection = self.document.get_shape(id).map(|_| id);
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Currently selected shape ID.
    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    /// Currently selected shape.
    pub fn selected_shape(&self) -> Option<&Ellipse> {
        self.selection.and_then(|id| self.document.get_shape(id))
    }

    fn selected_shape_mut(&mut self) -> Option<&mut Ellipse> {
        let id = self.selection?;
        self.document.get_shape_mut(id)
    }

    /// Translate the selected shape. No-op without a selection.
    pub fn move_selected(&mut self, offset: Vec2) {
        if let Some(shape) = self.selected_shape_mut() {
            shape.translate(offset);
        }
    }

    /// Remove a shape from the canvas, dropping it from the selection.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Ellipse> {
        if self.selection == Some(id) {
            self.selection = None;
            self.tool_manager.end();
        }
        let removed = self.document.remove_shape(id);
        if removed.is_some() {
            log::debug!("Removed shape {}", id);
        }
        removed
    }

    /// Delete the selected shape. Returns true if something was removed.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.remove_shape(id).is_some(),
            None => false,
        }
    }

    /// Current interaction mode.
    pub fn mode(&self) -> Mode {
        self.tool_manager.mode
    }

    /// Replace the interaction mode, ending any gesture in progress.
    /// Returns true if the mode or the canvas changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        let discarded = self.end_gesture();
        let previous = self.tool_manager.mode;
        if previous != mode {
            log::info!("Mode: {} -> {}", previous.name(), mode.name());
        }
        self.tool_manager.set_mode(mode);
        discarded || previous != mode
    }

    /// Handle a primary-button press. Returns true if the canvas changed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        match self.tool_manager.mode {
            Mode::Draw => {
                let fill = self.tool_manager.next_fill();
                let id = self
                    .document
                    .add_shape(Ellipse::from_anchor(point, point).with_fill(fill));
                self.select(id);
                self.tool_manager.begin_sizing(point);
                true
            }
            mode if mode.picks_shapes() => {
                let previous = self.selection;
                match self.find_topmost_hit(point) {
                    Some(id) => {
                        self.select(id);
                        self.tool_manager.begin_drag(point);
                    }
                    None => {
                        self.clear_selection();
                        self.tool_manager.end();
                    }
                }
                if previous != self.selection {
                    log::debug!("Selection changed: {:?} -> {:?}", previous, self.selection);
                }
                previous != self.selection
            }
            _ => false,
        }
    }

    /// Handle pointer motion. Returns true if the canvas changed.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        match self.tool_manager.state {
            ToolState::Idle => false,
            ToolState::Sizing { anchor } => {
                let Some(shape) = self.selected_shape_mut() else {
                    return false;
                };
                shape.fit_to_anchor(anchor, point);
                true
            }
            ToolState::Dragging { last, return_to } => {
                let offset = point - last;
                self.move_selected(offset);
                self.tool_manager.state = ToolState::Dragging {
                    last: point,
                    return_to,
                };
                offset != Vec2::ZERO
            }
        }
    }

    /// Handle a primary-button release. Selection is kept.
    ///
    /// An ellipse drawn without reaching a nonzero size on both axes is
    /// removed again.
    pub fn pointer_up(&mut self, point: Point) -> bool {
        let changed = self.pointer_move(point);
        self.end_gesture() || changed
    }

    /// Abort the gesture in progress without applying further motion.
    /// Returns true if the canvas changed.
    pub fn cancel_gesture(&mut self) -> bool {
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> bool {
        let sizing = matches!(self.tool_manager.state, ToolState::Sizing { .. });
        self.tool_manager.end();
        if !sizing {
            return false;
        }

        let degenerate = self
            .selected_shape()
            .filter(|shape| shape.is_degenerate())
            .map(Ellipse::id);
        match degenerate {
            Some(id) => {
                log::debug!("Discarding zero-size ellipse {}", id);
                self.remove_shape(id).is_some()
            }
            None => false,
        }
    }
}
