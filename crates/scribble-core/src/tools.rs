//! Tool system for the drawing surface.

use crate::color::Rgba8;
use crate::shapes::Shape;
use crate::surface::Pen;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Smallest brush width the size slider allows.
pub const MIN_BRUSH_WIDTH: u32 = 1;
/// Largest brush width the size slider allows.
pub const MAX_BRUSH_WIDTH: u32 = 50;
/// Eraser strokes are this many times wider than the brush.
pub const ERASER_WIDTH_FACTOR: f64 = 3.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Line,
    Rectangle,
    Circle,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    /// Free-hand tools paint continuously while the pointer moves.
    pub fn is_freehand(self) -> bool {
        matches!(self, ToolKind::Pencil | ToolKind::Eraser)
    }

    /// Shape tools paint once, on release.
    pub fn is_shape(self) -> bool {
        !self.is_freehand()
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Line => "Line",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
        }
    }

    /// Build the shape this tool commits for a drag, if it is a shape tool.
    pub fn shape(self, start: Point, end: Point) -> Option<Shape> {
        match self {
            ToolKind::Line => Some(Shape::line(start, end)),
            ToolKind::Rectangle => Some(Shape::rectangle(start, end)),
            ToolKind::Circle => Some(Shape::circle(start, end)),
            ToolKind::Pencil | ToolKind::Eraser => None,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for pointer-down.
    #[default]
    Idle,
    /// Pointer is down and dragging.
    Dragging {
        /// Where the drag started.
        start: Point,
        /// Most recent pointer position.
        last: Point,
    },
}

/// What a finished drag produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeEnd {
    /// A free-hand path was completed; its pixels are already on the surface.
    Freehand,
    /// A shape to paint now.
    Shape(Shape),
}

/// Current tool, color, brush width and drag state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    color: Rgba8,
    brush_width: u32,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolKind::default(), Rgba8::BLACK, 5)
    }
}

impl ToolManager {
    pub fn new(tool: ToolKind, color: Rgba8, brush_width: u32) -> Self {
        Self {
            current_tool: tool,
            state: ToolState::Idle,
            color,
            brush_width: clamp_brush_width(brush_width),
        }
    }

    /// Set the current tool, abandoning any drag in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.color = color;
    }

    pub fn brush_width(&self) -> u32 {
        self.brush_width
    }

    /// Set the brush width, clamped to the slider bounds.
    pub fn set_brush_width(&mut self, width: u32) {
        self.brush_width = clamp_brush_width(width);
    }

    /// Pen for the current tool: eraser paints white at three times the width.
    pub fn pen(&self) -> Pen {
        let width = self.brush_width as f64;
        match self.current_tool {
            ToolKind::Eraser => Pen::new(Rgba8::WHITE, width * ERASER_WIDTH_FACTOR),
            _ => Pen::new(self.color, width),
        }
    }

    /// Begin a drag at `point`.
    pub fn begin(&mut self, point: Point) {
        self.state = ToolState::Dragging {
            start: point,
            last: point,
        };
    }

    /// Move the pointer while dragging.
    ///
    /// For free-hand tools returns the segment to paint. Shape tools only
    /// track the position for previews.
    pub fn update(&mut self, point: Point) -> Option<(Point, Point)> {
        let ToolState::Dragging { last, .. } = &mut self.state else {
            return None;
        };
        let previous = std::mem::replace(last, point);
        self.current_tool.is_freehand().then_some((previous, point))
    }

    /// End the drag at `point`. Returns `None` if no drag was in progress.
    pub fn end(&mut self, point: Point) -> Option<StrokeEnd> {
        let ToolState::Dragging { start, .. } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;
        Some(match self.current_tool.shape(start, point) {
            Some(shape) => StrokeEnd::Shape(shape),
            None => StrokeEnd::Freehand,
        })
    }

    /// Abandon the current drag without producing anything.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a drag is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Dragging { .. })
    }

    /// Shape that would be committed if the pointer were released now.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.state {
            ToolState::Dragging { start, last } => self.current_tool.shape(start, last),
            ToolState::Idle => None,
        }
    }
}

fn clamp_brush_width(width: u32) -> u32 {
    width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH)
}

/// Slider range for the brush width control.
pub fn brush_width_range() -> RangeInclusive<u32> {
    MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH
}
