//! UI components using egui.

use egui::{
    Align, Align2, Color32, Context, CornerRadius, Frame, Key, KeyboardShortcut, Layout, Margin,
    Modifiers, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2, pos2,
};
use kurbo::Point;
use scribble_core::drawings::DrawingRecord;
use scribble_core::shapes::{Shape, normalized_rect};
use scribble_core::tools::{ToolKind, brush_width_range};
use scribble_core::{Editor, Rgba8, Route};

use crate::widgets::{
    ToggleButton, danger_btn, input_text, panel_frame, primary_btn, secondary_btn,
    section_label, sizing, theme, toolbar_frame, vertical_separator,
};

/// A stored drawing as listed on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSummary {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

impl From<&DrawingRecord> for DrawingSummary {
    fn from(record: &DrawingRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            created_at: record.created_at.clone(),
        }
    }
}

/// UI state and actions.
pub struct UiState {
    /// Screen being shown.
    pub route: Route,
    /// Name of the signed-in user, if any.
    pub user_name: Option<String>,
    /// Sign-in name being typed.
    pub name_input: String,
    /// The user's drawings (dashboard).
    pub drawings: Vec<DrawingSummary>,
    /// Title shown for drawings without one.
    pub default_title: String,
    /// Title field contents.
    pub title_input: String,
    /// Currently selected tool (mirrored from the editor).
    pub current_tool: ToolKind,
    /// Current stroke color; edited by the color well.
    pub color: Color32,
    /// Hex field contents; may hold a half-typed value.
    pub hex_input: String,
    /// Brush width slider value.
    pub brush_width: u32,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Whether the clear confirmation is open.
    pub clear_confirm_open: bool,
    /// Last status message (save results, errors).
    pub status: Option<String>,
    /// Primary button went down on the canvas and has not been released.
    pointer_down: bool,
    last_pointer: Option<Pos2>,
}

impl Default for UiState {
    fn default() -> Self {
        let color = Rgba8::BLACK;
        Self {
            route: Route::default(),
            user_name: None,
            name_input: String::new(),
            drawings: Vec::new(),
            default_title: String::new(),
            title_input: String::new(),
            current_tool: ToolKind::default(),
            color: to_color32(color),
            hex_input: color.to_hex(),
            brush_width: 5,
            can_undo: false,
            can_redo: false,
            clear_confirm_open: false,
            status: None,
            pointer_down: false,
            last_pointer: None,
        }
    }
}

impl UiState {
    pub fn new(default_title: impl Into<String>, user_name: Option<String>) -> Self {
        Self {
            default_title: default_title.into(),
            user_name,
            ..Self::default()
        }
    }

    /// Mirror the editor's controls after it changed.
    pub fn sync_from_editor(&mut self, editor: &Editor) {
        self.current_tool = editor.tool();
        self.brush_width = editor.brush_width();
        self.can_undo = editor.can_undo();
        self.can_redo = editor.can_redo();

        let color = to_color32(editor.color());
        if color != self.color {
            self.color = color;
            self.hex_input = editor.color().to_hex();
        }
    }

    /// Reset per-drawing fields when an editor is mounted.
    pub fn reset_for_editor(&mut self, editor: &Editor) {
        self.title_input = editor.title().to_string();
        self.clear_confirm_open = false;
        self.pointer_down = false;
        self.last_pointer = None;
        self.color = to_color32(editor.color());
        self.hex_input = editor.color().to_hex();
        self.sync_from_editor(editor);
    }

    /// Parse the hex field. Invalid text is left as typed and yields `None`.
    fn parse_hex_input(&mut self) -> Option<Rgba8> {
        let color = Rgba8::from_hex(&self.hex_input)?;
        self.color = to_color32(color);
        Some(color)
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Go back to the drawing list.
    OpenDashboard,
    /// Start a new drawing.
    NewDrawing,
    /// Edit a stored drawing.
    OpenDrawing(String),
    /// Delete a stored drawing.
    DeleteDrawing(String),
    /// Sign in under a display name.
    SignIn(String),
    SignOut,
    /// Create the editor with a bitmap of this size (physical pixels).
    MountCanvas { width: u32, height: u32 },
    SetTool(ToolKind),
    SetColor(Rgba8),
    SetBrushWidth(u32),
    SetTitle(String),
    Undo,
    Redo,
    /// Clear the canvas (already confirmed).
    Clear,
    Save,
    Download,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    PointerLeave,
}

/// What the canvas area needs to draw the mounted editor.
pub struct CanvasView<'a> {
    pub texture: &'a egui::TextureHandle,
    /// Bitmap size in physical pixels.
    pub size: [u32; 2],
    /// Pending shape with its color and width, drawn as an overlay.
    pub preview: Option<(Shape, Rgba8, f64)>,
}

/// Render all UI and return the triggered actions in order.
pub fn render_ui(
    ctx: &Context,
    ui_state: &mut UiState,
    canvas: Option<CanvasView<'_>>,
) -> Vec<UiAction> {
    let mut actions = Vec::new();

    if ui_state.route.is_editor() {
        render_shortcuts(ctx, &mut actions);
        render_toolbar(ctx, ui_state, &mut actions);
        render_canvas(ctx, ui_state, canvas, &mut actions);
        if ui_state.clear_confirm_open {
            render_clear_dialog(ctx, ui_state, &mut actions);
        }
    } else {
        render_dashboard(ctx, ui_state, &mut actions);
    }

    actions
}

fn render_shortcuts(ctx: &Context, actions: &mut Vec<UiAction>) {
    if ctx.wants_keyboard_input() {
        return;
    }
    let redo = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
    let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
    let save = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);

    ctx.input_mut(|i| {
        if i.consume_shortcut(&redo) {
            actions.push(UiAction::Redo);
        } else if i.consume_shortcut(&undo) {
            actions.push(UiAction::Undo);
        }
        if i.consume_shortcut(&save) {
            actions.push(UiAction::Save);
        }
    });
}

/// Render the editor toolbar.
fn render_toolbar(ctx: &Context, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    egui::TopBottomPanel::top("toolbar")
        .frame(Frame::new().fill(theme::APP_BG).inner_margin(Margin::same(8)))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(6.0, 4.0);

                    if ui.link("← Dashboard").clicked() {
                        actions.push(UiAction::OpenDashboard);
                    }
                    vertical_separator(ui);

                    let title = input_text(ui, &mut ui_state.title_input, 180.0, &ui_state.default_title);
                    if title.changed() {
                        actions.push(UiAction::SetTitle(ui_state.title_input.clone()));
                    }
                    vertical_separator(ui);

                    for tool in ToolKind::ALL {
                        let selected = ui_state.current_tool == tool;
                        if ToggleButton::new(tool.label(), selected)
                            .min_width(sizing::TOOL_BUTTON_WIDTH)
                            .show(ui)
                        {
                            actions.push(UiAction::SetTool(tool));
                        }
                    }
                    vertical_separator(ui);

                    render_color_inputs(ui, ui_state, actions);

                    let slider = egui::Slider::new(&mut ui_state.brush_width, brush_width_range())
                        .text("Size");
                    if ui.add(slider).changed() {
                        actions.push(UiAction::SetBrushWidth(ui_state.brush_width));
                    }
                    vertical_separator(ui);

                    if ToggleButton::new("Undo", false).enabled(ui_state.can_undo).show(ui) {
                        actions.push(UiAction::Undo);
                    }
                    if ToggleButton::new("Redo", false).enabled(ui_state.can_redo).show(ui) {
                        actions.push(UiAction::Redo);
                    }
                    if ToggleButton::new("Clear", false).show(ui) {
                        ui_state.clear_confirm_open = true;
                    }
                    if primary_btn(ui, "Save") {
                        actions.push(UiAction::Save);
                    }
                    if secondary_btn(ui, "Download") {
                        actions.push(UiAction::Download);
                    }

                    if let Some(status) = &ui_state.status {
                        vertical_separator(ui);
                        section_label(ui, status);
                    }
                });
            });
        });
}

/// Hex text field and color well, both editing the stroke color.
fn render_color_inputs(ui: &mut egui::Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    let well = egui::color_picker::color_edit_button_srgba(
        ui,
        &mut ui_state.color,
        egui::color_picker::Alpha::Opaque,
    );
    if well.changed() {
        let color = from_color32(ui_state.color);
        ui_state.hex_input = color.to_hex();
        actions.push(UiAction::SetColor(color));
    }

    let hex = input_text(ui, &mut ui_state.hex_input, 72.0, "#000000");
    if hex.changed() {
        if let Some(color) = ui_state.parse_hex_input() {
            actions.push(UiAction::SetColor(color));
        }
    }
}

/// Render the canvas and translate pointer input into canvas coordinates.
fn render_canvas(
    ctx: &Context,
    ui_state: &mut UiState,
    canvas: Option<CanvasView<'_>>,
    actions: &mut Vec<UiAction>,
) {
    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::APP_BG).inner_margin(Margin::same(16)))
        .show(ctx, |ui| {
            let ppp = ctx.pixels_per_point();

            let Some(canvas) = canvas else {
                let available = ui.available_size();
                let width = (available.x * ppp).floor().max(1.0) as u32;
                let height = (available.y * ppp).floor().max(1.0) as u32;
                actions.push(UiAction::MountCanvas { width, height });
                return;
            };

            let size = Vec2::new(canvas.size[0] as f32, canvas.size[1] as f32) / ppp;
            let (rect, response) = ui.allocate_exact_size(size, Sense::drag());
            let painter = ui.painter_at(rect);

            painter.image(
                canvas.texture.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
            ui.painter().rect_stroke(
                rect,
                CornerRadius::ZERO,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Outside,
            );

            if let Some((shape, color, width)) = canvas.preview {
                paint_preview(&painter, rect.min, ppp, &shape, color, width);
            }

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }

            let (pressed, primary_down, pos) = ui.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_down(),
                    i.pointer.latest_pos(),
                )
            });

            if !ui_state.pointer_down && pressed && response.hovered() {
                if let Some(pos) = pos.filter(|p| rect.contains(*p)) {
                    ui_state.pointer_down = true;
                    ui_state.last_pointer = Some(pos);
                    actions.push(UiAction::PointerDown(to_canvas_point(pos, rect.min, ppp)));
                }
            }

            if ui_state.pointer_down {
                match pos.filter(|p| rect.contains(*p)) {
                    None => {
                        ui_state.pointer_down = false;
                        ui_state.last_pointer = None;
                        actions.push(UiAction::PointerLeave);
                    }
                    Some(pos) => {
                        if ui_state.last_pointer != Some(pos) {
                            ui_state.last_pointer = Some(pos);
                            actions.push(UiAction::PointerMove(to_canvas_point(pos, rect.min, ppp)));
                        }
                        if !primary_down {
                            ui_state.pointer_down = false;
                            ui_state.last_pointer = None;
                            actions.push(UiAction::PointerUp(to_canvas_point(pos, rect.min, ppp)));
                        }
                    }
                }
            }
        });
}

/// Draw the pending shape on top of the canvas image.
fn paint_preview(
    painter: &egui::Painter,
    origin: Pos2,
    ppp: f32,
    shape: &Shape,
    color: Rgba8,
    width: f64,
) {
    let stroke = Stroke::new(width as f32 / ppp, to_color32(color));
    let to_screen = |p: Point| to_screen_pos(p, origin, ppp);

    match *shape {
        Shape::Line { start, end } => {
            painter.line_segment([to_screen(start), to_screen(end)], stroke);
        }
        Shape::Rectangle { origin: start, extent } => {
            let bounds = normalized_rect(start, extent);
            let rect = Rect::from_min_max(
                to_screen(Point::new(bounds.x0, bounds.y0)),
                to_screen(Point::new(bounds.x1, bounds.y1)),
            );
            painter.rect_stroke(rect, CornerRadius::ZERO, stroke, StrokeKind::Middle);
        }
        Shape::Circle { center, radius } => {
            painter.circle_stroke(to_screen(center), radius as f32 / ppp, stroke);
        }
    }
}

/// Confirmation modal shown before clearing the canvas.
fn render_clear_dialog(ctx: &Context, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    // Backdrop
    egui::Area::new(egui::Id::new("clear_dialog_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, Sense::click());
            ui.painter()
                .rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            if response.clicked() {
                ui_state.clear_confirm_open = false;
            }
        });

    egui::Area::new(egui::Id::new("clear_dialog"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(280.0);
                ui.label(
                    egui::RichText::new("Clear canvas?")
                        .size(16.0)
                        .strong()
                        .color(theme::TEXT),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("Everything on the canvas will be erased.")
                        .size(12.0)
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if secondary_btn(ui, "Cancel") {
                        ui_state.clear_confirm_open = false;
                    }
                    if danger_btn(ui, "Clear") {
                        ui_state.clear_confirm_open = false;
                        actions.push(UiAction::Clear);
                    }
                });
            });
        });
}

/// Render the drawing list, or the sign-in form when nobody is signed in.
fn render_dashboard(ctx: &Context, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    egui::CentralPanel::default()
        .frame(Frame::new().fill(theme::APP_BG).inner_margin(Margin::same(24)))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(560.0);
                panel_frame().show(ui, |ui| {
                    ui.set_width(520.0);
                    match ui_state.user_name.clone() {
                        None => render_sign_in(ui, ui_state, actions),
                        Some(name) => render_drawing_list(ui, ui_state, &name, actions),
                    }
                });
            });
        });
}

fn render_sign_in(ui: &mut egui::Ui, ui_state: &mut UiState, actions: &mut Vec<UiAction>) {
    ui.label(
        egui::RichText::new("Welcome to Scribble")
            .size(18.0)
            .strong()
            .color(theme::TEXT),
    );
    ui.add_space(8.0);
    section_label(ui, "Choose a name to keep your drawings under.");
    ui.add_space(8.0);

    let response = input_text(ui, &mut ui_state.name_input, 240.0, "Your name");
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let name = ui_state.name_input.trim();
        if (primary_btn(ui, "Continue") || submitted) && !name.is_empty() {
            actions.push(UiAction::SignIn(name.to_string()));
        }
        if secondary_btn(ui, "Draw without saving") {
            actions.push(UiAction::NewDrawing);
        }
    });
}

fn render_drawing_list(
    ui: &mut egui::Ui,
    ui_state: &UiState,
    user_name: &str,
    actions: &mut Vec<UiAction>,
) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("Your drawings")
                .size(18.0)
                .strong()
                .color(theme::TEXT),
        );
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if secondary_btn(ui, "Sign out") {
                actions.push(UiAction::SignOut);
            }
            section_label(ui, user_name);
        });
    });
    ui.add_space(12.0);

    if primary_btn(ui, "New drawing") {
        actions.push(UiAction::NewDrawing);
    }
    ui.add_space(12.0);

    if ui_state.drawings.is_empty() {
        section_label(ui, "No drawings yet.");
    }

    egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
        for drawing in &ui_state.drawings {
            ui.horizontal(|ui| {
                let title = if drawing.title.trim().is_empty() {
                    ui_state.default_title.as_str()
                } else {
                    drawing.title.as_str()
                };
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).size(13.0).color(theme::TEXT));
                    section_label(ui, display_date(&drawing.created_at));
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ToggleButton::new("Delete", false).show(ui) {
                        actions.push(UiAction::DeleteDrawing(drawing.id.clone()));
                    }
                    if ToggleButton::new("Open", false).show(ui) {
                        actions.push(UiAction::OpenDrawing(drawing.id.clone()));
                    }
                });
            });
            ui.separator();
        }
    });

    if let Some(status) = &ui_state.status {
        ui.add_space(8.0);
        section_label(ui, status);
    }
}

/// The date part of an ISO timestamp.
fn display_date(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}

fn to_canvas_point(pos: Pos2, origin: Pos2, ppp: f32) -> Point {
    Point::new(
        ((pos.x - origin.x) * ppp) as f64,
        ((pos.y - origin.y) * ppp) as f64,
    )
}

fn to_screen_pos(point: Point, origin: Pos2, ppp: f32) -> Pos2 {
    Pos2::new(
        origin.x + point.x as f32 / ppp,
        origin.y + point.y as f32 / ppp,
    )
}

pub(crate) fn to_color32(color: Rgba8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn from_color32(color: Color32) -> Rgba8 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba8::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_point_mapping() {
        let origin = Pos2::new(16.0, 60.0);
        let point = to_canvas_point(Pos2::new(26.0, 80.0), origin, 2.0);
        assert_eq!(point, Point::new(20.0, 40.0));
        assert_eq!(to_screen_pos(point, origin, 2.0), Pos2::new(26.0, 80.0));
    }

    #[test]
    fn test_color_conversion() {
        let color = Rgba8::rgb(12, 200, 99);
        assert_eq!(from_color32(to_color32(color)), color);
    }

    #[test]
    fn test_invalid_hex_keeps_color() {
        let mut state = UiState::default();
        state.hex_input = "#12".to_string();
        assert_eq!(state.parse_hex_input(), None);
        assert_eq!(state.color, Color32::BLACK);
        assert_eq!(state.hex_input, "#12");

        state.hex_input = "#ff0000".to_string();
        assert_eq!(state.parse_hex_input(), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(state.color, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-05-01T10:00:00.000Z"), "2024-05-01");
        assert_eq!(display_date("short"), "short");
    }

    #[test]
    fn test_summary_from_record() {
        let record = DrawingRecord {
            id: "d1".to_string(),
            title: "Cat".to_string(),
            image: String::new(),
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
            user_id: "u1".to_string(),
        };
        let summary = DrawingSummary::from(&record);
        assert_eq!(summary.id, "d1");
        assert_eq!(summary.title, "Cat");
    }
}
