//! Styled egui building blocks shared by the toolbar, dashboard and dialogs.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, Frame, Margin, Sense, Stroke, Ui, vec2,
};

/// Standard sizing constants.
pub mod sizing {
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Minimum width of tool selector buttons
    pub const TOOL_BUTTON_WIDTH: f32 = 64.0;
}

/// Standard colors.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Destructive action color (red)
    pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Window background behind the canvas
    pub const APP_BG: Color32 = Color32::from_rgb(238, 239, 242);
}

/// A toggle button with text label.
/// Uses solid blue background when selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    enabled: bool,
    min_width: Option<f32>,
    height: f32,
    font_size: f32,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            enabled: true,
            min_width: None,
            height: 28.0,
            font_size: 12.0,
        }
    }

    /// Render the button greyed out and ignore clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Button width for a label of the given width.
    fn width_for(&self, text_width: f32) -> f32 {
        self.min_width.unwrap_or(0.0).max(text_width + 16.0)
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(self.font_size);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let text_width = galley.size().x;
        let width = self.width_for(text_width);

        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if self.enabled && response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(245)
            };

            let text_color = match (self.selected, self.enabled) {
                (true, _) => Color32::WHITE,
                (false, true) => Color32::from_gray(80),
                (false, false) => Color32::from_gray(180),
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        if !self.enabled {
            return false;
        }
        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Solid accent button for the primary action of a dialog.
pub fn primary_btn(ui: &mut Ui, label: &str) -> bool {
    filled_btn(ui, label, theme::ACCENT, Color32::WHITE)
}

/// Solid red button for destructive confirmations.
pub fn danger_btn(ui: &mut Ui, label: &str) -> bool {
    filled_btn(ui, label, theme::DANGER, Color32::WHITE)
}

/// Neutral button.
pub fn secondary_btn(ui: &mut Ui, label: &str) -> bool {
    ToggleButton::new(label, false).show(ui)
}

fn filled_btn(ui: &mut Ui, label: &str, fill: Color32, text: Color32) -> bool {
    let button = egui::Button::new(egui::RichText::new(label).size(12.0).color(text))
        .fill(fill)
        .corner_radius(CornerRadius::same(sizing::CORNER_RADIUS))
        .min_size(vec2(72.0, 28.0));
    ui.add(button)
        .on_hover_cursor(CursorIcon::PointingHand)
        .clicked()
}

/// Single-line text input with a fixed width.
pub fn input_text(ui: &mut Ui, text: &mut String, width: f32, hint: &str) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(text)
            .desired_width(width)
            .hint_text(hint),
    )
}

/// Draw a vertical separator line (small height).
pub fn vertical_separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let height = 18.0;
    let x = rect.left() + 1.0;
    let top = rect.center().y - height / 2.0;
    ui.painter().line_segment(
        [egui::Pos2::new(x, top), egui::Pos2::new(x, top + height)],
        Stroke::new(1.0, Color32::from_gray(210)),
    );
    ui.add_space(4.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// Create a standard panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(12))
}

/// Create a toolbar panel frame (slightly different padding).
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}
