use eframe::egui::Color32;

pub struct Config;

impl Config {
    pub const FRAME_MARGIN: f32 = 20.;
    pub const CONTROL_PANEL_WIDTH: f32 = 260.;
    pub const TEXT_SIZE: f32 = 16.;
    pub const TEXT_COLOR: Color32 = Color32::BLACK;
    pub const BUTTON_STROKE_WIDTH: f32 = 3.;
    pub const BUTTON_STROKE_COLOR: Color32 = Color32::DARK_GRAY;
    pub const BUTTON_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;
    pub const PANEL_FILL_COLOR: Color32 = Color32::LIGHT_GRAY;

    pub const WIDGET_GAP: f32 = 20.;

    pub const DEAD_COLOR: Color32 = Color32::from_rgb(40, 40, 40);
    pub const YOUNG_COLOR: Color32 = Color32::from_rgb(120, 230, 120);
    pub const OLD_COLOR: Color32 = Color32::from_rgb(40, 90, 210);
    /// Alive duration at which a cell reaches `OLD_COLOR`.
    pub const AGE_SATURATION: u64 = 50;
    pub const CELL_GAP: f32 = 0.5;
}
