use super::{App, Config};
use eframe::egui::{vec2, Button, Color32, Rect, RichText, Sense, Slider, Stroke, Ui, Vec2};

impl App {
    fn new_text(text: &str) -> RichText {
        RichText::new(text)
            .color(Config::TEXT_COLOR)
            .size(Config::TEXT_SIZE)
    }

    fn new_button(text: &str) -> Button {
        Button::new(Self::new_text(text))
            .fill(Config::BUTTON_FILL_COLOR)
            .stroke(Stroke::new(
                Config::BUTTON_STROKE_WIDTH,
                Config::BUTTON_STROKE_COLOR,
            ))
    }

    /// Young cells are green, long-lived ones drift towards blue.
    fn cell_color(alive_duration: u64) -> Color32 {
        let age = alive_duration.min(Config::AGE_SATURATION) as f32 / Config::AGE_SATURATION as f32;
        let (young, old) = (Config::YOUNG_COLOR, Config::OLD_COLOR);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * age) as u8;
        Color32::from_rgb(
            mix(young.r(), old.r()),
            mix(young.g(), old.g()),
            mix(young.b(), old.b()),
        )
    }

    pub(super) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            let running = self.control.is_active();
            let text = if running { "Pause" } else { "Play" };
            if ui.add(Self::new_button(text)).clicked() {
                self.control.set_active(!running);
            }

            if ui
                .add_enabled(!running, Self::new_button("Next step"))
                .clicked()
            {
                self.grid.lock().update_grid();
            }

            ui.horizontal(|ui| {
                if ui.add(Self::new_button("Clear")).clicked() {
                    self.grid.lock().reset();
                }
                if ui.add(Self::new_button("Randomize")).clicked() {
                    self.randomize();
                }
            });

            ui.add_space(Config::WIDGET_GAP);

            ui.label(Self::new_text("Updates per second:"));
            let slider = Slider::new(
                &mut self.target_fps,
                crate::Config::MIN_FPS..=crate::Config::MAX_FPS,
            )
            .logarithmic(true);
            if ui.add(slider).changed() {
                self.set_target_rate();
            }

            ui.horizontal(|ui| {
                ui.label(Self::new_text("Fill rate:"));
                ui.add(Slider::new(&mut self.fill_rate, 0.0..=1.0));
            });

            ui.add_space(Config::WIDGET_GAP);

            let (generation, population, interval) = {
                let grid = self.grid.lock();
                (grid.generation(), grid.population(), grid.sleep_interval())
            };
            ui.label(Self::new_text(&format!("Generation: {generation}")));
            ui.label(Self::new_text(&format!("Population: {population}")));
            ui.label(Self::new_text(&format!(
                "Tick interval: {} ms",
                interval.as_millis()
            )));
            ui.label(Self::new_text(&format!(
                "Measured rate: {:.1} / s",
                self.control.measured_rate()
            )));
        });
    }

    pub(super) fn draw_field(&mut self, ui: &mut Ui) {
        let area = ui.available_size();
        let cell_px = (area.x / self.cols as f32)
            .min(area.y / self.rows as f32)
            .max(1.);
        let size = vec2(cell_px * self.cols as f32, cell_px * self.rows as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::click());
        let origin = response.rect.min;

        for (i, state) in self.canvas.iter().enumerate() {
            if !state.is_alive() {
                continue;
            }
            let (row, col) = (i / self.cols, i % self.cols);
            let min = origin + vec2(col as f32 * cell_px, row as f32 * cell_px);
            let rect = Rect::from_min_size(min, Vec2::splat(cell_px)).shrink(Config::CELL_GAP);
            painter.rect_filled(rect, 0., Self::cell_color(state.alive_duration));
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                let (row, col) = ((offset.y / cell_px) as usize, (offset.x / cell_px) as usize);
                if let Err(err) = self.grid.lock().toggle_cell(row, col) {
                    tracing::debug!(%err, "click outside of the field");
                }
            }
        }
    }
}
