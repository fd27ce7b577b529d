use super::Config;
use crate::{CellState, Control, SharedGrid, Snapshot};
use eframe::egui::{CentralPanel, Context, Frame, Key, Margin, SidePanel};
use std::{
    sync::mpsc::{self, Receiver},
    thread::JoinHandle,
};

/// Foreground collaborator: paints the grid from cell notifications and
/// drives the control signals.
pub struct App {
    pub(super) grid: SharedGrid,
    pub(super) control: Control,
    simulation: Option<JoinHandle<()>>, // Joined when the window goes away.
    changes: Receiver<(usize, usize, CellState)>, // Fed by the cell observers.
    pub(super) canvas: Vec<CellState>, // Last state seen for every cell, row-major.
    pub(super) rows: usize,
    pub(super) cols: usize,
    pub(super) target_fps: f64,
    pub(super) fill_rate: f64,
}

impl App {
    pub fn new(
        grid: SharedGrid,
        control: Control,
        simulation: JoinHandle<()>,
        fill_rate: f64,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let (rows, cols, canvas, target_fps) = {
            let mut grid = grid.lock();
            let (rows, cols) = grid.dimensions();
            grid.observe_all(move |row, col, state| {
                // the receiver is gone only while the app is being dropped
                let _ = tx.send((row, col, state));
            });

            let mut canvas = vec![CellState::default(); rows * cols];
            for (row, col, alive_duration) in grid.snapshot().alive_cells() {
                canvas[row * cols + col] = CellState {
                    value: 1,
                    alive_duration,
                };
            }
            let target_fps = 1. / grid.sleep_interval().as_secs_f64().max(1e-3);
            (rows, cols, canvas, target_fps)
        };

        Self {
            grid,
            control,
            simulation: Some(simulation),
            changes: rx,
            canvas,
            rows,
            cols,
            target_fps: target_fps.clamp(crate::Config::MIN_FPS, crate::Config::MAX_FPS),
            fill_rate,
        }
    }

    pub(super) fn randomize(&mut self) {
        let snapshot = Snapshot::random(self.rows, self.cols, None, self.fill_rate);
        if let Err(err) = self.grid.lock().restore(&snapshot) {
            tracing::error!(%err, "failed to randomize the field");
        }
    }

    pub(super) fn set_target_rate(&mut self) {
        if let Err(err) = self.grid.lock().set_target_rate(self.target_fps) {
            tracing::warn!(%err, "target rate not applied");
        }
    }

    /// Returns `true` if anything changed since the last call.
    fn apply_changes(&mut self) -> bool {
        let mut changed = false;
        for (row, col, state) in self.changes.try_iter() {
            self.canvas[row * self.cols + col] = state;
            changed = true;
        }
        changed
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (toggle_pause, step) =
            ctx.input(|input| (input.key_pressed(Key::E), input.key_pressed(Key::Space)));
        if toggle_pause {
            self.control.set_active(!self.control.is_active());
        }
        if step && !self.control.is_active() {
            self.grid.lock().update_grid();
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);
        self.apply_changes();

        SidePanel::left("controls")
            .exact_width(Config::CONTROL_PANEL_WIDTH)
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Config::FRAME_MARGIN))
                    .fill(Config::PANEL_FILL_COLOR),
            )
            .show(ctx, |ui| self.draw_controls(ui));

        CentralPanel::default()
            .frame(
                Frame::default()
                    .inner_margin(Margin::same(Config::FRAME_MARGIN))
                    .fill(Config::DEAD_COLOR),
            )
            .show(ctx, |ui| self.draw_field(ui));

        // edits made while drawing (clicks, buttons) are painted next frame
        if self.apply_changes() {
            ctx.request_repaint();
        }
        if self.control.is_active() {
            ctx.request_repaint_after(self.grid.lock().sleep_interval());
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.control.shutdown();
        if let Some(handle) = self.simulation.take() {
            if handle.join().is_err() {
                tracing::error!("simulation thread panicked");
            }
        }
    }
}
