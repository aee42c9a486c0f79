// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, VLine};

use crate::drivers::plot::{FigureLayout, MARKER_ALPHA, MARKER_COLOR};

/// Read-only window over a finished recording.
pub struct RecordingViewer {
    layout: FigureLayout,
}

impl RecordingViewer {
    pub fn new(layout: FigureLayout) -> Self {
        Self { layout }
    }

    fn rgb([r, g, b]: [u8; 3]) -> Color32 {
        Color32::from_rgb(r, g, b)
    }

    fn marker_color() -> Color32 {
        let [r, g, b] = MARKER_COLOR;
        Color32::from_rgba_unmultiplied(r, g, b, (MARKER_ALPHA * 255.0) as u8)
    }
}

impl eframe::App for RecordingViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let count = self.layout.panels.len().max(1) as f32;
            // label row + spacing per panel
            let plot_height = (ui.available_height() / count - 28.0).max(80.0);
            let (x_min, x_max) = self.layout.x_range;

            for (idx, panel) in self.layout.panels.iter().enumerate() {
                ui.label(panel.y_label.as_str());
                Plot::new(format!("panel_{idx}"))
                    .height(plot_height)
                    .legend(Legend::default())
                    .include_x(x_min)
                    .include_x(x_max)
                    .show(ui, |plot_ui| {
                        for trace in &panel.traces {
                            let points: Vec<[f64; 2]> =
                                trace.points.iter().map(|&(x, y)| [x, y]).collect();
                            plot_ui.line(
                                Line::new(PlotPoints::new(points))
                                    .name(&trace.label)
                                    .color(Self::rgb(trace.color)),
                            );
                        }
                        for &t in &panel.markers {
                            plot_ui.vline(
                                VLine::new(t)
                                    .color(Self::marker_color())
                                    .style(LineStyle::dashed_loose()),
                            );
                        }
                    });
            }
            ui.label(self.layout.x_label.as_str());
        });
    }
}

/// Opens the plot window and blocks until it is closed.
pub fn show(layout: FigureLayout) -> eframe::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1400.0, 1000.0])
        .with_min_inner_size([800.0, 600.0])
        .with_title("IMU Recording");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "imu-plotter",
        options,
        Box::new(|_cc| Box::new(RecordingViewer::new(layout))),
    )
}
