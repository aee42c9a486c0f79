use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::coord::Shift;
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::CaptureError;
use crate::types::Recording;
pub const MARKER_COLOR: [u8; 3] = [255, 0, 0];
pub const MARKER_ALPHA: f64 = 0.6;
/// One named line on a panel.
#[derive(Clone, Debug)]
pub struct Trace {
    pub label: String,
    pub color: [u8; 3],
    pub points: Vec<(f64, f64)>,
}
#[derive(Clone, Debug)]
pub struct Panel {
    pub y_label: String,
    pub traces: Vec<Trace>,
    /// x positions of the vertical event lines
    pub markers: Vec<f64>,
}
impl Panel {
    fn y_bounds(&self) -> (f64, f64) {
        let (lo, hi) = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.1))
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return (-1.0, 1.0);
        }
        if (hi - lo).abs() < f64::EPSILON {
            return (lo - 1.0, hi + 1.0);
        }
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }
}
/// Stacked panels sharing a time axis.
#[derive(Clone, Debug)]
pub struct FigureLayout {
    pub x_label: String,
    pub x_range: (f64, f64),
    pub panels: Vec<Panel>,
}
impl FigureLayout {
    /// Accelerometer, gyro and smoothed total acceleration, top to bottom, each
    /// carrying a marker at every button release.
    pub fn from_recording(recording: &Recording) -> Self {
        let time = recording.timestamps();
        let trace = |label: &str, color: [u8; 3], values: Vec<f64>| Trace {
            label: label.to_string(),
            color,
            points: time.iter().copied().zip(values).collect(),
        };
        let markers = recording.button_fall_events.clone();
        let panels = vec![
            Panel {
                y_label: "Accel (g)".into(),
                traces: vec![
                    trace("Ax", [255, 0, 0], recording.accel_x()),
                    trace("Ay", [0, 0, 255], recording.accel_y()),
                    trace("Az", [0, 128, 0], recording.accel_z()),
                ],
                markers: markers.clone(),
            },
            Panel {
                y_label: "Gyro (°/s)".into(),
                traces: vec![
                    trace("Gx", [255, 165, 0], recording.gyro_x()),
                    trace("Gy", [128, 0, 128], recording.gyro_y()),
                    trace("Gz", [0, 255, 255], recording.gyro_z()),
                ],
                markers: markers.clone(),
            },
            Panel {
                y_label: "Total Accel (g)".into(),
                traces: vec![trace(
                    "Total Accel",
                    [165, 42, 42],
                    recording.filtered_total_accel.clone(),
                )],
                markers,
            },
        ];
        let end = recording.duration_seconds();
        Self {
            x_label: "Time (s)".into(),
            x_range: (0.0, if end > 0.0 { end } else { 1.0 }),
            panels,
        }
    }
}
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub foreground: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1200,
            background: WHITE,
            foreground: BLACK,
        }
    }
}
pub fn render_figure_png(
    layout: &FigureLayout,
    style: PlotStyle,
) -> Result<Vec<u8>, CaptureError> {
    if layout.panels.is_empty() {
        return Err(CaptureError::Plot("figure has no panels".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let areas = root.split_evenly((layout.panels.len(), 1));
        let last = layout.panels.len() - 1;
        for (idx, (area, panel)) in areas.iter().zip(&layout.panels).enumerate() {
            let x_label = (idx == last).then_some(layout.x_label.as_str());
            draw_panel(area, panel, layout.x_range, x_label, &style)?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel,
    x_range: (f64, f64),
    x_label: Option<&str>,
    style: &PlotStyle,
) -> Result<(), CaptureError> {
    let (y_min, y_max) = panel.y_bounds();
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x_range.0..x_range.1, y_min..y_max)?;
    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(style.foreground.mix(0.1))
        .y_desc(panel.y_label.as_str());
    if let Some(label) = x_label {
        mesh.x_desc(label);
    }
    mesh.draw()?;
    for trace in &panel.traces {
        let [r, g, b] = trace.color;
        let color = RGBColor(r, g, b);
        chart
            .draw_series(LineSeries::new(trace.points.iter().copied(), &color))?
            .label(trace.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }
    let [r, g, b] = MARKER_COLOR;
    let marker = RGBColor(r, g, b).mix(MARKER_ALPHA);
    for &t in &panel.markers {
        chart.draw_series(LineSeries::new(vec![(t, y_min), (t, y_max)], marker))?;
    }
    chart
        .configure_series_labels()
        .border_style(style.foreground.mix(0.2))
        .background_style(style.background.mix(0.8))
        .draw()?;
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, CaptureError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| CaptureError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
