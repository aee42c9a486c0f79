// src/drivers/mod.rs
pub mod deriver;
pub mod error;
pub mod frame;
pub mod pipeline;
pub mod plot;
pub mod simulator;
pub mod smoothing;
pub mod source;
pub use error::CaptureError;
pub use pipeline::CapturePipeline;
pub use plot::{render_figure_png, FigureLayout, PlotStyle};
pub use simulator::SimulatedDevice;
pub use smoothing::DEFAULT_WINDOW;
pub use source::{LineSource, SerialLineSource};
