use thiserror::Error;
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("failed to open serial port {port} at {baud} baud: {source}")]
    Connection {
        port: String,
        baud: u32,
        #[source]
        source: serialport::Error,
    },
    #[error("serial read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("smoothing window must be at least 1")]
    InvalidWindow,
    #[error("not enough samples to smooth: need at least {needed}, got {actual}")]
    InsufficientData { needed: usize, actual: usize },
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for CaptureError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        CaptureError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for CaptureError {
    fn from(value: image::ImageError) -> Self {
        CaptureError::Plot(value.to_string())
    }
}
