use crate::drivers::CaptureError;
/// Window used for the total-acceleration trace.
pub const DEFAULT_WINDOW: usize = 5;
/// Trailing moving average that keeps the input length.
///
/// Non-standard padding: the first `window - 1` outputs are not partial-window
/// means. They repeat the first full-window mean, so `out[0..window-1]` all
/// equal `out[window - 1]`. Plots of the smoothed trace rely on this shape.
///
/// Each output is the sum of its own window divided by `window`, so
/// `window == 1` returns the input unchanged.
pub fn moving_average(series: &[f64], window: usize) -> Result<Vec<f64>, CaptureError> {
    if window == 0 {
        return Err(CaptureError::InvalidWindow);
    }
    if series.len() < window {
        return Err(CaptureError::InsufficientData {
            needed: window,
            actual: series.len(),
        });
    }
    let means: Vec<f64> = series
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect();
    let pad = means[0];
    let mut output = Vec::with_capacity(series.len());
    output.resize(window - 1, pad);
    output.extend(means);
    Ok(output)
}
