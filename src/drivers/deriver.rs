//! Per-sample derived signals.
//!
//! - Total acceleration: `ay² + (az + 1)² − gx / 100`. The `+1` removes the
//!   1 g gravity reading on a face-up z axis; the gyro term is a small
//!   rotation correction. This is a custom motion metric, not a magnitude.
//! - Button falling edges: a sample with button 0 following one with button 1
//!   yields that sample's timestamp. Rising edges are never reported.
//!
//! Edge detection carries state between samples, so it is written as a fold:
//! `step` takes the previous `DeriverState` and returns the next one.
use crate::types::Sample;
/// Accumulator threaded through `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeriverState {
    last_button: Option<u8>,
}
/// Output of one `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedPoint {
    pub total_accel: f64,
    pub fall_event: Option<f64>,
}
/// Derived series for a whole slice of samples.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DerivedSeries {
    pub total_accel: Vec<f64>,
    pub fall_events: Vec<f64>,
}
pub fn total_accel(sample: &Sample) -> f64 {
    let ay = sample.accel.y;
    let az = sample.accel.z;
    ay * ay + (az + 1.0) * (az + 1.0) - sample.gyro.x / 100.0
}
pub fn step(state: DeriverState, sample: &Sample) -> (DeriverState, DerivedPoint) {
    let fall_event = match (state.last_button, sample.button) {
        (Some(1), 0) => Some(sample.timestamp),
        _ => None,
    };
    let next = DeriverState {
        last_button: Some(sample.button),
    };
    let point = DerivedPoint {
        total_accel: total_accel(sample),
        fall_event,
    };
    (next, point)
}
#[cfg_attr(not(test), allow(dead_code))]
pub fn derive(samples: &[Sample]) -> DerivedSeries {
    let (_, series) = samples.iter().fold(
        (DeriverState::default(), DerivedSeries::default()),
        |(state, mut series), sample| {
            let (next, point) = step(state, sample);
            series.total_accel.push(point.total_accel);
            if let Some(t) = point.fall_event {
                series.fall_events.push(t);
            }
            (next, series)
        },
    );
    series
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Axes;
    fn sample(index: u64, gyro: Axes, accel: Axes, button: u8) -> Sample {
        Sample {
            index,
            timestamp: index as f64 * 0.01,
            gyro,
            accel,
            button,
        }
    }
    fn with_button(index: u64, button: u8) -> Sample {
        sample(index, Axes::default(), Axes::default(), button)
    }
    #[test]
    fn resting_sample_has_unit_total_accel() {
        let s = sample(0, Axes::default(), Axes::default(), 0);
        assert_eq!(total_accel(&s), 1.0);
    }
    #[test]
    fn total_accel_combines_ay_az_and_gyro_x() {
        let s = sample(0, Axes::new(50.0, 9.0, 9.0), Axes::new(7.0, 2.0, -3.0), 0);
        // 2² + (-3 + 1)² - 50 / 100
        assert!((total_accel(&s) - 7.5).abs() < 1e-12);
    }
    #[test]
    fn only_one_to_zero_transitions_emit_events() {
        let samples: Vec<Sample> = [1, 1, 0, 0, 1, 0]
            .iter()
            .enumerate()
            .map(|(i, &b)| with_button(i as u64, b))
            .collect();
        let series = derive(&samples);
        assert_eq!(series.total_accel.len(), samples.len());
        assert_eq!(series.fall_events.len(), 2);
        assert!((series.fall_events[0] - 0.02).abs() < 1e-12);
        assert!((series.fall_events[1] - 0.05).abs() < 1e-12);
    }
    #[test]
    fn first_sample_never_emits() {
        let (state, point) = step(DeriverState::default(), &with_button(0, 0));
        assert_eq!(point.fall_event, None);
        assert_eq!(state.last_button, Some(0));
    }
    #[test]
    fn rising_edges_and_steady_levels_are_silent() {
        let samples: Vec<Sample> = [0, 0, 1, 1, 1]
            .iter()
            .enumerate()
            .map(|(i, &b)| with_button(i as u64, b))
            .collect();
        assert!(derive(&samples).fall_events.is_empty());
    }
    #[test]
    fn step_threads_state_between_calls() {
        let (state, _) = step(DeriverState::default(), &with_button(0, 1));
        let (state, point) = step(state, &with_button(1, 0));
        assert_eq!(point.fall_event, Some(0.01));
        let (_, point) = step(state, &with_button(2, 0));
        assert_eq!(point.fall_event, None);
    }
}
