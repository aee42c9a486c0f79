use std::f64::consts::PI;
use std::time::Instant;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::frame::HEADER_TOKEN;
use crate::drivers::{CaptureError, LineSource};
/// Button is held for this long at the start of every cycle.
pub const PRESS_SECONDS: f64 = 1.0;
pub const CYCLE_SECONDS: f64 = 3.0;
/// Stand-in for the board when no hardware is attached.
///
/// Emits the same CSV lines the firmware does, paced by wall-clock time at
/// one line per sampling period, header echo first.
pub struct SimulatedDevice {
    started: Instant,
    sampling_period: f64,
    emitted: u64,
    header_sent: bool,
    glitch_probability: f64,
    rng: StdRng,
}
impl SimulatedDevice {
    pub fn new(sampling_period: f64) -> Self {
        Self::with_rng(sampling_period, StdRng::from_entropy())
    }
    pub fn with_seed(sampling_period: f64, seed: u64) -> Self {
        Self::with_rng(sampling_period, StdRng::seed_from_u64(seed))
    }
    fn with_rng(sampling_period: f64, rng: StdRng) -> Self {
        Self {
            started: Instant::now(),
            sampling_period,
            emitted: 0,
            header_sent: false,
            glitch_probability: 0.0,
            rng,
        }
    }
    /// Share of lines cut short mid-transmission, in `[0, 1]`.
    pub fn with_glitches(mut self, probability: f64) -> Self {
        self.glitch_probability = probability.clamp(0.0, 1.0);
        self
    }
    pub fn button_at(t: f64) -> u8 {
        if t % CYCLE_SECONDS < PRESS_SECONDS {
            1
        } else {
            0
        }
    }
    /// Line for the `n`-th tick of the simulated clock.
    pub fn frame_line(&mut self, n: u64) -> String {
        let t = n as f64 * self.sampling_period;
        let millis = (t * 1000.0).round() as u64;
        let phase = 2.0 * PI * t;
        let noise = 0.02;
        let gx = 15.0 * (phase * 0.5).sin() + self.rng.gen_range(-1.0..1.0);
        let gy = 10.0 * (phase * 0.3).cos() + self.rng.gen_range(-1.0..1.0);
        let gz = 5.0 * (phase * 0.7).sin() + self.rng.gen_range(-1.0..1.0);
        let ax = 0.1 * (phase * 0.2).sin() + self.rng.gen_range(-noise..noise);
        let ay = 0.3 * (phase * 0.5).sin() + self.rng.gen_range(-noise..noise);
        let az = -1.0 + 0.1 * (phase * 0.4).cos() + self.rng.gen_range(-noise..noise);
        let button = Self::button_at(t);
        let line = format!("{millis},{gx:.3},{gy:.3},{gz:.3},{ax:.4},{ay:.4},{az:.4},{button}");
        if self.glitch_probability > 0.0 && self.rng.gen_bool(self.glitch_probability) {
            line[..line.len() / 2].to_string()
        } else {
            line
        }
    }
    fn due_ticks(&self) -> u64 {
        (self.started.elapsed().as_secs_f64() / self.sampling_period) as u64
    }
}
impl LineSource for SimulatedDevice {
    fn poll_lines(&mut self) -> Result<Vec<String>, CaptureError> {
        let mut lines = Vec::new();
        if !self.header_sent {
            lines.push(format!("{HEADER_TOKEN},gx,gy,gz,ax,ay,az,button"));
            self.header_sent = true;
        }
        let due = self.due_ticks();
        for n in self.emitted..due {
            lines.push(self.frame_line(n));
        }
        self.emitted = self.emitted.max(due);
        Ok(lines)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::frame::{parse_frame, FrameOutcome, RejectReason};
    use std::time::Duration;
    #[test]
    fn header_arrives_first() {
        let mut device = SimulatedDevice::with_seed(0.01, 1);
        let lines = device.poll_lines().unwrap();
        assert_eq!(
            parse_frame(&lines[0], 0, 0.01),
            FrameOutcome::Rejected(RejectReason::Header)
        );
    }
    #[test]
    fn polls_hand_out_each_tick_once_and_in_order() {
        let mut device = SimulatedDevice::with_seed(0.01, 11);
        let mut lines = device.poll_lines().unwrap();
        std::thread::sleep(Duration::from_millis(30));
        lines.extend(device.poll_lines().unwrap());
        std::thread::sleep(Duration::from_millis(30));
        lines.extend(device.poll_lines().unwrap());
        let millis: Vec<u64> = lines
            .iter()
            .filter(|line| !line.starts_with(HEADER_TOKEN))
            .map(|line| line.split(',').next().unwrap().parse().unwrap())
            .collect();
        assert!(millis.len() >= 5, "only {} ticks after 60ms", millis.len());
        let expected: Vec<u64> = (0..millis.len() as u64).map(|n| n * 10).collect();
        assert_eq!(millis, expected);
        let headers = lines.iter().filter(|l| l.starts_with(HEADER_TOKEN)).count();
        assert_eq!(headers, 1);
    }
    #[test]
    fn clean_lines_parse_and_follow_button_cycle() {
        let mut device = SimulatedDevice::with_seed(0.01, 7);
        for n in [0u64, 50, 99, 100, 150, 299, 300] {
            let line = device.frame_line(n);
            let outcome = parse_frame(&line, n, 0.01);
            let sample = outcome.sample().expect("simulated line should parse");
            assert_eq!(sample.button, SimulatedDevice::button_at(n as f64 * 0.01));
        }
        assert_eq!(SimulatedDevice::button_at(0.5), 1);
        assert_eq!(SimulatedDevice::button_at(1.5), 0);
        assert_eq!(SimulatedDevice::button_at(3.2), 1);
    }
    #[test]
    fn full_glitch_rate_truncates_every_line() {
        let mut device = SimulatedDevice::with_seed(0.01, 3).with_glitches(1.0);
        for n in 0..20 {
            let line = device.frame_line(n);
            assert!(parse_frame(&line, n, 0.01).sample().is_none());
        }
    }
}
