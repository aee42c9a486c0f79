// src/types.rs

/// Three-axis reading as reported by the device, no unit conversion applied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axes {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One decoded observation.
///
/// `timestamp` is synthetic: `index * sampling_period`, never the device clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub index: u64,
    pub timestamp: f64,
    pub gyro: Axes,
    pub accel: Axes,
    pub button: u8,
}

/// A finished capture session plus its derived series.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub samples: Vec<Sample>,
    pub total_accel: Vec<f64>, // one per sample
    pub filtered_total_accel: Vec<f64>, // one per sample
    pub button_fall_events: Vec<f64>, // timestamps
}

impl Recording {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.last().map(|s| s.timestamp).unwrap_or(0.0)
    }

    pub fn timestamps(&self) -> Vec<f64> {
        self.column(|s| s.timestamp)
    }

    pub fn accel_x(&self) -> Vec<f64> {
        self.column(|s| s.accel.x)
    }

    pub fn accel_y(&self) -> Vec<f64> {
        self.column(|s| s.accel.y)
    }

    pub fn accel_z(&self) -> Vec<f64> {
        self.column(|s| s.accel.z)
    }

    pub fn gyro_x(&self) -> Vec<f64> {
        self.column(|s| s.gyro.x)
    }

    pub fn gyro_y(&self) -> Vec<f64> {
        self.column(|s| s.gyro.y)
    }

    pub fn gyro_z(&self) -> Vec<f64> {
        self.column(|s| s.gyro.z)
    }

    fn column(&self, pick: impl Fn(&Sample) -> f64) -> Vec<f64> {
        self.samples.iter().map(pick).collect()
    }
}
