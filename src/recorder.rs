use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::types::Recording;

pub const CSV_HEADER: &str = "time,gx,gy,gz,ax,ay,az,button,total_accel,filtered_total_accel";

/// Writes the finished recording, one row per sample.
pub fn export_csv(recording: &Recording, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    write_csv(recording, &mut w)?;
    w.flush()?;
    log::info!("💾 Recording saved: {}", path.display());
    Ok(())
}

pub fn write_csv(recording: &Recording, w: &mut impl Write) -> Result<()> {
    writeln!(w, "{CSV_HEADER}")?;
    let rows = recording
        .samples
        .iter()
        .zip(&recording.total_accel)
        .zip(&recording.filtered_total_accel);
    for ((s, total), filtered) in rows {
        writeln!(
            w,
            "{:.4},{},{},{},{},{},{},{},{:.6},{:.6}",
            s.timestamp,
            s.gyro.x,
            s.gyro.y,
            s.gyro.z,
            s.accel.x,
            s.accel.y,
            s.accel.z,
            s.button,
            total,
            filtered
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Axes, Sample};

    fn recording() -> Recording {
        let samples = vec![
            Sample {
                index: 0,
                timestamp: 0.0,
                gyro: Axes::new(1.0, 2.0, 3.0),
                accel: Axes::new(0.5, 0.0, 0.0),
                button: 1,
            },
            Sample {
                index: 1,
                timestamp: 0.01,
                gyro: Axes::new(0.0, 0.0, 0.0),
                accel: Axes::new(0.0, 0.0, -1.0),
                button: 0,
            },
        ];
        Recording {
            samples,
            total_accel: vec![0.99, 0.0],
            filtered_total_accel: vec![0.495, 0.495],
            button_fall_events: vec![0.01],
        }
    }

    #[test]
    fn csv_has_header_and_one_row_per_sample() {
        let mut out = Vec::new();
        write_csv(&recording(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "0.0000,1,2,3,0.5,0,0,1,0.990000,0.495000");
        assert_eq!(lines[2], "0.0100,0,0,0,0,0,-1,0,0.000000,0.495000");
    }

    #[test]
    fn export_writes_file() {
        let path = std::env::temp_dir().join(format!("imu-plotter-{}.csv", std::process::id()));
        export_csv(&recording(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(CSV_HEADER));
        std::fs::remove_file(&path).ok();
    }
}
