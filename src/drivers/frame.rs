use crate::types::{Axes, Sample};
/// Header echo the firmware prints on reset.
pub const HEADER_TOKEN: &str = "millis";
/// `millis,gx,gy,gz,ax,ay,az,button`
pub const FIELD_COUNT: usize = 8;
/// Why a line did not become a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RejectReason {
    Empty,
    Header,
    TooFewFields { found: usize },
    InvalidNumber { field: usize },
    ButtonOutOfRange { value: i64 },
}
impl RejectReason {
    /// Stable label used when tallying rejects.
    pub fn label(&self) -> &'static str {
        match self {
            RejectReason::Empty => "empty",
            RejectReason::Header => "header",
            RejectReason::TooFewFields { .. } => "too_few_fields",
            RejectReason::InvalidNumber { .. } => "invalid_number",
            RejectReason::ButtonOutOfRange { .. } => "button_out_of_range",
        }
    }
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    Accepted(Sample),
    Rejected(RejectReason),
}
impl FrameOutcome {
    pub fn sample(&self) -> Option<&Sample> {
        match self {
            FrameOutcome::Accepted(sample) => Some(sample),
            FrameOutcome::Rejected(_) => None,
        }
    }
}
/// Decodes one raw line. `index` is the caller's counter of accepted frames and
/// only determines the synthetic timestamp; the caller advances it on `Accepted`.
pub fn parse_frame(line: &str, index: u64, sampling_period: f64) -> FrameOutcome {
    match decode(line.trim()) {
        Ok((gyro, accel, button)) => FrameOutcome::Accepted(Sample {
            index,
            timestamp: index as f64 * sampling_period,
            gyro,
            accel,
            button,
        }),
        Err(reason) => FrameOutcome::Rejected(reason),
    }
}
fn decode(line: &str) -> Result<(Axes, Axes, u8), RejectReason> {
    if line.is_empty() {
        return Err(RejectReason::Empty);
    }
    if line.starts_with(HEADER_TOKEN) {
        return Err(RejectReason::Header);
    }
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < FIELD_COUNT {
        return Err(RejectReason::TooFewFields { found: parts.len() });
    }
    let real = |field: usize| -> Result<f64, RejectReason> {
        parts[field]
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(RejectReason::InvalidNumber { field })
    };
    let gyro = Axes::new(real(1)?, real(2)?, real(3)?);
    let accel = Axes::new(real(4)?, real(5)?, real(6)?);
    let raw_button = parts[7]
        .trim()
        .parse::<i64>()
        .map_err(|_| RejectReason::InvalidNumber { field: 7 })?;
    let button = match raw_button {
        0 => 0,
        1 => 1,
        value => return Err(RejectReason::ButtonOutOfRange { value }),
    };
    Ok((gyro, accel, button))
}
#[cfg(test)]
mod tests {
    use super::*;
    fn accepted(line: &str) -> Sample {
        match parse_frame(line, 0, 0.01) {
            FrameOutcome::Accepted(sample) => sample,
            FrameOutcome::Rejected(reason) => panic!("unexpected reject {reason:?} for {line:?}"),
        }
    }
    fn rejected(line: &str) -> RejectReason {
        match parse_frame(line, 0, 0.01) {
            FrameOutcome::Rejected(reason) => reason,
            FrameOutcome::Accepted(sample) => panic!("unexpected accept {sample:?} for {line:?}"),
        }
    }
    #[test]
    fn fields_map_to_gyro_then_accel_then_button() {
        let sample = accepted("1234,1.5,-2.25,3,0.125,-0.5,-1.0,1\r\n");
        assert_eq!(sample.gyro, Axes::new(1.5, -2.25, 3.0));
        assert_eq!(sample.accel, Axes::new(0.125, -0.5, -1.0));
        assert_eq!(sample.button, 1);
    }
    #[test]
    fn timestamp_comes_from_index_not_device_clock() {
        let FrameOutcome::Accepted(sample) = parse_frame("999999,0,0,0,0,0,0,0", 7, 0.01) else {
            panic!("line should parse");
        };
        assert_eq!(sample.index, 7);
        assert!((sample.timestamp - 0.07).abs() < 1e-12);
    }
    #[test]
    fn padded_fields_and_extra_columns_are_tolerated() {
        let sample = accepted(" 10, 1 , 2 ,3,4,5,6, 0 ,extra,more");
        assert_eq!(sample.gyro, Axes::new(1.0, 2.0, 3.0));
        assert_eq!(sample.accel, Axes::new(4.0, 5.0, 6.0));
        assert_eq!(sample.button, 0);
    }
    #[test]
    fn blank_and_header_lines_are_rejected() {
        assert_eq!(rejected(""), RejectReason::Empty);
        assert_eq!(rejected("   \r\n"), RejectReason::Empty);
        assert_eq!(rejected("millis,gx,gy,gz,ax,ay,az,button"), RejectReason::Header);
        // Header detection is case-sensitive; this one falls through to numeric parsing.
        assert_eq!(
            rejected("Millis,gx,gy,gz,ax,ay,az,button"),
            RejectReason::InvalidNumber { field: 1 }
        );
    }
    #[test]
    fn short_lines_are_rejected() {
        assert_eq!(
            rejected("10,1,2,3,4,5,6"),
            RejectReason::TooFewFields { found: 7 }
        );
        assert_eq!(rejected("10"), RejectReason::TooFewFields { found: 1 });
    }
    #[test]
    fn non_numeric_fields_are_rejected_with_position() {
        assert_eq!(
            rejected("10,1,2,x,4,5,6,0"),
            RejectReason::InvalidNumber { field: 3 }
        );
        assert_eq!(
            rejected("10,1,2,3,4,5,,0"),
            RejectReason::InvalidNumber { field: 6 }
        );
        assert_eq!(
            rejected("10,1,2,3,4,5,6,1.0"),
            RejectReason::InvalidNumber { field: 7 }
        );
    }
    #[test]
    fn button_outside_zero_one_is_rejected() {
        assert_eq!(
            rejected("10,1,2,3,4,5,6,2"),
            RejectReason::ButtonOutOfRange { value: 2 }
        );
        assert_eq!(
            rejected("10,1,2,3,4,5,6,-1"),
            RejectReason::ButtonOutOfRange { value: -1 }
        );
    }
    #[test]
    fn non_finite_reals_are_rejected() {
        assert_eq!(
            rejected("10,nan,2,3,4,5,6,0"),
            RejectReason::InvalidNumber { field: 1 }
        );
        assert_eq!(
            rejected("10,1,2,3,4,inf,6,0"),
            RejectReason::InvalidNumber { field: 5 }
        );
        assert_eq!(
            rejected("10,1,2,3,4,5,-infinity,0"),
            RejectReason::InvalidNumber { field: 6 }
        );
    }
    #[test]
    fn field_zero_is_ignored() {
        let sample = accepted("not-a-number,0,0,0,0,0,0,1");
        assert_eq!(sample.button, 1);
    }
}
