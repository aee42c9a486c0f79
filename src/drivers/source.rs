use std::collections::VecDeque;
use std::io::{self, Read};
use std::time::Duration;
use log::info;
use serialport::SerialPort;
use crate::drivers::CaptureError;
/// Bytes held without a newline before the tail is treated as noise.
pub const MAX_PENDING_BYTES: usize = 4096;
/// Something that can hand over complete text lines on demand.
///
/// `poll_lines` must not block for longer than the source's read timeout and
/// may return an empty batch.
pub trait LineSource {
    fn poll_lines(&mut self) -> Result<Vec<String>, CaptureError>;
}
/// Line reader over a serial device.
pub struct SerialLineSource {
    port: Box<dyn SerialPort>,
    pending: Vec<u8>,
}
impl SerialLineSource {
    pub fn open(port_name: &str, baud: u32, read_timeout: Duration) -> Result<Self, CaptureError> {
        let port = serialport::new(port_name, baud)
            .timeout(read_timeout)
            .open()
            .map_err(|source| CaptureError::Connection {
                port: port_name.to_string(),
                baud,
                source,
            })?;
        info!("Connected to {port_name} at {baud} baud");
        Ok(Self {
            port,
            pending: Vec::with_capacity(MAX_PENDING_BYTES),
        })
    }
}
impl LineSource for SerialLineSource {
    fn poll_lines(&mut self) -> Result<Vec<String>, CaptureError> {
        let mut chunk = [0u8; 1024];
        loop {
            match self.port.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        break;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) => return Err(CaptureError::Read(e)),
            }
        }
        Ok(take_complete_lines(&mut self.pending))
    }
}
/// Removes every newline-terminated line from `pending` and returns them,
/// decoded lossily. Bytes after the last newline stay for the next call.
pub fn take_complete_lines(pending: &mut Vec<u8>) -> Vec<String> {
    let Some(last_newline) = pending.iter().rposition(|&b| b == b'\n') else {
        if pending.len() > MAX_PENDING_BYTES {
            pending.clear();
        }
        return Vec::new();
    };
    let complete: Vec<u8> = pending.drain(..=last_newline).collect();
    complete[..complete.len() - 1]
        .split(|&b| b == b'\n')
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}
/// In-memory source useful for tests and deterministic playback.
/// Each queued entry is the result of one poll.
#[cfg_attr(not(test), allow(dead_code))]
pub struct ManualSource {
    queue: VecDeque<io::Result<Vec<String>>>,
}
#[cfg_attr(not(test), allow(dead_code))]
impl ManualSource {
    /// Every line arrives on the first poll.
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let batch: Vec<String> = lines.into_iter().map(Into::into).collect();
        Self::from_polls(vec![Ok(batch)])
    }
    pub fn from_polls(polls: impl IntoIterator<Item = io::Result<Vec<String>>>) -> Self {
        Self {
            queue: polls.into_iter().collect(),
        }
    }
}
impl LineSource for ManualSource {
    fn poll_lines(&mut self) -> Result<Vec<String>, CaptureError> {
        match self.queue.pop_front() {
            Some(Ok(lines)) => Ok(lines),
            Some(Err(e)) => Err(CaptureError::Read(e)),
            None => Ok(Vec::new()),
        }
    }
}
