// Timecodes with millisecond resolution
use crate::error::{Result, SubconvError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Width of the `HH:MM:SS,mmm` layout.
pub const TIMECODE_WIDTH: usize = 12;

/// An elapsed playback time, always in `[00:00:00.000, 99:59:59.999]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeCode {
    hour: u32,
    minute: u32,
    second: u32,
    millisecond: u32,
}

impl TimeCode {
    pub const ZERO: TimeCode = TimeCode {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
    };

    pub fn new(hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self> {
        if hour > 99 || minute > 59 || second > 59 || millisecond > 999 {
            return Err(SubconvError::InvalidTimeCode(format!(
                "field out of range: {}:{}:{}.{}",
                hour, minute, second, millisecond
            )));
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    pub fn from_millis(total: u64) -> Result<Self> {
        let hour = total / MS_PER_HOUR;
        if hour > 99 {
            return Err(SubconvError::InvalidTimeCode(format!(
                "{}ms exceeds 99 hours",
                total
            )));
        }
        Ok(Self {
            hour: hour as u32,
            minute: ((total % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            second: ((total % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
            millisecond: (total % MS_PER_SECOND) as u32,
        })
    }

    /// Frame-based construction, rounded to the nearest millisecond.
    pub fn from_frames(frames: u64, frame_rate: f32) -> Result<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(SubconvError::InvalidTimeCode(format!(
                "invalid frame rate: {}",
                frame_rate
            )));
        }
        let millis = (frames as f64 * 1000.0 / frame_rate as f64).round() as u64;
        Self::from_millis(millis)
    }

    /// Reads `HH?MM?SS?mmm` by fixed byte offsets; separator characters are not inspected.
    pub fn from_fixed_width(s: &str) -> Result<Self> {
        let field = |range: std::ops::Range<usize>| -> Result<u32> {
            match s.get(range) {
                Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                    digits
                        .parse()
                        .map_err(|_| SubconvError::InvalidTimeCode(s.to_string()))
                }
                _ => Err(SubconvError::InvalidTimeCode(s.to_string())),
            }
        };

        let hour = field(0..2)?;
        let minute = field(3..5)?;
        let second = field(6..8)?;
        let millisecond = field(9..12)?;
        Self::new(hour, minute, second, millisecond)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn millisecond(&self) -> u32 {
        self.millisecond
    }

    pub fn total_millis(&self) -> u64 {
        self.hour as u64 * MS_PER_HOUR
            + self.minute as u64 * MS_PER_MINUTE
            + self.second as u64 * MS_PER_SECOND
            + self.millisecond as u64
    }

    pub fn to_frames(&self, frame_rate: f32) -> u64 {
        (self.total_millis() as f64 * frame_rate as f64 / 1000.0).round() as u64
    }

    pub fn to_duration(&self) -> Duration {
        Duration::from_millis(self.total_millis())
    }

    pub fn checked_add(&self, other: TimeCode) -> Option<TimeCode> {
        Self::from_millis(self.total_millis() + other.total_millis()).ok()
    }

    /// `None` when the result would be negative.
    pub fn checked_sub(&self, other: TimeCode) -> Option<TimeCode> {
        self.total_millis()
            .checked_sub(other.total_millis())
            .and_then(|ms| Self::from_millis(ms).ok())
    }

    pub fn saturating_sub(&self, other: TimeCode) -> TimeCode {
        self.checked_sub(other).unwrap_or(Self::ZERO)
    }

    /// Zero-padded `HH:MM:SS<sep>mmm`.
    pub fn format_with(&self, separator: char) -> String {
        format!(
            "{:02}:{:02}:{:02}{}{:03}",
            self.hour, self.minute, self.second, separator, self.millisecond
        )
    }
}

impl PartialEq for TimeCode {
    fn eq(&self, other: &Self) -> bool {
        self.total_millis() == other.total_millis()
    }
}

impl Eq for TimeCode {}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_millis().cmp(&other.total_millis())
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with('.'))
    }
}

impl std::str::FromStr for TimeCode {
    type Err = SubconvError;

    /// Accepts `HH:MM:SS.mmm` and `HH:MM:SS,mmm`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == TIMECODE_WIDTH
            && bytes[2] == b':'
            && bytes[5] == b':'
            && (bytes[8] == b'.' || bytes[8] == b',');
        if !well_formed {
            return Err(SubconvError::InvalidTimeCode(s.to_string()));
        }
        Self::from_fixed_width(s)
    }
}

impl From<TimeCode> for String {
    fn from(tc: TimeCode) -> Self {
        tc.to_string()
    }
}

impl TryFrom<String> for TimeCode {
    type Error = SubconvError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeCode> for Duration {
    fn from(tc: TimeCode) -> Self {
        tc.to_duration()
    }
}
