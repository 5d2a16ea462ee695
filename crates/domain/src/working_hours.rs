use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CLOCK_FORMAT: &str = "%H:%M";

/// Side of a daily window that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSide {
    /// Opening clock time.
    Start,
    /// Closing clock time.
    End,
}

impl Display for WindowSide {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => formatter.write_str("start"),
            Self::End => formatter.write_str("end"),
        }
    }
}

/// Errors raised while parsing a `HH:MM-HH:MM` working hours value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkingHoursError {
    /// The value is not shaped like `<start>-<end>` or describes an empty window.
    #[error("invalid time period format '{value}': {reason}")]
    Format {
        /// Raw working hours value.
        value: String,
        /// Short description of the structural problem.
        reason: &'static str,
    },

    /// One side of the window is not a valid 24-hour `HH:MM` clock time.
    #[error("invalid {side} time '{value}': {source}")]
    TimeParse {
        /// Side of the window that failed.
        side: WindowSide,
        /// Raw text of the failing side.
        value: String,
        /// Why the clock time was rejected.
        #[source]
        source: ClockTimeError,
    },
}

/// Reasons a single `HH:MM` clock time is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockTimeError {
    /// Not exactly two hour digits, a colon and two minute digits.
    #[error("expected zero-padded HH:MM")]
    Shape,

    /// Well-shaped but outside the 24-hour clock.
    #[error(transparent)]
    OutOfRange(#[from] chrono::ParseError),
}

/// Recurring daily availability window such as `09:00-17:00`.
///
/// A window whose end is earlier than its start runs past midnight and
/// closes on the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkingHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkingHours {
    /// Parses a `HH:MM-HH:MM` value.
    pub fn parse(value: &str) -> Result<Self, WorkingHoursError> {
        let parts: Vec<&str> = value.split('-').collect();
        let [start, end] = parts.as_slice() else {
            return Err(WorkingHoursError::Format {
                value: value.to_owned(),
                reason: "expected exactly one '-' separating start and end",
            });
        };

        let start = parse_clock(start, WindowSide::Start)?;
        let end = parse_clock(end, WindowSide::End)?;

        if start == end {
            return Err(WorkingHoursError::Format {
                value: value.to_owned(),
                reason: "start and end must differ",
            });
        }

        Ok(Self { start, end })
    }

    /// Returns the opening clock time.
    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the closing clock time.
    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns whether the window closes on the day after it opens.
    #[must_use]
    pub fn spans_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Resolves the window occurrence relevant to `now`.
    ///
    /// Same-day windows are anchored to the date of `now`. A window that
    /// spans midnight resolves to the occurrence that opened yesterday while
    /// its tail is still running, and to tonight's occurrence otherwise.
    #[must_use]
    pub fn period_at(&self, now: NaiveDateTime) -> TimePeriod {
        let today = now.date();

        if !self.spans_midnight() {
            return TimePeriod {
                start: today.and_time(self.start),
                end: today.and_time(self.end),
            };
        }

        if now.time() < self.end {
            let yesterday = today.pred_opt().unwrap_or(today);
            TimePeriod {
                start: yesterday.and_time(self.start),
                end: today.and_time(self.end),
            }
        } else {
            let tomorrow = today.succ_opt().unwrap_or(today);
            TimePeriod {
                start: today.and_time(self.start),
                end: tomorrow.and_time(self.end),
            }
        }
    }
}

impl FromStr for WorkingHours {
    type Err = WorkingHoursError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for WorkingHours {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}-{}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

/// Concrete half-open interval `[start, end)` of local wall-clock instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimePeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimePeriod {
    /// Returns the first instant inside the period.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the first instant after the period.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns whether `instant` lies within `[start, end)`.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Parses a working hours value and resolves it against `now`.
pub fn parse_time_period(value: &str, now: NaiveDateTime) -> Result<TimePeriod, WorkingHoursError> {
    WorkingHours::parse(value).map(|hours| hours.period_at(now))
}

fn parse_clock(value: &str, side: WindowSide) -> Result<NaiveTime, WorkingHoursError> {
    parse_strict_clock(value).map_err(|source| WorkingHoursError::TimeParse {
        side,
        value: value.to_owned(),
        source,
    })
}

// chrono skips leading whitespace and accepts single-digit fields.
fn parse_strict_clock(value: &str) -> Result<NaiveTime, ClockTimeError> {
    let well_shaped = match value.as_bytes() {
        [h1, h2, b':', m1, m2] => [h1, h2, m1, m2].iter().all(|byte| byte.is_ascii_digit()),
        _ => false,
    };
    if !well_shaped {
        return Err(ClockTimeError::Shape);
    }

    Ok(NaiveTime::parse_from_str(value, CLOCK_FORMAT)?)
}
