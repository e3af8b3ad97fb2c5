use std::fmt;
use std::str::FromStr;

/// Durations offered for the "ends in" choice, in seconds
pub const ENDS_IN_CHOICES: [u32; 4] = [5, 10, 15, 30];

/// Duration choice used when neither flag nor config picks one
pub const DEFAULT_ENDS_IN: EndsIn = EndsIn::Seconds(5);

/// How long a clip plays before it is cut off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndsIn {
    /// Playback is unbounded
    Never,
    /// Playback stops this many seconds after the start
    Seconds(u32),
}

impl EndsIn {
    pub fn as_secs(&self) -> Option<f64> {
        match self {
            EndsIn::Never => None,
            EndsIn::Seconds(secs) => Some(f64::from(*secs)),
        }
    }
}

impl fmt::Display for EndsIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndsIn::Never => write!(f, "never"),
            EndsIn::Seconds(secs) => write!(f, "{secs}s"),
        }
    }
}

impl FromStr for EndsIn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("never") {
            return Ok(EndsIn::Never);
        }
        match s.strip_suffix('s').unwrap_or(s).parse::<u32>() {
            Ok(0) => Err("duration must be at least 1 second".to_string()),
            Ok(secs) => Ok(EndsIn::Seconds(secs)),
            Err(_) => {
                let choices = ENDS_IN_CHOICES.map(|c| c.to_string()).join(", ");
                Err(format!("expected seconds or \"never\" (common choices: {choices})"))
            }
        }
    }
}

/// Compute the absolute end of the playback window.
///
/// An absent duration choice means playback never ends; an absent start time
/// counts from zero. Recomputed by the caller whenever either input changes.
pub fn compute_end(start_time: Option<f64>, ends_in: Option<f64>) -> Option<f64> {
    ends_in.map(|duration| start_time.unwrap_or(0.0) + duration)
}
