//! Status outcomes

use corelink_protocol::StatusCode;

use crate::traits::Rgb;

/// One of four mutually exclusive presentations of a status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusOutcome {
    Initializing,
    Connected,
    Failed,
    /// Status outside the known set; only reachable with unvalidated input
    Unknown,
}

impl From<Option<StatusCode>> for StatusOutcome {
    fn from(code: Option<StatusCode>) -> Self {
        match code {
            Some(StatusCode::Initializing) => StatusOutcome::Initializing,
            Some(StatusCode::Connected) => StatusOutcome::Connected,
            Some(StatusCode::Failed) => StatusOutcome::Failed,
            None => StatusOutcome::Unknown,
        }
    }
}

impl StatusOutcome {
    /// Label shown on the display
    pub fn label(&self) -> &'static str {
        match self {
            StatusOutcome::Initializing => "INITIALIZING",
            StatusOutcome::Connected => "CONNECTED",
            StatusOutcome::Failed => "FAILED",
            StatusOutcome::Unknown => "UNKNOWN",
        }
    }

    /// Indicator colour at the given channel level
    pub fn color(&self, level: u16) -> Rgb {
        match self {
            StatusOutcome::Initializing => Rgb::new(level, 0, 0),
            StatusOutcome::Connected => Rgb::new(0, level, 0),
            StatusOutcome::Failed => Rgb::new(0, 0, level),
            StatusOutcome::Unknown => Rgb::new(level, level, level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_are_distinct() {
        let outcomes = [
            StatusOutcome::Initializing,
            StatusOutcome::Connected,
            StatusOutcome::Failed,
            StatusOutcome::Unknown,
        ];
        for (i, a) in outcomes.iter().enumerate() {
            for b in &outcomes[i + 1..] {
                assert_ne!(a.color(0x4000), b.color(0x4000));
                assert_ne!(a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_from_status_code() {
        let outcome = |raw| StatusOutcome::from(StatusCode::from_raw(raw));
        assert_eq!(outcome(0), StatusOutcome::Initializing);
        assert_eq!(outcome(1), StatusOutcome::Connected);
        assert_eq!(outcome(2), StatusOutcome::Failed);
        assert_eq!(outcome(3), StatusOutcome::Unknown);
        assert_eq!(outcome(0xFFFF), StatusOutcome::Unknown);
    }
}
