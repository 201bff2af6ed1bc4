use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::ClockId;

/// A progress clock: a labelled counter that fills from 0 up to a fixed
/// number of segments.
///
/// Clocks track looming threats, long projects, or scene countdowns.
/// Hidden clocks (`visible == false`) exist for the game master only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    /// Unique identifier for this clock.
    pub id: ClockId,
    /// Short label shown at the table.
    pub label: String,
    /// Filled segments, always within `0..=segments`.
    pub filled: u32,
    /// Total number of segments.
    pub segments: u32,
    /// Whether players can see this clock.
    pub visible: bool,
    /// Timestamp when the clock was created.
    pub created_at: DateTime<Utc>,
}

impl Clock {
    /// Create a new, empty, visible clock. Segment counts below 1 are
    /// raised to 1.
    pub fn new(label: impl Into<String>, segments: u32) -> Self {
        Self {
            id: ClockId::new(),
            label: label.into(),
            filled: 0,
            segments: segments.max(1),
            visible: true,
            created_at: Utc::now(),
        }
    }

    /// Create a hidden clock only the game master can see.
    pub fn hidden(label: impl Into<String>, segments: u32) -> Self {
        Self {
            visible: false,
            ..Self::new(label, segments)
        }
    }

    /// Advance (or rewind, with a negative delta) the clock, clamping to
    /// `0..=segments`. Returns the new fill.
    pub fn tick(&mut self, delta: i32) -> u32 {
        let next = i64::from(self.filled) + i64::from(delta);
        self.filled = next.clamp(0, i64::from(self.segments)) as u32;
        self.filled
    }

    /// Set the fill directly, clamping to `0..=segments`.
    pub fn set(&mut self, filled: u32) -> u32 {
        self.filled = filled.min(self.segments);
        self.filled
    }

    /// Whether every segment is filled.
    pub fn is_complete(&self) -> bool {
        self.filled >= self.segments
    }

    /// Segments still unfilled.
    pub fn remaining(&self) -> u32 {
        self.segments - self.filled
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}]", self.label, self.filled, self.segments)?;
        if self.is_complete() {
            write!(f, " COMPLETE")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_empty() {
        let clock = Clock::new("The Duke's Suspicion", 6);
        assert_eq!(clock.filled, 0);
        assert_eq!(clock.segments, 6);
        assert!(clock.visible);
        assert!(!clock.is_complete());
    }

    #[test]
    fn zero_segment_clock_raised_to_one() {
        let clock = Clock::new("Degenerate", 0);
        assert_eq!(clock.segments, 1);
    }

    #[test]
    fn tick_clamps_both_ends() {
        let mut clock = Clock::new("Ritual", 4);
        assert_eq!(clock.tick(2), 2);
        assert_eq!(clock.tick(10), 4);
        assert!(clock.is_complete());
        assert_eq!(clock.tick(-1), 3);
        assert_eq!(clock.tick(-99), 0);
    }

    #[test]
    fn set_clamps_to_segments() {
        let mut clock = Clock::new("Ritual", 4);
        assert_eq!(clock.set(3), 3);
        assert_eq!(clock.set(9), 4);
    }

    #[test]
    fn hidden_clock_is_invisible() {
        let clock = Clock::hidden("Betrayal", 8);
        assert!(!clock.visible);
    }

    #[test]
    fn display_marks_completion() {
        let mut clock = Clock::new("Ritual", 2);
        assert_eq!(clock.to_string(), "Ritual [0/2]");
        clock.tick(2);
        assert_eq!(clock.to_string(), "Ritual [2/2] COMPLETE");
    }
}
