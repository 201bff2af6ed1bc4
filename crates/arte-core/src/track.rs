//! Resource tracks (stress, resilience).
//!
//! A track is a clamped numeric value with a min and max, used for the
//! mutable per-character resources the table spends and recovers during
//! play.

use serde::{Deserialize, Serialize};

/// A named numeric resource that is clamped between min and max.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display name of the track.
    pub name: String,
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
    /// Minimum value (usually 0).
    pub min: i32,
}

impl Track {
    /// Create a new track starting at its maximum value.
    pub fn new(name: impl Into<String>, max: i32) -> Self {
        Self {
            name: name.into(),
            current: max,
            max,
            min: 0,
        }
    }

    /// Create a new track starting empty (at zero).
    pub fn empty(name: impl Into<String>, max: i32) -> Self {
        Self {
            name: name.into(),
            current: 0,
            max,
            min: 0,
        }
    }

    /// Create a new track with a custom minimum and starting value.
    pub fn with_range(name: impl Into<String>, current: i32, min: i32, max: i32) -> Self {
        let clamped = current.clamp(min, max);
        Self {
            name: name.into(),
            current: clamped,
            max,
            min,
        }
    }

    /// Adjust the track by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = (self.current + delta).clamp(self.min, self.max);
        self.current
    }

    /// Set the track to a value, clamping to bounds. Returns the new value.
    pub fn set(&mut self, value: i32) -> i32 {
        self.current = value.clamp(self.min, self.max);
        self.current
    }

    /// Returns true if the track is at its minimum value.
    pub fn is_empty(&self) -> bool {
        self.current <= self.min
    }

    /// Returns true if the track is at its maximum value.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_max() {
        let t = Track::new("Resilience", 10);
        assert_eq!(t.current, 10);
        assert!(t.is_full());
        assert!(!t.is_empty());
    }

    #[test]
    fn empty_starts_at_zero() {
        let t = Track::empty("Stress", 6);
        assert_eq!(t.current, 0);
        assert!(t.is_empty());
    }

    #[test]
    fn adjust_clamps_to_max() {
        let mut t = Track::empty("Stress", 6);
        assert_eq!(t.adjust(10), 6);
        assert!(t.is_full());
    }

    #[test]
    fn adjust_clamps_to_min() {
        let mut t = Track::empty("Resilience", 10);
        assert_eq!(t.adjust(-3), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn adjust_normal() {
        let mut t = Track::empty("Resilience", 10);
        assert_eq!(t.adjust(4), 4);
        assert_eq!(t.adjust(-1), 3);
    }

    #[test]
    fn set_clamps() {
        let mut t = Track::empty("Stress", 6);
        assert_eq!(t.set(99), 6);
        assert_eq!(t.set(-5), 0);
        assert_eq!(t.set(3), 3);
    }

    #[test]
    fn with_range_clamps_initial() {
        let t = Track::with_range("Odd", 100, 0, 10);
        assert_eq!(t.current, 10);
    }

    #[test]
    fn display() {
        let mut t = Track::empty("Stress", 6);
        t.adjust(2);
        assert_eq!(t.to_string(), "Stress: 2/6");
    }
}
