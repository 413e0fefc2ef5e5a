//! Wall-clock source for the clock face.

use crate::geometry::{hour_hand_angle, minute_hand_angle};
use chrono::Timelike;
use serde::{Deserialize, Serialize};

/// Hour and minute of the local day, as shown by the clock hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClockTime {
    /// Hour of the day (0-23).
    pub hour: u32,
    /// Minute of the hour (0-59).
    pub minute: u32,
}

impl ClockTime {
    /// Create a clock time. Out-of-range values are folded back into the day.
    pub fn new(hour: u32, minute: u32) -> Self {
        Self {
            hour: (hour % 24 + (minute / 60) % 24) % 24,
            minute: minute % 60,
        }
    }

    /// Hour hand angle in degrees, clockwise from 12 o'clock.
    pub fn hour_angle(&self) -> f64 {
        hour_hand_angle(self.hour, self.minute)
    }

    /// Minute hand angle in degrees, clockwise from 12 o'clock.
    pub fn minute_angle(&self) -> f64 {
        minute_hand_angle(self.minute)
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> ClockTime;
}

/// Reads the local time zone's current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> ClockTime {
        let now = chrono::Local::now();
        ClockTime::new(now.hour(), now.minute())
    }
}
