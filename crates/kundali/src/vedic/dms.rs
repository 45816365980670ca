use serde::{Deserialize, Serialize};
use std::fmt;

/// An angle split into whole degrees, minutes and rounded seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub deg: i32,
    pub min: u32,
    pub sec: u32,
}

/// Split a non-negative angle into degrees, minutes and seconds.
///
/// Seconds are rounded; a rounded value of 60 carries into the minutes
/// (and minutes into degrees) so the parts stay in range.
pub fn degrees_to_dms(value: f64) -> Dms {
    let total_secs = (value * 3600.0).round() as i64;
    let deg = total_secs.div_euclid(3600);
    let rem = total_secs.rem_euclid(3600);
    Dms {
        deg: deg as i32,
        min: (rem / 60) as u32,
        sec: (rem % 60) as u32,
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.deg, self.min, self.sec)
    }
}
