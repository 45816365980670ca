//! Mean lunar node (Rahu/Ketu) longitudes.
//!
//! Computed from the mean-node polynomial rather than the ephemeris:
//! `Ω = 125.04452 − 1934.136261·T + 0.0020708·T² + T³/450000`,
//! with T in Julian centuries from J2000.0.

use crate::ephemeris::time::julian_centuries;
use crate::ephemeris::NodeKind;
use crate::vedic::zodiac::normalize_degrees;

/// Fixed daily motion assigned to both nodes (degrees/day). Always negative:
/// the mean nodes only ever move retrograde.
pub const MEAN_NODE_DAILY_SPEED: f64 = -0.05295;

/// Mean ascending node (Rahu), tropical degrees [0, 360).
pub fn mean_node_longitude(julian_day: f64) -> f64 {
    let t = julian_centuries(julian_day);
    let lon = 125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0;
    normalize_degrees(lon)
}

/// Tropical longitude of either node; the descending node is the antipode.
pub fn node_longitude(kind: NodeKind, julian_day: f64) -> f64 {
    let rahu = mean_node_longitude(julian_day);
    match kind {
        NodeKind::Ascending => rahu,
        NodeKind::Descending => normalize_degrees(rahu + 180.0),
    }
}
