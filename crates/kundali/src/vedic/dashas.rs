//! Vimshottari dasha calculations.
//!
//! Dashas are time periods ruled by planets, calculated from the Moon's
//! nakshatra. The 120-year cycle runs through nine rulers in a fixed order;
//! the first era is shortened by the part of the birth nakshatra the Moon
//! has already crossed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::Body;
use crate::error::KundaliError;
use crate::vedic::nakshatra::get_nakshatra_for_longitude;

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;
pub const DEFAULT_HORIZON_YEARS: f64 = 100.0;
pub const MAX_HORIZON_YEARS: f64 = 1000.0;

/// Longest single mahadasha (Venus).
const LONGEST_ERA_YEARS: f64 = 20.0;

/// Upper bound on generated mahadashas (three full cycles plus the balance).
const MAX_ERAS: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    #[default]
    Mahadasha,
    Antardasha,
    Pratyantardasha,
}

const DEPTH_LEVELS: &[DashaLevel] = &[
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

impl DashaLevel {
    fn depth_index(self) -> usize {
        DEPTH_LEVELS.iter().position(|&d| d == self).unwrap_or(0)
    }
}

type RulerYears = (Body, f64);

pub const VIMSHOTTARI_SEQUENCE: &[RulerYears] = &[
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaEra {
    pub ruling_body: Body,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_years: f64,
    pub level: DashaLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaEra>,
}

impl DashaEra {
    /// Half-open containment: `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashaTimeline {
    pub system: String,
    pub birth_date_time: DateTime<Utc>,
    pub depth: DashaLevel,
    /// Ruler of the era running at birth; `None` when the Moon was unavailable
    pub current_ruler: Option<Body>,
    pub eras: Vec<DashaEra>,
}

impl DashaTimeline {
    /// A timeline with no eras, used when the Moon could not be placed.
    pub fn empty(birth: DateTime<Utc>, depth: DashaLevel) -> Self {
        DashaTimeline {
            system: "vimshottari".to_string(),
            birth_date_time: birth,
            depth,
            current_ruler: None,
            eras: Vec::new(),
        }
    }
}

/// Index of the starting ruler for a nakshatra index.
pub fn starting_sequence_index(nakshatra_index: usize) -> usize {
    nakshatra_index % VIMSHOTTARI_SEQUENCE.len()
}

fn years_to_duration(years: f64) -> Duration {
    Duration::milliseconds((years * VIMSHOTTARI_YEAR_DAYS * 86_400_000.0).round() as i64)
}

fn duration_to_years(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 86_400_000.0 / VIMSHOTTARI_YEAR_DAYS
}

/// Compute the Vimshottari timeline from the Moon's sidereal longitude.
///
/// Eras are generated until the last one ends beyond `horizon_years` after
/// birth and at least one full cycle follows the balance era. The horizon
/// must lie in `[0, MAX_HORIZON_YEARS]`.
pub fn compute_vimshottari(
    moon_longitude: f64,
    birth: DateTime<Utc>,
    horizon_years: f64,
    depth: DashaLevel,
) -> Result<DashaTimeline, KundaliError> {
    if !horizon_years.is_finite() || !(0.0..=MAX_HORIZON_YEARS).contains(&horizon_years) {
        return Err(KundaliError::invalid_input(
            "dashaHorizonYears",
            format!("{} is outside [0, {}]", horizon_years, MAX_HORIZON_YEARS),
        ));
    }
    // Every era boundary lies between these two instants
    let span = years_to_duration(LONGEST_ERA_YEARS * MAX_ERAS as f64 + horizon_years);
    if birth.checked_sub_signed(years_to_duration(LONGEST_ERA_YEARS)).is_none()
        || birth.checked_add_signed(span).is_none()
    {
        return Err(KundaliError::computation(
            "dasha",
            format!("timeline from {} leaves the representable date range", birth),
        ));
    }
    let horizon_end = birth + years_to_duration(horizon_years);

    let moon_meta = get_nakshatra_for_longitude(moon_longitude);
    let start_index = starting_sequence_index(moon_meta.base.index);
    let progress = moon_meta.progress.clamp(0.0, 1.0);
    let target = depth.depth_index();

    let (ruler, years) = VIMSHOTTARI_SEQUENCE[start_index];
    let balance_years = years * (1.0 - progress);
    let elapsed = years_to_duration(years - balance_years);

    // The balance era is the tail of a full era that began before birth.
    let full = build_period(ruler, birth - elapsed, years, 0, target, start_index);
    let mut balance = clip_period(full, birth).unwrap_or_else(|| DashaEra {
        ruling_body: ruler,
        start: birth,
        end: birth,
        duration_years: 0.0,
        level: DashaLevel::Mahadasha,
        children: Vec::new(),
    });
    balance.duration_years = balance_years;

    let mut cursor = balance.end;
    let mut eras = vec![balance];
    let mut offset = 1;

    while (offset <= VIMSHOTTARI_SEQUENCE.len() || cursor <= horizon_end) && eras.len() < MAX_ERAS {
        let seq_index = (start_index + offset) % VIMSHOTTARI_SEQUENCE.len();
        let (ruler, years) = VIMSHOTTARI_SEQUENCE[seq_index];
        let era = build_period(ruler, cursor, years, 0, target, seq_index);
        cursor = era.end;
        eras.push(era);
        offset += 1;
    }

    log::debug!(
        "Vimshottari from {} ({} nakshatra, progress {:.4}): {} eras",
        ruler,
        moon_meta.base.name,
        progress,
        eras.len()
    );

    Ok(DashaTimeline {
        system: "vimshottari".to_string(),
        birth_date_time: birth,
        depth,
        current_ruler: Some(ruler),
        eras,
    })
}

fn build_period(
    ruler: Body,
    start: DateTime<Utc>,
    duration_years: f64,
    level_index: usize,
    target_depth_index: usize,
    sequence_start_index: usize,
) -> DashaEra {
    let end = start + years_to_duration(duration_years);
    let level = DEPTH_LEVELS[level_index.min(DEPTH_LEVELS.len() - 1)];

    let mut period = DashaEra {
        ruling_body: ruler,
        start,
        end,
        duration_years,
        level,
        children: Vec::new(),
    };

    if level_index >= target_depth_index {
        return period;
    }

    let count = VIMSHOTTARI_SEQUENCE.len();
    let mut child_start = start;
    for offset in 0..count {
        let child_index = (sequence_start_index + offset) % count;
        let (child_ruler, child_years) = VIMSHOTTARI_SEQUENCE[child_index];
        let child_duration_years = duration_years * (child_years / VIMSHOTTARI_TOTAL_YEARS);
        let mut child = build_period(
            child_ruler,
            child_start,
            child_duration_years,
            level_index + 1,
            target_depth_index,
            child_index,
        );
        // Keep the last sub-period flush with its parent
        if offset == count - 1 {
            snap_end(&mut child, end);
        }
        child_start = child.end;
        period.children.push(child);
    }

    period
}

fn snap_end(period: &mut DashaEra, end: DateTime<Utc>) {
    period.end = end;
    if let Some(last) = period.children.last_mut() {
        snap_end(last, end);
    }
}

/// Drop the part of a period before `from`. Returns `None` when the period
/// ends at or before `from`.
fn clip_period(mut period: DashaEra, from: DateTime<Utc>) -> Option<DashaEra> {
    if period.end <= from {
        return None;
    }
    if period.start >= from {
        return Some(period);
    }
    period.start = from;
    period.duration_years = duration_to_years(period.end - from);
    period.children = period
        .children
        .into_iter()
        .filter_map(|child| clip_period(child, from))
        .collect();
    Some(period)
}

/// The mahadasha running at `instant`, if the timeline covers it.
pub fn era_active_at(timeline: &DashaTimeline, instant: DateTime<Utc>) -> Option<&DashaEra> {
    timeline.eras.iter().find(|era| era.contains(instant))
}

/// The chain of periods (mahadasha, then any generated sub-periods) running
/// at `instant`.
pub fn active_periods_at(timeline: &DashaTimeline, instant: DateTime<Utc>) -> Vec<&DashaEra> {
    let mut chain = Vec::new();
    let mut current = era_active_at(timeline, instant);
    while let Some(period) = current {
        chain.push(period);
        current = period.children.iter().find(|child| child.contains(instant));
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn birth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sequence_matches_nakshatra_lords() {
        for record in crate::vedic::nakshatra::nakshatra_table() {
            let (ruler, _) = VIMSHOTTARI_SEQUENCE[starting_sequence_index(record.index)];
            assert_eq!(ruler, record.lord, "{}", record.name);
        }
    }

    #[test]
    fn test_compute_vimshottari_from_ashwini() {
        let timeline = compute_vimshottari(6.6667, birth(), 100.0, DashaLevel::Mahadasha).unwrap();
        assert_eq!(timeline.eras.len(), 10);
        assert_eq!(timeline.eras[0].ruling_body, Body::Ketu);
        assert_eq!(timeline.eras[1].ruling_body, Body::Venus);
        assert_eq!(timeline.current_ruler, Some(Body::Ketu));
        // Moon halfway through Ashwini leaves half of Ketu's seven years
        assert!((timeline.eras[0].duration_years - 3.5).abs() < 1e-3);
    }

    #[test]
    fn test_eras_are_contiguous() {
        let timeline = compute_vimshottari(213.4, birth(), 100.0, DashaLevel::Mahadasha).unwrap();
        assert_eq!(timeline.eras[0].start, birth());
        for pair in timeline.eras.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_full_cycle_is_120_years() {
        let timeline = compute_vimshottari(100.0, birth(), 100.0, DashaLevel::Mahadasha).unwrap();
        let total: f64 = timeline.eras[1..10].iter().map(|e| e.duration_years).sum();
        assert!((total - VIMSHOTTARI_TOTAL_YEARS).abs() < 1e-9);
    }

    #[test]
    fn test_horizon_extends_timeline() {
        let timeline = compute_vimshottari(100.0, birth(), 200.0, DashaLevel::Mahadasha).unwrap();
        let last = timeline.eras.last().unwrap();
        assert!(last.end > birth() + years_to_duration(200.0));
    }

    #[test]
    fn test_antardasha_children() {
        let timeline = compute_vimshottari(13.0, birth(), 100.0, DashaLevel::Antardasha).unwrap();
        let second = &timeline.eras[1];
        assert_eq!(second.children.len(), 9);
        assert_eq!(second.children[0].ruling_body, second.ruling_body);
        assert_eq!(second.children[0].start, second.start);
        assert_eq!(second.children[8].end, second.end);
        let sum: f64 = second.children.iter().map(|c| c.duration_years).sum();
        assert!((sum - second.duration_years).abs() < 1e-9);

        // Balance era keeps only the sub-periods still running at birth
        let first = &timeline.eras[0];
        assert!(!first.children.is_empty());
        assert_eq!(first.children[0].start, birth());
        assert_eq!(first.children.last().unwrap().end, first.end);
    }

    #[test]
    fn test_active_periods() {
        let timeline = compute_vimshottari(200.0, birth(), 100.0, DashaLevel::Pratyantardasha).unwrap();
        let when = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let chain = active_periods_at(&timeline, when);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].level, DashaLevel::Mahadasha);
        assert_eq!(chain[2].level, DashaLevel::Pratyantardasha);
        assert!(chain.iter().all(|p| p.contains(when)));

        let before_birth = Utc.with_ymd_and_hms(1980, 1, 1, 0, 0, 0).unwrap();
        assert!(era_active_at(&timeline, before_birth).is_none());
    }

    #[test]
    fn test_horizon_out_of_range_is_rejected() {
        for horizon in [500_000.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = compute_vimshottari(100.0, birth(), horizon, DashaLevel::Mahadasha).unwrap_err();
            assert!(matches!(err, KundaliError::InvalidInput { .. }), "{}", horizon);
        }
        assert!(compute_vimshottari(100.0, birth(), MAX_HORIZON_YEARS, DashaLevel::Mahadasha).is_ok());
    }

    #[test]
    fn test_birth_near_date_range_limit_is_an_error() {
        let late = Utc.from_utc_datetime(&chrono::NaiveDateTime::MAX) - Duration::days(365);
        let err = compute_vimshottari(100.0, late, 100.0, DashaLevel::Mahadasha).unwrap_err();
        match err {
            KundaliError::Computation { stage, .. } => assert_eq!(stage, "dasha"),
            other => panic!("expected computation error, got {:?}", other),
        }
    }
}
