pub mod ayanamsa;
pub mod chart;
pub mod dashas;
pub mod dms;
pub mod houses;
pub mod lagna;
pub mod nakshatra;
pub mod nodes;
pub mod positions;
pub mod types;
pub mod vargas;
pub mod zodiac;

pub use ayanamsa::{ayanamsa_at, AyanamsaModel};
pub use chart::{compute_kundali, KundaliEngine};
pub use dashas::{
    active_periods_at, compute_vimshottari, era_active_at, DashaEra, DashaLevel, DashaTimeline, MAX_HORIZON_YEARS,
};
pub use dms::{degrees_to_dms, Dms};
pub use nakshatra::{classify_nakshatra, get_nakshatra_for_longitude, NakshatraPlacement};
pub use types::{BodyPosition, HarmonicChart, HarmonicCharts, HouseMap, HouseSlot, KundaliResult, MissingBody};
pub use vargas::{build_navamsa_chart, navamsa_longitude, navamsa_sign_index};
pub use zodiac::{classify_sign, house_from, normalize_degrees, Sign, SignPlacement};
