//! Sidereal (Vedic) birth-chart engine.
//!
//! Takes a local birth date, time and place and produces a kundali: sidereal
//! positions of the nine grahas, the lagna, whole-sign houses, the navamsa
//! (D9) chart and a Vimshottari dasha timeline.

pub mod ephemeris;
pub mod error;
pub mod input;
pub mod service;
pub mod settings;
pub mod vedic;

pub use ephemeris::{Body, EphemerisError, EphemerisProvider, SwissEphemerisAdapter};
pub use error::KundaliError;
pub use input::{parse_utc_offset, BirthDetails};
pub use service::{ChartService, OpenGate, RequestGate, WindowedRateLimiter};
pub use settings::{EngineSettings, EphemerisConfig, RateLimitConfig};
pub use vedic::{compute_kundali, KundaliEngine, KundaliResult};
