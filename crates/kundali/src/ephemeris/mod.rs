pub mod adapter;
pub mod provider;
pub mod time;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{Body, BodySource, EclipticPosition, NodeKind, CLASSICAL_BODIES, OUTER_BODIES};
