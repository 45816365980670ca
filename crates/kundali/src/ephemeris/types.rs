use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies a chart can place. `Ascendant` is a computed point, not a body the
/// ephemeris knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Uranus,
    Neptune,
    Pluto,
    Ascendant,
}

/// The nine grahas, in chart order.
pub const CLASSICAL_BODIES: &[Body] = &[
    Body::Sun,
    Body::Moon,
    Body::Mars,
    Body::Mercury,
    Body::Jupiter,
    Body::Venus,
    Body::Saturn,
    Body::Rahu,
    Body::Ketu,
];

pub const OUTER_BODIES: &[Body] = &[Body::Uranus, Body::Neptune, Body::Pluto];

impl Body {
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mars => "mars",
            Body::Mercury => "mercury",
            Body::Jupiter => "jupiter",
            Body::Venus => "venus",
            Body::Saturn => "saturn",
            Body::Rahu => "rahu",
            Body::Ketu => "ketu",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Ascendant => "ascendant",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Ascendant => "Ascendant",
        }
    }

    /// Where the tropical longitude of this body comes from.
    ///
    /// Returns `None` for the ascendant, which is derived from observer
    /// geometry instead.
    pub fn source(self) -> Option<BodySource> {
        match self {
            Body::Rahu => Some(BodySource::MeanNode(NodeKind::Ascending)),
            Body::Ketu => Some(BodySource::MeanNode(NodeKind::Descending)),
            Body::Ascendant => None,
            other => Some(BodySource::Ephemeris(other)),
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Ascending,
    Descending,
}

/// How a tracked body's tropical position is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// Queried from the external ephemeris provider.
    Ephemeris(Body),
    /// Computed from the mean lunar node polynomial.
    MeanNode(NodeKind),
}

/// Geocentric apparent ecliptic coordinates, tropical, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    pub longitude: f64,
    pub latitude: f64,
}
