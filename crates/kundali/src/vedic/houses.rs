//! Whole-sign houses.
//!
//! House 1 is the ascendant's sign and each following house is the next
//! sign, so every house spans exactly one sign.

use crate::vedic::types::{BodyPosition, HouseMap, HouseSlot};
use crate::vedic::zodiac::{Sign, SIGN_SPAN};

/// Sign index occupying `house` (1..=12) for the given ascendant sign.
pub fn sign_index_for_house(house: u8, ascendant_sign_index: usize) -> usize {
    (ascendant_sign_index + usize::from(house.saturating_sub(1))) % 12
}

/// Build the twelve house slots and place each body by its house number.
pub fn build_houses(ascendant_sign_index: usize, bodies: &[BodyPosition]) -> HouseMap {
    let mut houses = HouseMap::new();
    for house in 1..=12u8 {
        let sign = Sign::from_index(sign_index_for_house(house, ascendant_sign_index));
        let start = sign.start_degree();
        houses.insert(
            house,
            HouseSlot {
                sign_occupying: sign,
                sign_ruling_body: sign.ruler(),
                start_degree: start,
                end_degree: start + SIGN_SPAN,
                occupying_bodies: Vec::new(),
            },
        );
    }

    for body in bodies {
        if let Some(slot) = houses.get_mut(&body.house_number) {
            slot.occupying_bodies.push(body.name);
        }
    }

    houses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Body;
    use crate::vedic::positions::classify_body;

    #[test]
    fn test_houses_follow_ascendant_sign() {
        // Ascendant in Libra
        let houses = build_houses(6, &[]);
        assert_eq!(houses.len(), 12);
        assert_eq!(houses[&1].sign_occupying, Sign::Libra);
        assert_eq!(houses[&1].start_degree, 180.0);
        assert_eq!(houses[&1].end_degree, 210.0);
        assert_eq!(houses[&7].sign_occupying, Sign::Aries);
        assert_eq!(houses[&12].sign_occupying, Sign::Virgo);
        assert_eq!(houses[&12].sign_ruling_body, Body::Mercury);
    }

    #[test]
    fn test_occupants_in_computed_order() {
        let sun = classify_body(Body::Sun, 185.0, 0.0, 1.0, false, 6);
        let venus = classify_body(Body::Venus, 200.0, 0.0, 1.2, false, 6);
        let moon = classify_body(Body::Moon, 10.0, 0.0, 13.0, false, 6);
        let houses = build_houses(6, &[sun, venus, moon]);
        assert_eq!(houses[&1].occupying_bodies, vec![Body::Sun, Body::Venus]);
        assert_eq!(houses[&7].occupying_bodies, vec![Body::Moon]);
        let total: usize = houses.values().map(|h| h.occupying_bodies.len()).sum();
        assert_eq!(total, 3);
    }
}
