use kundali::ephemeris::Body;
use kundali::vedic::positions::{ascendant_position, classify_body};
use kundali::vedic::vargas::{build_navamsa_chart, navamsa_longitude, navamsa_position, navamsa_sign_index};
use kundali::vedic::zodiac::Sign;

#[test]
fn test_navamsa_sign_for_every_slice_of_aries() {
    let expected = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
    ];
    let slice = 30.0 / 9.0;
    for (part, sign) in expected.iter().enumerate() {
        let lon = (part as f64 + 0.5) * slice;
        assert_eq!(Sign::from_index(navamsa_sign_index(lon)), *sign);
    }
}

#[test]
fn test_vargottama_positions() {
    // Vargottama: the navamsa falls back in the base sign
    assert_eq!(navamsa_sign_index(30.0 + 4.5 * 30.0 / 9.0), 1);
    assert_eq!(navamsa_sign_index(91.0), 3);
    assert_eq!(navamsa_sign_index(360.0 - 0.1), 11);
}

#[test]
fn test_projected_longitude_matches_sign() {
    for lon in [0.0, 17.3, 123.456, 299.99, 359.9999] {
        let projected = navamsa_longitude(lon);
        assert!((0.0..360.0).contains(&projected));
        assert_eq!((projected / 30.0).floor() as usize, navamsa_sign_index(lon));
    }
}

#[test]
fn test_chart_keeps_every_body() {
    let asc = ascendant_position(200.0);
    let bodies: Vec<_> = [(Body::Sun, 10.0), (Body::Moon, 95.0), (Body::Rahu, 290.0)]
        .iter()
        .map(|&(b, lon)| classify_body(b, lon, 0.0, 1.0, b == Body::Rahu, asc.sign.index()))
        .collect();
    let chart = build_navamsa_chart(&asc, &bodies);
    assert_eq!(chart.bodies.len(), 3);
    assert_eq!(chart.bodies[2].name, Body::Rahu);
    assert!(chart.bodies[2].is_retrograde);
    for body in &chart.bodies {
        assert!((1..=12).contains(&body.house_number));
    }
}

#[test]
fn test_transform_has_no_hidden_state() {
    let base = classify_body(Body::Venus, 333.3, -1.1, 1.25, false, 4);
    let first = navamsa_position(&base, 7);
    let second = navamsa_position(&base, 7);
    assert_eq!(first, second);
    // The base position is untouched
    assert_eq!(base.sidereal_longitude, 333.3);
}
