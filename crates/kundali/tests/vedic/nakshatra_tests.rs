use kundali::ephemeris::Body;
use kundali::vedic::nakshatra::{
    classify_nakshatra, get_nakshatra_for_longitude, nakshatra_table, NAKSHATRA_COUNT,
    NAKSHATRA_SEGMENT_SIZE, PADA_SIZE,
};

#[test]
fn test_segments_tile_the_circle() {
    let table = nakshatra_table();
    assert_eq!(table.len(), NAKSHATRA_COUNT);
    assert_eq!(table[0].start, 0.0);
    for pair in table.windows(2) {
        assert!((pair[0].end - pair[1].start).abs() < 1e-9);
    }
    assert!((table[NAKSHATRA_COUNT - 1].end - 360.0).abs() < 1e-9);
}

#[test]
fn test_boundaries() {
    assert_eq!(classify_nakshatra(0.0).name, "Ashwini");
    assert_eq!(classify_nakshatra(NAKSHATRA_SEGMENT_SIZE).name, "Bharani");
    assert_eq!(classify_nakshatra(359.999).name, "Revati");
    assert_eq!(classify_nakshatra(360.0).name, "Ashwini");
    assert_eq!(classify_nakshatra(-0.5).name, "Revati");
}

#[test]
fn test_pada_progression() {
    let start = 3.0 * NAKSHATRA_SEGMENT_SIZE; // Rohini
    for pada in 1..=4u8 {
        let lon = start + (f64::from(pada) - 0.5) * PADA_SIZE;
        let placement = classify_nakshatra(lon);
        assert_eq!(placement.name, "Rohini");
        assert_eq!(placement.ruling_body, Body::Moon);
        assert_eq!(placement.pada, pada);
    }
}

#[test]
fn test_pada_always_in_range() {
    let mut lon = 0.0;
    while lon < 360.0 {
        let meta = get_nakshatra_for_longitude(lon);
        assert!((1..=4).contains(&meta.pada), "lon {}", lon);
        assert!((0.0..1.0).contains(&meta.progress), "lon {}", lon);
        lon += 0.37;
    }
}

#[test]
fn test_lords_cycle_every_nine() {
    let table = nakshatra_table();
    for i in 9..NAKSHATRA_COUNT {
        assert_eq!(table[i].lord, table[i - 9].lord);
    }
}
