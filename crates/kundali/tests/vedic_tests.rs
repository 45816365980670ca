mod common;

mod vedic {
    mod dasha_tests;
    mod nakshatra_tests;
    mod varga_tests;
}
