use super::*;

const LIMA: i32 = -5 * 3600;

#[test]
fn year_at_utc_boundaries() {
    assert_eq!(year_at(0.0, 0), 1970);
    // 2024-02-29T12:00:00Z
    assert_eq!(year_at(1_709_208_000.0, 0), 2024);
    // 2024-12-31T23:59:59Z
    assert_eq!(year_at(1_735_689_599.0, 0), 2024);
    // 2025-01-01T00:00:00Z
    assert_eq!(year_at(1_735_689_600.0, 0), 2025);
}

#[test]
fn year_at_follows_local_offset() {
    // 2025-01-01T04:30:00Z is still New Year's Eve in Lima.
    assert_eq!(year_at(1_735_705_800.0, LIMA), 2024);
    assert_eq!(year_at(1_735_705_800.0, 0), 2025);
    // 2024-12-31T20:00:00Z is already 2025 in Tokyo.
    assert_eq!(year_at(1_735_675_200.0, 9 * 3600), 2025);
}

#[test]
fn year_at_ignores_out_of_range_offset() {
    assert_eq!(year_at(1_735_689_600.0, i32::MAX), 2025);
}

#[test]
fn fixed_clock_reports_year_in_its_zone() {
    let clock = FixedClock::new(1_735_705_800.0).with_utc_offset(LIMA);
    assert_eq!(clock.utc_offset_secs(), LIMA);
    assert_eq!(clock.current_year(), 2024);

    clock.advance(3600.0);
    assert_eq!(clock.current_year(), 2025);
}

#[test]
fn fixed_clock_defaults_to_utc() {
    let clock = FixedClock::new(1_735_689_600.0);
    assert_eq!(clock.utc_offset_secs(), 0);
    assert_eq!(clock.current_year(), 2025);
}
