use super::*;

#[test]
fn bar_height_scales_against_max() {
    assert_eq!(bar_height_pct(10.0, 20.0), 50.0);
    assert_eq!(bar_height_pct(20.0, 20.0), 100.0);
}

#[test]
fn bar_height_is_zero_for_empty_or_invalid_series() {
    assert_eq!(bar_height_pct(5.0, 0.0), 0.0);
    assert_eq!(bar_height_pct(f64::NAN, 10.0), 0.0);
    assert_eq!(bar_height_pct(-3.0, 10.0), 0.0);
}

#[test]
fn bar_style_formats_one_decimal() {
    assert_eq!(bar_style(1.0, 3.0), "height: 33.3%;");
}
