use super::*;

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn erf_matches_reference_points() {
    assert_eq!(erf(0.0), 0.0);
    assert!(approx(erf(0.5), 0.520_499_877_813_046_5, 1e-14));
    assert!(approx(erf(1.0), 0.842_700_792_949_714_9, 1e-14));
    assert!(approx(erf(2.0), 0.995_322_265_018_952_7, 1e-14));
    assert!(approx(erf(-1.0), -0.842_700_792_949_714_9, 1e-14));
    assert_eq!(erf(10.0), 1.0);
}

#[test]
fn erfinv_inverts_erf() {
    for y in [-0.9999, -0.75, -0.1, 0.001, 0.3, 0.5, 0.9, 0.99, 0.9999] {
        let x = erfinv(y);
        assert!(approx(erf(x), y, 1e-12), "y={y} x={x}");
    }
}

#[test]
fn erfinv_edges() {
    assert_eq!(erfinv(0.0), 0.0);
    assert_eq!(erfinv(1.0), f64::INFINITY);
    assert_eq!(erfinv(-1.0), f64::NEG_INFINITY);
    assert!(erfinv(1.5).is_nan());
    assert_eq!(erfinv(-0.4), -erfinv(0.4));
    assert!(approx(erfinv(0.9999), 2.751_063_905_712_08, 1e-9));
}
