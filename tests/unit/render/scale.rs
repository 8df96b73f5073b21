use super::*;

#[test]
fn vscale_even_height() {
    for (v, expected) in [
        (32767, 255),
        (256, 129),
        (255, 128),
        (1, 128),
        (0, 128),
        (-1, 127),
        (-256, 127),
        (-257, 126),
        (-32768, 0),
    ] {
        assert_eq!(vscale(v, 256), expected, "v={v}");
    }
}

#[test]
fn vscale_odd_height() {
    for (v, expected) in [
        (32767, 256),
        (256, 129),
        (128, 129),
        (127, 128),
        (0, 128),
        (-127, 128),
        (-128, 127),
        (-257, 127),
        (-32768, 0),
    ] {
        assert_eq!(vscale(v, 257), expected, "v={v}");
    }
}

#[test]
fn vscale_negative_height_flips() {
    for (v, expected) in [
        (32767, 0),
        (256, 126),
        (255, 127),
        (0, 127),
        (-1, 128),
        (-257, 129),
        (-32768, 255),
    ] {
        assert_eq!(vscale(v, -256), expected, "v={v}");
    }
    for (v, expected) in [(32767, 0), (128, 127), (127, 128), (-128, 129), (-32768, 256)] {
        assert_eq!(vscale(v, -257), expected, "v={v}");
    }
}

#[test]
fn vscale_is_order_preserving_and_saturating() {
    for h in [1, 2, 100, 255, 256, 257, 1080] {
        assert_eq!(vscale(i16::MIN, h), 0);
        assert_eq!(vscale(i16::MAX, h), h - 1);
        let mut prev = vscale(i16::MIN, h);
        for v in (i16::MIN..=i16::MAX).step_by(97) {
            let r = vscale(v, h);
            assert!(r >= prev);
            prev = r;
        }
    }
}

#[test]
fn fixed_point_truncates_and_wraps() {
    assert_eq!(to_fixed(0.0, 1.0), 0);
    assert_eq!(to_fixed(0.5, 1.0), 16384);
    assert_eq!(to_fixed(-0.5, 1.0), -16384);
    assert_eq!(to_fixed(1.0 / 65536.0, 1.0), 0);
    assert_eq!(to_fixed(-1.0, 1.0), -32768);
    // 32768 wraps to -32768
    assert_eq!(to_fixed(1.0, 1.0), -32768);
    assert_eq!(to_fixed(0.75, 2.0), -16384);
}

#[test]
fn rows_plot_positive_samples_upward() {
    assert_eq!(centre_row(256), 127);
    assert!(row_of(0.9, 1.0, 256) < centre_row(256));
    assert!(row_of(-0.9, 1.0, 256) > centre_row(256));
}
