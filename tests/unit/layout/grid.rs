use image::Rgba;

use super::*;

const GREEN: Rgba<u8> = Rgba([0x00, 0x80, 0x00, 0xff]);

fn square(size: u32, fit: Fit) -> GridSpec {
    GridSpec::Square {
        colour: GREEN,
        size,
        fit,
        overlay: false,
    }
}

fn lines(w: u32, h: u32, padding: i32, fit: Fit) -> GridLines {
    GridLines::layout(&square(64, fit), w, h, padding)
}

#[test]
fn none_has_no_geometry() {
    assert_eq!(GridLines::layout(&GridSpec::None, 645, 395, 2), GridLines::default());
}

#[test]
fn border_only_with_positive_padding() {
    assert_eq!(lines(641, 386, 0, Fit::Approximate).border, None);
    assert_eq!(lines(641, 386, -3, Fit::Approximate).border, None);
    assert_eq!(
        lines(643, 388, 1, Fit::Approximate).border,
        Some(Rect {
            x0: 1,
            y0: 1,
            x1: 641,
            y1: 386
        })
    );
}

#[test]
fn approximate_square_lines() {
    let cases: [(u32, u32, &[u32], &[u32]); 7] = [
        (
            641,
            386,
            &[64, 128, 192, 256, 320, 384, 448, 512, 576],
            &[192, 128, 64, 193, 257, 321],
        ),
        (
            640,
            385,
            &[64, 128, 192, 256, 320, 383, 447, 511, 575],
            &[192, 128, 64, 192, 256, 320],
        ),
        (
            635,
            380,
            &[63, 127, 190, 254, 317, 380, 444, 507, 571],
            &[189, 126, 63, 190, 253, 316],
        ),
        (
            631,
            380,
            &[63, 126, 189, 252, 315, 378, 441, 504, 567],
            &[189, 126, 63, 190, 253, 316],
        ),
        (
            651,
            392,
            &[65, 130, 195, 260, 325, 390, 455, 520, 585],
            &[195, 130, 65, 196, 261, 326],
        ),
        (
            705,
            450,
            &[64, 128, 192, 256, 320, 384, 448, 512, 576, 640],
            &[224, 160, 96, 32, 225, 289, 353, 417],
        ),
        (
            577,
            322,
            &[64, 128, 192, 256, 320, 384, 448, 512],
            &[160, 96, 32, 161, 225, 289],
        ),
    ];

    for (w, h, v, hl) in cases {
        let g = lines(w, h, 0, Fit::Approximate);
        assert_eq!(g.vertical, v, "vertical {w}x{h}");
        assert_eq!(g.horizontal, hl, "horizontal {w}x{h}");
    }
}

#[test]
fn padded_square_lines() {
    let g = lines(643, 388, 1, Fit::Approximate);
    assert_eq!(g.vertical, [65, 129, 193, 257, 321, 385, 449, 513, 577]);
    assert_eq!(g.horizontal, [193, 129, 65, 194, 258, 322]);

    let g = lines(645, 388, 1, Fit::Approximate);
    assert_eq!(g.vertical, [65, 129, 194, 258, 322, 386, 450, 515, 579]);

    let g = lines(643, 390, 1, Fit::Approximate);
    assert_eq!(g.horizontal, [194, 130, 65, 195, 260, 324]);
}

#[test]
fn exact_fit_has_no_rounding_drift() {
    let g = lines(641, 386, 0, Fit::Exact);
    let expected: Vec<u32> = (1..=9).map(|k| 64 * k).collect();
    assert_eq!(g.vertical, expected);

    let g = lines(635, 380, 0, Fit::Exact);
    assert_eq!(g.horizontal, [189, 125, 61, 190, 254, 318]);

    let g = lines(651, 392, 0, Fit::Exact);
    assert_eq!(g.vertical, [64, 128, 192, 256, 320, 384, 448, 512, 576, 640]);
    assert_eq!(g.horizontal, [195, 131, 67, 3, 196, 260, 324, 388]);
}

#[test]
fn strict_fits_apply_to_both_axes() {
    let g = lines(641, 386, 0, Fit::LargerThan);
    assert_eq!(g.vertical, [65, 130, 195, 260, 325, 390, 455, 520, 585]);
    assert_eq!(g.horizontal, [192, 127, 62, 193, 258, 323]);

    let g = lines(641, 386, 0, Fit::SmallerThan);
    assert_eq!(g.vertical, [63, 126, 189, 252, 315, 378, 441, 504, 567, 630]);
    assert_eq!(g.horizontal, [192, 129, 66, 3, 193, 256, 319, 382]);
}

#[test]
fn rectangular_uses_cell_width_and_height() {
    let spec = GridSpec::Rectangular {
        colour: GREEN,
        width: 32,
        height: 48,
        fit: Fit::Approximate,
        overlay: false,
    };
    let g = GridLines::layout(&spec, 641, 386, 0);
    let expected: Vec<u32> = (1..=19).map(|k| 32 * k).collect();
    assert_eq!(g.vertical, expected);
    assert_eq!(g.horizontal, [192, 144, 96, 48, 193, 241, 289, 337]);
}

#[test]
fn odd_span_breaks_symmetry_by_one_pixel() {
    // even span: both fans start on the midline row and mirror exactly
    let even = lines(641, 385, 0, Fit::Approximate);
    assert_eq!(even.horizontal, [192, 128, 64, 192, 256, 320]);

    let odd = lines(641, 386, 0, Fit::Approximate);
    assert_eq!(odd.horizontal, [192, 128, 64, 193, 257, 321]);
}

#[test]
fn draw_writes_border_and_lines() {
    let spec = square(16, Fit::Exact);
    let g = GridLines::layout(&spec, 40, 30, 2);
    let layer = g.draw(&spec, 40, 30);

    assert_eq!(*layer.get_pixel(2, 2), GREEN);
    assert_eq!(*layer.get_pixel(37, 27), GREEN);
    assert_eq!(layer.get_pixel(0, 0).0[3], 0);
    assert_eq!(layer.get_pixel(1, 15).0[3], 0);

    for &x in &g.vertical {
        assert_eq!(*layer.get_pixel(x, 10), GREEN);
    }
    for &y in &g.horizontal {
        assert_eq!(*layer.get_pixel(10, y), GREEN);
    }
    assert_eq!(layer.get_pixel(10, 10).0[3], 0);
}

#[test]
fn draw_none_is_transparent() {
    let layer = GridLines::default().draw(&GridSpec::None, 8, 8);
    assert!(layer.pixels().all(|p| p.0[3] == 0));
}
