use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

#[test]
fn fixed_motions() {
    for s in [0.0, 0.3, 1.0] {
        assert_eq!(Motion::Centre.at(s), 0.5);
        assert_eq!(Motion::Left.at(s), 0.0);
        assert_eq!(Motion::Right.at(s), 1.0);
    }
}

#[test]
fn linear_is_identity() {
    for s in [0.0, 0.5, 1.0] {
        assert_eq!(Motion::Linear.at(s), s);
    }
    assert_eq!(Motion::Linear.position(secs(2.5), secs(10.0)), 0.25);
}

#[test]
fn ease_ramps_and_plateaus() {
    assert_eq!(Motion::Ease.at(0.0), 0.0);
    assert_eq!(Motion::Ease.at(0.1), 0.25);
    assert_eq!(Motion::Ease.at(0.2), 0.5);
    assert_eq!(Motion::Ease.at(0.5), 0.5);
    assert_eq!(Motion::Ease.at(0.8), 0.5);
    assert_eq!(Motion::Ease.at(1.0), 1.0);
}

#[test]
fn erf_is_an_s_curve_through_the_ends() {
    assert_eq!(Motion::Erf.at(0.0), 0.0);
    assert_eq!(Motion::Erf.at(0.5), 0.5);
    assert!(approx(Motion::Erf.at(1.0), 1.0));
    assert!(approx(Motion::Erf.at(1.0 / 150.0), 0.182_297));
    assert!(approx(Motion::Erf.at(29.0 / 150.0), 0.388_762));
    assert!(approx(Motion::Erf.at(0.2), 0.391_853));
    assert!(approx(Motion::Erf.at(0.8), 0.608_147));
}

#[test]
fn zero_total_duration_is_time_zero() {
    assert_eq!(Motion::Linear.position(secs(1.0), Duration::ZERO), 0.0);
}

#[test]
fn motion_names() {
    assert_eq!("sweep".parse::<Motion>().unwrap(), Motion::Linear);
    assert_eq!("center".parse::<Motion>().unwrap(), Motion::Centre);
    assert_eq!("ERF".parse::<Motion>().unwrap(), Motion::Erf);
    assert!("bounce".parse::<Motion>().is_err());
}

#[test]
fn cursor_spec_parses() {
    let c: Cursor = "red:ease".parse().unwrap();
    assert_eq!(
        c,
        Cursor {
            glyph: Glyph::Red,
            motion: Motion::Ease
        }
    );
    assert_eq!(c.to_string(), "red:ease");

    let c: Cursor = "green".parse().unwrap();
    assert_eq!(c.motion, Motion::Linear);

    let c: Cursor = "cursors/mine.png:centre".parse().unwrap();
    assert_eq!(c.glyph, Glyph::File(PathBuf::from("cursors/mine.png")));

    assert!(":linear".parse::<Cursor>().is_err());
    assert!("red:wobble".parse::<Cursor>().is_err());
}

#[test]
fn glyph_paths_may_contain_colons() {
    let c: Cursor = r"C:\cursors\mine.png".parse().unwrap();
    assert_eq!(c.glyph, Glyph::File(PathBuf::from(r"C:\cursors\mine.png")));
    assert_eq!(c.motion, Motion::Linear);

    let c: Cursor = r"C:\cursors\mine.png:erf".parse().unwrap();
    assert_eq!(c.glyph, Glyph::File(PathBuf::from(r"C:\cursors\mine.png")));
    assert_eq!(c.motion, Motion::Erf);

    assert_eq!(c.to_string().parse::<Cursor>().unwrap(), c);
}

#[test]
fn window_tracks_cursor_inside_the_timeline() {
    let w = FrameWindow::at(secs(5.0), secs(10.0), secs(2.0), Motion::Linear);
    assert!(approx(w.start.as_secs_f64(), 4.0));
    assert_eq!(w.shift, 0.0);
    assert_eq!(w.cursor_x(101, 7), 47);
}

#[test]
fn window_is_clamped_at_the_start() {
    let w = FrameWindow::at(secs(0.5), secs(10.0), secs(2.0), Motion::Centre);
    assert_eq!(w.start, Duration::ZERO);
    assert!(approx(w.shift, 0.25));
    assert_eq!(w.cursor_x(101, 7), 72);
}

#[test]
fn window_is_clamped_at_the_end() {
    let w = FrameWindow::at(secs(9.8), secs(10.0), secs(2.0), Motion::Centre);
    assert!(approx(w.start.as_secs_f64(), 8.0));
    assert!(approx(w.shift, -0.4));
    assert_eq!(w.cursor_x(101, 7), 7);
}

#[test]
fn linear_window_never_shifts_at_the_ends() {
    for t in [0.0, 10.0] {
        let w = FrameWindow::at(secs(t), secs(10.0), secs(2.0), Motion::Linear);
        assert!(approx(w.shift, 0.0));
    }
}

fn striped(h: u32) -> RgbaImage {
    RgbaImage::from_fn(2, h, |_, y| Rgba([y as u8, 0, 0, 255]))
}

fn rows(img: &RgbaImage) -> Vec<u8> {
    (0..img.height()).map(|y| img.get_pixel(0, y).0[0]).collect()
}

#[test]
fn single_row_glyph_repeats() {
    assert_eq!(rows(&stretch(&striped(1), 5)), [0, 0, 0, 0, 0]);
}

#[test]
fn odd_glyph_repeats_middle_row() {
    assert_eq!(rows(&stretch(&striped(5), 9)), [0, 1, 2, 2, 2, 2, 2, 3, 4]);
}

#[test]
fn even_glyph_repeats_two_middle_rows() {
    assert_eq!(rows(&stretch(&striped(4), 8)), [0, 1, 1, 1, 2, 2, 2, 3]);
}

#[test]
fn builtin_glyphs_span_the_canvas() {
    let g = Glyph::Green.render(100).unwrap().unwrap();
    assert_eq!(g.dimensions(), (7, 100));
    assert_eq!(g.get_pixel(3, 50).0, [0x00, 0xff, 0x00, 0xff]);
    assert_eq!(g.get_pixel(0, 0).0[3], 0xff);
    assert_eq!(g.get_pixel(0, 50).0[3], 0);

    let r = Glyph::Red.render(10).unwrap().unwrap();
    assert_eq!(r.get_pixel(3, 5).0, [0xff, 0x00, 0x00, 0xff]);

    assert!(Glyph::None.render(10).unwrap().is_none());
}

#[test]
fn missing_glyph_file_is_an_error() {
    let g = Glyph::File(PathBuf::from("target/no-such-cursor.png"));
    assert!(g.render(10).is_err());
}
