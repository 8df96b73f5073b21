use image::Rgba;

use super::*;
use crate::style::{grid::Fit, kernel::Kernel, palette::Palette};

const GREEN: Rgba<u8> = Rgba([0x00, 0x80, 0x00, 0xff]);
const RED: Rgba<u8> = Rgba([0xff, 0x00, 0x00, 0xff]);
const BLACK: Rgba<u8> = Rgba([0x00, 0x00, 0x00, 0xff]);

fn compositor(overlay: bool) -> Compositor {
    Compositor {
        width: 64,
        height: 64,
        padding: 0,
        fill: Fill::Solid(BLACK),
        grid: GridSpec::Square {
            colour: GREEN,
            size: 16,
            fit: Fit::Exact,
            overlay,
        },
        renderer: Renderer {
            strategy: crate::render::renderer::Strategy::Lines,
            palette: Palette::builtin("mono").unwrap().clone(),
            kernel: Kernel::None,
            gain: 1.0,
        },
    }
}

fn waveform_on_grid_line() -> RgbaImage {
    let mut layer = RgbaImage::new(64, 64);
    layer.put_pixel(16, 5, RED);
    layer
}

#[test]
fn waveform_in_front_by_default() {
    let img = compositor(false).composite(&waveform_on_grid_line());
    assert_eq!(*img.get_pixel(16, 5), RED);
    assert_eq!(*img.get_pixel(16, 6), GREEN);
    assert_eq!(*img.get_pixel(5, 5), BLACK);
}

#[test]
fn overlay_grid_goes_on_top() {
    let img = compositor(true).composite(&waveform_on_grid_line());
    assert_eq!(*img.get_pixel(16, 5), GREEN);
}

#[test]
fn translucent_layers_blend_over_the_fill() {
    let mut c = compositor(false);
    c.grid = GridSpec::None;
    let mut layer = RgbaImage::new(64, 64);
    layer.put_pixel(1, 1, Rgba([0xff, 0xff, 0xff, 0x80]));

    let img = c.composite(&layer);
    let px = img.get_pixel(1, 1).0;
    assert_eq!(px[3], 0xff);
    assert!(px[0] > 0x70 && px[0] < 0x90, "{px:?}");
}

#[test]
fn render_fills_the_canvas() {
    let samples: Vec<f32> = (0..640).map(|i| (i as f32 * 0.05).sin() * 0.7).collect();
    let img = compositor(false).render(&samples).unwrap();
    assert_eq!(img.dimensions(), (64, 64));
    assert!(img.pixels().all(|p| p.0[3] == 0xff));
    assert!(img.pixels().any(|p| *p == Rgba([0x80, 0x80, 0xff, 0xff])));
}

#[test]
fn from_style_validates() {
    let style = Style {
        width: 10,
        ..Style::default()
    };
    assert!(Compositor::from_style(&style).is_err());
    let c = Compositor::from_style(&Style::default()).unwrap();
    assert_eq!((c.width, c.height, c.padding), (645, 395, 2));
}

#[test]
fn render_signal_renders_the_mixed_selection() {
    use std::time::Duration;

    let left: Vec<f32> = (0..1000).map(|i| (i as f32 * 0.05).sin() * 0.7).collect();
    let right: Vec<f32> = left.iter().map(|v| v * 0.5).collect();
    let signal = AudioSignal::new(1000.0, vec![left.clone(), right]).unwrap();
    let c = compositor(false);

    let selection = Selection::new(Duration::from_millis(200), Some(Duration::from_millis(600)));
    let img = c.render_signal(&signal, Mix::Left, selection).unwrap();
    assert_eq!(img, c.render(&left[200..600]).unwrap());
}

#[test]
fn render_signal_rejects_start_past_the_end() {
    use std::time::Duration;

    let signal = AudioSignal::new(1000.0, vec![vec![0.0; 1000]]).unwrap();
    let selection = Selection::new(Duration::from_secs(2), None);
    let err = compositor(false)
        .render_signal(&signal, Mix::default(), selection)
        .unwrap_err();
    assert!(matches!(err, crate::foundation::error::Wav2PngError::Range(_)));
}
