use super::*;

fn renderer(strategy: Strategy, kernel: Kernel) -> Renderer {
    Renderer {
        strategy,
        palette: Palette::builtin("mono").unwrap().clone(),
        kernel,
        gain: 1.0,
    }
}

fn sine(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (i as f32 * 0.3).sin() * 0.8)
        .collect()
}

#[test]
fn strategy_text_round_trips() {
    assert_eq!("lines".parse::<Strategy>().unwrap(), Strategy::Lines);
    assert_eq!(
        "columns:4:2".parse::<Strategy>().unwrap(),
        Strategy::Columns {
            bar_width: 4,
            bar_gap: 2
        }
    );
    assert_eq!(Strategy::Columns { bar_width: 3, bar_gap: 0 }.to_string(), "columns:3:0");
    assert!("columns:0:2".parse::<Strategy>().is_err());
    assert!("columns:4".parse::<Strategy>().is_err());
    assert!("dots".parse::<Strategy>().is_err());
}

#[test]
fn inner_size_honours_positive_padding_only() {
    assert_eq!(inner_size(645, 395, 2).unwrap(), (641, 391));
    assert_eq!(inner_size(645, 395, 0).unwrap(), (645, 395));
    assert_eq!(inner_size(645, 395, -4).unwrap(), (645, 395));
    assert!(matches!(inner_size(10, 10, 5), Err(Wav2PngError::Range(_))));
}

#[test]
fn padding_leaves_a_transparent_border() {
    let r = renderer(Strategy::Lines, Kernel::None);
    let layer = r.render(&sine(400), 64, 32, 4).unwrap();

    assert_eq!(layer.dimensions(), (64, 32));
    for (x, y, px) in layer.enumerate_pixels() {
        if !(4..60).contains(&x) || !(4..28).contains(&y) {
            assert_eq!(px.0[3], 0, "pixel ({x},{y}) is outside the waveform area");
        }
    }
    assert!(layer.pixels().any(|p| p.0[3] > 0));
}

#[test]
fn negative_padding_shifts_and_clips() {
    let r = renderer(Strategy::Lines, Kernel::None);
    let samples = sine(400);
    let unpadded = r.render(&samples, 64, 32, 0).unwrap();
    let shifted = r.render(&samples, 64, 32, -2).unwrap();

    for y in 0..30 {
        for x in 0..62 {
            assert_eq!(shifted.get_pixel(x, y), unpadded.get_pixel(x + 2, y + 2));
        }
    }
}

#[test]
fn kernel_is_applied_to_the_waveform() {
    let samples = sine(200);
    let plain = renderer(Strategy::Lines, Kernel::None).render_waveform(&samples, 50, 20);
    let soft = renderer(Strategy::Lines, Kernel::Soft).render_waveform(&samples, 50, 20);
    assert_eq!(Kernel::Soft.apply(&plain), soft);
    assert_ne!(plain, soft);
}

#[test]
fn columns_strategy_renders() {
    let r = renderer(
        Strategy::Columns {
            bar_width: 3,
            bar_gap: 1,
        },
        Kernel::Vertical,
    );
    let layer = r.render(&sine(400), 64, 32, 2).unwrap();
    assert!(layer.pixels().any(|p| p.0[3] > 0));
}
