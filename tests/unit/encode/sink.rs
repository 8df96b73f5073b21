use image::Rgba;

use super::*;

fn cfg(frames: u64) -> SinkConfig {
    SinkConfig {
        width: 4,
        height: 3,
        fps: 30.0,
        frames,
    }
}

#[test]
fn in_memory_sink_keeps_frames_in_order() {
    let mut sink = InMemorySink::new();
    sink.begin(cfg(2)).unwrap();
    sink.push_frame(0, &RgbaImage::new(4, 3)).unwrap();
    sink.push_frame(1, &RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]))).unwrap();
    sink.end().unwrap();

    assert!(sink.is_finished());
    assert_eq!(sink.config(), Some(&cfg(2)));
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, [0, 1]);
}

#[test]
fn png_sequence_names_frames() {
    let dir = PathBuf::from("target").join("unit_png_sequence");
    let _ = std::fs::remove_dir_all(&dir);

    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(cfg(1)).unwrap();
    sink.push_frame(7, &RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255])))
        .unwrap();
    sink.end().unwrap();

    let path = dir.join("frame-00007.png");
    assert_eq!(sink.frame_path(7), path);
    assert_eq!(sink.written(), 1);

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (4, 3));
    assert_eq!(*back.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
}

#[test]
fn encode_png_is_deterministic() {
    let img = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    let a = encode_png(&img).unwrap();
    let b = encode_png(&img).unwrap();
    assert_eq!(a, b);
    assert_eq!(&a[1..4], b"PNG");
}

#[test]
fn png_file_sink_writes_one_frame() {
    let path = PathBuf::from("target").join("unit_png_file").join("single.png");
    let _ = std::fs::remove_file(&path);

    let mut sink = PngFileSink::new(&path);
    assert!(sink.begin(cfg(2)).is_err());
    sink.begin(cfg(1)).unwrap();
    assert!(sink.end().is_err());

    let img = RgbaImage::from_pixel(4, 3, Rgba([5, 6, 7, 255]));
    sink.push_frame(0, &img).unwrap();
    assert!(sink.push_frame(1, &img).is_err());
    sink.end().unwrap();

    assert_eq!(sink.path(), path.as_path());
    assert_eq!(image::open(&path).unwrap().to_rgba8(), img);
}
