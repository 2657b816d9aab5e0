use edgeefy::io::{self, OutputFormat};
use edgeefy::{BlurCombine, CannyConfig, Coord, Pixel, ThresholdRatios, WeakEdgePolicy, detect, detect_image};
use image::{GrayAlphaImage, LumaA};

fn make_square(w: u32, h: u32, inset: u32) -> GrayAlphaImage {
    GrayAlphaImage::from_fn(w, h, |x, y| {
        let inside = x >= inset && x < w - inset && y >= inset && y < h - inset;
        LumaA([if inside { 220 } else { 30 }, 255])
    })
}

#[test]
fn square_outline_is_detected_and_interior_is_empty() {
    let img = make_square(32, 32, 8);
    let out = detect_image(&img, &CannyConfig::default()).expect("valid run");

    assert_eq!(out.dimensions(), (32, 32));
    let on = |x: u32, y: u32| out.get_pixel(x, y)[0] > 0;

    // Flat areas far from the border of the square stay dark.
    assert!(!on(16, 16));
    assert!(!on(2, 2));
    assert!(!on(29, 29));

    // Every row crossing the square has an edge pixel near its left side.
    for y in 10..22 {
        assert!((6..=10).any(|x| on(x, y)), "row {y}");
    }
}

#[test]
fn alpha_channel_survives_detection() {
    let img = GrayAlphaImage::from_fn(12, 12, |x, _| LumaA([if x < 6 { 0 } else { 200 }, 77]));
    let out = detect_image(&img, &CannyConfig::default()).expect("valid run");
    assert!(out.pixels().all(|p| p[1] == 77));
}

#[test]
fn impulse_scenario_with_reference_policies() {
    let mut img = GrayAlphaImage::from_pixel(5, 5, LumaA([0, 255]));
    img.put_pixel(2, 2, LumaA([255, 255]));
    let grid = io::from_gray_alpha(&img).expect("convertible");

    let cfg = CannyConfig {
        blur: false,
        blur_combine: BlurCombine::Magnitude,
        ratios: ThresholdRatios::new(0.2, 0.6).expect("valid ratios"),
        weak_policy: WeakEdgePolicy::EraseWeak,
        ..CannyConfig::default()
    };
    let edges = detect(&grid.as_view(), &cfg).expect("valid run");

    let ring: Vec<Coord> = Coord::new(2, 2).neighbors8(5, 5).collect();
    assert!(ring.iter().any(|c| edges.strong.contains(c)));
    for c in edges.strong.iter() {
        assert!(ring.contains(c) || *c == Coord::new(2, 2), "{c:?}");
    }
    assert_eq!(edges.image.get(0, 0), Some(&Pixel::new(0, 255)));
    assert_eq!(edges.image.get(4, 4), Some(&Pixel::new(0, 255)));
}

#[test]
fn png_round_trip_through_files() {
    let dir = std::env::temp_dir().join(format!("edgeefy-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("square.png");

    let src = make_square(16, 16, 4);
    let grid = io::from_gray_alpha(&src).expect("convertible");
    assert_eq!(io::save(&grid, &path).expect("written"), OutputFormat::Png);

    let loaded = io::load(&path).expect("readable");
    assert_eq!(loaded, grid);

    let jpg = dir.join("square.jpg");
    assert_eq!(io::save(&grid, &jpg).expect("written"), OutputFormat::Jpeg);
    let reloaded = io::load(&jpg).expect("readable");
    assert_eq!(reloaded.dims(), (16, 16));

    std::fs::remove_dir_all(&dir).ok();
}
