use bitmap_paint::Canvas;
use bitmap_paint::bitmap::WHITE;
use bitmap_paint::geometry::PixelRect;
use egui::{Color32, Pos2, pos2};

fn draw(canvas: &mut Canvas, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    canvas.begin_gesture(*first);
    for p in rest {
        canvas.continue_gesture(*p);
    }
    canvas.end_gesture(*points.last().unwrap());
}

/// Samples along each segment and checks every sample pixel was painted.
fn assert_path_painted(canvas: &Canvas, points: &[Pos2]) {
    let bitmap = canvas.bitmap();
    let pairs: Vec<(Pos2, Pos2)> = if points.len() == 1 {
        vec![(points[0], points[0])]
    } else {
        points.windows(2).map(|w| (w[0], w[1])).collect()
    };
    for (a, b) in pairs {
        for step in 0..=20 {
            let p = a.lerp(b, step as f32 / 20.0);
            let x = (p.x.floor() as u32).min(bitmap.width() - 1);
            let y = (p.y.floor() as u32).min(bitmap.height() - 1);
            assert_ne!(bitmap.pixel(x, y), Some(WHITE), "unpainted pixel at ({x}, {y}) on {a:?}->{b:?}");
        }
    }
}

#[test]
fn test_stroke_paints_every_segment() {
    let paths: Vec<Vec<Pos2>> = vec![
        vec![pos2(10.0, 10.0), pos2(90.0, 10.0)],
        vec![pos2(5.0, 5.0), pos2(50.0, 70.0), pos2(95.0, 20.0), pos2(30.0, 90.0)],
        vec![pos2(0.0, 0.0), pos2(100.0, 100.0)],
        vec![pos2(20.5, 40.25), pos2(21.0, 41.0), pos2(22.0, 41.0), pos2(60.0, 41.0)],
    ];
    for path in paths {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.set_width(3.0);
        draw(&mut canvas, &path);
        assert_path_painted(&canvas, &path);
        assert!(canvas.pending_stroke().is_none());
    }
}

#[test]
fn test_single_click_draws_dot() {
    let mut canvas = Canvas::new(50, 50).unwrap();
    canvas.set_width(8.0);
    canvas.set_color(Color32::BLUE);
    canvas.begin_gesture(pos2(25.0, 25.0));
    canvas.end_gesture(pos2(25.0, 25.0));

    let bitmap = canvas.bitmap();
    assert_eq!(bitmap.pixel(25, 25), Some(image::Rgba([0, 0, 255, 255])));
    assert_eq!(bitmap.pixel(24, 24), Some(image::Rgba([0, 0, 255, 255])));
    // Roughly round: corners of the bounding square stay white.
    assert_eq!(bitmap.pixel(21, 21), Some(WHITE));
    let painted = bitmap.count_differing(bitmap.bounds(), WHITE);
    assert!(painted >= 40 && painted <= 90, "painted {painted}");
}

#[test]
fn test_stroke_stays_near_its_path() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    canvas.set_width(4.0);
    draw(&mut canvas, &[pos2(20.0, 50.0), pos2(80.0, 50.0)]);
    let bitmap = canvas.bitmap();
    let band = PixelRect::new(16, 46, 68, 8);
    let total = bitmap.count_differing(bitmap.bounds(), WHITE);
    assert_eq!(bitmap.count_differing(band, WHITE), total);
}

#[test]
fn test_out_of_order_events_are_harmless() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.continue_gesture(pos2(10.0, 10.0));
    canvas.end_gesture(pos2(20.0, 20.0));
    assert_eq!(canvas.bitmap().count_differing(canvas.bitmap().bounds(), WHITE), 0);
}

#[test]
fn test_out_of_bounds_points_are_clamped() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.set_width(2.0);
    draw(&mut canvas, &[pos2(-50.0, 20.0), pos2(500.0, 20.0)]);
    let bitmap = canvas.bitmap();
    assert_ne!(bitmap.pixel(0, 20), Some(WHITE));
    assert_ne!(bitmap.pixel(39, 20), Some(WHITE));
}
