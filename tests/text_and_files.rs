use bitmap_paint::bitmap::WHITE;
use bitmap_paint::raster::text_bounds;
use bitmap_paint::{Canvas, FontSpec, PaintError, ToolKind};
use egui::{Color32, pos2};
use image::Rgba;

#[test]
fn test_text_only_touches_glyph_box() {
    let mut canvas = Canvas::new(200, 100).unwrap();
    let font = FontSpec::new(bitmap_paint::fonts::DEFAULT_FAMILY, 32.0);
    canvas.set_font(font.clone());
    canvas.set_color(Color32::from_rgb(200, 20, 20));
    canvas.select_tool(ToolKind::Text);

    let anchor = pos2(30.0, 20.0);
    canvas.begin_gesture(anchor);
    canvas.end_gesture(anchor);
    canvas.insert_text("Hi");
    canvas.confirm_text();

    let face = canvas.fonts().resolve(&font.family).unwrap();
    let bounds = text_bounds(face, font.size, anchor, "Hi", 200, 100).unwrap();
    let bitmap = canvas.bitmap();
    let inside = bitmap.count_differing(bounds, WHITE);
    assert!(inside > 20, "too few glyph pixels: {inside}");
    assert_eq!(bitmap.count_differing(bitmap.bounds(), WHITE), inside);
}

#[test]
fn test_multiline_text_grows_downwards() {
    let canvas = Canvas::new(200, 200).unwrap();
    let face = canvas.fonts().resolve("Hack").unwrap();
    let one = text_bounds(face, 20.0, pos2(10.0, 10.0), "ab", 200, 200).unwrap();
    let two = text_bounds(face, 20.0, pos2(10.0, 10.0), "ab\ncd", 200, 200).unwrap();
    assert!(two.bottom() > one.bottom());
    assert_eq!(two.y, one.y);
}

#[test]
fn test_empty_text_commit_is_noop() {
    let mut canvas = Canvas::new(50, 50).unwrap();
    canvas.select_tool(ToolKind::Text);
    canvas.begin_gesture(pos2(5.0, 5.0));
    canvas.insert_text("x");
    canvas.delete_backward();
    canvas.confirm_text();
    assert_eq!(canvas.bitmap().count_differing(canvas.bitmap().bounds(), WHITE), 0);
}

#[test]
fn test_keyboard_input_ignored_without_edit() {
    let mut canvas = Canvas::new(50, 50).unwrap();
    canvas.insert_text("nothing");
    canvas.select_tool(ToolKind::Text);
    canvas.insert_text("still nothing");
    assert!(!canvas.is_editing_text());
    assert_eq!(canvas.text_buffer(), None);
}

#[test]
fn test_png_round_trip_is_pixel_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.png");

    let mut canvas = Canvas::new(64, 48).unwrap();
    canvas.set_color(Color32::from_rgba_unmultiplied(10, 200, 30, 128));
    canvas.set_width(5.0);
    canvas.begin_gesture(pos2(3.0, 3.0));
    canvas.continue_gesture(pos2(60.0, 40.0));
    canvas.end_gesture(pos2(60.0, 40.0));
    let original = canvas.bitmap().clone();
    canvas.save(&path).unwrap();

    let mut reloaded = Canvas::new(10, 10).unwrap();
    reloaded.load(&path).unwrap();
    assert_eq!(reloaded.bitmap().pixels(), original.pixels());
}

#[test]
fn test_transparent_pixels_survive_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alpha.png");
    let mut canvas = Canvas::new(4, 4).unwrap();
    let mut pixels = canvas.bitmap().pixels().clone();
    pixels.put_pixel(1, 2, Rgba([9, 8, 7, 0]));
    pixels.put_pixel(3, 3, Rgba([1, 2, 3, 77]));
    canvas.replace_bitmap(bitmap_paint::Bitmap::from_image(pixels.clone(), WHITE));
    canvas.save(&path).unwrap();

    let mut reloaded = Canvas::new(1, 1).unwrap();
    reloaded.load(&path).unwrap();
    assert_eq!(reloaded.bitmap().pixels(), &pixels);
}

#[test]
fn test_failed_load_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.png");
    std::fs::write(&bogus, b"definitely not a png").unwrap();

    let mut canvas = Canvas::new(30, 30).unwrap();
    canvas.begin_gesture(pos2(5.0, 5.0));
    canvas.continue_gesture(pos2(10.0, 10.0));
    let before = canvas.bitmap().clone();

    assert!(matches!(canvas.load(&bogus), Err(PaintError::Image(_))));
    assert!(canvas.load(&dir.path().join("missing.png")).is_err());
    assert_eq!(canvas.bitmap(), &before);
    // The stroke in progress is still there.
    assert_eq!(canvas.pending_stroke().map(|s| s.points().len()), Some(2));
}

#[test]
fn test_load_discards_pending_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.png");
    Canvas::new(20, 10).unwrap().save(&path).unwrap();

    let mut canvas = Canvas::new(50, 50).unwrap();
    canvas.select_tool(ToolKind::RectSelect);
    canvas.begin_gesture(pos2(1.0, 1.0));
    canvas.end_gesture(pos2(20.0, 20.0));
    assert!(canvas.selection().is_some());

    canvas.load(&path).unwrap();
    assert!(canvas.selection().is_none());
    assert_eq!(canvas.bitmap().dimensions(), (20, 10));
    assert_eq!(canvas.active_tool_kind(), ToolKind::RectSelect);
}

#[test]
fn test_unknown_extension_fails_to_save() {
    let dir = tempfile::tempdir().unwrap();
    let canvas = Canvas::new(8, 8).unwrap();
    assert!(canvas.save(&dir.path().join("picture.nope")).is_err());
}

#[test]
fn test_jpeg_save_drops_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    let canvas = Canvas::new(16, 16).unwrap();
    canvas.save(&path).unwrap();
    let mut reloaded = Canvas::new(1, 1).unwrap();
    reloaded.load(&path).unwrap();
    assert_eq!(reloaded.bitmap().dimensions(), (16, 16));
}
