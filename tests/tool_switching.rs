use bitmap_paint::bitmap::WHITE;
use bitmap_paint::{Canvas, EditorEvent, EventBus, ToolKind};
use egui::pos2;

fn painted(canvas: &Canvas) -> usize {
    canvas.bitmap().count_differing(canvas.bitmap().bounds(), WHITE)
}

#[test]
fn test_switch_mid_stroke_commits_path() {
    let mut canvas = Canvas::new(60, 60).unwrap();
    canvas.set_width(3.0);
    canvas.begin_gesture(pos2(10.0, 10.0));
    canvas.continue_gesture(pos2(30.0, 10.0));
    canvas.continue_gesture(pos2(30.0, 40.0));
    assert_eq!(canvas.pending_stroke().unwrap().points().len(), 3);
    assert_eq!(painted(&canvas), 0);

    canvas.select_tool(ToolKind::RectSelect);
    assert!(canvas.pending_stroke().is_none());
    assert_eq!(canvas.active_tool_kind(), ToolKind::RectSelect);
    let bitmap = canvas.bitmap();
    for (x, y) in [(10, 10), (20, 10), (30, 10), (30, 25), (30, 39)] {
        assert_ne!(bitmap.pixel(x, y), Some(WHITE), "missing ({x}, {y})");
    }

    // The late release goes to the new tool and changes nothing.
    let before = canvas.bitmap().clone();
    canvas.end_gesture(pos2(30.0, 40.0));
    assert_eq!(canvas.bitmap(), &before);
}

#[test]
fn test_switch_commits_non_empty_text() {
    let mut canvas = Canvas::new(120, 60).unwrap();
    canvas.select_tool(ToolKind::Text);
    canvas.begin_gesture(pos2(5.0, 5.0));
    canvas.end_gesture(pos2(5.0, 5.0));
    canvas.insert_text("Ok");
    canvas.select_tool(ToolKind::Pencil);
    assert!(painted(&canvas) > 0);
    assert!(!canvas.is_editing_text());
}

#[test]
fn test_switch_discards_empty_text() {
    let mut canvas = Canvas::new(120, 60).unwrap();
    canvas.select_tool(ToolKind::Text);
    canvas.begin_gesture(pos2(5.0, 5.0));
    canvas.select_tool(ToolKind::Pencil);
    assert_eq!(painted(&canvas), 0);
}

#[test]
fn test_switch_clears_marked_selection_without_pixels() {
    let mut canvas = Canvas::new(60, 60).unwrap();
    canvas.select_tool(ToolKind::RectSelect);
    canvas.begin_gesture(pos2(5.0, 5.0));
    canvas.end_gesture(pos2(25.0, 25.0));
    assert!(canvas.selection().is_some());

    canvas.select_tool(ToolKind::Pencil);
    canvas.select_tool(ToolKind::RectSelect);
    assert!(canvas.selection().is_none());
    assert_eq!(painted(&canvas), 0);
}

#[test]
fn test_switch_mid_drag_drops_block() {
    let mut canvas = Canvas::new(60, 60).unwrap();
    canvas.set_width(6.0);
    canvas.begin_gesture(pos2(10.0, 10.0));
    canvas.end_gesture(pos2(10.0, 10.0));
    let dot = painted(&canvas);

    canvas.select_tool(ToolKind::RectSelect);
    canvas.begin_gesture(pos2(0.0, 0.0));
    canvas.end_gesture(pos2(20.0, 20.0));
    canvas.begin_gesture(pos2(10.0, 10.0));
    canvas.continue_gesture(pos2(40.0, 40.0));
    canvas.select_tool(ToolKind::Pencil);

    let bitmap = canvas.bitmap();
    assert_eq!(bitmap.pixel(10, 10), Some(WHITE));
    assert_ne!(bitmap.pixel(40, 40), Some(WHITE));
    assert_eq!(painted(&canvas), dot);
}

#[test]
fn test_reselecting_same_tool_keeps_pending_state() {
    let mut canvas = Canvas::new(60, 60).unwrap();
    canvas.begin_gesture(pos2(10.0, 10.0));
    canvas.select_tool(ToolKind::Pencil);
    assert!(canvas.pending_stroke().is_some());
}

#[test]
fn test_picker_events_via_bus() {
    let mut canvas = Canvas::new(60, 60).unwrap();
    let bus = EventBus::new();
    canvas.begin_gesture(pos2(10.0, 10.0));
    canvas.continue_gesture(pos2(20.0, 20.0));
    bus.emit(EditorEvent::WidthSelected(-1.0));
    bus.emit(EditorEvent::ToolSelected(ToolKind::Text));
    assert_eq!(bus.dispatch(&mut canvas), 2);

    assert_eq!(canvas.params().width(), 2.0);
    assert_eq!(canvas.active_tool_kind(), ToolKind::Text);
    assert!(painted(&canvas) > 0);
}
