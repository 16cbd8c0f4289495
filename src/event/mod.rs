mod bus;
mod events;

pub use bus::EventBus;
pub use events::EditorEvent;

/// Receives picker events. The canvas implements this.
pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}
