mod central_panel;
mod color_bar;
mod line_width;
mod toolbar;
mod tools_panel;

pub use central_panel::central_panel;
pub use color_bar::color_bar;
pub use line_width::line_width_bar;
pub use toolbar::{font_picker, toolbar};
pub use tools_panel::tools_panel;
