#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bitmap;
pub mod canvas;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod fonts;
pub mod geometry;
pub mod panels;
pub mod params;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod tools;

pub use app::PaintApp;
pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use command::Command;
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use params::{DrawingParameters, FontSpec};
pub use renderer::Renderer;
pub use stroke::{PendingStroke, Stroke};
pub use tools::{Tool, ToolKind, ToolType};
