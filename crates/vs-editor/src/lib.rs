pub mod config;
pub mod controller;
pub mod history;
pub mod input;
pub mod persist;
pub mod shortcuts;
pub mod style;
pub mod tools;

pub use config::{EditorConfig, PlacementDefaults};
pub use controller::Controller;
pub use history::{History, HistoryRecord, Undone};
pub use input::{InputEvent, Modifiers};
pub use persist::{BlobStore, MemoryStore, StoreError, load_drawing, save_drawing};
pub use style::StyleInputs;
pub use tools::{Cursor, ShapeKind, ToolState};
