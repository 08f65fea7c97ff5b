//! Scribble Core Library
//!
//! Platform-agnostic drawing editor: raster surface, tools, undo history and
//! persistence of drawings to a key-value store.

pub mod color;
pub mod config;
pub mod drawings;
pub mod editor;
pub mod export;
pub mod history;
pub mod route;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod storage;
pub mod surface;
pub mod tools;

pub use color::Rgba8;
pub use config::{ConfigError, EditorConfig};
pub use drawings::{DrawingRecord, DrawingStore, SaveOutcome, SaveRequest, SkipReason, DRAWINGS_KEY};
pub use editor::{DecodedRestore, Editor, EditorError, EditorResult, RestoreRequest};
pub use export::{download_file_name, PngDownload, PNG_MIME};
pub use history::History;
pub use route::Route;
pub use session::{Session, User};
pub use shapes::Shape;
pub use snapshot::{Snapshot, SnapshotError};
pub use storage::{KeyValueStore, MemoryStorage, PlatformStorage, StorageError, StorageResult};
pub use surface::{Pen, Surface, SurfaceError, SurfaceResult};
pub use tools::{ToolKind, ToolManager, ToolState};
