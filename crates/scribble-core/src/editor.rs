//! The drawing editor.
//!
//! [`Editor`] owns the surface, tool state and history of one drawing.
//! Pointer handlers paint into the surface and record a history entry when a
//! stroke completes. Undo and redo restore snapshots in two steps: the cursor
//! moves immediately and a [`RestoreRequest`] is issued, then the decoded
//! snapshot is applied. Only the most recently issued request is applied.

use crate::color::Rgba8;
use crate::config::EditorConfig;
use crate::drawings::{DrawingRecord, DrawingStore, SaveOutcome, SaveRequest};
use crate::export::{PngDownload, download_file_name};
use crate::history::History;
use crate::session::Session;
use crate::shapes::Shape;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::storage::{KeyValueStore, StorageError};
use crate::surface::{DecodedSnapshot, Surface, SurfaceError, SurfaceResult};
use crate::tools::{StrokeEnd, ToolKind, ToolManager, ToolState};
use kurbo::Point;
use thiserror::Error;

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// A snapshot waiting to be decoded and painted.
#[derive(Debug, Clone)]
pub struct RestoreRequest {
    generation: u64,
    snapshot: Snapshot,
}

impl RestoreRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Decode the snapshot. This is the slow part and may run elsewhere.
    pub fn decode(self) -> SurfaceResult<DecodedRestore> {
        Ok(DecodedRestore {
            generation: self.generation,
            decoded: DecodedSnapshot::decode(&self.snapshot)?,
        })
    }
}

/// A decoded restore, ready for [`Editor::complete_restore`].
pub struct DecodedRestore {
    generation: u64,
    decoded: DecodedSnapshot,
}

impl DecodedRestore {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Editor state for one drawing.
pub struct Editor {
    config: EditorConfig,
    surface: Surface,
    tools: ToolManager,
    history: History,
    title: String,
    drawing_id: Option<String>,
    restore_generation: u64,
}

impl Editor {
    /// A blank white drawing. The blank bitmap is the first history entry.
    pub fn new(config: EditorConfig, width: u32, height: u32) -> EditorResult<Self> {
        let tools = ToolManager::new(config.default_tool, config.stroke_color, config.brush_width);
        let mut editor = Self {
            surface: Surface::new(width, height)?,
            tools,
            history: History::with_limit(config.history_limit),
            title: config.default_title.clone(),
            drawing_id: None,
            restore_generation: 0,
            config,
        };
        editor.record()?;
        Ok(editor)
    }

    /// Open a saved drawing: its image painted over white is the first entry.
    pub fn open(
        config: EditorConfig,
        width: u32,
        height: u32,
        record: &DrawingRecord,
    ) -> EditorResult<Self> {
        let decoded = DecodedSnapshot::decode(&record.snapshot()?)?;

        let tools = ToolManager::new(config.default_tool, config.stroke_color, config.brush_width);
        let mut surface = Surface::new(width, height)?;
        surface.paint_snapshot(&decoded);

        let mut editor = Self {
            surface,
            tools,
            history: History::with_limit(config.history_limit),
            title: record.title.clone(),
            drawing_id: Some(record.id.clone()),
            restore_generation: 0,
            config,
        };
        editor.record()?;
        log::info!("Opened drawing {} ({})", record.id, record.title);
        Ok(editor)
    }

    /// Create the editor for a route.
    ///
    /// With an identifier, the matching record is opened. An identifier with
    /// no record gives a blank drawing that keeps the identifier.
    pub fn mount<S: KeyValueStore + ?Sized>(
        config: EditorConfig,
        width: u32,
        height: u32,
        drawing_id: Option<&str>,
        store: &DrawingStore<S>,
    ) -> EditorResult<Self> {
        let Some(id) = drawing_id else {
            log::info!("Mounted new drawing ({}x{})", width, height);
            return Self::new(config, width, height);
        };

        match store.find(id)? {
            Some(record) => match Self::open(config.clone(), width, height, &record) {
                Err(EditorError::Snapshot(e)) => Self::blank_for(config, width, height, &record, e),
                Err(EditorError::Surface(e @ SurfaceError::Decode(_))) => {
                    Self::blank_for(config, width, height, &record, e)
                }
                result => result,
            },
            None => {
                log::warn!("Drawing {} not found, starting blank", id);
                let mut editor = Self::new(config, width, height)?;
                editor.drawing_id = Some(id.to_string());
                Ok(editor)
            }
        }
    }

    /// A blank drawing standing in for a record whose image is unreadable.
    /// Keeps the record's identifier and title so saving updates it.
    fn blank_for(
        config: EditorConfig,
        width: u32,
        height: u32,
        record: &DrawingRecord,
        error: impl std::fmt::Display,
    ) -> EditorResult<Self> {
        log::warn!("Drawing {} has an unreadable image, starting blank: {}", record.id, error);
        let mut editor = Self::new(config, width, height)?;
        editor.title = record.title.clone();
        editor.drawing_id = Some(record.id.clone());
        Ok(editor)
    }

    // Pointer input

    /// Start a drag.
    pub fn pointer_down(&mut self, point: Point) {
        self.tools.begin(point);
    }

    /// Continue a drag. Free-hand tools paint the segment immediately.
    pub fn pointer_move(&mut self, point: Point) {
        if let Some((from, to)) = self.tools.update(point) {
            let pen = self.tools.pen();
            self.surface.stroke_segment(from, to, pen);
        }
    }

    /// Finish a drag. Shape tools paint their shape; any completed drag is
    /// recorded. Returns whether a history entry was added.
    pub fn pointer_up(&mut self, point: Point) -> EditorResult<bool> {
        let pen = self.tools.pen();
        let Some(end) = self.tools.end(point) else {
            return Ok(false);
        };
        if let StrokeEnd::Shape(shape) = end {
            self.surface.stroke_shape(&shape, pen);
        }
        self.commit()?;
        Ok(true)
    }

    /// The pointer left the canvas. Ends the drag at its last position.
    pub fn pointer_leave(&mut self) -> EditorResult<bool> {
        match self.tools.state {
            ToolState::Dragging { last, .. } => self.pointer_up(last),
            ToolState::Idle => Ok(false),
        }
    }

    /// The shape a drag in progress would commit, for overlay previews.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.tools.preview_shape()
    }

    pub fn is_drawing(&self) -> bool {
        self.tools.is_active()
    }

    // Controls

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Select a tool. Cancels a drag in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn color(&self) -> Rgba8 {
        self.tools.color()
    }

    pub fn set_color(&mut self, color: Rgba8) {
        self.tools.set_color(color);
    }

    pub fn brush_width(&self) -> u32 {
        self.tools.brush_width()
    }

    /// Set the brush width, clamped to the slider range.
    pub fn set_brush_width(&mut self, width: u32) {
        self.tools.set_brush_width(width);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Identifier of the stored record, once saved or when editing one.
    pub fn drawing_id(&self) -> Option<&str> {
        self.drawing_id.as_deref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // History

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Move the cursor back and issue a restore for the new entry.
    pub fn request_undo(&mut self) -> Option<RestoreRequest> {
        self.tools.cancel();
        let snapshot = self.history.undo()?.clone();
        Some(self.issue_restore(snapshot))
    }

    /// Move the cursor forward and issue a restore for the new entry.
    pub fn request_redo(&mut self) -> Option<RestoreRequest> {
        self.tools.cancel();
        let snapshot = self.history.redo()?.clone();
        Some(self.issue_restore(snapshot))
    }

    /// Paint a decoded restore. Returns `false` if a newer one was issued.
    pub fn complete_restore(&mut self, restore: DecodedRestore) -> bool {
        if restore.generation != self.restore_generation {
            log::warn!(
                "Ignoring stale restore {} (current {})",
                restore.generation,
                self.restore_generation
            );
            return false;
        }
        self.surface.restore(&restore.decoded);
        true
    }

    /// Undo and restore immediately. Returns whether anything changed.
    pub fn undo(&mut self) -> EditorResult<bool> {
        match self.request_undo() {
            Some(request) => Ok(self.complete_restore(request.decode()?)),
            None => Ok(false),
        }
    }

    /// Redo and restore immediately. Returns whether anything changed.
    pub fn redo(&mut self) -> EditorResult<bool> {
        match self.request_redo() {
            Some(request) => Ok(self.complete_restore(request.decode()?)),
            None => Ok(false),
        }
    }

    /// Fill the bitmap white and record it.
    pub fn clear(&mut self) -> EditorResult<()> {
        self.tools.cancel();
        self.surface.clear();
        self.commit()
    }

    // Persistence

    /// Save the current bitmap and title.
    ///
    /// A newly created record's identifier is adopted so later saves update it.
    pub fn save<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &DrawingStore<S>,
        session: &Session,
    ) -> EditorResult<SaveOutcome> {
        let image = self.surface.snapshot()?;
        let outcome = store.save(
            session,
            SaveRequest {
                drawing_id: self.drawing_id.as_deref(),
                title: &self.title,
                image: &image,
            },
        )?;
        if let SaveOutcome::Created(id) = &outcome {
            self.drawing_id = Some(id.clone());
        }
        Ok(outcome)
    }

    /// Encode the bitmap as `<title>.png`.
    pub fn download(&self) -> EditorResult<PngDownload> {
        let download = PngDownload {
            file_name: download_file_name(&self.title, &self.config.default_title),
            bytes: self.surface.encode_png()?,
        };
        log::info!(
            "Prepared download {} ({} bytes)",
            download.file_name,
            download.bytes.len()
        );
        Ok(download)
    }

    fn issue_restore(&mut self, snapshot: Snapshot) -> RestoreRequest {
        self.restore_generation += 1;
        log::debug!(
            "Restore {} issued for history entry {:?}",
            self.restore_generation,
            self.history.cursor()
        );
        RestoreRequest {
            generation: self.restore_generation,
            snapshot,
        }
    }

    /// Record the surface after an edit. Pending restores are now stale.
    fn commit(&mut self) -> EditorResult<()> {
        self.restore_generation += 1;
        self.record()
    }

    fn record(&mut self) -> EditorResult<()> {
        self.history.record(self.surface.snapshot()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::User;
    use crate::storage::MemoryStorage;
    use std::sync::Arc;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default(), 200, 200).unwrap()
    }

    fn is_ink(editor: &Editor, x: u32, y: u32) -> bool {
        editor.surface().pixel(x, y).is_some_and(|p| p.r < 128)
    }

    fn stroke(editor: &mut Editor, from: (f64, f64), to: (f64, f64)) {
        editor.pointer_down(Point::new(from.0, from.1));
        editor.pointer_move(Point::new(to.0, to.1));
        assert!(editor.pointer_up(Point::new(to.0, to.1)).unwrap());
    }

    fn pixels(editor: &Editor) -> Vec<u8> {
        editor.surface().data().to_vec()
    }

    fn store() -> DrawingStore<MemoryStorage> {
        DrawingStore::new(Arc::new(MemoryStorage::new()))
    }

    fn session() -> Session {
        Session::signed_in(User::new("user-1", "Ada"))
    }

    #[test]
    fn test_new_editor_has_initial_entry() {
        let editor = editor();
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.history().cursor(), Some(0));
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert_eq!(editor.title(), "Untitled Drawing");
        assert_eq!(editor.drawing_id(), None);
    }

    #[test]
    fn test_strokes_extend_history() {
        let mut editor = editor();
        for i in 0..4 {
            let y = 20.0 + 30.0 * i as f64;
            stroke(&mut editor, (10.0, y), (150.0, y));
        }
        assert_eq!(editor.history().len(), 5);
        assert_eq!(editor.history().cursor(), Some(4));
    }

    #[test]
    fn test_pencil_paints_while_moving() {
        let mut editor = editor();
        editor.pointer_down(Point::new(10.0, 100.0));
        editor.pointer_move(Point::new(190.0, 100.0));
        assert!(is_ink(&editor, 100, 100));
        assert_eq!(editor.history().len(), 1);
        editor.pointer_up(Point::new(190.0, 100.0)).unwrap();
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_eraser_paints_white() {
        let mut editor = editor();
        stroke(&mut editor, (10.0, 100.0), (190.0, 100.0));
        assert!(is_ink(&editor, 100, 100));

        editor.set_tool(ToolKind::Eraser);
        stroke(&mut editor, (100.0, 10.0), (100.0, 190.0));
        assert!(!is_ink(&editor, 100, 100));
        assert!(is_ink(&editor, 30, 100));
    }

    #[test]
    fn test_shape_commits_on_release_only() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Rectangle);
        editor.pointer_down(Point::new(10.0, 10.0));
        editor.pointer_move(Point::new(50.0, 40.0));
        assert!(!is_ink(&editor, 10, 25));
        assert!(editor.preview_shape().is_some());

        editor.pointer_up(Point::new(50.0, 40.0)).unwrap();
        assert!(is_ink(&editor, 10, 25));
        assert!(is_ink(&editor, 30, 39));
        assert!(!is_ink(&editor, 30, 25));
        assert!(editor.preview_shape().is_none());
    }

    #[test]
    fn test_circle_from_drag() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Circle);
        editor.pointer_down(Point::new(100.0, 100.0));
        editor.pointer_up(Point::new(100.0, 150.0)).unwrap();
        assert!(is_ink(&editor, 100, 150));
        assert!(is_ink(&editor, 50, 100));
        assert!(!is_ink(&editor, 100, 100));
    }

    #[test]
    fn test_pointer_up_while_idle_is_ignored() {
        let mut editor = editor();
        assert!(!editor.pointer_up(Point::new(5.0, 5.0)).unwrap());
        assert!(!editor.pointer_leave().unwrap());
        editor.pointer_move(Point::new(6.0, 6.0));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_pointer_leave_commits_shape() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        editor.pointer_down(Point::new(20.0, 100.0));
        editor.pointer_move(Point::new(180.0, 100.0));
        assert!(editor.pointer_leave().unwrap());
        assert!(is_ink(&editor, 100, 100));
        assert_eq!(editor.history().len(), 2);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn test_set_tool_cancels_drag() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        editor.pointer_down(Point::new(20.0, 100.0));
        editor.set_tool(ToolKind::Rectangle);
        assert!(!editor.is_drawing());
        assert!(!editor.pointer_up(Point::new(180.0, 100.0)).unwrap());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_pixel_identical() {
        let mut editor = editor();
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));
        let after_first = pixels(&editor);
        stroke(&mut editor, (10.0, 150.0), (190.0, 150.0));
        let after_second = pixels(&editor);

        assert!(editor.undo().unwrap());
        assert_eq!(pixels(&editor), after_first);
        assert!(editor.redo().unwrap());
        assert_eq!(pixels(&editor), after_second);
        assert!(!editor.redo().unwrap());
    }

    #[test]
    fn test_undo_to_blank() {
        let mut editor = editor();
        let blank = pixels(&editor);
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));
        assert!(editor.undo().unwrap());
        assert_eq!(pixels(&editor), blank);
        assert!(!editor.undo().unwrap());
        assert_eq!(editor.history().cursor(), Some(0));
    }

    #[test]
    fn test_stroke_after_undo_truncates() {
        let mut editor = editor();
        for y in [30.0, 60.0, 90.0] {
            stroke(&mut editor, (10.0, y), (190.0, y));
        }
        editor.undo().unwrap();
        editor.undo().unwrap();
        assert!(editor.can_redo());

        stroke(&mut editor, (100.0, 10.0), (100.0, 190.0));
        assert_eq!(editor.history().len(), 3);
        assert_eq!(editor.history().cursor(), Some(2));
        assert!(!editor.can_redo());
        assert!(!editor.redo().unwrap());
    }

    #[test]
    fn test_stale_restore_ignored() {
        let mut editor = editor();
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));
        let after_first = pixels(&editor);
        stroke(&mut editor, (10.0, 150.0), (190.0, 150.0));

        let older = editor.request_undo().unwrap();
        let newer = editor.request_undo().unwrap();
        assert!(newer.generation() > older.generation());
        let older = older.decode().unwrap();
        let newer = newer.decode().unwrap();

        assert!(editor.complete_restore(newer));
        let blank = pixels(&editor);
        assert_ne!(blank, after_first);
        assert!(!editor.complete_restore(older));
        assert_eq!(pixels(&editor), blank);
        assert_eq!(editor.history().cursor(), Some(0));
    }

    #[test]
    fn test_commit_invalidates_pending_restore() {
        let mut editor = editor();
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));
        let pending = editor.request_undo().unwrap().decode().unwrap();
        stroke(&mut editor, (10.0, 150.0), (190.0, 150.0));
        assert!(!editor.complete_restore(pending));
        assert!(is_ink(&editor, 100, 150));
    }

    #[test]
    fn test_clear_records_entry() {
        let mut editor = editor();
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));
        editor.clear().unwrap();
        assert!(!is_ink(&editor, 100, 50));
        assert_eq!(editor.history().len(), 3);
        editor.undo().unwrap();
        assert!(is_ink(&editor, 100, 50));
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig {
            history_limit: Some(2),
            ..EditorConfig::default()
        };
        let mut editor = Editor::new(config, 50, 50).unwrap();
        stroke(&mut editor, (5.0, 10.0), (45.0, 10.0));
        stroke(&mut editor, (5.0, 30.0), (45.0, 30.0));
        assert_eq!(editor.history().len(), 2);
        assert!(editor.undo().unwrap());
        assert!(!editor.undo().unwrap());
    }

    #[test]
    fn test_brush_width_clamped() {
        let mut editor = editor();
        editor.set_brush_width(500);
        assert_eq!(editor.brush_width(), 50);
        editor.set_brush_width(0);
        assert_eq!(editor.brush_width(), 1);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Editor::new(EditorConfig::default(), 0, 10),
            Err(EditorError::Surface(SurfaceError::InvalidDimensions { .. }))
        ));
    }

    #[test]
    fn test_save_then_update() {
        let store = store();
        let session = session();
        let mut editor = editor();
        editor.set_title("Sketch");
        stroke(&mut editor, (10.0, 50.0), (190.0, 50.0));

        let created = editor.save(&store, &session).unwrap();
        let SaveOutcome::Created(id) = created else {
            panic!("expected a created record");
        };
        assert_eq!(editor.drawing_id(), Some(id.as_str()));
        let first = store.find(&id).unwrap().unwrap();

        editor.set_title("Sketch 2");
        stroke(&mut editor, (10.0, 150.0), (190.0, 150.0));
        assert_eq!(
            editor.save(&store, &session).unwrap(),
            SaveOutcome::Updated(id.clone())
        );

        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].created_at, first.created_at);
        assert_eq!(records[0].title, "Sketch 2");
        assert_ne!(records[0].image, first.image);
    }

    #[test]
    fn test_save_without_user() {
        let storage = Arc::new(MemoryStorage::new());
        let store = DrawingStore::new(Arc::clone(&storage));
        let mut editor = editor();
        let outcome = editor.save(&store, &Session::anonymous()).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Skipped(crate::drawings::SkipReason::NoUser)
        );
        assert!(storage.is_empty());
        assert_eq!(editor.drawing_id(), None);
    }

    #[test]
    fn test_mount_opens_saved_drawing() {
        let store = store();
        let mut original = editor();
        original.set_title("Saved");
        stroke(&mut original, (10.0, 100.0), (190.0, 100.0));
        let outcome = original.save(&store, &session()).unwrap();
        let id = outcome.drawing_id().unwrap().to_string();

        let reopened = Editor::mount(EditorConfig::default(), 200, 200, Some(&id), &store).unwrap();
        assert_eq!(reopened.title(), "Saved");
        assert_eq!(reopened.drawing_id(), Some(id.as_str()));
        assert_eq!(reopened.history().len(), 1);
        assert!(is_ink(&reopened, 100, 100));
        assert_eq!(pixels(&reopened), pixels(&original));
    }

    #[test]
    fn test_mount_missing_drawing_keeps_id() {
        let storage = Arc::new(MemoryStorage::new());
        let store = DrawingStore::new(Arc::clone(&storage));
        let mut editor =
            Editor::mount(EditorConfig::default(), 100, 100, Some("gone"), &store).unwrap();
        assert_eq!(editor.drawing_id(), Some("gone"));
        assert!(!is_ink(&editor, 50, 50));

        let outcome = editor.save(&store, &session()).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Skipped(crate::drawings::SkipReason::RecordNotFound)
        );
        assert!(storage.is_empty());
    }

    #[test]
    fn test_mount_unreadable_image_keeps_id() {
        let store = store();
        let mut record = DrawingRecord::new("Broken", &Snapshot::from_png(vec![1, 2, 3]), "user-1");
        record.image = "data:image/png;base64,AAAA".to_string();
        let id = record.id.clone();
        store.store_all(std::slice::from_ref(&record)).unwrap();

        let mut editor = Editor::mount(EditorConfig::default(), 100, 100, Some(&id), &store).unwrap();
        assert_eq!(editor.drawing_id(), Some(id.as_str()));
        assert_eq!(editor.title(), "Broken");
        assert_eq!(editor.history().len(), 1);
        assert!(!is_ink(&editor, 50, 50));

        let outcome = editor.save(&store, &session()).unwrap();
        assert_eq!(outcome, SaveOutcome::Updated(id.clone()));
        let records = store.load_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert!(records[0].snapshot().is_ok());
    }

    #[test]
    fn test_mount_malformed_data_uri_keeps_id() {
        let store = store();
        let mut record = DrawingRecord::new("Odd", &Snapshot::from_png(vec![1]), "user-1");
        record.image = "not a data uri".to_string();
        let id = record.id.clone();
        store.store_all(std::slice::from_ref(&record)).unwrap();

        let editor = Editor::mount(EditorConfig::default(), 100, 100, Some(&id), &store).unwrap();
        assert_eq!(editor.drawing_id(), Some(id.as_str()));
        assert_eq!(editor.title(), "Odd");
    }

    #[test]
    fn test_mount_without_id() {
        let editor = Editor::mount(EditorConfig::default(), 100, 80, None, &store()).unwrap();
        assert_eq!(editor.surface().width(), 100);
        assert_eq!(editor.surface().height(), 80);
        assert_eq!(editor.drawing_id(), None);
    }

    #[test]
    fn test_download_name() {
        let mut editor = editor();
        editor.set_title("Portrait");
        let download = editor.download().unwrap();
        assert_eq!(download.file_name, "Portrait.png");
        assert!(download.bytes.starts_with(&[0x89, b'P', b'N', b'G']));

        editor.set_title("");
        assert_eq!(editor.download().unwrap().file_name, "Untitled Drawing.png");
    }
}
