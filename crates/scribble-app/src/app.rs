//! Core application state and lifecycle.

use scribble_core::storage::{KeyValueStore, MemoryStorage, create_default_storage};
use scribble_core::{
    DrawingStore, Editor, EditorConfig, RestoreRequest, Route, SaveOutcome, Session, SkipReason,
    User,
};
use std::fmt::Display;
use std::sync::Arc;
use vello::util::{RenderContext, RenderSurface};
#[cfg(not(target_arch = "wasm32"))]
use vello::wgpu::PresentMode;
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::file_ops;
use crate::ui::{CanvasView, DrawingSummary, UiAction, UiState, render_ui};

/// Decoded snapshots waiting to be painted, tagged with the editor mount
/// that requested them.
mod restore_queue {
    use scribble_core::DecodedRestore;
    use std::cell::RefCell;

    thread_local! {
        static PENDING: RefCell<Vec<(u64, DecodedRestore)>> = const { RefCell::new(Vec::new()) };
    }

    pub fn push(mount: u64, decoded: DecodedRestore) {
        PENDING.with(|cell| cell.borrow_mut().push((mount, decoded)));
    }

    /// Take the decodes for `mount` in completion order. Decodes for any
    /// other mount are dropped.
    pub fn take_for(mount: u64) -> Vec<DecodedRestore> {
        PENDING.with(|cell| {
            cell.borrow_mut()
                .drain(..)
                .filter(|(m, _)| *m == mount)
                .map(|(_, decoded)| decoded)
                .collect()
        })
    }

    pub fn discard() {
        PENDING.with(|cell| cell.borrow_mut().clear());
    }

    /// Decode off the current event and wake the window when done.
    #[cfg(target_arch = "wasm32")]
    pub fn spawn_decode(
        mount: u64,
        request: scribble_core::RestoreRequest,
        window: std::sync::Arc<winit::window::Window>,
    ) {
        wasm_bindgen_futures::spawn_local(async move {
            match request.decode() {
                Ok(decoded) => {
                    push(mount, decoded);
                    window.request_redraw();
                }
                Err(e) => log::error!("Failed to decode snapshot: {}", e),
            }
        });
    }
}

/// Async render surface creation (WASM).
#[cfg(target_arch = "wasm32")]
mod surface_init {
    use std::cell::RefCell;
    use std::sync::Arc;
    use vello::util::{RenderContext, RenderSurface};
    use vello::wgpu::PresentMode;
    use winit::window::Window;

    thread_local! {
        static PENDING: RefCell<Option<(RenderContext, RenderSurface<'static>)>> = const { RefCell::new(None) };
    }

    pub fn spawn(window: Arc<Window>, width: u32, height: u32) {
        wasm_bindgen_futures::spawn_local(async move {
            log::info!("Creating surface asynchronously...");
            let mut render_cx = RenderContext::new();
            match render_cx
                .create_surface(window.clone(), width, height, PresentMode::AutoVsync)
                .await
            {
                Ok(surface) => {
                    log::info!("Surface created successfully");
                    PENDING.with(|cell| *cell.borrow_mut() = Some((render_cx, surface)));
                    window.request_redraw();
                }
                Err(e) => log::error!("Failed to create surface: {:?}", e),
            }
        });
    }

    pub fn take() -> Option<(RenderContext, RenderSurface<'static>)> {
        PENDING.with(|cell| cell.borrow_mut().take())
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Screen shown at startup.
    pub route: Route,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Scribble".to_string(),
            width: 1280,
            height: 800,
            route: Route::Dashboard,
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Pick the startup route from command-line arguments.
    ///
    /// Accepts `--drawing <id>`, `--new`, `--dashboard`, a route path such as
    /// `/draw/<id>`, or a bare drawing id.
    pub fn route_from_args<I: IntoIterator<Item = String>>(args: I) -> Route {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--drawing" | "-d" => {
                    return args.next().map(Route::EditDrawing).unwrap_or(Route::NewDrawing);
                }
                "--new" => return Route::NewDrawing,
                "--dashboard" => return Route::Dashboard,
                path if path.starts_with('/') || path.starts_with('#') => {
                    return Route::parse(path);
                }
                id if !id.starts_with('-') => return Route::EditDrawing(id.to_string()),
                _ => log::warn!("Ignoring unknown argument: {}", arg),
            }
        }
        Route::Dashboard
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Drawing
    editor: Option<Editor>,
    canvas_texture: Option<egui::TextureHandle>,
    /// The bitmap changed since the texture was last uploaded.
    canvas_dirty: bool,
    /// Bumped on every editor mount; restores from older mounts are dropped.
    mount_epoch: u64,

    // Persistence
    store: DrawingStore<dyn KeyValueStore>,
    session: Session,

    config: AppConfig,
}

impl AppState {
    /// Switch screens. Editors are mounted once the canvas area is laid out.
    fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {}", route);
        self.editor = None;
        restore_queue::discard();
        self.canvas_texture = None;
        self.canvas_dirty = false;
        self.ui_state.status = None;
        self.ui_state.route = route;

        if !self.ui_state.route.is_editor() {
            self.refresh_drawings();
        }

        #[cfg(target_arch = "wasm32")]
        crate::web::set_route_in_url(&self.ui_state.route);

        self.update_window_title();
    }

    fn refresh_drawings(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            self.ui_state.drawings.clear();
            return;
        };
        match self.store.list_for_user(user_id) {
            Ok(records) => {
                self.ui_state.drawings = records.iter().map(DrawingSummary::from).collect();
            }
            Err(e) => self.report_error("Failed to load drawings", e),
        }
    }

    fn mount_editor(&mut self, width: u32, height: u32) {
        let config = self.config.editor.clone();
        let drawing_id = self.ui_state.route.drawing_id().map(str::to_string);

        let editor = match Editor::mount(config.clone(), width, height, drawing_id.as_deref(), &self.store) {
            Ok(editor) => editor,
            Err(e) => {
                self.report_error("Failed to open drawing", e);
                match Editor::new(config, width, height) {
                    Ok(editor) => editor,
                    Err(e) => {
                        log::error!("Failed to create canvas: {}", e);
                        self.navigate(Route::Dashboard);
                        return;
                    }
                }
            }
        };

        self.mount_epoch += 1;
        restore_queue::discard();
        log::info!("Canvas mounted at {}x{}", width, height);
        self.ui_state.reset_for_editor(&editor);
        self.editor = Some(editor);
        self.canvas_dirty = true;
        self.update_window_title();
    }

    fn update_window_title(&self) {
        let title = match &self.editor {
            Some(editor) if !editor.title().trim().is_empty() => {
                format!("{} - {}", editor.title(), self.config.title)
            }
            _ => self.config.title.clone(),
        };
        self.window.set_title(&title);
    }

    /// Upload the bitmap to the canvas texture if it changed.
    fn update_canvas_texture(&mut self) {
        if !self.canvas_dirty {
            return;
        }
        let Some(editor) = &self.editor else {
            return;
        };

        let surface = editor.surface();
        let size = [surface.width() as usize, surface.height() as usize];
        let image = egui::ColorImage::from_rgba_premultiplied(size, surface.data());

        match &mut self.canvas_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.canvas_texture = Some(self.egui_ctx.load_texture(
                    "canvas",
                    image,
                    egui::TextureOptions::NEAREST,
                ));
            }
        }
        self.canvas_dirty = false;
    }

    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::OpenDashboard => self.navigate(Route::Dashboard),
            UiAction::NewDrawing => self.navigate(Route::NewDrawing),
            UiAction::OpenDrawing(id) => self.navigate(Route::EditDrawing(id)),
            UiAction::DeleteDrawing(id) => {
                match self.store.delete(&id) {
                    Ok(true) => self.ui_state.status = Some("Drawing deleted".to_string()),
                    Ok(false) => log::warn!("Drawing {} was already gone", id),
                    Err(e) => self.report_error("Failed to delete drawing", e),
                }
                self.refresh_drawings();
            }
            UiAction::SignIn(name) => {
                self.session.sign_in(User::new(uuid::Uuid::new_v4().to_string(), name));
                self.persist_session();
                self.refresh_drawings();
            }
            UiAction::SignOut => {
                self.session.sign_out();
                self.persist_session();
                self.refresh_drawings();
            }
            UiAction::MountCanvas { width, height } => {
                if self.editor.is_none() {
                    self.mount_editor(width, height);
                }
            }
            other => self.apply_editor_action(other),
        }
    }

    fn apply_editor_action(&mut self, action: UiAction) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match action {
            UiAction::SetTool(tool) => editor.set_tool(tool),
            UiAction::SetColor(color) => editor.set_color(color),
            UiAction::SetBrushWidth(width) => editor.set_brush_width(width),
            UiAction::SetTitle(title) => {
                editor.set_title(title);
                self.update_window_title();
            }
            UiAction::PointerDown(point) => editor.pointer_down(point),
            UiAction::PointerMove(point) => {
                editor.pointer_move(point);
                self.canvas_dirty = true;
            }
            UiAction::PointerUp(point) => {
                let result = editor.pointer_up(point);
                self.canvas_dirty = true;
                if let Err(e) = result {
                    self.report_error("Failed to record stroke", e);
                }
            }
            UiAction::PointerLeave => {
                let result = editor.pointer_leave();
                self.canvas_dirty = true;
                if let Err(e) = result {
                    self.report_error("Failed to record stroke", e);
                }
            }
            UiAction::Undo => {
                if let Some(request) = editor.request_undo() {
                    self.schedule_restore(request);
                }
            }
            UiAction::Redo => {
                if let Some(request) = editor.request_redo() {
                    self.schedule_restore(request);
                }
            }
            UiAction::Clear => {
                let result = editor.clear();
                self.canvas_dirty = true;
                if let Err(e) = result {
                    self.report_error("Failed to clear canvas", e);
                }
            }
            UiAction::Save => self.save(),
            UiAction::Download => {
                let result = editor.download();
                match result {
                    Ok(download) => match file_ops::export_png(&download) {
                        Ok(()) => self.ui_state.status = Some(file_ops::download_status(&download)),
                        Err(e) => self.report_error("Download failed", e),
                    },
                    Err(e) => self.report_error("Failed to encode PNG", e),
                }
            }
            _ => {}
        }

        if let Some(editor) = &self.editor {
            self.ui_state.sync_from_editor(editor);
        }
    }

    /// Decode a restore and queue it for the next frame. On the web the
    /// decode completes asynchronously.
    fn schedule_restore(&mut self, request: RestoreRequest) {
        #[cfg(target_arch = "wasm32")]
        {
            restore_queue::spawn_decode(self.mount_epoch, request, self.window.clone());
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            match request.decode() {
                Ok(decoded) => {
                    restore_queue::push(self.mount_epoch, decoded);
                    self.window.request_redraw();
                }
                Err(e) => self.report_error("Failed to restore snapshot", e),
            }
        }
    }

    /// Paint decodes finished since the last frame.
    fn apply_pending_restores(&mut self) {
        let pending = restore_queue::take_for(self.mount_epoch);
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        for decoded in pending {
            self.canvas_dirty |= editor.complete_restore(decoded);
        }
    }

    fn save(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match editor.save(&self.store, &self.session) {
            Ok(SaveOutcome::Created(id)) => {
                self.ui_state.status = Some("Saved".to_string());
                // Stay on the same canvas; only the route changes.
                self.ui_state.route = Route::EditDrawing(id);
                #[cfg(target_arch = "wasm32")]
                crate::web::set_route_in_url(&self.ui_state.route);
            }
            Ok(SaveOutcome::Updated(_)) => {
                self.ui_state.status = Some("Saved".to_string());
            }
            Ok(SaveOutcome::Skipped(SkipReason::NoUser)) => {
                self.ui_state.status = Some("Sign in to save drawings".to_string());
            }
            Ok(SaveOutcome::Skipped(SkipReason::RecordNotFound)) => {
                self.ui_state.status = Some("Drawing no longer exists; nothing saved".to_string());
            }
            Err(e) => self.report_error("Save failed", e),
        }
    }

    fn persist_session(&mut self) {
        self.ui_state.user_name = self.session.user().map(|u| u.name.clone());
        if let Err(e) = self.session.store(self.store.storage()) {
            self.report_error("Failed to store session", e);
        }
    }

    fn report_error(&mut self, context: &str, error: impl Display) {
        log::error!("{}: {}", context, error);
        self.ui_state.status = Some(format!("{}: {}", context, error));
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<RenderContext>,
    /// Window waiting for async surface creation (WASM only)
    pending_window: Option<Arc<Window>>,
    /// Flag to indicate async init is in progress
    #[cfg(target_arch = "wasm32")]
    init_in_progress: bool,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_window: None,
            #[cfg(target_arch = "wasm32")]
            init_in_progress: false,
        }
    }

    /// Run the application.
    pub async fn run(config: AppConfig) {
        let event_loop = match EventLoop::new() {
            Ok(event_loop) => event_loop,
            Err(e) => {
                log::error!("Failed to create event loop: {}", e);
                return;
            }
        };
        let app = App::with_config(config);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            if let Err(e) = event_loop.run_app(&mut app) {
                log::error!("Event loop error: {}", e);
            }
        }
    }

    /// Finish initialization after surface is created.
    fn finish_init(&mut self, window: Arc<Window>, surface: RenderSurface<'static>) {
        let Some(render_cx) = self.render_cx.as_ref() else {
            log::error!("RenderContext not initialized");
            return;
        };
        let device = &render_cx.devices[surface.dev_id].device;

        // Initialize egui
        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let storage: Arc<dyn KeyValueStore> = match create_default_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::error!("Storage unavailable, drawings will not persist: {}", e);
                Arc::new(MemoryStorage::new())
            }
        };
        let store = DrawingStore::with_key(storage, self.config.editor.storage_key.clone());
        let session = Session::load(store.storage()).unwrap_or_else(|e| {
            log::warn!("Failed to restore session: {}", e);
            Session::anonymous()
        });

        let ui_state = UiState::new(
            self.config.editor.default_title.clone(),
            session.user().map(|u| u.name.clone()),
        );

        log::info!("Scribble initialized - {}x{}", surface.config.width, surface.config.height);

        let mut state = AppState {
            window: window.clone(),
            surface,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state,
            editor: None,
            canvas_texture: None,
            canvas_dirty: false,
            mount_epoch: 0,
            store,
            session,
            config: self.config.clone(),
        };
        state.navigate(self.config.route.clone());
        self.state = Some(state);

        self.pending_window = None;

        // Request initial redraw
        window.request_redraw();
    }

    /// Start or finish async surface creation (WASM).
    #[cfg(target_arch = "wasm32")]
    fn poll_pending_init(&mut self) {
        let Some(window) = self.pending_window.clone() else {
            return;
        };

        if let Some((render_cx, surface)) = surface_init::take() {
            self.render_cx = Some(render_cx);
            self.finish_init(window, surface);
            return;
        }

        if !self.init_in_progress {
            self.init_in_progress = true;
            let (width, height) = web_viewport_size(self.config.width, self.config.height);
            surface_init::spawn(window.clone(), width, height);
        }
    }

    fn render_frame(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };

        state.apply_pending_restores();

        state.update_canvas_texture();

        // Run egui and collect actions
        let egui_input = state.egui_state.take_egui_input(&state.window);
        let mut actions = Vec::new();
        let egui_output = state.egui_ctx.run(egui_input, |ctx| {
            let canvas = match (&state.editor, &state.canvas_texture) {
                (Some(editor), Some(texture)) => Some(CanvasView {
                    texture,
                    size: [editor.surface().width(), editor.surface().height()],
                    preview: editor
                        .preview_shape()
                        .map(|shape| (shape, editor.color(), editor.brush_width() as f64)),
                }),
                _ => None,
            };
            actions = render_ui(ctx, &mut state.ui_state, canvas);
        });

        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());

        state.egui_state.handle_platform_output(&state.window, egui_output.platform_output);
        let egui_primitives = state.egui_ctx.tessellate(egui_output.shapes, egui_output.pixels_per_point);

        // Render
        let Some(render_cx) = self.render_cx.as_ref() else {
            return;
        };

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        // Update egui textures
        for (id, image_delta) in &egui_output.textures_delta.set {
            state.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

            state.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Clear(background_color()),
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Use forget_lifetime to satisfy egui-wgpu's 'static requirement
            let mut render_pass = render_pass.forget_lifetime();
            state.egui_renderer.render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        // Free egui textures
        for id in &egui_output.textures_delta.free {
            state.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        // Apply UI actions after the frame so they show up on the next one
        let had_actions = !actions.is_empty();
        for action in actions {
            state.apply_action(action);
        }

        if had_actions || repaint_now || state.canvas_dirty {
            state.window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.pending_window.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        #[cfg(target_arch = "wasm32")]
        let window_attrs = match web_window_attributes(&self.config) {
            Some(attrs) => attrs,
            None => {
                log::error!("Failed to attach canvas to the page");
                return;
            }
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        // On native, block on async surface creation
        #[cfg(not(target_arch = "wasm32"))]
        {
            let render_cx = self.render_cx.get_or_insert_with(RenderContext::new);
            match pollster::block_on(render_cx.create_surface(
                window.clone(),
                width,
                height,
                PresentMode::AutoVsync,
            )) {
                Ok(surface) => self.finish_init(window, surface),
                Err(e) => {
                    log::error!("Failed to create surface: {:?}", e);
                    event_loop.exit();
                }
            }
        }

        // On WASM, store window for later async initialization
        #[cfg(target_arch = "wasm32")]
        {
            let _ = (width, height);
            self.pending_window = Some(window.clone());
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            self.poll_pending_init();
            if let Some(window) = &self.pending_window {
                window.request_redraw();
            }
            return;
        }

        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => self.render_frame(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        #[cfg(target_arch = "wasm32")]
        if self.state.is_none() {
            self.poll_pending_init();
        }
    }
}

fn background_color() -> vello::wgpu::Color {
    let [r, g, b, _] = crate::widgets::theme::APP_BG.to_array();
    vello::wgpu::Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: 1.0,
    }
}

/// Browser viewport size in physical pixels.
#[cfg(target_arch = "wasm32")]
fn web_viewport_size(fallback_width: u32, fallback_height: u32) -> (u32, u32) {
    let Some(web_window) = web_sys::window() else {
        return (fallback_width, fallback_height);
    };
    let dpr = web_window.device_pixel_ratio();
    let width = web_window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(fallback_width as f64);
    let height = web_window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(fallback_height as f64);
    ((width * dpr) as u32, (height * dpr) as u32)
}

/// Attach a full-viewport canvas to the page and build window attributes for it.
#[cfg(target_arch = "wasm32")]
fn web_window_attributes(config: &AppConfig) -> Option<winit::window::WindowAttributes> {
    use wasm_bindgen::JsCast;
    use winit::platform::web::WindowAttributesExtWebSys;

    let web_window = web_sys::window()?;
    let document = web_window.document()?;

    // Remove loading indicator
    if let Some(loading) = document.get_element_by_id("loading") {
        loading.remove();
    }

    let canvas = document
        .get_element_by_id("scribble-canvas")
        .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        .or_else(|| {
            let body = document.body()?;
            let canvas = document.create_element("canvas").ok()?;
            canvas.set_id("scribble-canvas");
            body.append_child(&canvas).ok()?;
            canvas.dyn_into::<web_sys::HtmlCanvasElement>().ok()
        })?;

    let (width, height) = web_viewport_size(config.width, config.height);
    canvas.set_width(width);
    canvas.set_height(height);
    let style = canvas.style();
    for (property, value) in [
        ("width", "100%"),
        ("height", "100%"),
        ("display", "block"),
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
    ] {
        let _ = style.set_property(property, value);
    }

    log::info!("Canvas created: {}x{}", width, height);

    Some(
        Window::default_attributes()
            .with_title(&config.title)
            .with_canvas(Some(canvas)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_route_from_args_default() {
        assert_eq!(AppConfig::route_from_args(args(&[])), Route::Dashboard);
    }

    #[test]
    fn test_route_from_args_drawing_flag() {
        assert_eq!(
            AppConfig::route_from_args(args(&["--drawing", "abc"])),
            Route::EditDrawing("abc".to_string())
        );
        assert_eq!(
            AppConfig::route_from_args(args(&["--drawing"])),
            Route::NewDrawing
        );
    }

    #[test]
    fn test_route_from_args_bare_and_path() {
        assert_eq!(
            AppConfig::route_from_args(args(&["abc"])),
            Route::EditDrawing("abc".to_string())
        );
        assert_eq!(
            AppConfig::route_from_args(args(&["/draw"])),
            Route::NewDrawing
        );
        assert_eq!(
            AppConfig::route_from_args(args(&["--verbose", "--new"])),
            Route::NewDrawing
        );
    }

    fn decoded_undo() -> scribble_core::DecodedRestore {
        let mut editor = Editor::new(EditorConfig::default(), 20, 20).unwrap();
        editor.clear().unwrap();
        editor.request_undo().unwrap().decode().unwrap()
    }

    #[test]
    fn test_restore_queue_drops_other_mounts() {
        restore_queue::push(1, decoded_undo());
        restore_queue::push(2, decoded_undo());
        restore_queue::push(1, decoded_undo());

        assert_eq!(restore_queue::take_for(2).len(), 1);
        assert!(restore_queue::take_for(1).is_empty());
    }

    #[test]
    fn test_restore_queue_discard() {
        restore_queue::push(3, decoded_undo());
        restore_queue::discard();
        assert!(restore_queue::take_for(3).is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.title, "Scribble");
        assert_eq!(config.route, Route::Dashboard);
        assert_eq!(config.editor.default_title, "Untitled Drawing");
    }
}
