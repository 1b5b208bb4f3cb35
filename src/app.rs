use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::Settings;
use crate::controls::{install_controls, FlyState};
use crate::core::{CursorMode, FpsCounter, Throttled, WindowDimensions, WinitController};
use crate::input::InputDispatcher;
use crate::renderer::BoxRenderer;
use crate::scene::{create_boxes, BoxInstance};

const FPS_REPORT_INTERVAL: f32 = 1.0;
/// Minimum seconds between repeated render error reports
const RENDER_ERROR_INTERVAL: f32 = 5.0;

/// The fly-through demo: one window, one dispatcher, one box field
pub struct App {
    settings: Settings,
    window: Option<Arc<Window>>,
    renderer: Option<BoxRenderer>,
    input: InputDispatcher<FlyState, WinitController>,
    state: FlyState,
    boxes: Vec<BoxInstance>,
    fps: FpsCounter,
    render_errors: Throttled,
    failed_frames: u64,
    /// First error that stopped the event loop
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let cursor_mode = if settings.window.lock_cursor {
            CursorMode::Disabled
        } else {
            CursorMode::Normal
        };

        let mut input = InputDispatcher::with_cursor_mode(WinitController::new(), cursor_mode);
        install_controls(&mut input, &settings.controls);

        let aspect_ratio = settings.window.width as f32 / settings.window.height as f32;
        let state = FlyState::new(
            settings.camera.build(aspect_ratio),
            settings.controls.base_speed,
        );
        let boxes = create_boxes(settings.scene.box_count, settings.scene.seed);

        Self {
            settings,
            window: None,
            renderer: None,
            input,
            state,
            boxes,
            fps: FpsCounter::new(FPS_REPORT_INTERVAL),
            render_errors: Throttled::new(RENDER_ERROR_INTERVAL),
            failed_frames: 0,
            error: None,
        }
    }

    /// Error that ended the run, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn resize(&mut self, size: WindowDimensions) {
        if let Some(renderer) = &mut self.renderer {
            renderer.resize(size);
        }
        if let Some(aspect_ratio) = size.aspect_ratio() {
            self.state.camera.set_aspect_ratio(aspect_ratio);
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let delta = self.input.update(&mut self.state);

        if self.state.should_close {
            log::info!("Quit requested");
            event_loop.exit();
            return;
        }

        if let Some(fps) = self.fps.tick(delta) {
            log::info!(
                "FPS: {:.1} | position {:.2} | fov {:.1}",
                fps,
                self.state.camera.position(),
                self.state.camera.field_of_view()
            );
        }

        // Ticks every frame so the report window tracks wall time
        let report_due = self.render_errors.try_tick(delta).is_some();

        let Some(renderer) = &mut self.renderer else {
            return;
        };

        if let Err(e) = renderer.render(&self.state.camera, self.state.mix, self.state.wireframe) {
            self.failed_frames += 1;
            if report_due || self.failed_frames == 1 {
                log::warn!("Render error ({} failed frames): {:#}", self.failed_frames, e);
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_settings = &self.settings.window;
        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(window_settings.title.clone())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    window_settings.width,
                    window_settings.height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, anyhow::anyhow!("Failed to create window: {}", e));
                return;
            }
        };

        self.input.source_mut().attach_window(window.clone());

        let renderer = match pollster::block_on(BoxRenderer::new(window.clone(), &self.boxes)) {
            Ok(renderer) => renderer,
            Err(e) => {
                self.fail(event_loop, e.context("Failed to initialize renderer"));
                return;
            }
        };

        if let Some(aspect_ratio) = renderer.dimensions().aspect_ratio() {
            self.state.camera.set_aspect_ratio(aspect_ratio);
        }

        log::info!(
            "Window ready, cursor {:?}; WASD/Space/C move, Q/E roll, Shift boost, Esc quits",
            self.input.source().cursor_mode()
        );

        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.source_mut().process_event(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(WindowDimensions::from(size)),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        self.input.source_mut().process_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
