use crate::storage::FileStore;
use anyhow::Result;
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::ThreadRng;
use reflex_core::{InputEvent, InputSource, InputTarget, Key, PointerButton};
use reflex_render::SkiaRenderer;
use reflex_session::{GameSession, SessionView};
use reflex_timing::{HighPrecisionTimer, Timer};
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const HOW_TO_PLAY: &str = "How to play: click, tap or press Space on blue, \
wait for green, then react as fast as you can. Clicking on red is a false start.";

pub type DesktopSession = GameSession<HighPrecisionTimer, ThreadRng, FileStore>;

pub struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    session: DesktopSession,
    renderer: Option<SkiaRenderer>,
    cursor: Option<PhysicalPosition<f64>>,
    title: String,
    show_help: bool,
    should_exit: bool,
}

impl App {
    pub fn new(session: DesktopSession) -> Self {
        Self {
            window: None,
            pixels: None,
            session,
            renderer: None,
            cursor: None,
            title: String::new(),
            show_help: false,
            should_exit: false,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        log::info!(
            "reflex starting on {}/{}; click, tap or press space, escape quits",
            std::env::consts::OS,
            std::env::consts::ARCH
        );
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    fn create_window_and_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        // decorated so the title bar, which carries the text, stays visible
        let window_attributes = Window::default_attributes()
            .with_title("Reflex")
            .with_maximized(true)
            .with_min_inner_size(PhysicalSize::new(480, 360));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let size = window.inner_size();
        log::info!(
            "display {}x{} at scale {:.2}",
            size.width,
            size.height,
            window.scale_factor()
        );

        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        self.pixels = Some(Pixels::new(size.width, size.height, surface_texture)?);
        self.renderer = Some(SkiaRenderer::new(size.width, size.height)?);
        self.window = Some(window);
        self.refresh();

        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let (Some(pixels), Some(renderer)) = (self.pixels.as_mut(), self.renderer.as_mut()) else {
            return Ok(());
        };
        let view = self.session.view();
        let stats = renderer.render_frame(&view, pixels.frame_mut())?;
        pixels.render()?;
        log::trace!(
            "frame: draw {:.3}ms, copy {:.3}ms, total {:.3}ms",
            stats.draw.as_secs_f64() * 1e3,
            stats.copy.as_secs_f64() * 1e3,
            stats.total.as_secs_f64() * 1e3,
        );
        Ok(())
    }

    fn refresh(&mut self) {
        let title = window_title(&self.session.view(), self.show_help);

        if let Some(window) = &self.window {
            if title != self.title {
                window.set_title(&title);
                self.title = title;
            }
            window.request_redraw();
        }
    }

    fn target_at(&self, position: Option<PhysicalPosition<f64>>) -> InputTarget {
        match (position, &self.renderer) {
            (Some(p), Some(r)) if r.hit_info_panel(p.x, p.y) => InputTarget::Excluded,
            _ => InputTarget::Surface,
        }
    }

    fn feed(&mut self, source: InputSource, target: InputTarget) {
        let event = InputEvent {
            source,
            target,
            at_ms: self.session.timer().now(),
        };
        if target == InputTarget::Excluded && !self.show_help {
            log::debug!("info panel pressed, showing how to play");
            self.show_help = true;
            self.refresh();
        }
        if self.session.handle_input(&event) {
            self.show_help = false;
            self.refresh();
        }
    }

    fn handle_key(&mut self, key: PhysicalKey, repeat: bool, event_loop: &ActiveEventLoop) {
        let key = match key {
            PhysicalKey::Code(KeyCode::Escape) => {
                self.cleanup_and_exit(event_loop);
                return;
            }
            PhysicalKey::Code(KeyCode::Space) => Key::Space,
            PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => Key::Enter,
            _ => Key::Other,
        };
        self.feed(InputSource::Key { key, repeat }, InputTarget::Surface);
    }

    fn handle_resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(pixels) = &mut self.pixels {
            if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                log::error!("failed to resize surface: {e}");
            }
            if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                log::error!("failed to resize buffer: {e}");
            }
        }
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.resize(new_size.width, new_size.height) {
                log::error!("failed to resize canvas: {e}");
            }
        }
        log::debug!("display resized to {}x{}", new_size.width, new_size.height);
        self.refresh();
    }

    fn cleanup_and_exit(&mut self, event_loop: &ActiveEventLoop) {
        let history = self.session.history();
        log::info!(
            "exiting after {} attempts (best {:?}, average {:?})",
            history.len(),
            history.best().map(|b| b.as_millis()),
            history.average()
        );
        self.should_exit = true;
        event_loop.exit();
    }
}

/// Window title carries the textual part of the view
fn window_title(view: &SessionView, show_help: bool) -> String {
    if show_help {
        return format!("Reflex - {HOW_TO_PLAY}");
    }
    let mut title = format!("Reflex - {} - {}", view.title(), view.subtitle());
    let stats = view.stats_line();
    if !stats.is_empty() {
        title.push_str(" - ");
        title.push_str(&stats);
    }
    title
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Auxiliary,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.create_window_and_surface(event_loop) {
                log::error!("failed to create window and surface: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.cleanup_and_exit(event_loop),
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    log::error!("render error: {e:#}");
                }
            }
            WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() => {
                self.handle_key(event.physical_key, event.repeat, event_loop);
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor = Some(position),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                let target = self.target_at(self.cursor);
                self.feed(
                    InputSource::Pointer {
                        button: pointer_button(button),
                    },
                    target,
                );
            }
            WindowEvent::Touch(touch) if touch.phase == TouchPhase::Started => {
                let target = self.target_at(Some(touch.location));
                self.feed(InputSource::Touch, target);
            }
            WindowEvent::Resized(size) => self.handle_resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.handle_resize(size);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        if self.session.tick() {
            self.refresh();
        }
        match self.session.timer().next_deadline_instant() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        log::debug!("application resources cleaned up");
    }
}
