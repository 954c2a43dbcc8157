use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::coords::PixelSize;
use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputFrame, InputState, Key, KeyState, WheelDelta};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "glasswork".to_string(),
            initial_size: LogicalSize::new(1280.0, 800.0),
        }
    }
}

/// Requests an app can make from `on_frame`. Applied after it returns.
#[derive(Default)]
pub struct RuntimeCtx {
    title: Option<String>,
    exit: bool,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn exit(&mut self) {
        self.exit = true;
    }
}

/// Entry point: opens the demo window and drives `app` until it closes.
pub struct Runtime;

impl Runtime {
    /// Returns the error that stopped the loop, if any (window or GPU
    /// creation failures included).
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let mut handler = Handler { config, gpu_init, app, entry: None, exiting: false, fatal: None };
        event_loop.run_app(&mut handler).context("winit event loop terminated with error")?;

        match handler.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// The window and the GPU context whose surface borrows it.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Handler<A: App + 'static> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    exiting: bool,
    fatal: Option<anyhow::Error>,
}

impl<A: App + 'static> Handler<A> {
    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = event_loop.create_window(attrs).context("failed to create window")?;
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.entry = Some(entry);
        Ok(())
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exiting = true;
        event_loop.exit();
    }

    /// Runs one `on_frame` and applies the app's requests.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (app, Some(entry)) = (&mut self.app, self.entry.as_mut()) else {
            return;
        };

        let mut runtime = RuntimeCtx::default();
        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx { id: fields.window.id(), window: fields.window },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
                time: fields.clock.tick(),
                runtime: &mut runtime,
            };
            let control = app.on_frame(&mut ctx);
            fields.input_frame.clear();
            control
        });

        if let Some(title) = runtime.title.take() {
            entry.with_window(|w| w.set_title(&title));
        }
        if control == AppControl::Exit || runtime.exit {
            self.exit(event_loop);
        }
    }
}

impl<A: App + 'static> ApplicationHandler for Handler<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            log::error!("{err:#}");
            self.fatal = Some(err);
            self.exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The glass animates every frame; presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exiting {
            return;
        }
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&event, entry.with_window(|w| w.scale_factor())) {
            entry.with_mut(|fields| fields.input_state.apply_event(fields.input_frame, ev));
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.exit(event_loop);
            }
            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(PixelSize::from(size)));
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(PixelSize::from(size)));
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn translate_input_event(event: &WindowEvent, scale_factor: f64) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel(match delta {
            MouseScrollDelta::LineDelta(_, y) => WheelDelta::Line(*y),
            MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixel((p.y / scale_factor) as f32),
        })),
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),
        _ => None,
    }
}

fn map_key(key: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = key else {
        return Key::Unknown(0);
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyR => Key::R,
        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_keys_are_mapped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyR)), Key::R);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::PageDown)), Key::PageDown);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }

    #[test]
    fn focus_events_translate() {
        assert_eq!(translate_input_event(&WindowEvent::Focused(false), 1.0), Some(InputEvent::Focused(false)));
        assert_eq!(translate_input_event(&WindowEvent::CloseRequested, 1.0), None);
    }
}
