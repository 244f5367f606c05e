//! Window runner: hosts a sketch in a winit event loop.
//!
//! Each `RedrawRequested` runs exactly one sketch tick into the GPU
//! canvas, presents it, and immediately requests the next redraw, so
//! ticks are frame-synchronized (vsync-paced through the surface's
//! present mode) and never overlap. The loop runs until the window is
//! closed; there is no other termination path.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::error::SketchError;
use crate::gpu::GpuCanvas;
use crate::sketch::Sketch;
use crate::time::FrameClock;

/// Open a window and run the sketch built by `build` until close.
///
/// The sketch is built once the display is known, sized to the preferred
/// dimensions clamped to the primary monitor. The surface is fixed-size
/// after that; the window is not user-resizable.
pub fn run<S: 'static>(
    preferred: (u32, u32),
    title: &str,
    build: impl FnOnce(u32, u32) -> Sketch<S> + 'static,
) -> Result<(), SketchError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        preferred,
        title: title.to_owned(),
        build: Some(Box::new(build)),
        sketch: None,
        window: None,
        canvas: None,
        clock: FrameClock::new(),
    };
    event_loop.run_app(&mut app)?;
    Ok(())
}

struct App<S> {
    preferred: (u32, u32),
    title: String,
    build: Option<Box<dyn FnOnce(u32, u32) -> Sketch<S>>>,
    sketch: Option<Sketch<S>>,
    window: Option<Arc<Window>>,
    canvas: Option<GpuCanvas>,
    clock: FrameClock,
}

impl<S: 'static> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(build) = self.build.take() else {
            return;
        };

        let (mut width, mut height) = self.preferred;
        if let Some(monitor) = event_loop.primary_monitor() {
            let size = monitor.size();
            if size.width > 0 && size.height > 0 {
                width = width.min(size.width);
                height = height.min(size.height);
            }
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(GpuCanvas::new(window.clone(), width, height)) {
            Ok(canvas) => self.canvas = Some(canvas),
            Err(e) => {
                log::error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        log::info!("surface ready at {width}x{height}");
        self.sketch = Some(build(width, height));
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            // The window is not user-resizable, but some platforms
            // deliver an initial resize and scale-factor changes here.
            WindowEvent::Resized(physical_size) => {
                if let Some(canvas) = &mut self.canvas {
                    canvas.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => {
                if let (Some(sketch), Some(canvas)) = (self.sketch.as_mut(), self.canvas.as_mut())
                {
                    canvas.begin_frame();
                    sketch.tick(canvas);
                    match canvas.present() {
                        Ok(()) => {
                            if let Some(fps) = self.clock.tick() {
                                log::debug!(
                                    "{fps:.1} fps, tick {}, {} frames",
                                    sketch.ticks(),
                                    self.clock.frames()
                                );
                            }
                        }
                        Err(wgpu::SurfaceError::Lost) => canvas.reconfigure(),
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("surface out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("frame dropped: {e:?}"),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
