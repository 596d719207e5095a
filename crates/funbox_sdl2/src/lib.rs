use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::video::{GLProfile, SwapInterval};
use typed_builder::TypedBuilder;

pub use funbox_common;
pub use sdl2;

use funbox_common::framebuffer::{
    FrameBuffer, DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_DOWNSCALE,
};
use funbox_common::key::{EventSource, InputEvent, Key};
use funbox_common::present::{GraphicsDevice, Presenter, TextureMode};
use funbox_common::runtime::{RunSummary, Runtime};
use funbox_common::timer::{Clock, LONG_FRAME_THRESHOLD_MS};
use funbox_common::SimulationStep;

mod gl;

pub use gl::GlDevice;

#[derive(TypedBuilder, Debug, Clone)]
pub struct SdlInitInfo {
    #[builder(default = "Funbox".to_string(), setter(into))]
    pub title: String,
    #[builder(default = DEFAULT_DISPLAY_WIDTH)]
    pub display_width: u32,
    #[builder(default = DEFAULT_DISPLAY_HEIGHT)]
    pub display_height: u32,
    /// Display pixels per frame-buffer pixel.
    #[builder(default = DEFAULT_DOWNSCALE)]
    pub downscale: u32,
    #[builder(default = false)]
    pub vsync: bool,
    #[builder(default)]
    pub texture_mode: TextureMode,
    #[builder(default = LONG_FRAME_THRESHOLD_MS)]
    pub long_frame_threshold_ms: u32,
}

/// `SDL_GetTicks` as a [`Clock`].
pub struct SdlClock(sdl2::TimerSubsystem);

impl Clock for SdlClock {
    fn ticks_ms(&mut self) -> u32 {
        self.0.ticks()
    }
}

/// Pending SDL events, translated and filtered down to input transitions.
pub struct SdlEvents(sdl2::EventPump);

impl EventSource for SdlEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.0.poll_event() {
            if let Some(input) = translate_event(&event) {
                return Some(input);
            }
        }
        None
    }
}

pub fn translate_event(event: &Event) -> Option<InputEvent> {
    match *event {
        Event::Quit { .. } => Some(InputEvent::CloseRequested),
        Event::KeyDown {
            scancode: Some(scancode),
            ..
        } => Some(InputEvent::pressed(map_scancode(scancode))),
        Event::KeyUp {
            scancode: Some(scancode),
            ..
        } => Some(InputEvent::released(map_scancode(scancode))),
        _ => None,
    }
}

pub fn map_scancode(scancode: Scancode) -> Key {
    match scancode {
        Scancode::Left => Key::Left,
        Scancode::Right => Key::Right,
        Scancode::Up => Key::Up,
        Scancode::Down => Key::Down,
        Scancode::Num1 => Key::Num1,
        Scancode::Num2 => Key::Num2,
        Scancode::A => Key::A,
        Scancode::B => Key::B,
        Scancode::Escape => Key::Escape,
        _ => Key::None,
    }
}

/// A ready window, GL context and frame buffer. Construction failures are
/// fatal to the caller; nothing here is retried.
pub struct SdlContext {
    pub sdl_context: sdl2::Sdl,
    pub video: sdl2::VideoSubsystem,
    pub device: GlDevice,
    pub frame: FrameBuffer,
    pub texture_mode: TextureMode,
    pub long_frame_threshold_ms: u32,
}

impl SdlContext {
    pub fn new(sdl_init_info: SdlInitInfo) -> Result<Self> {
        let SdlInitInfo {
            title,
            display_width,
            display_height,
            downscale,
            vsync,
            texture_mode,
            long_frame_threshold_ms,
        } = sdl_init_info;

        let sdl_context = sdl2::init().map_err(|e| anyhow!("SDL_Init: {e}"))?;
        let video = sdl_context
            .video()
            .map_err(|e| anyhow!("SDL_InitSubSystem(VIDEO): {e}"))?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_double_buffer(true);

        let window = video
            .window(&title, display_width, display_height)
            .opengl()
            .position_centered()
            .build()
            .context("SDL_CreateWindow")?;

        let mut device = GlDevice::new(&video, window)?;

        let interval = if vsync {
            SwapInterval::VSync
        } else {
            SwapInterval::Immediate
        };
        video
            .gl_set_swap_interval(interval)
            .map_err(|e| anyhow!("SDL_GL_SetSwapInterval: {e}"))?;

        let frame = FrameBuffer::for_display(display_width, display_height, downscale)
            .context("allocating frame buffer")?;

        let (drawable_w, drawable_h) = device.window().drawable_size();
        device.init_defaults(drawable_w, drawable_h)?;

        log::info!(
            "window {display_width}x{display_height}, frame buffer {}x{}, vsync {vsync}, {texture_mode:?}",
            frame.width(),
            frame.height()
        );

        Ok(Self {
            sdl_context,
            video,
            device,
            frame,
            texture_mode,
            long_frame_threshold_ms,
        })
    }

    /// Drive `sim` until it or the user asks to quit, then tear down in
    /// reverse order of acquisition.
    pub fn run(self, mut sim: impl SimulationStep) -> Result<RunSummary> {
        let SdlContext {
            sdl_context,
            video,
            device,
            frame,
            texture_mode,
            long_frame_threshold_ms,
        } = self;

        let clock = SdlClock(
            sdl_context
                .timer()
                .map_err(|e| anyhow!("SDL_InitSubSystem(TIMER): {e}"))?,
        );
        let events = SdlEvents(
            sdl_context
                .event_pump()
                .map_err(|e| anyhow!("SDL event pump: {e}"))?,
        );

        let mut runtime = Runtime::new(clock, events, Presenter::new(device, texture_mode), frame)
            .with_long_frame_threshold(long_frame_threshold_ms);
        let summary = runtime.run(&mut sim)?;

        let device = runtime.shutdown();
        drop(device);
        drop(video);

        log::info!(
            "ran {} frames over {} ms, {} long",
            summary.frames,
            summary.elapsed_ms,
            summary.long_frames
        );
        Ok(summary)
    }
}
