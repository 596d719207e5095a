//! Test doubles for the platform seams.

use anyhow::{bail, Result};

use crate::button::ButtonMask;
use crate::framebuffer::FrameBuffer;
use crate::present::{GraphicsDevice, Sampling};
use crate::step::SimulationStep;
use crate::timer::Clock;

/// Replays fixed readings, then keeps returning the last one.
pub struct ScriptedClock {
    readings: Vec<u32>,
    next: usize,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = u32>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            next: 0,
        }
    }
}

impl Clock for ScriptedClock {
    fn ticks_ms(&mut self) -> u32 {
        let reading = self.readings[self.next.min(self.readings.len() - 1)];
        self.next += 1;
        reading
    }
}

/// Advances by a fixed step on every reading.
pub struct StepClock {
    now: u32,
    step: u32,
}

impl StepClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self { now: start, step }
    }
}

impl Clock for StepClock {
    fn ticks_ms(&mut self) -> u32 {
        let reading = self.now;
        self.now += self.step;
        reading
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum GpuCall {
    Init(u32, u32),
    Create(u32),
    Bind(u32),
    Delete(u32),
    Sampling(Sampling),
    Upload(u32, u32, usize),
    Update(u32, u32, usize),
    Draw,
    Swap,
}

#[derive(Default)]
pub struct RecordingDevice {
    pub calls: Vec<GpuCall>,
    pub uploaded: Option<Vec<u8>>,
    pub fail_create: bool,
    pub next_id: u32,
    pub live: Vec<u32>,
}

impl RecordingDevice {
    pub fn count(&self, pred: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    pub fn last_sampling(&self) -> Option<Sampling> {
        self.calls.iter().rev().find_map(|c| match c {
            GpuCall::Sampling(s) => Some(*s),
            _ => None,
        })
    }
}

impl GraphicsDevice for RecordingDevice {
    type Texture = u32;

    fn init_defaults(&mut self, viewport_width: u32, viewport_height: u32) -> Result<()> {
        self.calls.push(GpuCall::Init(viewport_width, viewport_height));
        Ok(())
    }

    fn create_texture(&mut self) -> Result<u32> {
        if self.fail_create {
            bail!("out of texture memory");
        }
        self.next_id += 1;
        self.live.push(self.next_id);
        self.calls.push(GpuCall::Create(self.next_id));
        Ok(self.next_id)
    }

    fn bind_texture(&mut self, texture: &u32) {
        self.calls.push(GpuCall::Bind(*texture));
    }

    fn delete_texture(&mut self, texture: u32) {
        self.live.retain(|&t| t != texture);
        self.calls.push(GpuCall::Delete(texture));
    }

    fn set_sampling(&mut self, sampling: Sampling) {
        self.calls.push(GpuCall::Sampling(sampling));
    }

    fn upload_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        self.uploaded = Some(pixels.to_vec());
        self.calls.push(GpuCall::Upload(width, height, pixels.len()));
    }

    fn update_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        self.uploaded = Some(pixels.to_vec());
        self.calls.push(GpuCall::Update(width, height, pixels.len()));
    }

    fn draw_fullscreen_quad(&mut self) {
        self.calls.push(GpuCall::Draw);
    }

    fn swap_buffers(&mut self) {
        self.calls.push(GpuCall::Swap);
    }
}

/// Records what it was called with and fills the frame with one value.
#[derive(Default)]
pub struct RecordingStep {
    pub calls: Vec<(u8, u32)>,
    pub frame_sizes: Vec<(u32, u32)>,
    pub fill: u32,
    /// Request quit on this call number (1-based).
    pub quit_after: Option<usize>,
}

impl SimulationStep for RecordingStep {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool {
        self.calls.push((buttons.bits(), elapsed_ms));
        self.frame_sizes.push((frame.width(), frame.height()));
        frame.pixels_mut().fill(self.fill);
        self.quit_after == Some(self.calls.len())
    }
}
