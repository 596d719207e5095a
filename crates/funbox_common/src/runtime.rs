use anyhow::Result;

use crate::framebuffer::FrameBuffer;
use crate::input::InputLatch;
use crate::key::EventSource;
use crate::present::{GraphicsDevice, Presenter};
use crate::step::SimulationStep;
use crate::timer::{Clock, Timer};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LoopState {
    Running,
    Terminating,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub long_frames: u64,
    /// Clock time covered by the run, from loop start to the last frame.
    pub elapsed_ms: u32,
}

/// Everything the frame loop touches, owned in one place for the whole run.
pub struct Runtime<C: Clock, E: EventSource, D: GraphicsDevice> {
    clock: C,
    events: E,
    presenter: Presenter<D>,
    frame: FrameBuffer,
    timer: Timer,
    input: InputLatch,
    state: LoopState,
    start_ms: u32,
    summary: RunSummary,
}

impl<C: Clock, E: EventSource, D: GraphicsDevice> Runtime<C, E, D> {
    /// Latches the clock; the loop is `Running` from here on.
    pub fn new(mut clock: C, events: E, presenter: Presenter<D>, frame: FrameBuffer) -> Self {
        let timer = Timer::start(&mut clock);
        let start_ms = timer.elapsed_ms();
        Self {
            clock,
            events,
            presenter,
            frame,
            timer,
            input: InputLatch::new(),
            state: LoopState::Running,
            start_ms,
            summary: RunSummary::default(),
        }
    }

    pub fn with_long_frame_threshold(mut self, threshold_ms: u32) -> Self {
        self.timer = self.timer.with_long_frame_threshold(threshold_ms);
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn input(&self) -> &InputLatch {
        &self.input
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// One full iteration: time, input, tick, present.
    ///
    /// A quit raised by input or by the tick does not cut the iteration short;
    /// the frame is still simulated and presented before the state flips.
    pub fn step(&mut self, sim: &mut impl SimulationStep) -> Result<LoopState> {
        let time = self.timer.update(&mut self.clock);
        let input = self.input.sample(&mut self.events);

        let sim_quit = sim.tick(input.buttons, &mut self.frame, time.elapsed_ms);

        self.presenter.present(&self.frame)?;

        self.summary.frames += 1;
        if time.long_frame {
            self.summary.long_frames += 1;
        }
        self.summary.elapsed_ms = time.elapsed_ms - self.start_ms;
        log::trace!(
            "frame {} delta={}ms buttons={:#010b}",
            self.summary.frames,
            time.frame_delta,
            input.buttons.bits()
        );

        if input.quit || sim_quit {
            if self.state == LoopState::Running {
                log::info!(
                    "quit requested by {}",
                    if input.quit { "input" } else { "simulation" }
                );
            }
            self.state = LoopState::Terminating;
        }
        Ok(self.state)
    }

    /// Iterate until something asks to quit. No frame limiting happens here;
    /// pacing comes from the swap alone.
    pub fn run(&mut self, sim: &mut impl SimulationStep) -> Result<RunSummary> {
        while self.state == LoopState::Running {
            self.step(sim)?;
        }
        Ok(self.summary)
    }

    /// Free the pixel buffer, then the texture, and return the device so the
    /// caller can drop the context and window in that order.
    pub fn shutdown(self) -> D {
        let Runtime {
            frame, presenter, ..
        } = self;
        drop(frame);
        presenter.into_device()
    }
}
