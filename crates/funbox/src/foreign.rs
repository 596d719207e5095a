use std::path::Path;

use anyhow::{anyhow, Result};
use libloading::Library;

use funbox_sdl2::funbox_common::{ButtonMask, FrameBuffer, SimulationStep};

/// The stable tick entry point: held buttons, the top-left pixel of the frame
/// buffer, and elapsed milliseconds. Non-zero means quit.
pub type TickFn = unsafe extern "C" fn(buttons: u8, pixels: *mut u32, elapsed_ms: u32) -> i32;

pub const DEFAULT_SYMBOL: &str = "asm_tick";

/// A tick implemented outside Rust, called through [`TickFn`].
pub struct ForeignTick {
    tick_fn: TickFn,
    // keeps `tick_fn` mapped
    _lib: Option<Library>,
}

impl ForeignTick {
    /// Load `symbol` from the shared library at `path`.
    pub fn load(path: &Path, symbol: &str) -> Result<Self> {
        let lib = unsafe { Library::new(path) }
            .map_err(|e| anyhow!("{}: cannot load tick library: {e}", path.display()))?;

        let tick_fn: TickFn = unsafe {
            *lib.get::<TickFn>(symbol.as_bytes())
                .map_err(|e| anyhow!("{}: symbol {symbol} not found: {e}", path.display()))?
        };

        log::info!("using {symbol} from {}", path.display());
        Ok(Self {
            tick_fn,
            _lib: Some(lib),
        })
    }

    /// Wrap a function that is already linked in.
    ///
    /// # Safety
    ///
    /// `tick_fn` must only write within the frame buffer it is handed and must
    /// not keep the pointer past the call.
    pub unsafe fn from_fn(tick_fn: TickFn) -> Self {
        Self {
            tick_fn,
            _lib: None,
        }
    }
}

impl SimulationStep for ForeignTick {
    fn tick(&mut self, buttons: ButtonMask, frame: &mut FrameBuffer, elapsed_ms: u32) -> bool {
        let pixels = frame.pixels_mut().as_mut_ptr();
        unsafe { (self.tick_fn)(buttons.bits(), pixels, elapsed_ms) != 0 }
    }
}
