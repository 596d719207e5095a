use std::path::PathBuf;

use anyhow::Result;
use funbox_sdl2::funbox_common::runtime::RunSummary;
use funbox_sdl2::funbox_common::SimulationStep;
use funbox_sdl2::{SdlContext, SdlInitInfo};

mod foreign;

pub use foreign::{ForeignTick, TickFn, DEFAULT_SYMBOL};

pub enum TickSource {
    /// Built-in gradient demo.
    Demo,
    /// A shared library exporting the tick entry point.
    Library { path: PathBuf, symbol: String },
}

/// Resolve the tick, bring up the window and run until quit.
///
/// The tick is resolved first so a missing implementation fails before any
/// window is created.
pub fn run(source: TickSource, init_info: SdlInitInfo) -> Result<RunSummary> {
    let sim: Box<dyn SimulationStep> = match source {
        TickSource::Demo => {
            log::info!("no tick library given, running the built-in demo");
            Box::new(funbox_demo::DemoApp::new())
        }
        TickSource::Library { path, symbol } => Box::new(ForeignTick::load(&path, &symbol)?),
    };

    let context = SdlContext::new(init_info)?;
    context.run(sim)
}
