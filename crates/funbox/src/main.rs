use std::path::PathBuf;

use clap::Parser;
use funbox::{TickSource, DEFAULT_SYMBOL};
use funbox_sdl2::funbox_common::framebuffer::{
    DEFAULT_DISPLAY_HEIGHT, DEFAULT_DISPLAY_WIDTH, DEFAULT_DOWNSCALE,
};
use funbox_sdl2::funbox_common::present::TextureMode;
use funbox_sdl2::funbox_common::timer::LONG_FRAME_THRESHOLD_MS;
use funbox_sdl2::SdlInitInfo;

#[derive(Parser, Debug)]
#[command(name = "funbox")]
#[command(about = "Present a pixel-buffer simulation in a window", long_about = None)]
struct Cli {
    /// Shared library exporting the tick function. Runs the built-in demo when omitted.
    #[arg(long)]
    library: Option<PathBuf>,

    /// Name of the exported tick function
    #[arg(long, default_value = DEFAULT_SYMBOL)]
    symbol: String,

    /// Window width in pixels
    #[arg(long, default_value_t = DEFAULT_DISPLAY_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = DEFAULT_DISPLAY_HEIGHT)]
    height: u32,

    /// Window pixels per frame-buffer pixel
    #[arg(long, default_value_t = DEFAULT_DOWNSCALE)]
    downscale: u32,

    /// Wait for vertical sync on every swap
    #[arg(long)]
    vsync: bool,

    /// Keep one texture and update it instead of reallocating per frame
    #[arg(long)]
    reuse_texture: bool,

    /// Report frames slower than this many milliseconds
    #[arg(long, default_value_t = LONG_FRAME_THRESHOLD_MS)]
    long_frame_ms: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let source = match cli.library {
        Some(path) => TickSource::Library {
            path,
            symbol: cli.symbol,
        },
        None => TickSource::Demo,
    };

    let texture_mode = if cli.reuse_texture {
        TextureMode::UpdateInPlace
    } else {
        TextureMode::Recreate
    };

    let init_info = SdlInitInfo::builder()
        .title("ASM Funbox")
        .display_width(cli.width)
        .display_height(cli.height)
        .downscale(cli.downscale)
        .vsync(cli.vsync)
        .texture_mode(texture_mode)
        .long_frame_threshold_ms(cli.long_frame_ms)
        .build();

    if let Err(err) = funbox::run(source, init_info) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
