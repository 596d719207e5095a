use anyhow::Result;

use crate::framebuffer::FrameBuffer;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Wrap {
    ClampToEdge,
    Repeat,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Sampling {
    pub filter: Filter,
    pub wrap: Wrap,
}

impl Sampling {
    /// Blocky upscaling with no bleed from the opposite edge.
    pub const PIXEL_ART: Sampling = Sampling {
        filter: Filter::Nearest,
        wrap: Wrap::ClampToEdge,
    };
}

/// How the presenter manages its texture between frames.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum TextureMode {
    /// Delete and allocate a fresh texture every frame.
    #[default]
    Recreate,
    /// Allocate once, then overwrite the contents each frame.
    UpdateInPlace,
}

/// The GPU operations the presenter needs. All calls act on the texture most
/// recently passed to `bind_texture`.
pub trait GraphicsDevice {
    type Texture;

    /// One-time state: viewport over the whole display, a projection mapping
    /// [0,1]x[0,1] with y pointing down, and 2D texturing.
    fn init_defaults(&mut self, viewport_width: u32, viewport_height: u32) -> Result<()>;

    fn create_texture(&mut self) -> Result<Self::Texture>;
    fn bind_texture(&mut self, texture: &Self::Texture);
    fn delete_texture(&mut self, texture: Self::Texture);
    fn set_sampling(&mut self, sampling: Sampling);

    /// (Re)specify the bound texture's storage from RGBA8 pixels.
    fn upload_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]);
    /// Overwrite the bound texture's existing storage.
    fn update_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]);

    /// One textured quad over the whole normalized viewport.
    fn draw_fullscreen_quad(&mut self);
    /// Make the drawn frame visible. May block on vsync.
    fn swap_buffers(&mut self);
}

struct BoundTexture<T> {
    handle: T,
    width: u32,
    height: u32,
}

/// Moves a finished [`FrameBuffer`] onto the display.
pub struct Presenter<D: GraphicsDevice> {
    device: D,
    texture: Option<BoundTexture<D::Texture>>,
    mode: TextureMode,
}

impl<D: GraphicsDevice> Presenter<D> {
    pub fn new(device: D, mode: TextureMode) -> Self {
        Self {
            device,
            texture: None,
            mode,
        }
    }

    pub fn mode(&self) -> TextureMode {
        self.mode
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Upload, draw and swap. Only texture allocation can fail.
    pub fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        let (width, height) = (frame.width(), frame.height());

        let reusable = self.mode == TextureMode::UpdateInPlace
            && self
                .texture
                .as_ref()
                .is_some_and(|t| t.width == width && t.height == height);

        if reusable {
            if let Some(bound) = &self.texture {
                self.device.bind_texture(&bound.handle);
            }
            self.device.update_rgba8(width, height, frame.as_bytes());
        } else {
            self.release();
            let handle = self.device.create_texture()?;
            self.device.bind_texture(&handle);
            self.device.set_sampling(Sampling::PIXEL_ART);
            self.device.upload_rgba8(width, height, frame.as_bytes());
            self.texture = Some(BoundTexture {
                handle,
                width,
                height,
            });
        }

        self.device.draw_fullscreen_quad();
        self.device.swap_buffers();
        Ok(())
    }

    /// Drop the current texture, if any.
    pub fn release(&mut self) {
        if let Some(bound) = self.texture.take() {
            self.device.delete_texture(bound.handle);
        }
    }

    /// Release the texture and hand back the device for teardown.
    pub fn into_device(mut self) -> D {
        self.release();
        self.device
    }
}
