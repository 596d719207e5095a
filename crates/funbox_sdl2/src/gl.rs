use anyhow::{anyhow, bail, Result};
use glow::HasContext;
use sdl2::video::{GLContext, Window};
use sdl2::VideoSubsystem;

use funbox_common::present::{Filter, GraphicsDevice, Sampling, Wrap};

const VERTEX_SHADER_SOURCE: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;
layout (location = 1) in vec2 a_uv;
uniform mat4 u_projection;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_projection * vec4(a_pos, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER_SOURCE: &str = r#"#version 330 core
in vec2 v_uv;
uniform sampler2D u_frame;
out vec4 frag_color;
void main() {
    frag_color = texture(u_frame, v_uv);
}
"#;

/// Unit quad as a triangle strip, `x, y, u, v` per vertex. Texture
/// coordinates equal positions so buffer row 0 lands at the top.
#[rustfmt::skip]
const QUAD: [f32; 16] = [
    0.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 1.0,
    1.0, 0.0, 1.0, 0.0,
    1.0, 1.0, 1.0, 1.0,
];

/// Column-major orthographic projection, same as `gluOrtho2D`.
pub fn ortho_2d(left: f32, right: f32, bottom: f32, top: f32) -> [f32; 16] {
    let sx = 2.0 / (right - left);
    let sy = 2.0 / (top - bottom);
    let tx = -(right + left) / (right - left);
    let ty = -(top + bottom) / (top - bottom);
    #[rustfmt::skip]
    let m = [
        sx,  0.0, 0.0, 0.0,
        0.0, sy,  0.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
        tx,  ty,  0.0, 1.0,
    ];
    m
}

fn gl_filter(filter: Filter) -> i32 {
    match filter {
        Filter::Nearest => glow::NEAREST as i32,
        Filter::Linear => glow::LINEAR as i32,
    }
}

fn gl_wrap(wrap: Wrap) -> i32 {
    match wrap {
        Wrap::ClampToEdge => glow::CLAMP_TO_EDGE as i32,
        Wrap::Repeat => glow::REPEAT as i32,
    }
}

/// OpenGL 3.3 core implementation of the presenter's device.
///
/// Field order matters: the GL context must drop before the window.
pub struct GlDevice {
    gl: glow::Context,
    program: glow::Program,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    _gl_context: GLContext,
    window: Window,
}

impl GlDevice {
    pub fn new(video: &VideoSubsystem, window: Window) -> Result<Self> {
        let gl_context = window
            .gl_create_context()
            .map_err(|e| anyhow!("SDL_GL_CreateContext: {e}"))?;
        window
            .gl_make_current(&gl_context)
            .map_err(|e| anyhow!("SDL_GL_MakeCurrent: {e}"))?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _)
        };

        let (program, vao, vbo) = unsafe {
            let program = link_program(&gl)?;

            let vao = gl
                .create_vertex_array()
                .map_err(|e| anyhow!("glGenVertexArrays: {e}"))?;
            let vbo = gl
                .create_buffer()
                .map_err(|e| anyhow!("glGenBuffers: {e}"))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD),
                glow::STATIC_DRAW,
            );
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 4 * 4, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, 4 * 4, 2 * 4);
            gl.enable_vertex_attrib_array(1);

            (program, vao, vbo)
        };

        Ok(Self {
            gl,
            program,
            vao,
            vbo,
            _gl_context: gl_context,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

unsafe fn link_program(gl: &glow::Context) -> Result<glow::Program> {
    let program = gl
        .create_program()
        .map_err(|e| anyhow!("glCreateProgram: {e}"))?;

    let mut shaders = Vec::with_capacity(2);
    for (kind, source) in [
        (glow::VERTEX_SHADER, VERTEX_SHADER_SOURCE),
        (glow::FRAGMENT_SHADER, FRAGMENT_SHADER_SOURCE),
    ] {
        let shader = gl
            .create_shader(kind)
            .map_err(|e| anyhow!("glCreateShader: {e}"))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            bail!("shader compile failed: {}", gl.get_shader_info_log(shader));
        }
        gl.attach_shader(program, shader);
        shaders.push(shader);
    }

    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        bail!("program link failed: {}", gl.get_program_info_log(program));
    }

    for shader in shaders {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }
    Ok(program)
}

impl GraphicsDevice for GlDevice {
    type Texture = glow::Texture;

    fn init_defaults(&mut self, viewport_width: u32, viewport_height: u32) -> Result<()> {
        let projection = ortho_2d(0.0, 1.0, 1.0, 0.0);
        unsafe {
            let gl = &self.gl;
            gl.viewport(0, 0, viewport_width as i32, viewport_height as i32);

            // Texturing is always on in the core profile; binding the textured
            // program and its sampler is the equivalent of enabling it.
            gl.use_program(Some(self.program));
            let projection_loc = gl
                .get_uniform_location(self.program, "u_projection")
                .ok_or_else(|| anyhow!("u_projection uniform missing"))?;
            gl.uniform_matrix_4_f32_slice(Some(&projection_loc), false, &projection);
            if let Some(sampler_loc) = gl.get_uniform_location(self.program, "u_frame") {
                gl.uniform_1_i32(Some(&sampler_loc), 0);
            }
            gl.active_texture(glow::TEXTURE0);
            gl.bind_vertex_array(Some(self.vao));

            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        log::debug!("GL viewport {viewport_width}x{viewport_height}");
        Ok(())
    }

    fn create_texture(&mut self) -> Result<glow::Texture> {
        unsafe { self.gl.create_texture() }.map_err(|e| anyhow!("glGenTextures: {e}"))
    }

    fn bind_texture(&mut self, texture: &glow::Texture) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, Some(*texture)) }
    }

    fn delete_texture(&mut self, texture: glow::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn set_sampling(&mut self, sampling: Sampling) {
        let filter = gl_filter(sampling.filter);
        let wrap = gl_wrap(sampling.wrap);
        unsafe {
            let gl = &self.gl;
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);
        }
    }

    fn upload_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                Some(pixels),
            );
        }
    }

    fn update_rgba8(&mut self, width: u32, height: u32, pixels: &[u8]) {
        unsafe {
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(pixels),
            );
        }
    }

    fn draw_fullscreen_quad(&mut self) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4) }
    }

    fn swap_buffers(&mut self) {
        self.window.gl_swap_window();
    }
}

impl Drop for GlDevice {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_program(self.program);
        }
    }
}
