//! Drawing targets for the render phase.
//!
//! The object core never talks to a graphics API. It receives a
//! [`Surface`] and hands it, untouched, to textures, colliders and widgets.
//! Two implementations live here:
//!
//! - [`RaylibSurface`] draws through any raylib draw handle, using GPU copies
//!   of scene textures prepared by [`GpuTextureCache::sync`].
//! - [`RecordingSurface`] stores every call as a [`DrawCommand`]. Used by the
//!   headless runner and by tests.

use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::resources::sceneresource::SceneResource;
use crate::resources::texturestore::Texture;

/// Opaque draw target passed through the render phase.
pub trait Surface {
    /// Copy `size` pixels from `src` of image `frame` of `texture` to `dest`.
    fn draw_texture(
        &mut self,
        texture: &Texture,
        frame: usize,
        dest: Vector2,
        src: Vector2,
        size: Vector2,
    );
    fn draw_rectangle(&mut self, pos: Vector2, size: Vector2, color: Color);
    fn draw_rectangle_lines(&mut self, pos: Vector2, size: Vector2, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vector2, font_size: i32, color: Color);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Texture {
        name: String,
        frame: usize,
        dest: Vector2,
        src: Vector2,
        size: Vector2,
    },
    Rectangle {
        pos: Vector2,
        size: Vector2,
        filled: bool,
    },
    Text {
        text: String,
        pos: Vector2,
    },
}

/// Surface that only remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texture_draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Texture { .. }))
    }
}

impl Surface for RecordingSurface {
    fn draw_texture(
        &mut self,
        texture: &Texture,
        frame: usize,
        dest: Vector2,
        src: Vector2,
        size: Vector2,
    ) {
        self.commands.push(DrawCommand::Texture {
            name: texture.name().to_string(),
            frame,
            dest,
            src,
            size,
        });
    }

    fn draw_rectangle(&mut self, pos: Vector2, size: Vector2, _color: Color) {
        self.commands.push(DrawCommand::Rectangle {
            pos,
            size,
            filled: true,
        });
    }

    fn draw_rectangle_lines(&mut self, pos: Vector2, size: Vector2, _color: Color) {
        self.commands.push(DrawCommand::Rectangle {
            pos,
            size,
            filled: false,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vector2, _font_size: i32, _color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
    }
}

struct GpuFrame {
    texture: Texture2D,
    color_key: Option<(u8, u8, u8)>,
}

/// GPU copies of file-backed scene textures.
///
/// Must be synced from the main thread before drawing starts. A frame is
/// uploaded again when its color key changed since the last upload.
#[derive(Default)]
pub struct GpuTextureCache {
    frames: FxHashMap<(String, usize), GpuFrame>,
}

impl GpuTextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload every file-backed frame that is missing or stale.
    pub fn sync(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, resources: &SceneResource) {
        for texture in resources.textures().iter() {
            for (index, frame) in texture.frames().iter().enumerate() {
                let Some(file) = frame.file.as_ref() else {
                    continue;
                };
                let key = frame.color_key.map(|c| (c.r, c.g, c.b));
                let cache_key = (texture.name().to_string(), index);
                if let Some(cached) = self.frames.get(&cache_key) {
                    if cached.color_key == key {
                        continue;
                    }
                }

                let Some(path) = file.to_str() else {
                    log::warn!("Skipping texture with non UTF-8 path: {:?}", file);
                    continue;
                };
                let mut image = match Image::load_image(path) {
                    Ok(image) => image,
                    Err(e) => {
                        log::warn!("Failed to load image '{}': {}", path, e);
                        continue;
                    }
                };
                if let Some(c) = frame.color_key {
                    image.color_replace(c, Color::BLANK);
                }
                match rl.load_texture_from_image(thread, &image) {
                    Ok(gpu) => {
                        log::debug!("Uploaded texture '{}' frame {}", texture.name(), index);
                        self.frames.insert(
                            cache_key,
                            GpuFrame {
                                texture: gpu,
                                color_key: key,
                            },
                        );
                    }
                    Err(e) => log::error!("Failed to upload texture '{}': {}", texture.name(), e),
                }
            }
        }
    }

    pub fn get(&self, name: &str, frame: usize) -> Option<&Texture2D> {
        self.frames
            .get(&(name.to_string(), frame))
            .map(|f| &f.texture)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// [`Surface`] backed by a raylib draw handle.
///
/// Textures without a GPU copy (in-memory ones) are drawn as outlined
/// placeholders of the requested size.
pub struct RaylibSurface<'a, D: RaylibDraw> {
    draw: &'a mut D,
    gpu: &'a GpuTextureCache,
}

impl<'a, D: RaylibDraw> RaylibSurface<'a, D> {
    pub fn new(draw: &'a mut D, gpu: &'a GpuTextureCache) -> Self {
        Self { draw, gpu }
    }
}

impl<D: RaylibDraw> Surface for RaylibSurface<'_, D> {
    fn draw_texture(
        &mut self,
        texture: &Texture,
        frame: usize,
        dest: Vector2,
        src: Vector2,
        size: Vector2,
    ) {
        match self.gpu.get(texture.name(), frame) {
            Some(gpu) => {
                let source = Rectangle::new(src.x, src.y, size.x, size.y);
                self.draw.draw_texture_rec(gpu, source, dest, Color::WHITE);
            }
            None => {
                self.draw_rectangle_lines(dest, size, Color::MAGENTA);
            }
        }
    }

    fn draw_rectangle(&mut self, pos: Vector2, size: Vector2, color: Color) {
        self.draw.draw_rectangle_v(pos, size, color);
    }

    fn draw_rectangle_lines(&mut self, pos: Vector2, size: Vector2, color: Color) {
        self.draw.draw_rectangle_lines(
            pos.x as i32,
            pos.y as i32,
            size.x as i32,
            size.y as i32,
            color,
        );
    }

    fn draw_text(&mut self, text: &str, pos: Vector2, font_size: i32, color: Color) {
        self.draw
            .draw_text(text, pos.x as i32, pos.y as i32, font_size, color);
    }
}
