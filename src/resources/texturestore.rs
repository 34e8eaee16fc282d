//! Texture records and the keyed store that owns them.
//!
//! A [`Texture`] is either a single image (possibly an atlas of frames) or a
//! list of per-frame images loaded from sequential files. Objects never own a
//! texture; they keep its key and look it up through
//! [`SceneResource`](crate::resources::sceneresource::SceneResource) when they
//! need dimensions or want to draw.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use raylib::prelude::{Color, Image, Vector2};
use rustc_hash::FxHashMap;

use crate::resources::animationstore::TextureType;
use crate::resources::rendertarget::Surface;

/// One image of a texture.
#[derive(Debug, Clone)]
pub struct TextureFrame {
    pub width: u32,
    pub height: u32,
    /// Pixels of this color are treated as transparent by the backend.
    pub color_key: Option<Color>,
    /// Source file, `None` for textures built in memory.
    pub file: Option<PathBuf>,
}

impl TextureFrame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_key: None,
            file: None,
        }
    }

    /// Read the image header to learn the dimensions.
    pub fn load(path: &Path) -> Result<Self, String> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Texture path is not valid UTF-8: {:?}", path))?;
        let image = Image::load_image(path_str)
            .map_err(|e| format!("Failed to load image {}: {}", path.display(), e))?;
        Ok(Self {
            width: image.width.max(0) as u32,
            height: image.height.max(0) as u32,
            color_key: None,
            file: Some(path.to_path_buf()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Texture {
    name: Arc<str>,
    frames: Vec<TextureFrame>,
}

impl Texture {
    /// In-memory texture with a single frame of the given size.
    pub fn from_dimensions(name: &str, width: u32, height: u32) -> Self {
        Self::from_frames(name, vec![TextureFrame::new(width, height)])
    }

    pub fn from_frames(name: &str, frames: Vec<TextureFrame>) -> Self {
        Self {
            name: Arc::from(name),
            frames,
        }
    }

    /// Load one frame per file. An empty list is an error.
    pub fn load(name: &str, files: &[PathBuf]) -> Result<Self, String> {
        if files.is_empty() {
            return Err(format!("Texture '{}' needs at least one file", name));
        }
        let frames = files
            .iter()
            .map(|file| TextureFrame::load(file))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_frames(name, frames))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width of the first frame, 0 for an empty texture.
    pub fn width(&self) -> u32 {
        self.frames.first().map(|f| f.width).unwrap_or(0)
    }

    pub fn height(&self) -> u32 {
        self.frames.first().map(|f| f.height).unwrap_or(0)
    }

    pub fn size(&self) -> Vector2 {
        Vector2::new(self.width() as f32, self.height() as f32)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> Option<&TextureFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[TextureFrame] {
        &self.frames
    }

    /// Sequential textures carry one image per animation frame.
    pub fn texture_type(&self) -> TextureType {
        if self.frames.len() > 1 {
            TextureType::Frame
        } else {
            TextureType::Atlas
        }
    }

    /// Set the transparent color of one frame, or of every frame when
    /// `frame` is `None`. Out of range indices are ignored.
    pub fn set_color_key(&mut self, r: u8, g: u8, b: u8, frame: Option<usize>) {
        let key = Color::new(r, g, b, 255);
        match frame {
            Some(index) => {
                if let Some(f) = self.frames.get_mut(index) {
                    f.color_key = Some(key);
                }
            }
            None => {
                for f in &mut self.frames {
                    f.color_key = Some(key);
                }
            }
        }
    }

    /// Blit `size` pixels starting at `src` of image `frame` to `dest`.
    pub fn render(
        &self,
        surface: &mut dyn Surface,
        dest: Vector2,
        src: Vector2,
        size: Vector2,
        frame: usize,
    ) {
        surface.draw_texture(self, frame, dest, src, size);
    }
}

/// Loaded textures keyed by name.
#[derive(Debug, Default)]
pub struct TextureStore {
    map: FxHashMap<String, Texture>,
}

impl TextureStore {
    pub fn get(&self, name: &str) -> Option<&Texture> {
        self.map.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Texture> {
        self.map.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Insert or replace a texture under its own name.
    pub fn insert(&mut self, texture: Texture) {
        self.map.insert(texture.name().to_string(), texture);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.map.values()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential(name: &str, count: usize) -> Texture {
        Texture::from_frames(name, (0..count).map(|_| TextureFrame::new(16, 24)).collect())
    }

    #[test]
    fn test_single_image_is_atlas() {
        let t = Texture::from_dimensions("hero", 64, 32);
        assert_eq!(t.texture_type(), TextureType::Atlas);
        assert_eq!(t.width(), 64);
        assert_eq!(t.height(), 32);
    }

    #[test]
    fn test_many_images_are_sequential() {
        let t = sequential("walk", 3);
        assert_eq!(t.texture_type(), TextureType::Frame);
        assert_eq!(t.frame_count(), 3);
    }

    #[test]
    fn test_color_key_targets_one_or_all_frames() {
        let mut t = sequential("walk", 3);
        t.set_color_key(255, 0, 255, Some(1));
        assert!(t.frame(0).unwrap().color_key.is_none());
        assert_eq!(t.frame(1).unwrap().color_key.map(|c| (c.r, c.g, c.b)), Some((255, 0, 255)));

        t.set_color_key(0, 255, 0, None);
        assert!(t.frames().iter().all(|f| f.color_key.map(|c| c.g) == Some(255)));

        // out of range is ignored
        t.set_color_key(1, 2, 3, Some(10));
    }

    #[test]
    fn test_load_without_files_fails() {
        assert!(Texture::load("empty", &[]).is_err());
    }

    #[test]
    fn test_store_replaces_by_name() {
        let mut store = TextureStore::default();
        store.insert(Texture::from_dimensions("a", 1, 1));
        store.insert(Texture::from_dimensions("a", 8, 8));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().width(), 8);
        assert!(store.get("b").is_none());
    }
}
