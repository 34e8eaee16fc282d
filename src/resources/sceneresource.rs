//! Per-scene resource cache.
//!
//! [`SceneResource`] owns every texture and animation sequence a scene uses.
//! Objects only keep keys into it and receive it explicitly whenever they
//! need to bind a texture, add an animation clip, or draw.
//!
//! File names are resolved against named path roots registered with
//! [`SceneResource::add_path`], so game code can say "load `Player.bmp` from
//! `TexturePath`" without knowing the install directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

use crate::resources::animationstore::{
    AnimationFrameData, AnimationSequence, AnimationStore, SequenceDef,
};
use crate::resources::texturestore::{Texture, TextureStore};

/// Path key used when callers do not name one.
pub const TEXTURE_PATH: &str = "TexturePath";

#[derive(Resource, Debug, Default)]
pub struct SceneResource {
    textures: TextureStore,
    animations: AnimationStore,
    paths: FxHashMap<String, PathBuf>,
}

impl SceneResource {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------- paths

    pub fn add_path(&mut self, key: &str, dir: impl Into<PathBuf>) {
        self.paths.insert(key.to_string(), dir.into());
    }

    /// Join `file` to the root registered as `path_key`. Unknown keys leave
    /// `file` as given.
    pub fn resolve_path(&self, path_key: &str, file: impl AsRef<Path>) -> PathBuf {
        match self.paths.get(path_key) {
            Some(root) => root.join(file),
            None => file.as_ref().to_path_buf(),
        }
    }

    // ------------------------------------------------------------- textures

    pub fn textures(&self) -> &TextureStore {
        &self.textures
    }

    pub fn find_texture(&self, name: &str) -> Option<&Texture> {
        self.textures.get(name)
    }

    pub fn insert_texture(&mut self, texture: Texture) {
        self.textures.insert(texture);
    }

    /// Load a single-image texture. Already loaded names are kept as is.
    pub fn load_texture(&mut self, name: &str, file: &str, path_key: &str) -> Result<(), String> {
        let path = self.resolve_path(path_key, file);
        self.load_texture_files(name, &[path])
    }

    pub fn load_texture_full_path(&mut self, name: &str, full_path: &Path) -> Result<(), String> {
        self.load_texture_files(name, &[full_path.to_path_buf()])
    }

    /// Load a sequential texture, one image per frame.
    pub fn load_texture_frames<S: AsRef<Path>>(
        &mut self,
        name: &str,
        files: &[S],
        path_key: &str,
    ) -> Result<(), String> {
        let paths: Vec<PathBuf> = files
            .iter()
            .map(|f| self.resolve_path(path_key, f))
            .collect();
        self.load_texture_files(name, &paths)
    }

    fn load_texture_files(&mut self, name: &str, files: &[PathBuf]) -> Result<(), String> {
        if self.textures.contains(name) {
            debug!("Texture '{}' already loaded", name);
            return Ok(());
        }
        let texture = Texture::load(name, files)?;
        info!(
            "Loaded texture '{}' ({}x{}, {} frame(s))",
            name,
            texture.width(),
            texture.height(),
            texture.frame_count()
        );
        self.textures.insert(texture);
        Ok(())
    }

    /// Returns false when the texture does not exist.
    pub fn set_color_key(&mut self, name: &str, r: u8, g: u8, b: u8, frame: Option<usize>) -> bool {
        match self.textures.get_mut(name) {
            Some(texture) => {
                texture.set_color_key(r, g, b, frame);
                true
            }
            None => false,
        }
    }

    // ----------------------------------------------------------- animations

    pub fn animations(&self) -> &AnimationStore {
        &self.animations
    }

    pub fn find_animation(&self, name: &str) -> Option<Arc<AnimationSequence>> {
        self.animations.get(name)
    }

    pub fn insert_animation(&mut self, sequence: AnimationSequence) {
        self.animations.insert(sequence);
    }

    /// Register an empty sequence drawing from `tex_name`. The texture must
    /// already be loaded; its frame layout decides the sequence type.
    pub fn create_animation_sequence(&mut self, name: &str, tex_name: &str) -> bool {
        if self.animations.contains(name) {
            return true;
        }
        let Some(texture) = self.textures.get(tex_name) else {
            warn!(
                "Cannot create sequence '{}': texture '{}' is not loaded",
                name, tex_name
            );
            return false;
        };
        let sequence = AnimationSequence::new(name, tex_name, texture.texture_type());
        self.animations.insert(sequence);
        true
    }

    pub fn add_animation_frame(&mut self, name: &str, start: Vector2, size: Vector2) -> bool {
        self.animations
            .add_frame(name, AnimationFrameData { start_pos: start, size })
    }

    /// Register every sequence of a JSON manifest (an array of
    /// [`SequenceDef`]). Returns how many were registered; entries whose
    /// texture is missing are skipped with a warning.
    pub fn load_sequences_json(&mut self, json: &str) -> Result<usize, String> {
        let defs: Vec<SequenceDef> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse sequence manifest: {}", e))?;

        let mut count = 0;
        for def in defs {
            let Some(texture) = self.textures.get(&def.texture) else {
                warn!(
                    "Sequence '{}' skipped: texture '{}' is not loaded",
                    def.name, def.texture
                );
                continue;
            };
            let mut sequence = AnimationSequence::new(&def.name, &def.texture, texture.texture_type());
            if let Some(play_time) = def.play_time {
                sequence = sequence.with_play_time(play_time);
            }
            for [x, y, w, h] in def.frames {
                sequence.push_frame(AnimationFrameData::new(x, y, w, h));
            }
            self.animations.insert(sequence);
            count += 1;
        }
        Ok(count)
    }

    pub fn load_sequences_file(&mut self, path: &Path) -> Result<usize, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        self.load_sequences_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::animationstore::TextureType;
    use crate::resources::texturestore::TextureFrame;

    fn with_textures() -> SceneResource {
        let mut res = SceneResource::new();
        res.insert_texture(Texture::from_dimensions("Player", 128, 48));
        res.insert_texture(Texture::from_frames(
            "Explosion",
            vec![TextureFrame::new(32, 32), TextureFrame::new(32, 32)],
        ));
        res
    }

    #[test]
    fn test_resolve_path_uses_registered_root() {
        let mut res = SceneResource::new();
        res.add_path(TEXTURE_PATH, "assets/textures");
        assert_eq!(
            res.resolve_path(TEXTURE_PATH, "a.png"),
            PathBuf::from("assets/textures/a.png")
        );
        assert_eq!(res.resolve_path("Unknown", "a.png"), PathBuf::from("a.png"));
    }

    #[test]
    fn test_sequence_type_follows_texture_layout() {
        let mut res = with_textures();
        assert!(res.create_animation_sequence("Idle", "Player"));
        assert!(res.create_animation_sequence("Boom", "Explosion"));
        assert_eq!(res.find_animation("Idle").unwrap().texture_type(), TextureType::Atlas);
        assert_eq!(res.find_animation("Boom").unwrap().texture_type(), TextureType::Frame);
    }

    #[test]
    fn test_sequence_needs_loaded_texture() {
        let mut res = SceneResource::new();
        assert!(!res.create_animation_sequence("Idle", "Player"));
        assert!(res.find_animation("Idle").is_none());
    }

    #[test]
    fn test_missing_file_is_an_error_and_leaves_store_unchanged() {
        let mut res = SceneResource::new();
        let err = res.load_texture("Ghost", "does/not/exist.png", TEXTURE_PATH);
        assert!(err.is_err());
        assert!(res.find_texture("Ghost").is_none());
    }

    #[test]
    fn test_manifest_registers_known_textures_only() {
        let mut res = with_textures();
        let json = r#"[
            {"name": "Run", "texture": "Player", "play_time": 0.5,
             "frames": [[0, 0, 32, 48], [32, 0, 32, 48]]},
            {"name": "Lost", "texture": "Nope", "frames": [[0, 0, 1, 1]]}
        ]"#;
        assert_eq!(res.load_sequences_json(json), Ok(1));
        let run = res.find_animation("Run").unwrap();
        assert_eq!(run.frame_count(), 2);
        assert_eq!(run.play_time(), 0.5);
        assert!(res.find_animation("Lost").is_none());
    }

    #[test]
    fn test_manifest_file_is_read_from_disk() {
        let mut res = with_textures();
        let path = std::env::temp_dir().join(format!("stagecraft_seq_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"name": "Blast", "texture": "Explosion", "frames": [[0, 0, 32, 32], [0, 0, 32, 32]]}]"#,
        )
        .unwrap();
        let result = res.load_sequences_file(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(result, Ok(1));
        assert_eq!(res.find_animation("Blast").unwrap().texture_type(), TextureType::Frame);
        assert!(res.load_sequences_file(Path::new("/nonexistent/seq.json")).is_err());
    }

    #[test]
    fn test_frames_are_appended_to_created_sequence() {
        let mut res = with_textures();
        assert!(res.create_animation_sequence("Walk", "Player"));
        assert!(res.add_animation_frame("Walk", Vector2::new(0.0, 0.0), Vector2::new(32.0, 48.0)));
        assert!(res.add_animation_frame("Walk", Vector2::new(32.0, 0.0), Vector2::new(32.0, 48.0)));
        assert!(!res.add_animation_frame("Missing", Vector2::zero(), Vector2::new(1.0, 1.0)));

        let walk = res.find_animation("Walk").unwrap();
        assert_eq!(walk.frame_count(), 2);
        assert_eq!(walk.frame(1).unwrap().start_pos, Vector2::new(32.0, 0.0));
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        let mut res = SceneResource::new();
        assert!(res.load_sequences_json("{ not json").is_err());
    }

    #[test]
    fn test_color_key_on_missing_texture_reports_false() {
        let mut res = with_textures();
        assert!(res.set_color_key("Player", 255, 0, 255, None));
        assert!(!res.set_color_key("Nope", 255, 0, 255, None));
    }
}
