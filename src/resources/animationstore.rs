//! Animation sequence registry.
//!
//! A sequence is the immutable frame table of one animation: which texture it
//! draws from and the source rectangle of every frame. Objects share
//! sequences through `Arc` and keep their own playback state in
//! [`AnimationState`](crate::components::animation::AnimationState).

use std::sync::Arc;

use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// How a sequence maps frames onto its texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureType {
    /// One image, frames are sub-rectangles of it.
    Atlas,
    /// One image per frame, selected by frame index.
    Frame,
}

/// Source rectangle of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrameData {
    pub start_pos: Vector2,
    pub size: Vector2,
}

impl AnimationFrameData {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            start_pos: Vector2::new(x, y),
            size: Vector2::new(w, h),
        }
    }
}

/// Default duration of one full pass over a sequence, in seconds.
pub const DEFAULT_PLAY_TIME: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct AnimationSequence {
    name: Arc<str>,
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    tex_key: Arc<str>,
    texture_type: TextureType,
    frames: Vec<AnimationFrameData>,
    /// Natural duration of one pass, used when a clip does not set its own.
    play_time: f32,
}

impl AnimationSequence {
    pub fn new(name: &str, tex_key: &str, texture_type: TextureType) -> Self {
        Self {
            name: Arc::from(name),
            tex_key: Arc::from(tex_key),
            texture_type,
            frames: Vec::new(),
            play_time: DEFAULT_PLAY_TIME,
        }
    }

    pub fn with_play_time(mut self, play_time: f32) -> Self {
        self.play_time = play_time;
        self
    }

    pub fn with_frame(mut self, frame: AnimationFrameData) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn push_frame(&mut self, frame: AnimationFrameData) {
        self.frames.push(frame);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tex_key(&self) -> &str {
        &self.tex_key
    }

    pub fn texture_type(&self) -> TextureType {
        self.texture_type
    }

    pub fn frame(&self, index: usize) -> Option<&AnimationFrameData> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn play_time(&self) -> f32 {
        self.play_time
    }
}

/// JSON description of one sequence.
///
/// ```json
/// { "name": "PlayerIdle", "texture": "Player", "play_time": 0.8,
///   "frames": [[0, 0, 32, 48], [32, 0, 32, 48]] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDef {
    pub name: String,
    pub texture: String,
    #[serde(default)]
    pub play_time: Option<f32>,
    /// `[x, y, width, height]` per frame.
    pub frames: Vec<[f32; 4]>,
}

/// Sequences keyed by name.
#[derive(Debug, Default)]
pub struct AnimationStore {
    sequences: FxHashMap<String, Arc<AnimationSequence>>,
}

impl AnimationStore {
    pub fn get(&self, name: &str) -> Option<Arc<AnimationSequence>> {
        self.sequences.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    pub fn insert(&mut self, sequence: AnimationSequence) {
        self.sequences
            .insert(sequence.name().to_string(), Arc::new(sequence));
    }

    /// Append a frame. Clips already holding the sequence keep their copy.
    pub fn add_frame(&mut self, name: &str, frame: AnimationFrameData) -> bool {
        match self.sequences.get_mut(name) {
            Some(sequence) => {
                Arc::make_mut(sequence).push_frame(frame);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
