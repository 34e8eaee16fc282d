//! Per-object animation playback.
//!
//! [`AnimationState`] maps clip names to [`AnimationClip`]s. Each clip shares
//! an immutable [`AnimationSequence`] from the scene's resource cache and
//! keeps its own playback cursor. Only the current clip advances.
//!
//! # Playback
//!
//! - `frame_time = play_time / frame_count`
//! - every update: `time += delta * play_scale`; for every full `frame_time`
//!   the cursor steps one frame (backward when `reverse`)
//! - past the end a looping clip wraps to its first frame; a one-shot clip
//!   stays on its final frame
//! - reaching the end emits [`AnimationEvent::Ended`] (once per pass for loops,
//!   once in total for one-shots until rewound); entering a frame that has a
//!   notify registered emits [`AnimationEvent::Notify`]
//!
//! Events hold what the latest update produced. The next update clears them,
//! so an owner that never drains them keeps at most one frame's worth.

use std::sync::Arc;

use log::{debug, warn};
use rustc_hash::FxHashMap;

use crate::components::identity::{ObjectId, SceneId};
use crate::resources::animationstore::{AnimationFrameData, AnimationSequence};
use crate::resources::sceneresource::SceneResource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationEvent {
    /// The clip ran past its last frame.
    Ended(String),
    /// The clip entered a frame with a registered notify.
    Notify { clip: String, name: String },
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub sequence: Arc<AnimationSequence>,
    pub frame: usize,
    pub time: f32,
    pub play_time: f32,
    pub play_scale: f32,
    pub looping: bool,
    pub reverse: bool,
    notifies: Vec<(usize, String)>,
    finished: bool,
}

impl AnimationClip {
    pub fn new(
        sequence: Arc<AnimationSequence>,
        looping: bool,
        play_time: Option<f32>,
        play_scale: f32,
        reverse: bool,
    ) -> Self {
        let play_time = play_time.unwrap_or_else(|| sequence.play_time());
        let mut clip = Self {
            sequence,
            frame: 0,
            time: 0.0,
            play_time,
            play_scale,
            looping,
            reverse,
            notifies: Vec::new(),
            finished: false,
        };
        clip.rewind();
        clip
    }

    pub fn frame_count(&self) -> usize {
        self.sequence.frame_count()
    }

    /// Seconds each frame stays on screen at scale 1.
    pub fn frame_time(&self) -> f32 {
        match self.frame_count() {
            0 => 0.0,
            n => self.play_time / n as f32,
        }
    }

    pub fn current_frame_data(&self) -> Option<&AnimationFrameData> {
        self.sequence.frame(self.frame)
    }

    fn first_frame(&self) -> usize {
        if self.reverse {
            self.frame_count().saturating_sub(1)
        } else {
            0
        }
    }

    fn last_frame(&self) -> usize {
        if self.reverse {
            0
        } else {
            self.frame_count().saturating_sub(1)
        }
    }

    pub fn rewind(&mut self) {
        self.frame = self.first_frame();
        self.time = 0.0;
        self.finished = false;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn advance(&mut self, delta: f32, clip_name: &str, events: &mut Vec<AnimationEvent>) {
        let count = self.frame_count();
        let frame_time = self.frame_time();
        if count == 0 || frame_time <= 0.0 || self.finished {
            return;
        }

        self.time += delta * self.play_scale;

        while self.time >= frame_time {
            self.time -= frame_time;

            let past_end = if self.reverse {
                if self.frame == 0 {
                    true
                } else {
                    self.frame -= 1;
                    false
                }
            } else {
                self.frame += 1;
                self.frame >= count
            };

            if past_end {
                events.push(AnimationEvent::Ended(clip_name.to_string()));
                if self.looping {
                    self.frame = self.first_frame();
                } else {
                    self.frame = self.last_frame();
                    self.time = 0.0;
                    self.finished = true;
                    return;
                }
            }

            for (frame, name) in &self.notifies {
                if *frame == self.frame {
                    events.push(AnimationEvent::Notify {
                        clip: clip_name.to_string(),
                        name: name.clone(),
                    });
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    clips: FxHashMap<String, AnimationClip>,
    current: Option<String>,
    owner: Option<ObjectId>,
    scene: Option<SceneId>,
    events: Vec<AnimationEvent>,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: ObjectId) {
        self.owner = Some(owner);
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    pub fn set_scene(&mut self, scene: Option<SceneId>) {
        self.scene = scene;
    }

    /// Look the sequence up in `resources` and add a clip named after it.
    pub fn add_animation(
        &mut self,
        resources: &SceneResource,
        sequence_name: &str,
        looping: bool,
        play_time: Option<f32>,
        play_scale: f32,
        reverse: bool,
    ) -> bool {
        let Some(sequence) = resources.find_animation(sequence_name) else {
            warn!("Animation sequence '{}' not found", sequence_name);
            return false;
        };
        self.add_clip(sequence, looping, play_time, play_scale, reverse)
    }

    /// Add a clip keyed by the sequence name. The first clip becomes current;
    /// a name that already exists is left untouched.
    pub fn add_clip(
        &mut self,
        sequence: Arc<AnimationSequence>,
        looping: bool,
        play_time: Option<f32>,
        play_scale: f32,
        reverse: bool,
    ) -> bool {
        let name = sequence.name().to_string();
        if self.clips.contains_key(&name) {
            return false;
        }
        let clip = AnimationClip::new(sequence, looping, play_time, play_scale, reverse);
        self.clips.insert(name.clone(), clip);
        if self.current.is_none() {
            self.current = Some(name);
        }
        true
    }

    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.current.as_deref().and_then(|name| self.clips.get(name))
    }

    /// Frame rectangle the current clip is showing.
    pub fn current_frame(&self) -> Option<AnimationFrameData> {
        self.current_clip()
            .and_then(|clip| clip.current_frame_data())
            .copied()
    }

    pub fn set_play_time(&mut self, name: &str, play_time: f32) {
        if let Some(clip) = self.clips.get_mut(name) {
            clip.play_time = play_time;
        }
    }

    pub fn set_play_scale(&mut self, name: &str, play_scale: f32) {
        if let Some(clip) = self.clips.get_mut(name) {
            clip.play_scale = play_scale;
        }
    }

    /// Switch immediately and rewind the new clip, even if it is already
    /// current.
    pub fn set_current(&mut self, name: &str) {
        let Some(clip) = self.clips.get_mut(name) else {
            return;
        };
        clip.rewind();
        self.current = Some(name.to_string());
    }

    /// Switch unless `name` is already playing. Both the outgoing and the
    /// incoming clip are rewound.
    pub fn change(&mut self, name: &str) {
        if self.current.as_deref() == Some(name) || !self.clips.contains_key(name) {
            return;
        }
        if let Some(old) = self.current.as_deref().and_then(|c| self.clips.get_mut(c)) {
            old.rewind();
        }
        if let Some(new) = self.clips.get_mut(name) {
            new.rewind();
        }
        debug!("Animation change {:?} -> {}", self.current, name);
        self.current = Some(name.to_string());
    }

    pub fn is_current(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }

    /// Flip direction. The cursor restarts from the new first frame.
    pub fn set_reverse(&mut self, name: &str, reverse: bool) {
        if let Some(clip) = self.clips.get_mut(name) {
            if clip.reverse != reverse {
                clip.reverse = reverse;
                clip.rewind();
            }
        }
    }

    pub fn set_loop(&mut self, name: &str, looping: bool) {
        if let Some(clip) = self.clips.get_mut(name) {
            clip.looping = looping;
            if looping {
                clip.finished = false;
            }
        }
    }

    /// Emit a [`AnimationEvent::Notify`] whenever `clip` enters `frame`.
    pub fn add_notify(&mut self, clip: &str, frame: usize, name: &str) {
        if let Some(c) = self.clips.get_mut(clip) {
            c.notifies.push((frame, name.to_string()));
        }
    }

    pub fn update(&mut self, delta: f32) {
        self.events.clear();
        let Some(name) = self.current.as_deref() else {
            return;
        };
        if let Some(clip) = self.clips.get_mut(name) {
            clip.advance(delta, name, &mut self.events);
        }
    }

    /// Events of the latest update that were not drained yet.
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<AnimationEvent> {
        std::mem::take(&mut self.events)
    }
}
