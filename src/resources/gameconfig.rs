//! Game configuration resource.
//!
//! Settings loaded from an INI configuration file. Defaults are safe to start
//! with when the file is missing.
//!
//! # Configuration File Format
//!
//! ```ini
//! [render]
//! width = 640
//! height = 360
//!
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 60
//!
//! [world]
//! width = 1920
//! height = 360
//!
//! [debug]
//! colliders = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_RENDER_WIDTH: u32 = 640;
const DEFAULT_RENDER_HEIGHT: u32 = 360;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_WORLD_WIDTH: u32 = 1920;
const DEFAULT_WORLD_HEIGHT: u32 = 360;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_SHOW_COLLIDERS: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Camera resolution in pixels.
    pub render_width: u32,
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// Size of the scrollable world the camera is clamped to.
    pub world_width: u32,
    pub world_height: u32,
    pub target_fps: u32,
    pub vsync: bool,
    /// Draw collider outlines.
    pub show_colliders: bool,
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            show_colliders: DEFAULT_SHOW_COLLIDERS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: {}x{} render, {}x{} window, {}x{} world, fps={}, vsync={}, colliders={}",
            self.render_width,
            self.render_height,
            self.window_width,
            self.window_height,
            self.world_width,
            self.world_height,
            self.target_fps,
            self.vsync,
            self.show_colliders
        );

        Ok(())
    }

    /// Same as [`load_from_file`](Self::load_from_file) but from a string.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        let uint = |section: &str, key: &str| config.getuint(section, key).ok().flatten();

        if let Some(width) = uint("render", "width") {
            self.render_width = width as u32;
        }
        if let Some(height) = uint("render", "height") {
            self.render_height = height as u32;
        }

        if let Some(width) = uint("window", "width") {
            self.window_width = width as u32;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height as u32;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        if let Some(width) = uint("world", "width") {
            self.world_width = width as u32;
        }
        if let Some(height) = uint("world", "height") {
            self.world_height = height as u32;
        }

        if let Some(colliders) = config.getbool("debug", "colliders").ok().flatten() {
            self.show_colliders = colliders;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("render", "width", Some(self.render_width.to_string()));
        config.set("render", "height", Some(self.render_height.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));

        config.set("debug", "colliders", Some(self.show_colliders.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn render_size(&self) -> (f32, f32) {
        (self.render_width as f32, self.render_height as f32)
    }

    pub fn world_size(&self) -> (f32, f32) {
        (self.world_width as f32, self.world_height as f32)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_safe() {
        let config = GameConfig::new();
        assert_eq!(config.render_size(), (640.0, 360.0));
        assert!(config.vsync);
        assert!(!config.show_colliders);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[render]\nwidth = 320\n\n[debug]\ncolliders = true\n")
            .unwrap();
        assert_eq!(config.render_width, 320);
        assert_eq!(config.render_height, 360);
        assert_eq!(config.target_fps, 60);
        assert!(config.show_colliders);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/nonexistent/stagecraft.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(err.starts_with("Failed to load config file"));
        assert_eq!(config.window_size(), (1280, 720));
    }

    #[test]
    fn test_saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!("stagecraft_cfg_{}.ini", std::process::id()));
        let mut saved = GameConfig::with_path(&path);
        saved.render_width = 320;
        saved.world_width = 4096;
        saved.target_fps = 30;
        saved.vsync = false;
        saved.show_colliders = true;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        let result = loaded.load_from_file();
        let _ = std::fs::remove_file(&path);
        result.unwrap();

        assert_eq!(loaded.render_size(), (320.0, 360.0));
        assert_eq!(loaded.world_size(), (4096.0, 360.0));
        assert_eq!(loaded.target_fps, 30);
        assert!(!loaded.vsync);
        assert!(loaded.show_colliders);
    }
}
