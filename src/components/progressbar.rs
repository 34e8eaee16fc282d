//! Bar widget drawn relative to its owner (health bars, charge meters).
//!
//! The displayed fill eases toward the target percent at `drain_speed`
//! (fraction per second) so sudden changes read as a short sweep.

use raylib::prelude::{Color, Vector2};

use crate::components::transform::ObjectTransform;
use crate::components::widget::{Widget, WidgetCore};
use crate::resources::rendertarget::Surface;

#[derive(Debug, Clone)]
pub struct ProgressBar {
    core: WidgetCore,
    pub size: Vector2,
    /// Top-left of the bar relative to the owner's render position.
    pub offset: Vector2,
    pub fill_color: Color,
    pub back_color: Color,
    /// Fraction per second; 0 snaps immediately.
    pub drain_speed: f32,
    percent: f32,
    displayed: f32,
}

impl ProgressBar {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            core: WidgetCore::default(),
            size: Vector2::new(width, height),
            offset: Vector2::new(-width * 0.5, 0.0),
            fill_color: Color::GREEN,
            back_color: Color::DARKGRAY,
            drain_speed: 0.0,
            percent: 1.0,
            displayed: 1.0,
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_drain_speed(mut self, drain_speed: f32) -> Self {
        self.drain_speed = drain_speed;
        self
    }

    /// Clamped to `[0, 1]`.
    pub fn set_percent(&mut self, percent: f32) {
        self.percent = percent.clamp(0.0, 1.0);
        if self.drain_speed <= 0.0 {
            self.displayed = self.percent;
        }
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn displayed(&self) -> f32 {
        self.displayed
    }
}

impl Widget for ProgressBar {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn clone_box(&self) -> Box<dyn Widget> {
        Box::new(self.clone())
    }

    fn set_value(&mut self, value: f32) {
        self.set_percent(value);
    }

    fn update(&mut self, _owner: &ObjectTransform, delta: f32) {
        if self.drain_speed <= 0.0 {
            self.displayed = self.percent;
            return;
        }
        let step = self.drain_speed * delta;
        if self.displayed > self.percent {
            self.displayed = (self.displayed - step).max(self.percent);
        } else {
            self.displayed = (self.displayed + step).min(self.percent);
        }
    }

    fn render(&self, surface: &mut dyn Surface, owner: &ObjectTransform) {
        let pos = owner.render_pos + self.offset;
        surface.draw_rectangle(pos, self.size, self.back_color);
        if self.displayed > 0.0 {
            let fill = Vector2::new(self.size.x * self.displayed, self.size.y);
            surface.draw_rectangle(pos, fill, self.fill_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::rendertarget::{DrawCommand, RecordingSurface};

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_percent_is_clamped() {
        let mut bar = ProgressBar::new(10.0, 2.0);
        bar.set_percent(1.5);
        assert_eq!(bar.percent(), 1.0);
        bar.set_percent(-0.5);
        assert_eq!(bar.percent(), 0.0);
        assert_eq!(bar.displayed(), 0.0);
    }

    #[test]
    fn test_drain_eases_toward_target() {
        let mut bar = ProgressBar::new(10.0, 2.0).with_drain_speed(0.5);
        bar.set_percent(0.0);
        let owner = ObjectTransform::default();
        bar.update(&owner, 0.5);
        assert!(approx_eq(bar.displayed(), 0.75));
        bar.update(&owner, 10.0);
        assert!(approx_eq(bar.displayed(), 0.0));
    }

    #[test]
    fn test_render_draws_back_then_fill() {
        let mut bar = ProgressBar::new(20.0, 4.0).with_offset(Vector2::new(0.0, -10.0));
        bar.set_percent(0.5);
        let owner = ObjectTransform {
            render_pos: Vector2::new(5.0, 50.0),
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        bar.render(&mut surface, &owner);
        assert_eq!(surface.commands.len(), 2);
        assert_eq!(
            surface.commands[1],
            DrawCommand::Rectangle {
                pos: Vector2::new(5.0, 40.0),
                size: Vector2::new(10.0, 4.0),
                filled: true,
            }
        );
    }
}
