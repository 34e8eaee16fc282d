//! Analytic vertical motion (falling and jump arcs).
//!
//! [`Kinematics`] does not integrate velocity. Each frame it advances an
//! accumulated fall time and re-evaluates the closed-form projectile equation
//! from the anchor `fall_start_y`:
//!
//! ```text
//! fall_time += delta * gravity_accel
//! jump_term  = jumping ? jump_velocity * fall_time : 0
//! y          = fall_start_y - (jump_term - 0.5 * GRAVITY * fall_time^2)
//! ```
//!
//! Y grows downward, so the gravity term pushes the object down the screen
//! and the jump term lifts it. Changing `gravity_accel` or `jump_velocity`
//! mid-air reshapes the whole remaining arc because the position is always
//! recomputed from the anchor.

use serde::{Deserialize, Serialize};

/// Gravity constant used by the fall equation.
pub const GRAVITY: f32 = 9.8;

/// Vertical physics state of a game object.
///
/// # Example
/// ```ignore
/// let mut k = Kinematics::default();
/// k.simulate = true;
/// k.jump_velocity = 50.0;
/// k.jump(player_y);
/// // every frame:
/// if let Some(y) = k.advance(delta) { player_y = y; }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Master switch. Without it the object never falls.
    pub simulate: bool,
    /// Standing on something; the equation is not evaluated while grounded.
    pub grounded: bool,
    /// Accumulated `delta * gravity_accel` since the anchor was set.
    pub fall_time: f32,
    /// Y position the arc is evaluated from.
    pub fall_start_y: f32,
    /// Adds the upward jump term to the equation.
    pub jumping: bool,
    pub jump_velocity: f32,
    /// Scales how fast `fall_time` accumulates.
    pub gravity_accel: f32,
    /// Hint for collision responses: resolve against floors.
    pub floor_check: bool,
    /// Hint for collision responses: resolve against side walls.
    pub side_wall_check: bool,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            simulate: false,
            grounded: true,
            fall_time: 0.0,
            fall_start_y: 0.0,
            jumping: false,
            jump_velocity: 0.0,
            gravity_accel: 10.0,
            floor_check: false,
            side_wall_check: false,
        }
    }
}

impl Kinematics {
    /// Airborne and simulated: the equation runs this frame.
    pub fn is_airborne(&self) -> bool {
        !self.grounded && self.simulate
    }

    /// Advance the fall clock and return the new Y, or `None` when the
    /// object is not airborne.
    pub fn advance(&mut self, delta: f32) -> Option<f32> {
        if !self.is_airborne() {
            return None;
        }

        self.fall_time += delta * self.gravity_accel;

        let jump_term = if self.jumping {
            self.jump_velocity * self.fall_time
        } else {
            0.0
        };

        Some(self.fall_start_y - (jump_term - 0.5 * GRAVITY * self.fall_time * self.fall_time))
    }

    /// Re-anchor the arc at `y` without touching the clock.
    pub fn anchor(&mut self, y: f32) {
        self.fall_start_y = y;
    }

    /// Start a jump from `y`. Returns false while a jump is already running.
    pub fn jump(&mut self, y: f32) -> bool {
        if self.jumping {
            return false;
        }
        self.jumping = true;
        self.grounded = false;
        self.fall_time = 0.0;
        self.fall_start_y = y;
        true
    }

    /// Leave the ground without jumping (walking off a ledge).
    pub fn start_fall(&mut self, y: f32) {
        if !self.grounded {
            return;
        }
        self.grounded = false;
        self.fall_time = 0.0;
        self.fall_start_y = y;
    }

    /// Touch down at `y` and stop the arc.
    pub fn land(&mut self, y: f32) {
        self.grounded = true;
        self.jumping = false;
        self.fall_time = 0.0;
        self.fall_start_y = y;
    }
}
