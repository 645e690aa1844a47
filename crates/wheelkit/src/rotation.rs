use std::fmt;

/// Normalizes an unbounded angle into `[0, 360)`.
pub fn normalize(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Shortest distance between two angles around the circle, in `[0, 180]`.
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize(a) - normalize(b)).abs();
    d.min(360.0 - d)
}

/// Rotation applied to the wheel container: a fixed centering translation
/// followed by the wheel angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub angle: f64,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate(-50%, -50%) rotate({}deg)", self.angle)
    }
}

#[derive(Debug, Clone)]
pub struct RotationEngine {
    angle: f64,
    count: usize,
    target_position: f64,
}

impl RotationEngine {
    pub fn new(count: usize, target_position: f64) -> Self {
        Self {
            angle: 0.0,
            count,
            target_position,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Angular spacing between neighbouring items.
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            360.0 / self.count as f64
        }
    }

    /// Wheel angle that puts `index` in the active slot.
    pub fn angle_for_index(&self, index: usize) -> f64 {
        -(index as f64 * self.step()) + self.target_position
    }

    pub fn jump_to(&mut self, index: usize) -> Transform {
        self.angle = self.angle_for_index(index);
        self.transform()
    }

    pub fn tick(&mut self, delta: f64) -> Transform {
        debug_assert!(delta >= 0.0, "auto-rotation never reverses");
        self.angle += delta;
        self.transform()
    }

    pub fn transform(&self) -> Transform {
        Transform { angle: self.angle }
    }

    pub(crate) fn reconfigure(&mut self, count: usize, target_position: f64) {
        self.count = count;
        self.target_position = target_position;
    }
}
