use super::{ACTIVE_ITEM_SCALE, ITEM_RADIUS, MIN_SCALE, REFERENCE_SIZE, WHEEL_RADIUS};
use wheelkit::Wheel;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `distance` from `self` along `degrees`, clockwise from +x
    /// (screen coordinates, y grows downwards).
    pub fn polar(&self, degrees: f64, distance: f64) -> Point {
        let radians = degrees.to_radians();
        Point::new(
            self.x + distance * radians.cos(),
            self.y + distance * radians.sin(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ItemGeometry {
    pub center: Point,
    pub radius: f64,
    pub screen_angle: f64,
}

impl ItemGeometry {
    /// Angle of `index` on the unrotated wheel.
    pub fn base_angle(index: usize, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            index as f64 * (360.0 / count as f64)
        }
    }

    pub fn calculate(
        index: usize,
        count: usize,
        rotation: f64,
        wheel_center: Point,
        scale_factor: f64,
        active: bool,
    ) -> Self {
        let screen_angle = Self::base_angle(index, count) + rotation;
        let grow = if active { ACTIVE_ITEM_SCALE } else { 1.0 };

        Self {
            center: wheel_center.polar(screen_angle, WHEEL_RADIUS * scale_factor),
            radius: ITEM_RADIUS * scale_factor * grow,
            screen_angle,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// Where everything sits for one frame of a wheel drawn into a
/// `width` x `height` area.
#[derive(Debug, Clone, Default)]
pub struct WheelLayout {
    pub center: Point,
    pub scale_factor: f64,
    pub items: Vec<ItemGeometry>,
}

impl WheelLayout {
    pub fn compute(wheel: &Wheel, width: f64, height: f64) -> Self {
        let center = Point::new(width / 2.0, height / 2.0);
        let scale_factor = (width.min(height) / REFERENCE_SIZE).max(MIN_SCALE);
        let count = wheel.registry().count();

        let items = (0..count)
            .map(|i| {
                ItemGeometry::calculate(
                    i,
                    count,
                    wheel.angle(),
                    center,
                    scale_factor,
                    wheel.is_active(i),
                )
            })
            .collect();

        Self {
            center,
            scale_factor,
            items,
        }
    }

    /// The item under `point`; overlapping circles resolve to the closest centre.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, geometry)| geometry.contains(point))
            .min_by(|(_, a), (_, b)| {
                a.center
                    .distance(point)
                    .total_cmp(&b.center.distance(point))
            })
            .map(|(i, _)| i)
    }

    /// Position of the active slot on the rim of the wheel.
    pub fn slot_position(&self, target_position: f64) -> Point {
        self.center
            .polar(target_position, WHEEL_RADIUS * self.scale_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelkit::arbiter::Interaction;
    use wheelkit::items::{ItemRegistry, ItemSpec, Title};
    use wheelkit::settings::WheelSettings;

    fn wheel(count: usize) -> Wheel {
        let specs: Vec<ItemSpec> = (0..count)
            .map(|i| ItemSpec {
                title: Some(Title::new(format!("{i}"))),
                ..Default::default()
            })
            .collect();
        Wheel::new(
            ItemRegistry::load(&specs),
            WheelSettings::default(),
            1280,
        )
    }

    #[test]
    fn test_active_item_sits_in_the_slot() {
        let mut wheel = wheel(8);
        wheel.start();
        wheel.click_item(5).unwrap();

        let layout = WheelLayout::compute(&wheel, 720.0, 720.0);
        let slot = layout.slot_position(wheel.settings().target_position);

        assert!(layout.items[5].center.distance(slot) < 1e-6);
        // 270 degrees is straight up
        assert!(slot.y < layout.center.y);
        assert!((slot.x - layout.center.x).abs() < 1.0);
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let mut wheel = wheel(6);
        wheel.start();
        wheel.go_to_next(Interaction::Keyboard);

        let layout = WheelLayout::compute(&wheel, 1000.0, 800.0);
        for (i, geometry) in layout.items.iter().enumerate() {
            assert_eq!(layout.hit_test(geometry.center), Some(i));
        }
        assert_eq!(layout.hit_test(layout.center), None);
    }

    #[test]
    fn test_active_item_is_larger() {
        let mut wheel = wheel(4);
        wheel.start();

        let layout = WheelLayout::compute(&wheel, 720.0, 720.0);
        assert!(layout.items[0].radius > layout.items[1].radius);
    }

    #[test]
    fn test_empty_wheel_has_no_items() {
        let wheel = wheel(0);
        let layout = WheelLayout::compute(&wheel, 720.0, 720.0);
        assert!(layout.items.is_empty());
        assert_eq!(layout.hit_test(Point::new(360.0, 110.0)), None);
    }
}
