pub mod geometry;
pub mod view;

pub use geometry::{ItemGeometry, Point, WheelLayout};
pub use view::draw;

pub const REFERENCE_SIZE: f64 = 720.0;
pub const WHEEL_RADIUS: f64 = 250.0; // item orbital radius
pub const ITEM_RADIUS: f64 = 44.0; // item circle size
pub const ACTIVE_ITEM_SCALE: f64 = 1.3;
pub const CENTER_CIRCLE_RADIUS: f64 = 120.0;
pub const SPOKE_COUNT: usize = 48;
pub const MARKER_SIZE: f64 = 14.0;
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const MIN_SCALE: f64 = 0.35;
