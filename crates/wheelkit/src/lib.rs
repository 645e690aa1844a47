pub mod arbiter;
pub mod error;
pub mod items;
pub mod macros;
pub mod panel;
pub mod rotation;
pub mod schedule;
pub mod selection;
pub mod settings;
pub mod wheel;

pub use error::WheelError;
pub use wheel::Wheel;
