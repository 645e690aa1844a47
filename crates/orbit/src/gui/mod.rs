pub mod app;
pub mod input;
pub mod theme;
pub mod wheel;
