pub mod camera;
pub mod core;
pub mod error;
pub mod host;
pub mod loading;
pub mod session;
pub mod systems;
pub mod ui;
