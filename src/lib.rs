pub mod audio;
pub mod collision;
pub mod config;
pub mod context;
pub mod display;
pub mod driver;
pub mod entities;
pub mod error;
pub mod input;
pub mod math;
pub mod messages;
pub mod persistence;
pub mod scenes;
pub mod session;
pub mod surface;
pub mod weapons;
pub mod world;
