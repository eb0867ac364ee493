pub mod clock;
pub mod config;
pub mod constants;
pub mod entities;
pub mod grid;
pub mod input;
pub mod picker;
pub mod player;
pub mod room;
pub mod simulation;
pub mod snake;
pub mod types;
pub mod world;
