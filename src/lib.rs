//! A small tile game with a Windows XP parody tucked inside a laptop.

pub mod assets;
pub mod audio;
pub mod camera;
pub mod config;
pub mod engine;
pub mod entity;
pub mod game;
pub mod geometry;
pub mod i18n;
pub mod input;
pub mod level;
pub mod renderer;
pub mod screen;
pub mod screens;
pub mod tile;
pub mod tile_effects;
pub mod window;
