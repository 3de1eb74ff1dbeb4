pub mod checkpoints;
pub mod controller;
pub mod engine;
pub mod finish_line;
pub mod game;
pub mod headless;
pub mod hud;
pub mod pause;
pub mod speedometer;
pub mod ui;
pub mod zone;
