//! Emberhold - Idle RPG Progression and Economy Engine

pub mod core;
pub mod crafting;
pub mod economy;
pub mod game;
pub mod hero;
pub mod item;
pub mod progress;
pub mod reward;
pub mod shop;
