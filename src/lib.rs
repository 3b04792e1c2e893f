pub mod bonus;
pub mod collision;
pub mod config;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod menu;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod shields;
pub mod store;
