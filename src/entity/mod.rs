//! Player-side state: vitals, hotbar, input intents, survival rules

pub mod health;
pub mod input;
pub mod inventory;
pub mod player;
pub mod survival;

pub use health::{Health, Hunger};
pub use input::InputState;
pub use inventory::{Hotbar, ItemStack};
pub use player::Player;
pub use survival::{SurvivalEvent, SurvivalParams, SurvivalSystem};
