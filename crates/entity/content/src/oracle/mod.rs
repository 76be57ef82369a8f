//! Reference implementations of the core collaborator traits.

mod inventory;
mod skills;
mod wilderness;

pub use inventory::{Inventories, Inventory};
pub use skills::SkillTable;
pub use wilderness::{CenterWilderness, WildernessConfig};
