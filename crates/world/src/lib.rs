mod anvil;
mod anvil_policy;
mod config;
mod furnace;
mod furnace_freeze;
mod furnace_tracker;
mod scheduler;

pub use anvil::*;
pub use anvil_policy::*;
pub use config::*;
pub use furnace::*;
pub use furnace_freeze::*;
pub use furnace_tracker::*;
pub use scheduler::*;
