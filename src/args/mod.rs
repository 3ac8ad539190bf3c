//! CLI argument types.
mod cli;


pub use cli::{Cli, Command, SlotWindowArgs, StateGrowthArgs};
