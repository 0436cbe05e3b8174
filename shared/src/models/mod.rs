//! Domain models for the print shop production console

mod catalog;
mod inventory;
mod order;
mod procurement;
mod production;
mod resource;

pub use catalog::*;
pub use inventory::*;
pub use order::*;
pub use procurement::*;
pub use production::*;
pub use resource::*;
