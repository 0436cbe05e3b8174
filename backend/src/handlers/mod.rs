//! HTTP request handlers

pub mod assignments;
pub mod catalog;
pub mod health;
pub mod inventory;
pub mod orders;
pub mod printers;
pub mod procurement;
pub mod production;
pub mod workers;

pub use health::health_check;
