pub mod application;
pub mod inventory;
