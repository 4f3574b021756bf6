pub mod admin;
pub mod filter;
pub mod participant;
pub mod photo;
pub mod settings;
