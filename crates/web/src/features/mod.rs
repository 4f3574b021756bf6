pub mod admin;
pub mod check_in;
pub mod documents;
pub mod participants;
pub mod photos;
pub mod settings;
