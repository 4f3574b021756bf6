pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use error::{Result, StorageError};
pub use repository::kv::{JsonFileStore, KeyValueStore, MemoryKeyValueStore};
pub use repository::participant::{ParticipantStore, SharedParticipantStore};
pub use repository::settings::SettingsRepository;
