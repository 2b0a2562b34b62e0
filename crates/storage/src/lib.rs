#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::{HttpInitError, HttpRepository, RemoteConfig};
pub use repository::{
    CompletionRepository, CurriculumRepository, InMemoryRepository, ProfileRepository,
    RemoteCall, Storage, StorageError,
};
