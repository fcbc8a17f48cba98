//! Health Use Cases

mod check_store_health;

pub use check_store_health::CheckStoreHealthUseCase;
