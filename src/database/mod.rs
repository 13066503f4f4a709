pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryFeatureStore;
pub use postgres::PgFeatureStore;
pub use repository::{FeatureRecord, FeatureRepository, FeatureStats, RepositoryError};
pub use store::{FeatureSession, FeatureStore};
