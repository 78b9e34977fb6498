//! Collaborators and storage for Artifact Search
//!
//! The search engine consults independent, individually unreliable data
//! sources. This crate defines their interfaces and ships implementations:
//! - Repository trait abstractions for authorization, search, metadata and storage
//! - In-memory implementations backed by `parking_lot` locks
//! - PostgreSQL artifact store with SQLx
//! - Connection pool management and migrations
//!
//! # Example
//!
//! ```rust,no_run
//! use artifact_search_store::{create_pool, ArtifactStore, PoolConfig, PostgresArtifactStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PoolConfig::new("postgres://localhost/artifact_search").max_connections(4);
//! let pool = create_pool(&config).await?;
//!
//! let store = PostgresArtifactStore::new(pool);
//! let _rows = store.query_by_checksum("3a0adc365f849366cd8b633cad155cb7").await?;
//! # Ok(())
//! # }
//! ```

// Re-export core domain types for convenience
pub use artifact_search_core;

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use memory::{
    InMemoryArtifactStore, InMemoryMetadataResolver, InMemoryRepositorySearch, StaticRepositories,
};
pub use pool::{create_pool, mask_password, run_migrations, verify_pool_health, PoolConfig};
pub use postgres::PostgresArtifactStore;
pub use repository::{ArtifactStore, MetadataResolver, ObservableRepositories, RepositorySearch};

// Re-export sqlx types that users may need
pub use sqlx::postgres::PgPool;
