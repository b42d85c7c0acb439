//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_org_chart_store;
mod postgres_org_chart_repository;
mod postgres_user_directory;

pub use in_memory_org_chart_store::InMemoryOrgChartStore;
pub use postgres_org_chart_repository::PostgresOrgChartRepository;
pub use postgres_user_directory::PostgresUserDirectory;
