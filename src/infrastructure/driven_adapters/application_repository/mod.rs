//! Application Repository Implementations

mod postgres;

pub use postgres::PostgresApplicationRepository;
