//! Operator Repository Implementations

mod postgres;

pub use postgres::PostgresOperatorRepository;
