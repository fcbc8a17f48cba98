//! Bank Connection Repository Implementations

mod postgres;

pub use postgres::PostgresBankConnectionRepository;
