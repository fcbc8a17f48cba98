//! Bank Connection Use Cases

mod create_bank_connection;
mod delete_bank_connection;
mod list_bank_connections;

pub use create_bank_connection::CreateBankConnectionUseCase;
pub use delete_bank_connection::DeleteBankConnectionUseCase;
pub use list_bank_connections::ListBankConnectionsUseCase;
