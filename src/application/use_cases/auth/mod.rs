//! Operator Authentication Use Cases

mod login_operator;
mod register_operator;

pub use login_operator::LoginOperatorUseCase;
pub use register_operator::RegisterOperatorUseCase;
