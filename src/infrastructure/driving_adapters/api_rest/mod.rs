//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

use std::sync::Arc;

use crate::application::use_cases::{
    CheckStoreHealthUseCase, CreateBankConnectionUseCase, DeleteApplicationUseCase, DeleteBankConnectionUseCase,
    GetApplicationByIdUseCase, GetApplicationStatsUseCase, ListApplicationsUseCase, ListBankConnectionsUseCase,
    LoginOperatorUseCase, SubmitApplicationUseCase, UpdateApplicationStatusUseCase,
};
use crate::domain::gateways::{
    ApplicationRepository, BankConnectionRepository, CredentialHasher, OperatorRepository, StoreHealth, TokenIssuer,
};
use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::infrastructure::driven_adapters::{
    Argon2CredentialHasher, JwtTokenIssuer, PostgresApplicationRepository, PostgresBankConnectionRepository,
    PostgresOperatorRepository, RecordStore,
};

pub use router::build_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub submit_application_use_case: Arc<SubmitApplicationUseCase>,
    pub list_applications_use_case: Arc<ListApplicationsUseCase>,
    pub get_application_by_id_use_case: Arc<GetApplicationByIdUseCase>,
    pub update_application_status_use_case: Arc<UpdateApplicationStatusUseCase>,
    pub delete_application_use_case: Arc<DeleteApplicationUseCase>,
    pub get_application_stats_use_case: Arc<GetApplicationStatsUseCase>,
    pub create_bank_connection_use_case: Arc<CreateBankConnectionUseCase>,
    pub list_bank_connections_use_case: Arc<ListBankConnectionsUseCase>,
    pub delete_bank_connection_use_case: Arc<DeleteBankConnectionUseCase>,
    pub login_operator_use_case: Arc<LoginOperatorUseCase>,
    pub check_store_health_use_case: Arc<CheckStoreHealthUseCase>,
}

impl AppState {
    /// Wire every use case against the given record store
    #[must_use]
    pub fn new(store: &RecordStore, config: AppConfig) -> Self {
        let applications: Arc<dyn ApplicationRepository> = Arc::new(PostgresApplicationRepository::new(store));
        let bank_connections: Arc<dyn BankConnectionRepository> =
            Arc::new(PostgresBankConnectionRepository::new(store));
        let operators: Arc<dyn OperatorRepository> = Arc::new(PostgresOperatorRepository::new(store));
        let store_health: Arc<dyn StoreHealth> = Arc::new(store.clone());
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2CredentialHasher);
        let token_issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(&config.jwt));

        Self {
            submit_application_use_case: Arc::new(SubmitApplicationUseCase::new(applications.clone())),
            list_applications_use_case: Arc::new(ListApplicationsUseCase::new(applications.clone())),
            get_application_by_id_use_case: Arc::new(GetApplicationByIdUseCase::new(applications.clone())),
            update_application_status_use_case: Arc::new(UpdateApplicationStatusUseCase::new(
                applications.clone(),
                bank_connections.clone(),
            )),
            delete_application_use_case: Arc::new(DeleteApplicationUseCase::new(applications.clone())),
            get_application_stats_use_case: Arc::new(GetApplicationStatsUseCase::new(applications)),
            create_bank_connection_use_case: Arc::new(CreateBankConnectionUseCase::new(bank_connections.clone())),
            list_bank_connections_use_case: Arc::new(ListBankConnectionsUseCase::new(bank_connections.clone())),
            delete_bank_connection_use_case: Arc::new(DeleteBankConnectionUseCase::new(bank_connections)),
            login_operator_use_case: Arc::new(LoginOperatorUseCase::new(operators, hasher, token_issuer)),
            check_store_health_use_case: Arc::new(CheckStoreHealthUseCase::new(store_health)),
            config: Arc::new(config),
        }
    }
}
