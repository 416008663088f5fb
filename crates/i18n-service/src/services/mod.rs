//! Business logic layer: the authorization decision engine and the
//! accounts API client it falls back to.

pub mod accounts_client;
pub mod authorization;

pub use accounts_client::{AccountsApi, AccountsApiError, AccountsClient};
pub use authorization::{AuthorizationEngine, Decision, EmployeeLoginRequirement};
