use crate::error::{CliError, Result as CliErrorResult};

use dl_auth::{
    BackendClient, Compensation, FirebaseIdentityProvider, FirebaseUserStore, IdentityProvider,
    LeaveOrphaned, MemoryUserStore, RegistrationCommitter, RetractIdentity, SignupBackend,
    SignupController, UserRecordStore, VerificationRequestor,
};
use dl_config::{Config, StoreBackend};
use dl_db::UserRecordRepository;

use std::sync::Arc;

use log::{info, warn};

pub fn signup_backend(config: &Config) -> CliErrorResult<Arc<dyn SignupBackend>> {
    let client = BackendClient::new(&config.api.base_url, config.api.timeout())?;
    Ok(Arc::new(client))
}

pub fn identity_provider(config: &Config) -> CliErrorResult<Arc<dyn IdentityProvider>> {
    let provider = FirebaseIdentityProvider::new(
        &config.firebase.identity_toolkit_url,
        config.firebase.require_api_key()?,
        config.api.timeout(),
    )?;
    Ok(Arc::new(provider))
}

pub async fn user_record_store(config: &Config) -> CliErrorResult<Arc<dyn UserRecordStore>> {
    match config.store.backend {
        StoreBackend::Firebase => Ok(Arc::new(FirebaseUserStore::new(
            &config.firebase.database_url,
            config.api.timeout(),
        )?)),
        StoreBackend::Sqlite => {
            let path = config.sqlite_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CliError::invalid(format!(
                        "Cannot create store directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            let pool = dl_db::open_pool(&path).await?;
            Ok(Arc::new(UserRecordRepository::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory user store; records are discarded on exit");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

pub fn compensation(
    config: &Config,
    provider: &Arc<dyn IdentityProvider>,
) -> Arc<dyn Compensation> {
    if config.signup.retract_identity_on_record_failure {
        info!("Orphaned identities will be retracted");
        Arc::new(RetractIdentity::new(Arc::clone(provider)))
    } else {
        Arc::new(LeaveOrphaned)
    }
}

/// Controller wired to the collaborators the configuration selects.
pub async fn signup_controller(config: &Config) -> CliErrorResult<SignupController> {
    let backend = signup_backend(config)?;
    let provider = identity_provider(config)?;
    let store = user_record_store(config).await?;
    let compensation = compensation(config, &provider);

    let requestor = VerificationRequestor::new(Arc::clone(&backend));
    let committer = RegistrationCommitter::new(backend, provider, store, compensation);
    Ok(SignupController::new(requestor, committer))
}
