use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use charter_core::BookingWizard;
use charter_store::{app_config::Config, seed, AdminCredential, PortalStore};
use uuid::Uuid;

use crate::airports::{AirportDbClient, AirportSearcher, IcaoLookup};
use crate::crm::HighLevelClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

/// Per-session wizard table. Each wizard is owned exclusively by its session;
/// the lock is only held for synchronous state-machine calls.
pub type WizardMap = Arc<RwLock<HashMap<Uuid, BookingWizard>>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PortalStore>,
    pub wizards: WizardMap,
    pub crm: Arc<HighLevelClient>,
    pub airports: Arc<AirportSearcher>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = PortalStore::new(
            seed::seed(),
            AdminCredential {
                email: config.auth.admin_email.clone(),
                password: config.auth.admin_password.clone(),
            },
        );

        let lookup: Option<Arc<dyn IcaoLookup>> = config
            .airportdb
            .api_token
            .as_ref()
            .map(|token| {
                Arc::new(AirportDbClient::new(&config.airportdb.base_url, token))
                    as Arc<dyn IcaoLookup>
            });

        Self {
            store: Arc::new(store),
            wizards: Arc::new(RwLock::new(HashMap::new())),
            crm: Arc::new(HighLevelClient::new(&config.crm)),
            airports: Arc::new(AirportSearcher::new(
                lookup,
                charter_catalog::fallback_airports(),
            )),
            auth: AuthConfig {
                secret: config.auth.jwt_secret.clone(),
                expiration: config.auth.jwt_expiration_seconds,
            },
        }
    }
}
