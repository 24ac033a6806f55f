use atelier_config::Config;
use atelier_core_contact_impl::ContactFeatureServiceImpl;
use atelier_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use atelier_persistence_postgres::{contact::PostgresContactMessageRepository, PostgresDatabase};
use atelier_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};

// Persistence
pub type Database = PostgresDatabase;

// Shared
pub type Id = IdServiceImpl;
pub type Time = TimeServiceImpl;

// Core
pub type ContactFeature =
    ContactFeatureServiceImpl<Database, Id, Time, PostgresContactMessageRepository>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, Database>;

// API
pub type RestServer = atelier_api_rest::RestServer<HealthFeature, ContactFeature>;

/// Wires the concrete service implementations from the configuration and an
/// established database connection.
pub struct Environment {
    database: Database,
    health_feature_config: HealthFeatureConfig,
}

impl Environment {
    pub fn new(config: &Config, database: Database) -> Self {
        Self {
            database,
            health_feature_config: HealthFeatureConfig {
                cache_ttl: config.health.cache_ttl.into(),
            },
        }
    }

    pub fn database(&self) -> Database {
        self.database.clone()
    }

    pub fn contact_feature(&self) -> ContactFeature {
        ContactFeatureServiceImpl::new(
            self.database.clone(),
            IdServiceImpl,
            TimeServiceImpl,
            PostgresContactMessageRepository,
        )
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeatureServiceImpl::new(
            TimeServiceImpl,
            self.database.clone(),
            self.health_feature_config.clone(),
        )
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(self.health_feature(), self.contact_feature())
    }
}
