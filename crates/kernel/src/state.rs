//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use jsonwebtoken::{DecodingKey, Validation};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;
use crate::db;
use crate::integrity;
use crate::menu::MenuResolver;
use crate::metrics::Metrics;
use crate::session::SessionCache;
use crate::store::{CatalogStore, EntitlementStore, PgCatalogStore, PgEntitlementStore};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL connection pool. `None` when running on in-memory stores.
    db: Option<PgPool>,

    /// Catalog read access.
    catalog: Arc<dyn CatalogStore>,

    /// Entitlement and override read access.
    entitlements: Arc<dyn EntitlementStore>,

    /// Menu resolver over the two stores.
    resolver: MenuResolver,

    /// Validated-session cache for the HTTP layer.
    sessions: SessionCache,

    /// Prometheus metrics.
    metrics: Arc<Metrics>,

    /// Key used to verify bearer tokens issued by the auth service.
    jwt_decoding_key: DecodingKey,

    /// Validation parameters for bearer tokens.
    jwt_validation: Validation,
}

impl AppState {
    /// Create new application state with database connections.
    ///
    /// Runs migrations and verifies catalog integrity; a duplicate slug or a
    /// duplicate href in default links aborts startup.
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(config)
            .await
            .context("failed to create database pool")?;

        db::run_migrations(&pool)
            .await
            .context("failed to run migrations")?;

        let catalog: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(pool.clone()));
        let entitlements: Arc<dyn EntitlementStore> =
            Arc::new(PgEntitlementStore::new(pool.clone()));

        // Catalog integrity is a startup-time invariant: surface a violation
        // to the operator instead of repairing it silently.
        let features = catalog
            .list_features()
            .await
            .context("failed to load feature catalog")?;
        integrity::verify_catalog(&features).context("feature catalog failed integrity check")?;
        info!(features = features.len(), "feature catalog verified");

        Ok(Self::assemble(
            Some(pool),
            catalog,
            entitlements,
            &config.jwt_secret,
        ))
    }

    /// Build state over injected stores, without a database.
    ///
    /// Used by tests and local development against the in-memory stores.
    pub fn with_stores(
        catalog: Arc<dyn CatalogStore>,
        entitlements: Arc<dyn EntitlementStore>,
        jwt_secret: &str,
    ) -> Self {
        Self::assemble(None, catalog, entitlements, jwt_secret)
    }

    fn assemble(
        db: Option<PgPool>,
        catalog: Arc<dyn CatalogStore>,
        entitlements: Arc<dyn EntitlementStore>,
        jwt_secret: &str,
    ) -> Self {
        let resolver = MenuResolver::new(catalog.clone(), entitlements.clone());
        let jwt_decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
        let jwt_validation = Validation::default();

        Self {
            inner: Arc::new(AppStateInner {
                db,
                catalog,
                entitlements,
                resolver,
                sessions: SessionCache::init(),
                metrics: Arc::new(Metrics::new()),
                jwt_decoding_key,
                jwt_validation,
            }),
        }
    }

    /// Get the catalog store.
    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.inner.catalog
    }

    /// Get the entitlement store.
    pub fn entitlements(&self) -> &Arc<dyn EntitlementStore> {
        &self.inner.entitlements
    }

    /// Get the menu resolver.
    pub fn resolver(&self) -> &MenuResolver {
        &self.inner.resolver
    }

    /// Get the session cache.
    pub fn sessions(&self) -> &SessionCache {
        &self.inner.sessions
    }

    /// Get the metrics registry.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.inner.metrics
    }

    /// Get the bearer-token decoding key.
    pub fn jwt_decoding_key(&self) -> &DecodingKey {
        &self.inner.jwt_decoding_key
    }

    /// Get the bearer-token validation parameters.
    pub fn jwt_validation(&self) -> &Validation {
        &self.inner.jwt_validation
    }

    /// Check if the database is healthy.
    ///
    /// In-memory stores have no backing connection to probe.
    pub async fn database_healthy(&self) -> bool {
        match &self.inner.db {
            Some(pool) => db::check_health(pool).await,
            None => true,
        }
    }
}
