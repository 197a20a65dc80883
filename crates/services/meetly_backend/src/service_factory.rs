// --- File: crates/services/meetly_backend/src/service_factory.rs ---
//! Builds the production collaborators of the booking workflow.

use meetly_booking::BookingCreationWorkflow;
use meetly_common::services::{AuthTokenProvider, CalendarService};
use meetly_common::{external_service_error, Context, MeetlyError};
use meetly_config::AppConfig;
use meetly_db::{DbClient, SqlBookingStore};
use meetly_gcal::{create_connector, GoogleCalendarService};
use meetly_identity::IdentityClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the database client and the booking workflow built on top of it.
pub struct MeetlyServiceFactory {
    db: DbClient,
    workflow: Arc<BookingCreationWorkflow>,
}

impl MeetlyServiceFactory {
    /// Connects the database, creates the schema and builds the identity and
    /// calendar clients from `config`.
    pub async fn new(config: &AppConfig) -> Result<Self, MeetlyError> {
        let db = DbClient::new(config)
            .await
            .map_err(|e| MeetlyError::DatabaseError(e.to_string()))?;
        info!("Connected to database: {}", db);

        let identity_config = config.identity.clone().unwrap_or_default();
        if identity_config.secret_key.is_none() {
            warn!(
                "Identity provider secret key is not set, \
                 bookings will fail with GOOGLE_AUTH_ERROR"
            );
        }
        let tokens = IdentityClient::new(identity_config)?;

        let connector =
            create_connector().map_err(|e| external_service_error("Google Calendar", e))?;
        let calendar =
            GoogleCalendarService::new(connector, config.gcal.clone().unwrap_or_default());

        Self::with_services(db, Arc::new(tokens), Arc::new(calendar)).await
    }

    /// Builds the factory around an existing database and injected
    /// token and calendar services.
    pub async fn with_services(
        db: DbClient,
        tokens: Arc<dyn AuthTokenProvider>,
        calendar: Arc<dyn CalendarService>,
    ) -> Result<Self, MeetlyError> {
        let store = SqlBookingStore::new(db.clone());
        store
            .init_schema()
            .await
            .context("failed to initialize booking schema")?;

        let workflow = BookingCreationWorkflow::new(Arc::new(store), tokens, calendar);
        Ok(Self {
            db,
            workflow: Arc::new(workflow),
        })
    }

    pub fn db(&self) -> &DbClient {
        &self.db
    }

    pub fn workflow(&self) -> Arc<BookingCreationWorkflow> {
        self.workflow.clone()
    }
}
