//! SQL implementation of the booking store
//!
//! Scheduling events and their owners are read with a single join; bookings
//! are insert-only. Timestamps are stored as RFC 3339 text because
//! `DateTime<Utc>` has no `Decode` implementation for `sqlx::Any`.

use crate::error::DbError;
use crate::DbClient;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meetly_common::models::{Booking, EventOwner, NewBooking, SchedulingEvent};
use meetly_common::services::{BookingStore, StoreError};
use sqlx::any::AnyRow;
use sqlx::{Row, ValueRef};
use tracing::{debug, error, info};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        external_id TEXT NOT NULL,
        email TEXT NOT NULL,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS scheduling_events (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id TEXT PRIMARY KEY,
        event_id TEXT NOT NULL REFERENCES scheduling_events(id),
        user_id TEXT NOT NULL REFERENCES users(id),
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        additional_info TEXT,
        meet_link TEXT,
        google_event_id TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
];

/// SQL implementation of [`BookingStore`]
#[derive(Debug, Clone)]
pub struct SqlBookingStore {
    /// The database client
    db_client: DbClient,
}

impl SqlBookingStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Creates the users, scheduling_events and bookings tables if missing.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing booking schema");
        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }
        info!("Booking schema initialized successfully");
        Ok(())
    }

    /// Inserts or updates an event owner.
    pub async fn upsert_owner(&self, owner: &EventOwner) -> Result<(), DbError> {
        debug!("Upserting owner {}", owner.user_id);

        let query = r#"
            INSERT INTO users (id, external_id, email, name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET external_id = excluded.external_id, email = excluded.email, name = excluded.name
        "#;

        sqlx::query(query)
            .bind(owner.user_id.as_str())
            .bind(owner.external_id.as_str())
            .bind(owner.email.as_str())
            .bind(owner.name.as_str())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert owner: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        Ok(())
    }

    /// Inserts a scheduling event; its owner must exist.
    pub async fn insert_event(&self, id: &str, title: &str, user_id: &str) -> Result<(), DbError> {
        debug!("Inserting scheduling event {} for user {}", id, user_id);

        let query = r#"
            INSERT INTO scheduling_events (id, title, user_id)
            VALUES ($1, $2, $3)
        "#;

        sqlx::query(query)
            .bind(id)
            .bind(title)
            .bind(user_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert scheduling event: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        Ok(())
    }

    /// Reads a booking back by id.
    pub async fn find_booking(&self, id: &str) -> Result<Option<Booking>, DbError> {
        let query = r#"
            SELECT id, event_id, user_id, name, email, start_time, end_time,
                   additional_info, meet_link, google_event_id, created_at
            FROM bookings
            WHERE id = $1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.map(|r| booking_from_row(&r)).transpose()
    }

    /// Number of bookings recorded for a scheduling event.
    pub async fn count_bookings_for_event(&self, event_id: &str) -> Result<i64, DbError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM bookings WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;
        Ok(row.try_get::<i64, _>("n")?)
    }

    async fn fetch_event_with_owner(
        &self,
        event_id: &str,
    ) -> Result<Option<SchedulingEvent>, DbError> {
        debug!("Finding scheduling event {}", event_id);

        let query = r#"
            SELECT e.id AS event_id, e.title AS title,
                   u.id AS user_id, u.external_id AS external_id,
                   u.email AS email, u.name AS owner_name
            FROM scheduling_events e
            JOIN users u ON u.id = e.user_id
            WHERE e.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(event_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find scheduling event: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.map(|r| -> Result<SchedulingEvent, DbError> {
            Ok(SchedulingEvent {
                id: r.try_get("event_id")?,
                title: r.try_get("title")?,
                owner: EventOwner {
                    user_id: r.try_get("user_id")?,
                    external_id: r.try_get("external_id")?,
                    email: r.try_get("email")?,
                    name: r.try_get("owner_name")?,
                },
            })
        })
        .transpose()
    }

    async fn store_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now();
        debug!("Inserting booking {} for event {}", id, booking.event_id);

        let query = r#"
            INSERT INTO bookings (id, event_id, user_id, name, email, start_time, end_time,
                                  additional_info, meet_link, google_event_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#;

        sqlx::query(query)
            .bind(id.as_str())
            .bind(booking.event_id.as_str())
            .bind(booking.user_id.as_str())
            .bind(booking.name.as_str())
            .bind(booking.email.as_str())
            .bind(booking.start_time.to_rfc3339())
            .bind(booking.end_time.to_rfc3339())
            .bind(booking.additional_info.clone())
            .bind(booking.meet_link.clone())
            .bind(booking.google_event_id.as_str())
            .bind(created_at.to_rfc3339())
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!("Booking {} created successfully", id);
        Ok(Booking::from_new(id, booking, created_at))
    }
}

#[async_trait]
impl BookingStore for SqlBookingStore {
    async fn find_event_with_owner(
        &self,
        event_id: &str,
    ) -> Result<Option<SchedulingEvent>, StoreError> {
        Ok(self.fetch_event_with_owner(event_id).await?)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        Ok(self.store_booking(booking).await?)
    }
}

fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::CorruptRow(format!("{} '{}': {}", column, value, e)))
}

/// Reads a nullable text column. `sqlx::Any` refuses to decode NULL into
/// `Option<String>`, so NULL is checked on the raw value first.
fn optional_text(row: &AnyRow, column: &str) -> Result<Option<String>, DbError> {
    if row.try_get_raw(column)?.is_null() {
        return Ok(None);
    }
    Ok(Some(row.try_get(column)?))
}

fn booking_from_row(row: &AnyRow) -> Result<Booking, DbError> {
    let start_time: String = row.try_get("start_time")?;
    let end_time: String = row.try_get("end_time")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Booking {
        id: row.try_get("id")?,
        event_id: row.try_get("event_id")?,
        user_id: row.try_get("user_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        start_time: parse_timestamp("start_time", &start_time)?,
        end_time: parse_timestamp("end_time", &end_time)?,
        additional_info: optional_text(row, "additional_info")?,
        meet_link: optional_text(row, "meet_link")?,
        google_event_id: row.try_get("google_event_id")?,
        created_at: parse_timestamp("created_at", &created_at)?,
    })
}
