use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};

use super::models::{Location, Shift, User};

// Row types matching the SQLite schema. JSON columns are stored as TEXT and
// shift bounds as unix milliseconds.

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub is_admin_user: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub id: String,
    pub location_name: String,
    pub address: String,
    pub company_name: String,
    pub contacts: String,
    pub instructions: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShiftRow {
    pub id: String,
    pub user_id: String,
    pub location_id: Option<String>,
    pub start_ms: i64,
    pub end_ms: i64,
    pub shift_type: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn timestamp_from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| anyhow!("Timestamp out of range: {}", millis))
}

// Conversion functions
impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> Result<Self> {
        let address = row
            .address
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .with_context(|| format!("Corrupt address for user {}", row.id))?;

        Ok(Self {
            id: row.id,
            username: row.username,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address,
            password_hash: row.password_hash,
            is_admin_user: row.is_admin_user,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<LocationRow> for Location {
    type Error = anyhow::Error;

    fn try_from(row: LocationRow) -> Result<Self> {
        let context = || format!("Corrupt JSON column for location {}", row.id);
        let address = serde_json::from_str(&row.address).with_context(context)?;
        let contacts = serde_json::from_str(&row.contacts).with_context(context)?;
        let instructions = serde_json::from_str(&row.instructions).with_context(context)?;

        Ok(Self {
            id: row.id,
            location_name: row.location_name,
            address,
            company_name: row.company_name,
            contacts,
            instructions,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<ShiftRow> for Shift {
    type Error = anyhow::Error;

    fn try_from(row: ShiftRow) -> Result<Self> {
        Ok(Self {
            start_time: timestamp_from_millis(row.start_ms)?,
            end_time: timestamp_from_millis(row.end_ms)?,
            id: row.id,
            user_id: row.user_id,
            location_id: row.location_id,
            shift_type: row.shift_type,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = anyhow::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}
