use std::net::IpAddr;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set};

use crate::auth::domain::{Preferences, User};
use crate::auth::errors::AuthError;
use crate::auth::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn utc(at: sea_orm::prelude::DateTimeWithTimeZone) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

fn to_domain(m: models::user::Model) -> Result<User, AuthError> {
    let corrupt = |field: &str, e: AuthError| AuthError::Repository(format!("user {}: bad {field}: {e}", m.id));
    Ok(User {
        id: m.id,
        email: m.email.clone(),
        email_verified_at: m.email_verified_at.map(utc),
        phone_e164: m.phone_e164.clone(),
        phone_verified_at: m.phone_verified_at.map(utc),
        password_hash: m.password_hash.clone(),
        password_algorithm: m.password_algorithm.parse().map_err(|e| corrupt("password_algorithm", e))?,
        password_updated_at: m.password_updated_at.map(utc),
        must_change_password: m.must_change_password,
        status: m.status.parse().map_err(|e| corrupt("status", e))?,
        is_service_account: m.is_service_account,
        display_name: m.display_name.clone(),
        avatar_url: m.avatar_url.clone(),
        locale: m.locale.clone(),
        timezone: m.timezone.clone(),
        preferences: Preferences::from_json(m.preferences.clone()),
        mfa_enrolled: m.mfa_enrolled,
        mfa_default_method: m
            .mfa_default_method
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| corrupt("mfa_default_method", e))?,
        last_login_at: m.last_login_at.map(utc),
        // unparseable addresses are dropped rather than failing the read
        last_login_ip: m.last_login_ip.as_deref().and_then(|ip| ip.parse::<IpAddr>().ok()),
        created_at: utc(m.created_at),
        created_by: m.created_by,
        updated_at: utc(m.updated_at),
        updated_by: m.updated_by,
        is_deleted: m.is_deleted,
    })
}

fn to_active_model(u: &User) -> models::user::ActiveModel {
    models::user::ActiveModel {
        id: Set(u.id),
        email: Set(u.email.clone()),
        email_verified_at: Set(u.email_verified_at.map(|t| t.fixed_offset())),
        phone_e164: Set(u.phone_e164.clone()),
        phone_verified_at: Set(u.phone_verified_at.map(|t| t.fixed_offset())),
        password_hash: Set(u.password_hash.clone()),
        password_algorithm: Set(u.password_algorithm.as_str().to_string()),
        password_updated_at: Set(u.password_updated_at.map(|t| t.fixed_offset())),
        must_change_password: Set(u.must_change_password),
        status: Set(u.status.as_str().to_string()),
        is_service_account: Set(u.is_service_account),
        display_name: Set(u.display_name.clone()),
        avatar_url: Set(u.avatar_url.clone()),
        locale: Set(u.locale.clone()),
        timezone: Set(u.timezone.clone()),
        preferences: Set(u.preferences.to_json()),
        mfa_enrolled: Set(u.mfa_enrolled),
        mfa_default_method: Set(u.mfa_default_method.map(|m| m.as_str().to_string())),
        last_login_at: Set(u.last_login_at.map(|t| t.fixed_offset())),
        last_login_ip: Set(u.last_login_ip.map(|ip| ip.to_string())),
        created_at: Set(u.created_at.fixed_offset()),
        created_by: Set(u.created_by),
        updated_at: Set(u.updated_at.fixed_offset()),
        updated_by: Set(u.updated_by),
        is_deleted: Set(u.is_deleted),
    }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let found = models::user::find_live_by_email(&self.db, email).await?;
        found.map(to_domain).transpose()
    }

    async fn create(&self, user: User) -> Result<User, AuthError> {
        let created = models::user::insert(&self.db, to_active_model(&user)).await?;
        to_domain(created)
    }
}
