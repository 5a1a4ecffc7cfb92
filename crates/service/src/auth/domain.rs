use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::errors::AuthError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("hardcoded email regex is invalid")
});

static E164_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+\d{6,15}$").expect("hardcoded E.164 regex is invalid"));

/// `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// `+` followed by 6 to 15 digits.
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Trim and lowercase; emails are stored and looked up in this form.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Active,
    Locked,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Active => "ACTIVE",
            UserStatus::Locked => "LOCKED",
            UserStatus::Suspended => "SUSPENDED",
            UserStatus::Deleted => "DELETED",
        }
    }

    /// Legal status moves. Nothing returns to `Pending`, `Deleted` is
    /// terminal and a lock can only be placed on an active account.
    pub fn can_transition_to(self, next: UserStatus) -> bool {
        use UserStatus::*;
        matches!(
            (self, next),
            (Pending, Active)
                | (Pending, Suspended)
                | (Pending, Deleted)
                | (Active, Locked)
                | (Active, Suspended)
                | (Active, Deleted)
                | (Locked, Active)
                | (Locked, Suspended)
                | (Locked, Deleted)
                | (Suspended, Active)
                | (Suspended, Deleted)
        )
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(UserStatus::Pending),
            "ACTIVE" => Ok(UserStatus::Active),
            "LOCKED" => Ok(UserStatus::Locked),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            "DELETED" => Ok(UserStatus::Deleted),
            other => Err(AuthError::Validation(format!("unknown user status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MfaMethod {
    Totp,
    Webauthn,
    Sms,
    Email,
}

impl MfaMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MfaMethod::Totp => "totp",
            MfaMethod::Webauthn => "webauthn",
            MfaMethod::Sms => "sms",
            MfaMethod::Email => "email",
        }
    }
}

impl FromStr for MfaMethod {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "totp" => Ok(MfaMethod::Totp),
            "webauthn" => Ok(MfaMethod::Webauthn),
            "sms" => Ok(MfaMethod::Sms),
            "email" => Ok(MfaMethod::Email),
            other => Err(AuthError::Validation(format!("unknown mfa method: {other}"))),
        }
    }
}

/// Tag stored next to every password hash so several schemes can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordAlgorithm {
    Argon2id,
    Bcrypt,
    Scrypt,
    External,
    None,
}

impl PasswordAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordAlgorithm::Argon2id => "argon2id",
            PasswordAlgorithm::Bcrypt => "bcrypt",
            PasswordAlgorithm::Scrypt => "scrypt",
            PasswordAlgorithm::External => "external",
            PasswordAlgorithm::None => "none",
        }
    }
}

impl fmt::Display for PasswordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PasswordAlgorithm {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2id" => Ok(PasswordAlgorithm::Argon2id),
            "bcrypt" => Ok(PasswordAlgorithm::Bcrypt),
            "scrypt" => Ok(PasswordAlgorithm::Scrypt),
            "external" => Ok(PasswordAlgorithm::External),
            "none" => Ok(PasswordAlgorithm::None),
            other => Err(AuthError::Validation(format!("unknown password algorithm: {other}"))),
        }
    }
}

/// Free-form per-user settings, persisted as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Preferences(Map<String, Value>);

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value under `key`, or `default` when absent or not a string.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Non-object JSON yields empty preferences.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

/// Output of the credential hasher.
#[derive(Debug, Clone, PartialEq)]
pub struct HashedPassword {
    pub hash: String,
    pub algorithm: PasswordAlgorithm,
    pub hashed_at: DateTime<Utc>,
}

/// Defaults applied to every account created through [`User::register`].
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationPolicy {
    pub initial_status: UserStatus,
    pub default_locale: String,
    pub default_timezone: String,
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            initial_status: UserStatus::Active,
            default_locale: "en".into(),
            default_timezone: "UTC".into(),
        }
    }
}

/// Caller-supplied fields for a new account.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub email: String,
    pub display_name: Option<String>,
    pub phone_e164: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub is_service_account: bool,
    pub created_by: Option<Uuid>,
}

/// The user aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,

    pub phone_e164: Option<String>,
    pub phone_verified_at: Option<DateTime<Utc>>,

    pub password_hash: Option<String>,
    pub password_algorithm: PasswordAlgorithm,
    pub password_updated_at: Option<DateTime<Utc>>,
    pub must_change_password: bool,

    pub status: UserStatus,
    pub is_service_account: bool,

    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub locale: String,
    pub timezone: String,

    pub preferences: Preferences,

    pub mfa_enrolled: bool,
    pub mfa_default_method: Option<MfaMethod>,

    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<IpAddr>,

    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<Uuid>,

    pub is_deleted: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl User {
    /// Email and phone checks applied by [`User::register`], usable before
    /// any expensive work is done for a new account.
    pub fn validate_new(new: &NewUser) -> Result<(), AuthError> {
        if !is_valid_email(&normalize_email(&new.email)) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if let Some(phone) = new.phone_e164.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            if !is_valid_e164(phone) {
                return Err(AuthError::Validation("invalid phone (E.164)".into()));
            }
        }
        Ok(())
    }

    /// The only way to create a user. Validates email and phone, then applies
    /// the policy defaults for status, locale and timezone.
    pub fn register(
        new: NewUser,
        credential: Option<HashedPassword>,
        policy: &RegistrationPolicy,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthError> {
        Self::validate_new(&new)?;
        let email = normalize_email(&new.email);

        let mut user = User {
            id,
            email,
            email_verified_at: None,
            phone_e164: None,
            phone_verified_at: None,
            password_hash: None,
            password_algorithm: PasswordAlgorithm::None,
            password_updated_at: None,
            must_change_password: false,
            status: policy.initial_status,
            is_service_account: new.is_service_account,
            display_name: non_blank(new.display_name),
            avatar_url: None,
            locale: non_blank(new.locale).unwrap_or_else(|| policy.default_locale.clone()),
            timezone: non_blank(new.timezone).unwrap_or_else(|| policy.default_timezone.clone()),
            preferences: Preferences::new(),
            mfa_enrolled: false,
            mfa_default_method: None,
            last_login_at: None,
            last_login_ip: None,
            created_at: now,
            created_by: new.created_by,
            updated_at: now,
            updated_by: new.created_by,
            is_deleted: false,
        };

        if let Some(phone) = non_blank(new.phone_e164) {
            user.set_phone_e164(phone.trim())?;
        }
        if let Some(credential) = credential {
            user.set_password_hash(credential, false);
        }
        Ok(user)
    }

    pub fn change_email(&mut self, new_email: &str) -> Result<(), AuthError> {
        let email = normalize_email(new_email);
        if !is_valid_email(&email) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        self.email = email;
        self.email_verified_at = None;
        Ok(())
    }

    pub fn verify_email(&mut self, at: DateTime<Utc>) {
        self.email_verified_at = Some(at);
    }

    pub fn set_phone_e164(&mut self, e164: &str) -> Result<(), AuthError> {
        if !is_valid_e164(e164) {
            return Err(AuthError::Validation("invalid phone (E.164)".into()));
        }
        self.phone_e164 = Some(e164.to_string());
        self.phone_verified_at = None;
        Ok(())
    }

    pub fn verify_phone(&mut self, at: DateTime<Utc>) {
        self.phone_verified_at = Some(at);
    }

    pub fn has_credential(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn set_password_hash(&mut self, credential: HashedPassword, must_change: bool) {
        self.password_hash = Some(credential.hash);
        self.password_algorithm = credential.algorithm;
        self.password_updated_at = Some(credential.hashed_at);
        self.must_change_password = must_change;
    }

    pub fn require_password_change(&mut self) {
        self.must_change_password = true;
    }

    /// Move to `next` if the transition table allows it.
    pub fn transition_to(&mut self, next: UserStatus) -> Result<(), AuthError> {
        if !self.status.can_transition_to(next) {
            return Err(AuthError::InvalidTransition { from: self.status, to: next });
        }
        self.status = next;
        if next == UserStatus::Deleted {
            self.is_deleted = true;
        }
        Ok(())
    }

    pub fn activate(&mut self) -> Result<(), AuthError> {
        self.transition_to(UserStatus::Active)
    }

    pub fn lock(&mut self) -> Result<(), AuthError> {
        self.transition_to(UserStatus::Locked)
    }

    pub fn suspend(&mut self) -> Result<(), AuthError> {
        self.transition_to(UserStatus::Suspended)
    }

    pub fn soft_delete(&mut self) -> Result<(), AuthError> {
        self.transition_to(UserStatus::Deleted)
    }

    pub fn enable_mfa(&mut self, method: MfaMethod) {
        self.mfa_enrolled = true;
        self.mfa_default_method = Some(method);
    }

    pub fn disable_mfa(&mut self) {
        self.mfa_enrolled = false;
        self.mfa_default_method = None;
    }

    /// Blank values leave the current setting untouched.
    pub fn set_locale_timezone(&mut self, locale: &str, timezone: &str) {
        if !locale.trim().is_empty() {
            self.locale = locale.trim().to_string();
        }
        if !timezone.trim().is_empty() {
            self.timezone = timezone.trim().to_string();
        }
    }

    pub fn set_profile(&mut self, display_name: Option<String>, avatar_url: Option<String>) {
        self.display_name = display_name;
        self.avatar_url = avatar_url;
    }

    /// Stamp the update audit fields.
    pub fn touch(&mut self, at: DateTime<Utc>, actor: Option<Uuid>) {
        self.updated_at = at;
        self.updated_by = actor;
    }
}

/// Registration request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone_e164: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub is_service_account: bool,
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// User as exposed to clients: no credential or audit fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_e164: Option<String>,
    pub locale: String,
    pub timezone: String,
    pub status: UserStatus,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self {
            user_id: u.id,
            email: u.email.clone(),
            display_name: u.display_name.clone(),
            phone_e164: u.phone_e164.clone(),
            locale: u.locale.clone(),
            timezone: u.timezone.clone(),
            status: u.status,
        }
    }
}

/// Successful login: bearer token plus the sanitized user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub access_token: String,
    pub user: UserView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn credential() -> HashedPassword {
        HashedPassword { hash: "$argon2id$stub".into(), algorithm: PasswordAlgorithm::Argon2id, hashed_at: at(0) }
    }

    fn registered() -> User {
        let new = NewUser { email: "Someone@Example.com ".into(), ..NewUser::default() };
        User::register(new, Some(credential()), &RegistrationPolicy::default(), Uuid::new_v4(), at(0)).unwrap()
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
    }

    #[test]
    fn e164_shape() {
        assert!(is_valid_e164("+628123456789"));
        assert!(is_valid_e164("+123456"));
        assert!(!is_valid_e164("+12345"));
        assert!(!is_valid_e164("+1234567890123456"));
        assert!(!is_valid_e164("628123456789"));
        assert!(!is_valid_e164("+62-812"));
    }

    #[test]
    fn register_applies_policy_defaults() {
        let user = registered();
        assert_eq!(user.email, "someone@example.com");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.locale, "en");
        assert_eq!(user.timezone, "UTC");
        assert_eq!(user.password_algorithm, PasswordAlgorithm::Argon2id);
        assert_eq!(user.password_updated_at, Some(at(0)));
        assert!(!user.must_change_password);
        assert!(user.preferences.is_empty());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn register_with_custom_policy_and_profile() {
        let policy = RegistrationPolicy {
            initial_status: UserStatus::Pending,
            default_locale: "id-ID".into(),
            default_timezone: "Asia/Jakarta".into(),
        };
        let actor = Uuid::new_v4();
        let new = NewUser {
            email: "x@y.io".into(),
            display_name: Some("  ".into()),
            phone_e164: Some("+628111222333".into()),
            locale: Some("".into()),
            timezone: Some("Europe/Berlin".into()),
            is_service_account: true,
            created_by: Some(actor),
        };
        let user = User::register(new, None, &policy, Uuid::new_v4(), at(5)).unwrap();
        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.locale, "id-ID");
        assert_eq!(user.timezone, "Europe/Berlin");
        assert_eq!(user.display_name, None);
        assert_eq!(user.phone_e164.as_deref(), Some("+628111222333"));
        assert!(user.is_service_account);
        assert_eq!(user.created_by, Some(actor));
        assert_eq!(user.updated_by, Some(actor));
        assert!(!user.has_credential());
        assert_eq!(user.password_algorithm, PasswordAlgorithm::None);
    }

    #[test]
    fn register_rejects_bad_email_and_phone() {
        let policy = RegistrationPolicy::default();
        let bad_email = NewUser { email: "no-domain@host".into(), ..NewUser::default() };
        let err = User::register(bad_email, None, &policy, Uuid::new_v4(), at(0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid email");

        let bad_phone = NewUser { email: "a@b.com".into(), phone_e164: Some("0812".into()), ..NewUser::default() };
        let err = User::register(bad_phone, None, &policy, Uuid::new_v4(), at(0)).unwrap_err();
        assert_eq!(err.to_string(), "invalid phone (E.164)");
    }

    #[test]
    fn validate_new_matches_register_checks() {
        let ok = NewUser { email: " A@B.com ".into(), phone_e164: Some(" +628123456789 ".into()), ..NewUser::default() };
        assert!(User::validate_new(&ok).is_ok());
        let blank_phone = NewUser { email: "a@b.com".into(), phone_e164: Some("  ".into()), ..NewUser::default() };
        assert!(User::validate_new(&blank_phone).is_ok());

        let bad_email = NewUser { email: "a@localhost".into(), ..NewUser::default() };
        assert_eq!(User::validate_new(&bad_email).unwrap_err().to_string(), "invalid email");
        let bad_phone = NewUser { email: "a@b.com".into(), phone_e164: Some("0812".into()), ..NewUser::default() };
        assert_eq!(User::validate_new(&bad_phone).unwrap_err().to_string(), "invalid phone (E.164)");
    }

    #[test]
    fn changing_contact_clears_verification() {
        let mut user = registered();
        user.verify_email(at(10));
        user.set_phone_e164("+4915112345678").unwrap();
        user.verify_phone(at(11));
        assert!(user.email_verified_at.is_some());
        assert!(user.phone_verified_at.is_some());

        user.change_email("NEW@example.com").unwrap();
        assert_eq!(user.email, "new@example.com");
        assert!(user.email_verified_at.is_none());

        user.set_phone_e164("+4915198765432").unwrap();
        assert!(user.phone_verified_at.is_none());

        assert!(user.change_email("broken").is_err());
        assert_eq!(user.email, "new@example.com");
    }

    #[test]
    fn transition_table() {
        use UserStatus::*;
        let all = [Pending, Active, Locked, Suspended, Deleted];
        for from in all {
            assert!(!from.can_transition_to(from), "{from} -> {from}");
            assert!(!from.can_transition_to(Pending), "{from} -> PENDING");
            assert!(!Deleted.can_transition_to(from));
        }
        assert!(Pending.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Locked));
        assert!(Active.can_transition_to(Locked));
        assert!(Locked.can_transition_to(Active));
        assert!(Suspended.can_transition_to(Active));
        assert!(!Suspended.can_transition_to(Locked));
        for from in [Pending, Active, Locked, Suspended] {
            assert!(from.can_transition_to(Deleted));
        }
    }

    #[test]
    fn status_setters_follow_table() {
        let mut user = registered();
        user.lock().unwrap();
        assert_eq!(user.status, UserStatus::Locked);
        user.activate().unwrap();
        user.suspend().unwrap();
        let err = user.lock().unwrap_err();
        assert!(matches!(err, AuthError::InvalidTransition { from: UserStatus::Suspended, to: UserStatus::Locked }));

        user.soft_delete().unwrap();
        assert_eq!(user.status, UserStatus::Deleted);
        assert!(user.is_deleted);
        assert!(user.activate().is_err());
    }

    #[test]
    fn mfa_and_profile_setters() {
        let mut user = registered();
        user.enable_mfa(MfaMethod::Totp);
        assert!(user.mfa_enrolled);
        assert_eq!(user.mfa_default_method, Some(MfaMethod::Totp));
        user.disable_mfa();
        assert!(!user.mfa_enrolled);
        assert!(user.mfa_default_method.is_none());

        user.set_locale_timezone("id-ID", "");
        assert_eq!(user.locale, "id-ID");
        assert_eq!(user.timezone, "UTC");

        user.set_profile(Some("Ana".into()), Some("https://cdn.example.com/a.png".into()));
        assert_eq!(user.display_name.as_deref(), Some("Ana"));

        user.require_password_change();
        assert!(user.must_change_password);

        let actor = Uuid::new_v4();
        user.touch(at(99), Some(actor));
        assert_eq!(user.updated_at, at(99));
        assert_eq!(user.updated_by, Some(actor));
    }

    #[test]
    fn preferences_accessors() {
        let mut prefs = Preferences::new();
        assert_eq!(prefs.get_string("theme", "light"), "light");
        prefs.set("theme", "dark");
        prefs.set("pageSize", 50);
        assert_eq!(prefs.get_string("theme", "light"), "dark");
        assert_eq!(prefs.get_string("pageSize", "20"), "20");
        assert_eq!(Preferences::from_json(prefs.to_json()), prefs);
        assert!(Preferences::from_json(serde_json::json!([1, 2])).is_empty());
    }

    #[test]
    fn enum_string_forms() {
        assert_eq!("LOCKED".parse::<UserStatus>().unwrap(), UserStatus::Locked);
        assert!("locked".parse::<UserStatus>().is_err());
        assert_eq!("webauthn".parse::<MfaMethod>().unwrap(), MfaMethod::Webauthn);
        assert_eq!("bcrypt".parse::<PasswordAlgorithm>().unwrap(), PasswordAlgorithm::Bcrypt);
        assert_eq!(serde_json::to_string(&UserStatus::Active).unwrap(), "\"ACTIVE\"");
    }

    #[test]
    fn user_view_hides_credentials() {
        let user = registered();
        let json = serde_json::to_value(UserView::from(&user)).unwrap();
        assert_eq!(json["email"], "someone@example.com");
        assert_eq!(json["status"], "ACTIVE");
        assert!(json.get("displayName").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("userId").is_some());
    }
}
