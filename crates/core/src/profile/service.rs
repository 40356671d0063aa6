//! Account service: authentication operations and profile CRUD
//!
//! All five operations return discriminated results; raw provider errors are
//! translated before they reach callers. Registration is transactional across
//! identity creation and the profile write: a failed write rolls the identity
//! back so no orphaned identity survives.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use unilink_domain::{
    DocumentFields, FieldValue, Identity, ProfileUpdate, RegistrationForm, Result, UnilinkError,
    UserProfile,
};

use crate::auth::messages::translate;
use crate::auth::ports::IdentityProvider;
use crate::profile::ports::ProfileStore;
use crate::profile::validate;

/// Data access layer over the identity provider and document store ports.
pub struct AccountService {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
    collection: String,
}

impl AccountService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self { provider, store, collection: collection.into() }
    }

    /// Register a new account: validate, create the identity, write the
    /// profile record.
    ///
    /// Validation collects every missing or invalid field before any remote
    /// call. If the record write fails after the identity was created, the
    /// identity is deleted best-effort and the write failure is returned.
    pub async fn register(&self, form: &RegistrationForm, password: &str) -> Result<UserProfile> {
        let mut invalid = Vec::new();

        let name = form.name.trim();
        if !validate::is_valid_name(name) {
            invalid.push("name");
        }
        let email = validate::normalize_email(&form.email);
        if !validate::is_valid_email(&email) {
            invalid.push("email");
        }
        if password.trim().is_empty() {
            invalid.push("password");
        }
        let university_title = form.university_title.trim();
        if !validate::is_valid_university_title(university_title) {
            invalid.push("university_title");
        }
        let graduation_year = validate::parse_graduation_year(&form.graduation_year);
        if graduation_year.is_none() {
            invalid.push("graduation_year");
        }

        if !invalid.is_empty() {
            return Err(UnilinkError::validation(invalid));
        }
        let graduation_year = graduation_year.unwrap_or_default();

        let identity = self.provider.sign_up(&email, password).await.map_err(translate)?;
        info!(uid = %identity.uid, "identity created");

        let now = Utc::now();
        let profile = UserProfile {
            uid: identity.uid.clone(),
            name: name.to_string(),
            email,
            university_title: university_title.to_string(),
            graduation_year,
            created_at: now,
            updated_at: now,
        };

        if let Err(write_err) =
            self.store.set(&self.collection, &identity.uid, &profile.to_fields()).await
        {
            // Roll the identity back so registration stays transactional.
            // Deletion failure is logged, never surfaced.
            if let Err(rollback_err) = self.provider.delete_current_identity().await {
                warn!(uid = %identity.uid, error = %rollback_err, "identity rollback failed");
            }
            return Err(translate(write_err));
        }

        info!(uid = %profile.uid, "registration completed");
        Ok(profile)
    }

    /// Authenticate with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let mut missing = Vec::new();
        let email = validate::normalize_email(email);
        if email.is_empty() {
            missing.push("email");
        }
        if password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            return Err(UnilinkError::validation(missing));
        }

        let identity = self.provider.sign_in(&email, password).await.map_err(translate)?;
        info!(uid = %identity.uid, "signed in");
        Ok(identity)
    }

    /// End the current session. Idempotent; failures are surfaced, not
    /// retried.
    pub async fn logout(&self) -> Result<()> {
        self.provider.sign_out().await.map_err(translate)?;
        info!("signed out");
        Ok(())
    }

    /// Fetch the profile record for `uid`.
    ///
    /// Missing optional fields back-fill with defaults so callers never see
    /// undefined required fields; stored timestamps decode to `DateTime<Utc>`.
    pub async fn fetch_profile(&self, uid: &str) -> Result<UserProfile> {
        if uid.trim().is_empty() {
            return Err(UnilinkError::validation(["uid"]));
        }

        let fields = self
            .store
            .get(&self.collection, uid)
            .await
            .map_err(translate)?
            .ok_or_else(|| UnilinkError::NotFound(format!("no profile record for uid {uid}")))?;

        Ok(UserProfile::from_fields(uid, &fields))
    }

    /// Apply a partial update to the profile record.
    ///
    /// Each present field is validated independently; a single patch is
    /// issued that also stamps `updated_at`. Absent fields are untouched.
    pub async fn update_profile(&self, uid: &str, update: &ProfileUpdate) -> Result<()> {
        if uid.trim().is_empty() {
            return Err(UnilinkError::validation(["uid"]));
        }
        if update.is_empty() {
            return Err(UnilinkError::validation(["no fields to update"]));
        }

        let mut invalid = Vec::new();
        let mut fields = DocumentFields::new();

        if let Some(name) = &update.name {
            let name = name.trim();
            if validate::is_valid_name(name) {
                fields.insert("name".into(), FieldValue::Str(name.to_string()));
            } else {
                invalid.push("name");
            }
        }
        if let Some(email) = &update.email {
            let email = validate::normalize_email(email);
            if validate::is_valid_email(&email) {
                fields.insert("email".into(), FieldValue::Str(email));
            } else {
                invalid.push("email");
            }
        }
        if let Some(title) = &update.university_title {
            let title = title.trim();
            if validate::is_valid_university_title(title) {
                fields.insert("university_title".into(), FieldValue::Str(title.to_string()));
            } else {
                invalid.push("university_title");
            }
        }
        if let Some(year) = update.graduation_year {
            if validate::is_valid_graduation_year(year) {
                fields.insert("graduation_year".into(), FieldValue::Int(year));
            } else {
                invalid.push("graduation_year");
            }
        }

        if !invalid.is_empty() {
            return Err(UnilinkError::validation(invalid));
        }

        fields.insert("updated_at".into(), FieldValue::Timestamp(Utc::now()));
        self.store.patch(&self.collection, uid, &fields).await.map_err(translate)?;

        info!(uid, updated = fields.len(), "profile updated");
        Ok(())
    }
}
