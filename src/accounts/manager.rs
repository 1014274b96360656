use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::accounts::{AccountError, UserStore};
use crate::auth::password;
use crate::models::user::{EMAIL_MAX_LEN, NAME_MAX_LEN};
use crate::models::{NewUser, User};

/// Optional fields accepted on account creation. Flags left as `None` take
/// the model defaults, which lets `create_superuser` tell "unset" apart from
/// an explicit `false`.
#[derive(Debug, Clone, Default)]
pub struct ExtraFields {
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub account_created: Option<DateTime<Utc>>,
}

/// Trim the address and lower-case the domain part. The local part is left
/// alone since it may be case sensitive. Values without an `@` are only
/// trimmed, so `" NoAt "` becomes `"NoAt"`.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Builds and persists user accounts.
pub struct UserManager<S> {
    store: S,
}

impl<S: UserStore> UserManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a regular account. Without a password the account gets an
    /// unusable password and cannot log in until one is set.
    pub async fn create_user(
        &self,
        email: &str,
        password: Option<&str>,
        extra: ExtraFields,
    ) -> Result<User, AccountError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AccountError::MissingEmail);
        }

        check_len("email", &email, EMAIL_MAX_LEN)?;
        let first_name = extra.first_name.unwrap_or_default();
        let last_name = extra.last_name.unwrap_or_default();
        let display_name = extra.display_name.unwrap_or_default();
        check_len("first_name", &first_name, NAME_MAX_LEN)?;
        check_len("last_name", &last_name, NAME_MAX_LEN)?;
        check_len("display_name", &display_name, NAME_MAX_LEN)?;

        let password_hash = match password {
            Some(raw) => password::hash(raw).map_err(AccountError::Hashing)?,
            None => password::make_unusable(),
        };

        let new_user = NewUser {
            id: Uuid::now_v7(),
            email,
            password_hash,
            is_active: extra.is_active.unwrap_or(true),
            is_staff: extra.is_staff.unwrap_or(false),
            is_superuser: extra.is_superuser.unwrap_or(false),
            account_created: extra.account_created.unwrap_or_else(Utc::now),
            first_name,
            last_name,
            display_name,
        };

        let user = self.store.insert(new_user).await?;
        tracing::info!(
            user_id = %user.id,
            is_staff = user.is_staff,
            is_superuser = user.is_superuser,
            "User account created"
        );
        Ok(user)
    }

    /// Create an account with staff and superuser rights.
    pub async fn create_superuser(
        &self,
        email: &str,
        password: Option<&str>,
        mut extra: ExtraFields,
    ) -> Result<User, AccountError> {
        let is_staff = *extra.is_staff.get_or_insert(true);
        let is_superuser = *extra.is_superuser.get_or_insert(true);
        extra.is_active.get_or_insert(true);

        if !is_staff {
            return Err(AccountError::InvalidSuperuserFlags("is_staff"));
        }
        if !is_superuser {
            return Err(AccountError::InvalidSuperuserFlags("is_superuser"));
        }

        self.create_user(email, password, extra).await
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), AccountError> {
    if value.chars().count() > max {
        return Err(AccountError::FieldTooLong { field, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::store::memory::MemoryStore;

    fn manager() -> UserManager<MemoryStore> {
        UserManager::new(MemoryStore::default())
    }

    #[test]
    fn normalize_lowercases_domain_only() {
        assert_eq!(normalize_email("Ada.L@Example.COM"), "Ada.L@example.com");
        assert_eq!(normalize_email("  bob@HOST.org "), "bob@host.org");
        assert_eq!(normalize_email("we\"ird@x\"@EX.com"), "we\"ird@x\"@ex.com");
        assert_eq!(normalize_email("NoAtSign"), "NoAtSign");
        assert_eq!(normalize_email(" NoAt "), "NoAt");
        assert_eq!(normalize_email("   "), "");
    }

    #[tokio::test]
    async fn create_user_stores_normalized_email_and_hash() {
        let m = manager();
        let user = m
            .create_user("Ada@Example.COM", Some("analytical-engine"), ExtraFields::default())
            .await
            .unwrap();

        assert_eq!(user.email, "Ada@example.com");
        assert_ne!(user.password_hash, "analytical-engine");
        assert!(user.check_password("analytical-engine"));
        assert!(!user.check_password("analytical-engine!"));
        assert!(!user.check_password(""));
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.last_login.is_none());
        assert_eq!(m.store.len(), 1);
    }

    #[tokio::test]
    async fn create_user_keeps_extra_fields() {
        let m = manager();
        let extra = ExtraFields {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            display_name: Some("countess".into()),
            is_staff: Some(true),
            ..Default::default()
        };
        let user = m.create_user("ada@example.com", Some("pw"), extra).await.unwrap();
        assert_eq!(user.get_full_name(), "Ada Lovelace");
        assert_eq!(user.display_name, "countess");
        assert!(user.is_staff);
        assert!(!user.is_superuser);
    }

    #[tokio::test]
    async fn create_user_rejects_empty_email() {
        let m = manager();
        for email in ["", "   "] {
            let err = m
                .create_user(email, Some("pw"), ExtraFields::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AccountError::MissingEmail));
        }
        assert_eq!(m.store.len(), 0);
    }

    #[tokio::test]
    async fn create_user_without_password_cannot_authenticate() {
        let m = manager();
        let user = m
            .create_user("nopw@example.com", None, ExtraFields::default())
            .await
            .unwrap();
        assert!(!user.has_usable_password());
        assert!(!user.check_password(""));
        assert!(!user.check_password(&user.password_hash));
    }

    #[tokio::test]
    async fn duplicate_normalized_email_is_rejected() {
        let m = manager();
        m.create_user("dup@example.com", Some("pw"), ExtraFields::default())
            .await
            .unwrap();
        let err = m
            .create_user(" dup@EXAMPLE.com", Some("other"), ExtraFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::DuplicateEmail));
        assert_eq!(m.store.len(), 1);
    }

    #[tokio::test]
    async fn overlong_fields_are_rejected_before_storage() {
        let m = manager();
        let long_email = format!("{}@example.com", "a".repeat(EMAIL_MAX_LEN));
        let err = m
            .create_user(&long_email, Some("pw"), ExtraFields::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::FieldTooLong { field: "email", .. }));

        let extra = ExtraFields {
            last_name: Some("x".repeat(NAME_MAX_LEN + 1)),
            ..Default::default()
        };
        let err = m.create_user("ok@example.com", Some("pw"), extra).await.unwrap_err();
        assert!(matches!(err, AccountError::FieldTooLong { field: "last_name", .. }));
        assert_eq!(m.store.len(), 0);
    }

    #[tokio::test]
    async fn create_superuser_sets_all_flags() {
        let m = manager();
        let user = m
            .create_superuser("root@example.com", Some("pw"), ExtraFields::default())
            .await
            .unwrap();
        assert!(user.is_staff);
        assert!(user.is_superuser);
        assert!(user.is_active);
        assert!(user.can_access_admin());
    }

    #[tokio::test]
    async fn create_superuser_rejects_explicit_false_flags() {
        let m = manager();
        let err = m
            .create_superuser(
                "root@example.com",
                Some("pw"),
                ExtraFields { is_staff: Some(false), ..Default::default() },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidSuperuserFlags("is_staff")));

        let err = m
            .create_superuser(
                "root@example.com",
                Some("pw"),
                ExtraFields { is_superuser: Some(false), ..Default::default() },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidSuperuserFlags("is_superuser")));
        assert_eq!(m.store.len(), 0);
    }

    #[tokio::test]
    async fn create_superuser_respects_explicit_inactive() {
        let m = manager();
        let user = m
            .create_superuser(
                "dormant@example.com",
                None,
                ExtraFields { is_active: Some(false), ..Default::default() },
            )
            .await
            .unwrap();
        assert!(user.is_superuser);
        assert!(!user.is_active);
    }
}
