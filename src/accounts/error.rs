use crate::error::AppError;

#[derive(Debug)]
pub enum AccountError {
    MissingEmail,
    InvalidSuperuserFlags(&'static str),
    FieldTooLong { field: &'static str, max: usize },
    InvalidEmail,
    PasswordTooShort { min: usize },
    DuplicateEmail,
    Hashing(String),
    Storage(sqlx::Error),
}

impl AccountError {
    /// Whether the caller supplied bad input, as opposed to a backend fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AccountError::MissingEmail
                | AccountError::InvalidSuperuserFlags(_)
                | AccountError::FieldTooLong { .. }
                | AccountError::InvalidEmail
                | AccountError::PasswordTooShort { .. }
        )
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::MissingEmail => write!(f, "An email is required."),
            AccountError::InvalidSuperuserFlags(flag) => {
                write!(f, "Superuser must have {flag}=true")
            }
            AccountError::FieldTooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
            AccountError::InvalidEmail => write!(f, "Enter a valid email address"),
            AccountError::PasswordTooShort { min } => {
                write!(f, "Password must be at least {min} characters")
            }
            AccountError::DuplicateEmail => write!(f, "A user with this email already exists"),
            AccountError::Hashing(msg) => write!(f, "Password hashing failed: {msg}"),
            AccountError::Storage(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl std::error::Error for AccountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccountError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AccountError::DuplicateEmail
            }
            _ => AccountError::Storage(err),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        if err.is_validation() {
            return AppError::BadRequest(err.to_string());
        }
        match err {
            AccountError::DuplicateEmail => AppError::Conflict(err.to_string()),
            AccountError::Hashing(msg) => AppError::Internal(msg),
            AccountError::Storage(e) => AppError::Database(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}
