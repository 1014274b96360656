pub mod credentials;
pub mod error;
pub mod manager;
pub mod store;

pub use credentials::validate_credentials;
pub use error::AccountError;
pub use manager::{normalize_email, ExtraFields, UserManager};
pub use store::UserStore;
