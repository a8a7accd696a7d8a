//! Value Objects

pub mod account_id;
pub mod email;
pub mod google_id;
pub mod password;
pub mod role;
pub mod user_name;

// Re-exports
pub use account_id::AccountId;
pub use email::Email;
pub use google_id::GoogleId;
pub use password::{PasswordHash, RawPassword};
pub use role::Role;
pub use user_name::UserName;
