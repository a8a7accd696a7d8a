//! Infrastructure Layer
//!
//! Database and mail gateway implementations.

pub mod postgres;
pub mod smtp;

pub use postgres::PgAccountRepository;
pub use smtp::{SmtpConfig, SmtpMailGateway};
