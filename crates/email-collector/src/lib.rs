//! Email collector - signed customer registration with verification email.
//!
//! - Registers customers only when their token matches the shared secret
//! - Silently ignores registrations with a wrong token
//! - Sends verification links signed with the same secret through Amazon SES

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod registration;
pub mod store;
pub mod token;

pub use config::Config;
pub use error::CollectorError;
pub use notify::{DeliveryStatus, Notifier};
pub use registration::RegisterOutcome;
pub use store::{Customer, Store};
pub use token::TokenCodec;
