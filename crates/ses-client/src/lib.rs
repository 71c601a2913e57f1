//! Amazon SES v2 client for sending transactional email.

mod client;
mod error;
mod signing;
mod types;

pub use client::{SesClient, SesClientConfig};
pub use error::SesError;
pub use signing::Credentials;
pub use types::*;
