//! Product facades.
//!
//! Each facade is a thin, borrowed view over the shared
//! [`Context`](crate::clients::Context): it picks the namespace and path
//! segments for an endpoint and names the request and response types.
//! Obtain them from [`TruliooClient`](crate::TruliooClient).

mod configuration;
mod connection;
mod kyb;
mod person_fraud;
mod verification;

pub use configuration::Configuration;
pub use connection::Connection;
pub use kyb::Kyb;
pub use person_fraud::PersonFraud;
pub use verification::Verification;
