//! Client for the remote face-analysis service.
//!
//! Images are posted as multipart forms together with the API credentials
//! and the fixed attribute selection; the JSON answer is parsed into
//! [`facelens_models::DetectionResponse`].

pub mod client;
pub mod error;

pub use client::{DetectionClient, DetectionClientConfig, DEFAULT_ENDPOINT};
pub use error::{ClientError, ClientResult};
