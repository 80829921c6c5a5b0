//! # petstore-smoke - API test suite for the Petstore demo service
//!
//! A retry-aware client and step library for exercising the Swagger
//! Petstore CRUD backend. The heart of the crate is [`JsonClient`]: it
//! turns a path template plus verb plus optional body into an HTTP call,
//! applies the suite's default headers, retries a fixed set of transient
//! statuses with capped exponential backoff, masks tokens and emails
//! before anything is logged, and raises one uniform error when the final
//! status is not a success.
//!
//! ## Quick start
//!
//! ```no_run
//! use petstore_smoke::{Config, JsonClient, OrderStatus};
//! use petstore_smoke::steps::OrderSteps;
//!
//! #[tokio::main]
//! async fn main() -> petstore_smoke::Result<()> {
//!     let config = Config::load()?;
//!     let client = JsonClient::new(&config)?;
//!     let orders = OrderSteps::new(&client);
//!
//!     orders
//!         .place_order(1001, 1, 3, "2026-08-06T10:00:00Z", OrderStatus::Placed, true)
//!         .await?;
//!     let body = orders.get_order(1001).await?;
//!     println!("order: {body}");
//!
//!     orders.delete_order(1001).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure surface
//!
//! A call whose final status is outside the success set raises
//! [`Error::UnexpectedStatus`] with the expected set, the actual status,
//! the response body, and a hint when the response looks like an HTML
//! page instead of API JSON. Negative tests bypass the check entirely
//! with the raw variants:
//!
//! ```no_run
//! use petstore_smoke::{ApiPath, Config, JsonClient};
//! use http::StatusCode;
//!
//! # async fn example() -> petstore_smoke::Result<()> {
//! # let config = Config::load()?;
//! # let client = JsonClient::new(&config)?;
//! let response = client
//!     .get_raw(None, ApiPath::UserUsername, &[], &["no_such_user"])
//!     .await?;
//! assert_eq!(response.status, StatusCode::NOT_FOUND);
//! # Ok(())
//! # }
//! ```

pub mod assert;
mod client;
mod config;
mod error;
mod headers;
pub mod json;
mod model;
mod multipart;
mod paths;
pub mod redact;
pub mod report;
mod response;
pub mod retry;
pub mod status;
pub mod steps;

pub use client::JsonClient;
pub use config::Config;
pub use error::{Error, Result};
pub use headers::{compose, HeaderOverride, APPLICATION_JSON, MULTIPART_FORM_DATA, TEXT_HTML};
pub use model::{Category, Order, OrderStatus, Pet, PetStatus, Tag, User};
pub use multipart::MultipartClient;
pub use paths::ApiPath;
pub use response::ApiResponse;
pub use retry::Backoff;
