//! HTTP client for the remote customer service.
//!
//! [`HttpCustomerDirectory`] implements [`dropoff_core::CustomerDirectory`]
//! against a JSON REST API:
//!
//! | Operation        | Request                                   |
//! |------------------|-------------------------------------------|
//! | list customers   | `GET {base}/customers`                    |
//! | create customer  | `POST {base}/customers`                   |
//! | update status    | `PATCH {base}/customers/{id}/status`      |
//!
//! The directory trait is synchronous so the ranking core stays embeddable in
//! synchronous presentation code; the client bridges to async `reqwest` by
//! blocking on a Tokio runtime it owns.
//!
//! # Example
//!
//! ```no_run
//! use dropoff_client::HttpCustomerDirectory;
//! use dropoff_core::{CustomerDirectory, mark_delivered};
//!
//! let directory = HttpCustomerDirectory::new("http://localhost:3000/api")?;
//! let customers = directory.list_customers()?;
//! if let Some(first) = customers.first() {
//!     mark_delivered(&directory, &first.id)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod directory;
mod error_body;

pub use directory::{
    ClientBuildError, DEFAULT_USER_AGENT, HttpCustomerDirectory, HttpCustomerDirectoryConfig,
};
pub use error_body::extract_error_message;
