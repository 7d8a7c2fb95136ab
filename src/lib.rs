//! Tahsilat API client.
//!
//! A client library for the Tahsilat payment API: customers, products,
//! 3DS payments, transactions, refunds, commissions, BIN lookups and
//! webhook signature verification.
//!
//! # Quick start
//!
//! ```no_run
//! use tahsilat::{ClientConfig, TahsilatClient};
//! use tahsilat::services::{CreatePaymentParams, PaymentProduct};
//!
//! # async fn example() -> Result<(), tahsilat::Error> {
//! let client = TahsilatClient::new("sk_test_abc123", ClientConfig::new()).await?;
//!
//! let payment = client
//!     .payments()
//!     .create_3ds(
//!         CreatePaymentParams::new(10_000, "TRY", "https://example.com/cb")
//!             .with_product(PaymentProduct::new("Gift Card", 10_000)),
//!     )
//!     .await?;
//!
//! println!("redirect the customer to {:?}", payment.payment_page_url);
//! # Ok(())
//! # }
//! ```
//!
//! Inbound webhooks verify with [`webhook::construct_event`].

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod services;
pub mod time;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;

pub use client::TahsilatClient;
pub use config::{ClientConfig, Environment};
pub use error::Error;
