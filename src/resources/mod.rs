//! Typed API resources.
//!
//! Each resource models the fields the API documents today and keeps
//! anything unknown in an `extra` residual map, so new server-side fields
//! never break deserialization.

mod bin_lookup;
mod commission;
mod customer;
mod metadata;
mod payment;
mod product;
pub mod status;
mod token;
mod transaction;
mod webhook_event;

pub use bin_lookup::BinLookup;
pub use commission::{Commission, COMMISSION_BY_CUSTOMER, COMMISSION_BY_MERCHANT};
pub use customer::Customer;
pub use metadata::{Metadata, MetadataEntry};
pub use payment::Payment;
pub use product::Product;
pub use token::Token;
pub use transaction::{Refund, ResolvePreAuth, TransactionResult};
pub use webhook_event::WebhookEvent;
