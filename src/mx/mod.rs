//! MX resolution for the probing pipeline.
//!
//! [`MxResolver`] wraps a [`LookupMx`] backend and picks the preferred mail
//! exchanger of a domain. The default backend is [`Nslookup`]; the `with-dns`
//! feature adds [`DnsLookup`], which talks to DNS directly.

#[cfg(feature = "with-dns")]
mod dns;
mod error;
mod nslookup;
mod parser;
mod resolver;
mod types;

#[cfg(feature = "with-dns")]
pub use dns::DnsLookup;
pub use error::MxError as Error;
pub use nslookup::Nslookup;
pub use parser::parse_mx_output;
pub use resolver::{LookupMx, MxResolver, select_preferred};
pub use types::MxRecord;

#[cfg(test)]
pub(crate) mod tests;
