//! Search an LDAP directory from the command line.
//!
//! This crate backs the `ldapsearch` binary. It parses a classic
//! `ldapsearch`-style command line into a [`SearchConfig`], opens a session to
//! the directory server, performs exactly one search and prints every entry
//! as `name: value` lines followed by a blank line.
//!
//! The directory protocol itself is handled by the `ldap3` crate. For a
//! general primer on LDAP, its [introduction] is an excellent resource.
//!
//! [introduction]: https://github.com/inejge/ldap3/blob/master/LDAP-primer.md
//!
//! # Getting started
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use ldapsearch::{args, Action};
//!
//! let action = args::parse(["-h", "ldap.example.com", "-b", "dc=example,dc=com", "(uid=alice)"])?;
//! if let Action::Search(config) = action {
//!     ldapsearch::run(&config, std::io::stdout().lock()).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//! * Only plain `ldap://` connections are supported; there is no TLS or
//!   StartTLS.
//! * Results are not paged, so servers enforcing a size limit will cut
//!   large result sets short.
//! * Binary attribute values are printed as lossy UTF-8 rather than base64.

pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod ldap;
pub mod output;
pub mod search;

pub use ldap3;

pub use crate::{
	args::Action,
	config::{Deref, Flags, Scope, SearchConfig},
	entry::{Attribute, Entry},
	error::Error,
	ldap::Session,
	output::Printer,
	search::run,
};
