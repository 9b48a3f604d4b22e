//! Search configuration produced by the argument parser.
use std::str::FromStr;

use ldap3::{DerefAliases, SearchOptions};
use url::Url;

use crate::error::Error;

/// URL scheme used to reach the directory server
pub const PROTOCOL: &str = "ldap";
/// Server host used when `-h` is not given
pub const DEFAULT_HOST: &str = "localhost";
/// Server port used when `-p` is not given
pub const DEFAULT_PORT: u16 = 389;
/// Scope name used when `-s` is not given
pub const DEFAULT_SCOPE_NAME: &str = "sub";
/// Deref name used when `-a` is not given
pub const DEFAULT_DEREF_NAME: &str = "never";
/// Filter used when no positional argument is given
pub const DEFAULT_FILTER: &str = "(objectClass=*)";
/// Attribute list entry meaning "all user attributes"
pub const ALL_ATTRIBUTES: &str = "*";

/// How far a search descends from the base DN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
	/// The base entry only.
	Base,
	/// Immediate children of the base entry.
	OneLevel,
	/// The base entry and everything below it.
	#[default]
	Subtree,
}

impl FromStr for Scope {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.eq_ignore_ascii_case("base") {
			Ok(Scope::Base)
		} else if s.eq_ignore_ascii_case("one") {
			Ok(Scope::OneLevel)
		} else if s.eq_ignore_ascii_case("sub") {
			Ok(Scope::Subtree)
		} else {
			Err(Error::UnknownScope(s.to_owned()))
		}
	}
}

impl From<Scope> for ldap3::Scope {
	fn from(scope: Scope) -> Self {
		match scope {
			Scope::Base => ldap3::Scope::Base,
			Scope::OneLevel => ldap3::Scope::OneLevel,
			Scope::Subtree => ldap3::Scope::Subtree,
		}
	}
}

/// Whether alias entries are followed during a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deref {
	/// Aliases are returned as they are.
	#[default]
	Never,
	/// Aliases are dereferenced both when locating the base and while
	/// searching.
	Always,
}

impl FromStr for Deref {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.eq_ignore_ascii_case("never") {
			Ok(Deref::Never)
		} else if s.eq_ignore_ascii_case("always") {
			Ok(Deref::Always)
		} else {
			Err(Error::UnknownDeref(s.to_owned()))
		}
	}
}

impl From<Deref> for DerefAliases {
	fn from(deref: Deref) -> Self {
		match deref {
			Deref::Never => DerefAliases::Never,
			Deref::Always => DerefAliases::Always,
		}
	}
}

/// Boolean switches that change what the search does or prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
	/// Print attribute names only, without values (`-A`).
	pub names_only: bool,
	/// Show what would be done without contacting the server (`-n`).
	pub dry_run: bool,
	/// Print the search parameters before searching (`-v`).
	pub verbose: bool,
}

/// Everything needed to perform one search. Built once by
/// [`crate::args::parse`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
	/// Directory server host name or address
	pub host: String,
	/// Directory server port
	pub port: u16,
	/// DN of the entry the search starts from
	pub base: String,
	/// How far below the base the search descends
	pub scope: Scope,
	/// The scope exactly as it was given on the command line
	pub scope_name: String,
	/// Alias dereferencing behaviour
	pub deref: Deref,
	/// The deref policy exactly as it was given on the command line
	pub deref_name: String,
	/// Server-side time limit in milliseconds, 0 for none
	pub time_limit_millis: u64,
	/// Maximum number of entries the server should return, 0 for none
	pub size_limit: i32,
	/// DN to bind as
	pub bind_dn: Option<String>,
	/// Password to bind with
	pub bind_password: Option<String>,
	/// Whether a simple bind was requested explicitly (`-x`)
	pub simple_auth: bool,
	/// The LDAP search filter
	pub filter: String,
	/// Attributes the server should return
	pub attributes: Vec<String>,
	/// Output and execution switches
	pub flags: Flags,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			host: DEFAULT_HOST.to_owned(),
			port: DEFAULT_PORT,
			base: String::new(),
			scope: Scope::default(),
			scope_name: DEFAULT_SCOPE_NAME.to_owned(),
			deref: Deref::default(),
			deref_name: DEFAULT_DEREF_NAME.to_owned(),
			time_limit_millis: 0,
			size_limit: 0,
			bind_dn: None,
			bind_password: None,
			simple_auth: false,
			filter: DEFAULT_FILTER.to_owned(),
			attributes: vec![ALL_ATTRIBUTES.to_owned()],
			flags: Flags::default(),
		}
	}
}

impl SearchConfig {
	/// The server address as `ldap://host:port`, exactly as shown in verbose
	/// output.
	#[must_use]
	pub fn address(&self) -> String {
		format!("{PROTOCOL}://{}:{}", self.host, self.port)
	}

	/// The server address parsed as a URL suitable for connecting.
	pub fn url(&self) -> Result<Url, Error> {
		Ok(Url::parse(&self.address())?)
	}

	/// Whether a bind request has to be sent before searching.
	#[must_use]
	pub fn needs_bind(&self) -> bool {
		self.simple_auth || self.bind_dn.is_some() || self.bind_password.is_some()
	}

	/// Server-side time limit in whole seconds, as carried by the search
	/// request.
	#[must_use]
	pub fn time_limit_secs(&self) -> i32 {
		i32::try_from(self.time_limit_millis / 1000).unwrap_or(i32::MAX)
	}

	/// Search request options derived from this configuration.
	#[must_use]
	pub fn search_options(&self) -> SearchOptions {
		SearchOptions::new()
			.deref(self.deref.into())
			.typesonly(self.flags.names_only)
			.timelimit(self.time_limit_secs())
			.sizelimit(self.size_limit)
	}
}
