//! Command line parsing.
//!
//! The flag surface follows the classic `ldapsearch`: single letter options,
//! `-h` for the host rather than help, the first positional argument is the
//! filter and every further one an attribute to return.
use clap::Parser;

use crate::{
	config::{Deref, Flags, Scope, SearchConfig, ALL_ATTRIBUTES, DEFAULT_FILTER},
	error::Error,
};

/// Options which take the following token as their value
const VALUE_OPTIONS: [&str; 9] = ["-h", "-p", "-b", "-s", "-D", "-w", "-a", "-l", "-z"];
/// Options which stand on their own, apart from `-V`
const SWITCHES: [&str; 4] = ["-A", "-n", "-v", "-x"];

/// Help text printed when the program is run without arguments.
pub const USAGE: &str = "\
Usage:
    ldapsearch [options] filter [attributes...]

where:
    filter      LDAP search filter; default is (objectClass=*)
    attributes  whitespace-separated list of attributes to retrieve;
                no attributes means all attributes; default is *

Search options:
    -a deref    one of never, always; default is never
    -A          retrieve attribute names only (no values)
    -b basedn   base dn for search
    -l time     time limit (in seconds) for search
    -s scope    one of base, one, or sub (search scope); default is sub
    -z size     size limit (in entries) for search

Common options:
    -D binddn   bind dn
    -h host     ldap server; default is localhost
    -n          show what would be done but don't actually search
    -p port     port on ldap server; default is 389
    -v          run in verbose mode (diagnostics to standard output)
    -V          print version info
    -w passwd   bind passwd (for simple authentication)
    -x          Simple authentication
";

/// Identification printed for `-V`.
pub const VERSION: &str = concat!(
	env!("CARGO_PKG_NAME"),
	" ",
	env!("CARGO_PKG_VERSION"),
	": ",
	env!("CARGO_PKG_DESCRIPTION"),
	"\n"
);

/// What the program should do after parsing its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// No arguments were given; show [`USAGE`].
	Usage,
	/// `-V` was given; show [`VERSION`].
	Version,
	/// Perform a search.
	Search(Box<SearchConfig>),
}

/// Raw command line as tokenized by clap, before validation.
#[derive(Debug, Parser)]
#[command(
	name = "ldapsearch",
	disable_help_flag = true,
	disable_version_flag = true,
	args_override_self = true
)]
struct Args {
	/// ldap server
	#[arg(short = 'h', value_name = "host", allow_hyphen_values = true)]
	host: Option<String>,
	/// port on ldap server
	#[arg(short = 'p', value_name = "port", allow_hyphen_values = true)]
	port: Option<String>,
	/// base dn for search
	#[arg(short = 'b', value_name = "basedn", allow_hyphen_values = true)]
	base: Option<String>,
	/// one of base, one, or sub
	#[arg(short = 's', value_name = "scope", allow_hyphen_values = true)]
	scope: Option<String>,
	/// bind dn
	#[arg(short = 'D', value_name = "binddn", allow_hyphen_values = true)]
	bind_dn: Option<String>,
	/// bind passwd
	#[arg(short = 'w', value_name = "passwd", allow_hyphen_values = true)]
	bind_password: Option<String>,
	/// one of never, always
	#[arg(short = 'a', value_name = "deref", allow_hyphen_values = true)]
	deref: Option<String>,
	/// time limit (in seconds) for search
	#[arg(short = 'l', value_name = "time", allow_hyphen_values = true)]
	time_limit: Option<String>,
	/// size limit (in entries) for search
	#[arg(short = 'z', value_name = "size", allow_hyphen_values = true)]
	size_limit: Option<String>,
	/// retrieve attribute names only
	#[arg(short = 'A')]
	names_only: bool,
	/// show what would be done but don't actually search
	#[arg(short = 'n')]
	dry_run: bool,
	/// run in verbose mode
	#[arg(short = 'v')]
	verbose: bool,
	/// simple authentication
	#[arg(short = 'x')]
	simple_auth: bool,
	/// LDAP search filter
	#[arg(value_name = "filter")]
	filter: Option<String>,
	/// attributes to retrieve
	#[arg(value_name = "attributes")]
	attributes: Vec<String>,
}

/// Parse the command line arguments, not including the program name.
pub fn parse<I, T>(args: I) -> Result<Action, Error>
where
	I: IntoIterator<Item = T>,
	T: Into<String>,
{
	let args: Vec<String> = args.into_iter().map(Into::into).collect();
	if args.is_empty() {
		return Ok(Action::Usage);
	}
	if let Some(action) = scan(&args)? {
		return Ok(action);
	}

	let args = Args::try_parse_from(std::iter::once("ldapsearch".to_owned()).chain(args))?;
	args.into_config().map(|config| Action::Search(Box::new(config)))
}

/// Walk the tokens in order. Only whole tokens from the option table count as
/// options, so clusters, attached values and `--` are all rejected. Values
/// are checked as they are met and `-V` ends the walk, leaving whatever
/// follows it unchecked.
fn scan(args: &[String]) -> Result<Option<Action>, Error> {
	let mut tokens = args.iter();
	while let Some(token) = tokens.next() {
		if VALUE_OPTIONS.contains(&token.as_str()) {
			let value = tokens.next().ok_or_else(|| Error::MissingValue(token.clone()))?;
			check_value(token, value)?;
		} else if token == "-V" {
			return Ok(Some(Action::Version));
		} else if token.starts_with('-') && !SWITCHES.contains(&token.as_str()) {
			return Err(Error::UnrecognizedOption(token.clone()));
		}
	}
	Ok(None)
}

/// Validate the value of an option which has one.
fn check_value(option: &str, value: &str) -> Result<(), Error> {
	match option {
		"-p" => parse_port(value).map(|_| ()),
		"-s" => value.parse::<Scope>().map(|_| ()),
		"-a" => value.parse::<Deref>().map(|_| ()),
		"-l" => parse_time_limit(value).map(|_| ()),
		"-z" => parse_size_limit(value).map(|_| ()),
		_ => Ok(()),
	}
}

impl Args {
	/// Fill in defaults and convert option values. Values have already been
	/// checked by [`scan`].
	fn into_config(self) -> Result<SearchConfig, Error> {
		let mut config = SearchConfig::default();
		if let Some(host) = self.host {
			config.host = host;
		}
		if let Some(port) = self.port {
			config.port = parse_port(&port)?;
		}
		if let Some(base) = self.base {
			config.base = base;
		}
		if let Some(scope) = self.scope {
			config.scope = scope.parse()?;
			config.scope_name = scope;
		}
		if let Some(deref) = self.deref {
			config.deref = deref.parse()?;
			config.deref_name = deref;
		}
		if let Some(time) = self.time_limit {
			config.time_limit_millis = parse_time_limit(&time)?;
		}
		if let Some(size) = self.size_limit {
			config.size_limit = parse_size_limit(&size)?;
		}
		config.bind_dn = self.bind_dn;
		config.bind_password = self.bind_password;
		config.simple_auth = self.simple_auth;
		config.flags = Flags {
			names_only: self.names_only,
			dry_run: self.dry_run,
			verbose: self.verbose || self.dry_run,
		};
		config.filter = self.filter.unwrap_or_else(|| DEFAULT_FILTER.to_owned());
		config.attributes = if self.attributes.is_empty() {
			vec![ALL_ATTRIBUTES.to_owned()]
		} else {
			self.attributes
		};
		Ok(config)
	}
}

/// `-p`: a TCP port.
fn parse_port(value: &str) -> Result<u16, Error> {
	value.parse().map_err(|_| invalid("-p", value))
}

/// `-l`: whole seconds, returned as milliseconds.
fn parse_time_limit(value: &str) -> Result<u64, Error> {
	value
		.parse::<u64>()
		.ok()
		.and_then(|secs| secs.checked_mul(1000))
		.ok_or_else(|| invalid("-l", value))
}

/// `-z`: a non-negative entry count that fits the protocol's integer.
fn parse_size_limit(value: &str) -> Result<i32, Error> {
	value
		.parse::<u32>()
		.ok()
		.and_then(|size| i32::try_from(size).ok())
		.ok_or_else(|| invalid("-z", value))
}

/// Build the error for a numeric option whose value does not parse.
fn invalid(flag: &'static str, value: &str) -> Error {
	Error::InvalidNumber { flag, value: value.to_owned() }
}

#[cfg(test)]
mod tests {
	#![allow(clippy::unwrap_used, clippy::expect_used)]

	use super::{parse, Action};
	use crate::{
		config::{Deref, Flags, Scope, SearchConfig},
		error::Error,
	};

	fn search(args: &[&str]) -> SearchConfig {
		match parse(args.iter().copied()).unwrap() {
			Action::Search(config) => *config,
			other => panic!("expected a search, got {other:?}"),
		}
	}

	fn error(args: &[&str]) -> Error {
		parse(args.iter().copied()).expect_err("arguments should be rejected")
	}

	#[test]
	fn no_arguments_shows_usage() {
		assert_eq!(parse(Vec::<String>::new()).unwrap(), Action::Usage);
	}

	#[test]
	fn version() {
		assert_eq!(parse(["-V"]).unwrap(), Action::Version);
		assert_eq!(parse(["-v", "-V", "(cn=x)"]).unwrap(), Action::Version);
	}

	#[test]
	fn version_stops_at_its_position() {
		assert_eq!(parse(["-V", "-q"]).unwrap(), Action::Version, "Tokens after -V are not read");
		assert_eq!(parse(["-V", "-s", "bogus"]).unwrap(), Action::Version);
		assert!(matches!(error(&["-q", "-V"]), Error::UnrecognizedOption(token) if token == "-q"));
		assert!(matches!(error(&["-s", "bogus", "-V"]), Error::UnknownScope(_)));
	}

	#[test]
	fn defaults() {
		let config = search(&["-v"]);
		assert_eq!(
			config,
			SearchConfig {
				flags: Flags { verbose: true, ..Flags::default() },
				..SearchConfig::default()
			}
		);
		assert_eq!(config.filter, "(objectClass=*)");
		assert_eq!(config.attributes, ["*"]);
		assert_eq!(config.scope, Scope::Subtree);
		assert_eq!(config.scope_name, "sub");
	}

	#[test]
	fn all_options() {
		let config = search(&[
			"-h", "ldap.example.com", "-p", "1389", "-b", "dc=example,dc=com", "-s", "one", "-D",
			"cn=admin", "-w", "secret", "-a", "Always", "-l", "5", "-z", "10", "-A", "-x",
			"(uid=alice)", "cn", "mail",
		]);
		assert_eq!(
			config,
			SearchConfig {
				host: "ldap.example.com".to_owned(),
				port: 1389,
				base: "dc=example,dc=com".to_owned(),
				scope: Scope::OneLevel,
				scope_name: "one".to_owned(),
				deref: Deref::Always,
				deref_name: "Always".to_owned(),
				time_limit_millis: 5000,
				size_limit: 10,
				bind_dn: Some("cn=admin".to_owned()),
				bind_password: Some("secret".to_owned()),
				simple_auth: true,
				filter: "(uid=alice)".to_owned(),
				attributes: vec!["cn".to_owned(), "mail".to_owned()],
				flags: Flags { names_only: true, dry_run: false, verbose: false },
			}
		);
	}

	#[test]
	fn scope_name_is_kept_as_given() {
		for (name, scope) in
			[("base", Scope::Base), ("ONE", Scope::OneLevel), ("Sub", Scope::Subtree)]
		{
			let config = search(&["-s", name]);
			assert_eq!(config.scope, scope);
			assert_eq!(config.scope_name, name);
		}
	}

	#[test]
	fn invalid_scope_and_deref() {
		let err = error(&["-s", "children"]);
		assert!(matches!(err, Error::UnknownScope(_)));
		assert!(err.to_string().contains("children"));

		let err = error(&["-a", "search"]);
		assert!(matches!(err, Error::UnknownDeref(_)));
		assert!(err.to_string().contains("search"));
	}

	#[test]
	fn dry_run_implies_verbose() {
		let config = search(&["-n"]);
		assert_eq!(config.flags, Flags { names_only: false, dry_run: true, verbose: true });
	}

	#[test]
	fn unrecognized_option() {
		let err = error(&["-q", "(cn=x)"]);
		assert!(matches!(err, Error::UnrecognizedOption(ref token) if token == "-q"));
		assert_eq!(err.to_string(), "Unrecognized option: -q");

		assert!(matches!(error(&["(cn=x)", "-"]), Error::UnrecognizedOption(token) if token == "-"));
	}

	#[test]
	fn only_whole_tokens_are_options() {
		for token in ["--", "-hfoo", "-Av", "-vq", "--verbose"] {
			let err = error(&[token, "(cn=x)"]);
			assert!(
				matches!(err, Error::UnrecognizedOption(ref t) if t == token),
				"{token} should be rejected as a whole, got {err:?}"
			);
		}
		assert_eq!(error(&["-vq"]).to_string(), "Unrecognized option: -vq");
		assert!(matches!(error(&["(cn=x)", "--", "cn"]), Error::UnrecognizedOption(t) if t == "--"));
	}

	#[test]
	fn option_values_are_not_options() {
		let config = search(&["-w", "-Av", "-b", "--", "(cn=x)"]);
		assert_eq!(config.bind_password.as_deref(), Some("-Av"));
		assert_eq!(config.base, "--");
		assert_eq!(config.filter, "(cn=x)");
	}

	#[test]
	fn missing_value() {
		let err = error(&["(cn=x)", "-h"]);
		assert!(matches!(err, Error::MissingValue(ref flag) if flag == "-h"), "{err:?}");
		assert_eq!(err.to_string(), "Missing value for -h");
	}

	#[test]
	fn values_may_start_with_a_hyphen() {
		let config = search(&["-w", "-secret-", "-D", "cn=admin"]);
		assert_eq!(config.bind_password.as_deref(), Some("-secret-"));
		assert_eq!(config.bind_dn.as_deref(), Some("cn=admin"));
	}

	#[test]
	fn invalid_numbers() {
		assert!(matches!(error(&["-p", "ldap"]), Error::InvalidNumber { flag: "-p", .. }));
		assert!(matches!(error(&["-p", "70000"]), Error::InvalidNumber { flag: "-p", .. }));
		assert!(matches!(error(&["-l", "soon"]), Error::InvalidNumber { flag: "-l", .. }));
		assert!(matches!(error(&["-z", "-1"]), Error::InvalidNumber { flag: "-z", .. }));
		assert_eq!(error(&["-z", "many"]).to_string(), "Invalid value for -z: many");
	}

	#[test]
	fn order_does_not_matter() {
		let a = search(&["-b", "dc=example,dc=com", "-v", "-s", "base", "(cn=x)", "cn"]);
		let b = search(&["(cn=x)", "-s", "base", "cn", "-v", "-b", "dc=example,dc=com"]);
		assert_eq!(a, b);
	}

	#[test]
	fn last_value_wins() {
		let config = search(&["-h", "first", "-s", "one", "-h", "second", "-s", "base", "-v", "-v"]);
		assert_eq!(config.host, "second");
		assert_eq!(config.scope, Scope::Base);
		assert_eq!(config.scope_name, "base");
	}

	#[test]
	fn positionals() {
		let config = search(&["-A", "(objectClass=person)", "cn", "-v", "sn"]);
		assert_eq!(config.filter, "(objectClass=person)");
		assert_eq!(config.attributes, ["cn", "sn"]);

		let config = search(&["(cn=alice)"]);
		assert_eq!(config.filter, "(cn=alice)");
		assert_eq!(config.attributes, ["*"], "Attributes default independently of the filter");
	}
}
