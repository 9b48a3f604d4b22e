//! Error codes

/// Errors that can occur while parsing arguments or searching a directory
#[derive(thiserror::Error, Debug)]
pub enum Error {
	/// A token looked like an option but is not one this tool knows.
	#[error("Unrecognized option: {0}")]
	UnrecognizedOption(String),
	/// An option which takes a value was the last token on the command line.
	#[error("Missing value for {0}")]
	MissingValue(String),
	/// The value given to `-s` is not one of `base`, `one` or `sub`.
	#[error("Unknown scope: {0}")]
	UnknownScope(String),
	/// The value given to `-a` is not one of `never` or `always`.
	#[error("Unknown deref: {0}")]
	UnknownDeref(String),
	/// A numeric option could not be parsed or is out of range.
	#[error("Invalid value for {flag}: {value}")]
	InvalidNumber {
		/// The option the value was given to
		flag: &'static str,
		/// The value as it appeared on the command line
		value: String,
	},
	/// Any other command line error reported by the argument tokenizer.
	#[error(transparent)]
	Cli(#[from] clap::Error),
	/// The host and port do not form a valid LDAP URL.
	#[error("Invalid server address: {0}")]
	Url(#[from] url::ParseError),
	/// The server sent a search result entry without a DN or attribute list.
	#[error("Malformed search result entry")]
	MalformedEntry,
	/// An underlying protocol error or similar occurred, or the server
	/// rejected an operation.
	#[error(transparent)]
	Ldap(#[from] ldap3::LdapError),
	/// Writing results to the output failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
