//! Running a configured search from start to finish.
use std::io::Write;

use crate::{config::SearchConfig, error::Error, ldap::Session, output::Printer};

/// Perform the search described by `config`, writing results to `out`.
///
/// With `verbose` set the search parameters are printed first. With `dry_run`
/// set nothing else happens and the server is never contacted. Otherwise a
/// session is opened, the search streamed to `out`, and the session closed
/// again whether or not the search succeeded.
#[allow(clippy::future_not_send)]
pub async fn run<W: Write>(config: &SearchConfig, out: W) -> Result<(), Error> {
	let mut printer = Printer::new(out, config.flags.names_only);
	if config.flags.verbose {
		printer.parameters(config)?;
		printer.flush()?;
	}
	if config.flags.dry_run {
		return Ok(());
	}

	let mut session = Session::open(config).await?;
	let result = session.search(config, &mut printer).await;
	session.close().await;
	result?;
	Ok(printer.flush()?)
}
