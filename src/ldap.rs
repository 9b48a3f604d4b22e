//! Client for connecting to LDAP and running a search

use std::io::Write;

use ldap3::{adapters::EntriesOnly, LdapConnAsync, LdapConnSettings};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::{config::SearchConfig, entry::Entry, error::Error, output::Printer};

/// An open connection to a directory server.
#[derive(Debug)]
pub struct Session {
	/// Handle used to issue operations.
	ldap: ldap3::Ldap,
	/// The task driving the connection.
	driver: JoinHandle<()>,
}

impl Session {
	/// Connect to the server named in the configuration and authenticate if
	/// any credentials were given. Without credentials the session stays
	/// anonymous and no bind request is sent.
	pub async fn open(config: &SearchConfig) -> Result<Self, Error> {
		let url = config.url()?;
		debug!(%url, "Connecting");
		let (conn, mut ldap) =
			LdapConnAsync::from_url_with_settings(LdapConnSettings::new(), &url).await?;
		let driver = tokio::spawn(async move {
			if let Err(err) = conn.drive().await {
				warn!("Ldap connection error {err}");
			}
		});

		if config.needs_bind() {
			let dn = config.bind_dn.as_deref().unwrap_or_default();
			debug!(dn, "Simple bind");
			let bound = ldap
				.simple_bind(dn, config.bind_password.as_deref().unwrap_or_default())
				.await
				.and_then(ldap3::LdapResult::success);
			if let Err(err) = bound {
				Self { ldap, driver }.close().await;
				return Err(err.into());
			}
		}

		Ok(Self { ldap, driver })
	}

	/// Run the configured search, printing every entry as soon as it arrives.
	/// Entries already printed stay printed if the search fails part way.
	#[allow(clippy::future_not_send)]
	pub async fn search<W: Write>(
		&mut self,
		config: &SearchConfig,
		printer: &mut Printer<W>,
	) -> Result<(), Error> {
		debug!(base = %config.base, filter = %config.filter, "Searching");
		let mut search = self
			.ldap
			.with_search_options(config.search_options())
			.streaming_search_with(
				EntriesOnly::new(),
				&config.base,
				config.scope.into(),
				&config.filter,
				config.attributes.clone(),
			)
			.await?;

		while let Some(entry) = search.next().await? {
			printer.entry(&Entry::try_from(entry)?)?;
		}
		search.finish().await.success()?;
		Ok(())
	}

	/// Unbind and wait for the connection to shut down. Failures are logged,
	/// since there is nothing left to do about them.
	pub async fn close(mut self) {
		if let Err(err) = self.ldap.unbind().await {
			warn!("Unbind failed: {err}");
		}
		if let Err(err) = self.driver.await {
			warn!("Failed to join background task: {err}");
		}
	}
}
