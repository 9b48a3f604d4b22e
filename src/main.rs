//! The `ldapsearch` command line tool.
use std::io::Write;

use ldapsearch::{
	args::{self, USAGE, VERSION},
	Action,
};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let filter = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into()).from_env_lossy();
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let config = match args::parse(std::env::args().skip(1))? {
		Action::Usage => return Ok(std::io::stdout().write_all(USAGE.as_bytes())?),
		Action::Version => return Ok(std::io::stdout().write_all(VERSION.as_bytes())?),
		Action::Search(config) => config,
	};

	ldapsearch::run(&config, std::io::stdout().lock()).await?;
	Ok(())
}
