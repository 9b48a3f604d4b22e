//! Human readable rendering of search parameters and result entries.
use std::io::{self, Write};

use crate::{config::SearchConfig, entry::Entry};

/// Writes verbose diagnostics and entries to an output stream.
#[derive(Debug)]
pub struct Printer<W> {
	/// Where everything is written to
	out: W,
	/// Print attribute names without their values
	names_only: bool,
}

impl<W: Write> Printer<W> {
	/// Create a printer writing to `out`.
	#[must_use]
	pub fn new(out: W, names_only: bool) -> Self {
		Self { out, names_only }
	}

	/// Print the resolved connection and search parameters.
	pub fn parameters(&mut self, config: &SearchConfig) -> io::Result<()> {
		writeln!(self.out, "# Connection : {}", config.address())?;
		writeln!(self.out, "# Base DN    : {}", config.base)?;
		writeln!(self.out, "# Scope      : {}", config.scope_name)?;
		writeln!(self.out, "# Filter     : {}", config.filter)?;
		writeln!(self.out, "# Attributes : [ {} ]", config.attributes.join(" "))
	}

	/// Print one entry followed by a blank separator line.
	pub fn entry(&mut self, entry: &Entry) -> io::Result<()> {
		for attribute in &entry.attributes {
			if self.names_only {
				writeln!(self.out, "{}", attribute.name)?;
				continue;
			}
			for value in &attribute.values {
				writeln!(self.out, "{}: {value}", attribute.name)?;
			}
		}
		writeln!(self.out)
	}

	/// Flush buffered output.
	pub fn flush(&mut self) -> io::Result<()> {
		self.out.flush()
	}

	/// Consume the printer, returning the underlying writer.
	#[cfg(test)]
	pub(crate) fn into_inner(self) -> W {
		self.out
	}
}
