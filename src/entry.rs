//! Search result entries with attributes kept in server order.
//!
//! [`ldap3::SearchEntry`] collects attributes into hash maps, which loses the
//! order the server sent them in. Output has to follow that order, so entries
//! are decoded from the raw protocol structure here instead.
use ldap3::{asn1::StructureTag, ResultEntry};

use crate::error::Error;

/// Protocol tag of a `SearchResultEntry` PDU
const SEARCH_RESULT_ENTRY: u64 = 4;

/// One attribute of an entry together with all of its values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	/// The attribute description as sent by the server
	pub name: String,
	/// Values in server order. Binary values are decoded lossily as UTF-8.
	pub values: Vec<String>,
}

/// A single entry returned by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	/// Distinguished name of the entry
	pub dn: String,
	/// Attributes in server order
	pub attributes: Vec<Attribute>,
}

impl Entry {
	/// Decode an entry from the raw `SearchResultEntry` structure.
	pub fn from_tag(tag: StructureTag) -> Result<Self, Error> {
		let mut parts = tag
			.match_id(SEARCH_RESULT_ENTRY)
			.and_then(StructureTag::expect_constructed)
			.ok_or(Error::MalformedEntry)?
			.into_iter();
		let dn = parts.next().and_then(octets).ok_or(Error::MalformedEntry)?;
		let attributes = parts
			.next()
			.and_then(StructureTag::expect_constructed)
			.ok_or(Error::MalformedEntry)?
			.into_iter()
			.map(Attribute::from_tag)
			.collect::<Result<_, _>>()?;
		Ok(Self { dn, attributes })
	}
}

impl TryFrom<ResultEntry> for Entry {
	type Error = Error;

	fn try_from(entry: ResultEntry) -> Result<Self, Self::Error> {
		Self::from_tag(entry.0)
	}
}

impl Attribute {
	/// Decode a `PartialAttribute` sequence: the type followed by a set of
	/// values.
	fn from_tag(tag: StructureTag) -> Result<Self, Error> {
		let mut parts = tag.expect_constructed().ok_or(Error::MalformedEntry)?.into_iter();
		let name = parts.next().and_then(octets).ok_or(Error::MalformedEntry)?;
		let values = parts
			.next()
			.and_then(StructureTag::expect_constructed)
			.ok_or(Error::MalformedEntry)?
			.into_iter()
			.map(|value| octets(value).ok_or(Error::MalformedEntry))
			.collect::<Result<_, _>>()?;
		Ok(Self { name, values })
	}
}

/// Read a primitive octet string as text.
fn octets(tag: StructureTag) -> Option<String> {
	tag.expect_primitive().map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
