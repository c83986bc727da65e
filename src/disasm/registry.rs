// avrdis
// - By John Hodge (thePowersGang)
//
// disasm/registry.rs
// - Opcode registry and resolver
use std::cmp::Reverse;
use strum::EnumCount;
use crate::error::{Error,Result};
use super::opcodes::{self,Mnemonic};
use super::pattern::{Fields,Pattern};
use super::state::Context;
use super::instruction::Instr;

/// Render handler, writes the instruction's text into the context's output buffers
pub type Handler = fn(&mut Context, &Instr);

pub struct OpcodeEntry
{
	pub pattern: Pattern,
	pub mnemonic: Mnemonic,
	pub handler: Handler,
}

pub struct Registry
{
	entries: Vec<OpcodeEntry>,
}

impl Registry
{
	pub fn new() -> Registry
	{
		Registry {
			entries: Vec::with_capacity(Mnemonic::COUNT),
		}
	}

	pub fn entries(&self) -> &[OpcodeEntry] {
		&self.entries
	}

	pub fn register(&mut self, pattern: &'static str, mnemonic: Mnemonic, handler: Handler)
	{
		self.entries.push(OpcodeEntry {
			pattern: Pattern::new(pattern),
			mnemonic: mnemonic,
			handler: handler,
			});
	}

	/// Replace the handler of an already registered mnemonic
	pub fn supersede(&mut self, mnemonic: Mnemonic, handler: Handler) -> Result<()>
	{
		match self.entries.iter_mut().find(|e| e.mnemonic == mnemonic)
		{
		Some(e) => {
			e.handler = handler;
			Ok( () )
			},
		None => Err( Error::NotRegistered(mnemonic.ident()) ),
		}
	}

	/// Order entries most-specific first.
	///
	/// The sort is stable: entries of equal specificity keep registration order, which
	/// decides between encodings that are exact aliases (e.g. brcc/brsh).
	pub fn sort(&mut self)
	{
		self.entries.sort_by_key(|e| Reverse(e.pattern.specificity()));
	}

	/// Check that the registered mnemonics are exactly the definition table's
	pub fn check_consistency(&self) -> Result<()>
	{
		opcodes::check_table().map_err(Error::TableMismatch)?;
		let mut seen = [false; Mnemonic::COUNT];
		for e in &self.entries
		{
			if !e.pattern.is_whole_bytes() {
				return Err( Error::TableMismatch(format!("{} pattern \"{}\" is not a whole number of bytes", e.mnemonic.ident(), e.pattern.text())) );
			}
			let slot = &mut seen[e.mnemonic as usize];
			if *slot {
				return Err( Error::TableMismatch(format!("{} registered twice", e.mnemonic.ident())) );
			}
			*slot = true;
		}
		if let Some(i) = seen.iter().position(|&s| !s) {
			return Err( Error::TableMismatch(format!("{} has no pattern", opcodes::OPCODES[i].mnemonic.ident())) );
		}
		Ok( () )
	}

	/// Find the first (most specific) entry matching the start of `window`.
	///
	/// `fields` holds the operand values of the returned entry.
	pub fn resolve(&self, window: &[u8], fields: &mut Fields) -> Option<&OpcodeEntry>
	{
		self.entries.iter().find(|e| e.pattern.matches(window, fields))
	}
}


// vim: ft=rust
