// avrdis
// - By John Hodge (thePowersGang)
//
// labels.rs
// - Jump/call target bookkeeping and label naming
use bit_set::BitSet;
use std::collections::{BTreeMap,HashMap};
use std::fmt::Write;
use crate::disasm::opcodes::Mnemonic;

#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum RefKind
{
	/// Conditional branch
	Branch,
	Jump,
	Call,
}

struct Reference
{
	from: u32,
	mnemonic: Mnemonic,
}

/// Targets are tracked by word offset within the image (instructions are word aligned)
#[derive(Default)]
pub struct LabelTable
{
	/// Address of the first image byte
	start: u32,
	/// Image length in bytes, targets at or past it are not labelled
	length: u32,
	/// Word offsets where pass 1 decoded an instruction
	decoded: BitSet,
	calls: BitSet,
	jumps: BitSet,
	references: BTreeMap<u32, Vec<Reference>>,
	names: HashMap<u32, String>,
}

impl LabelTable
{
	/// Table for an image of `length` bytes loaded at `start`
	pub fn new(start: u32, length: u32) -> LabelTable
	{
		LabelTable {
			start: start,
			length: length,
			..Default::default()
		}
	}

	/// Word offset of `address`, if it is a word boundary inside the image
	fn word_offset(&self, address: u32) -> Option<usize>
	{
		let offset = address.checked_sub(self.start)?;
		if offset < self.length && offset % 2 == 0 {
			Some( (offset / 2) as usize )
		}
		else {
			None
		}
	}

	/// Note that pass 1 decoded an instruction at `address`
	pub fn mark_instruction(&mut self, address: u32)
	{
		if let Some(word) = self.word_offset(address) {
			self.decoded.insert(word);
		}
	}

	pub fn record_reference(&mut self, kind: RefKind, from: u32, to: u32, mnemonic: Mnemonic)
	{
		let word = match self.word_offset(to)
			{
			Some(w) => w,
			None => {
				warn!("{} at {:#x} targets {:#x}, outside the image or unaligned, not labelling", mnemonic.name(), from, to);
				return ;
				},
			};
		trace!("record_reference({:?}, {:#x} -> {:#x})", kind, from, to);
		match kind
		{
		RefKind::Call => self.calls.insert(word),
		RefKind::Jump | RefKind::Branch => self.jumps.insert(word),
		};
		self.references.entry(to).or_default().push( Reference { from: from, mnemonic: mnemonic } );
	}

	/// Assign names to every recorded target, in ascending address order.
	///
	/// A target that is both called and jumped to is named as a function. Targets that
	/// do not start a decoded instruction (mid-instruction, or in undecodable bytes) are
	/// dropped, since no label definition could be printed for them.
	pub fn finalize(&mut self)
	{
		let start = self.start;
		let address_of = |word: usize| start.wrapping_add( (word * 2) as u32 );

		let targets: Vec<usize> = self.calls.union(&self.jumps).collect();
		for word in targets
		{
			if !self.decoded.contains(word) {
				warn!("Target {:#x} is not an instruction start, not labelling", address_of(word));
				self.calls.remove(word);
				self.jumps.remove(word);
				self.references.remove(&address_of(word));
			}
		}

		self.names.clear();
		let mut n_funcs = 0;
		for word in self.calls.iter()
		{
			n_funcs += 1;
			self.names.insert( address_of(word), format!("Function{}", n_funcs) );
		}
		let mut n_labels = 0;
		for word in self.jumps.difference(&self.calls)
		{
			n_labels += 1;
			self.names.insert( address_of(word), format!("Label{}", n_labels) );
		}
		info!("Enumerated {} functions and {} labels", n_funcs, n_labels);
	}

	pub fn label_for(&self, address: u32) -> Option<&str> {
		self.names.get(&address).map(|s| &s[..])
	}
	pub fn is_function(&self, address: u32) -> bool {
		self.word_offset(address).map_or(false, |w| self.calls.contains(w))
	}

	/// Print the reference list and label definition for `address`, if it is a target
	pub fn emit(&self, address: u32, pseudocode: bool, out: &mut dyn Write) -> ::std::fmt::Result
	{
		let name = match self.label_for(address)
			{
			Some(n) => n,
			None => return Ok( () ),
			};
		let is_function = self.is_function(address);
		if is_function {
			if pseudocode {
				write!(out, "}}\n")?;
			}
			write!(out, "\n")?;
		}
		if let Some(refs) = self.references.get(&address)
		{
			for r in refs {
				write!(out, "; Referenced from 0x{:04x} by {}\n", r.from, r.mnemonic.name())?;
			}
		}
		if is_function && pseudocode {
			write!(out, "void {}(void) {{\n", name)
		}
		else {
			write!(out, "{}:\n", name)
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	/// Table over `length` bytes at 0 with an instruction at every word
	fn table(length: u32) -> LabelTable
	{
		let mut t = LabelTable::new(0, length);
		for a in (0 .. length).step_by(2) {
			t.mark_instruction(a);
		}
		t
	}

	#[test]
	fn names_are_ordered_by_address()
	{
		let mut t = table(0x100);
		t.record_reference(RefKind::Jump, 0x10, 0x40, Mnemonic::Rjmp);
		t.record_reference(RefKind::Call, 0x12, 0x80, Mnemonic::Rcall);
		t.record_reference(RefKind::Branch, 0x14, 0x20, Mnemonic::Breq);
		t.record_reference(RefKind::Call, 0x16, 0x60, Mnemonic::Call);
		t.finalize();
		assert_eq!(t.label_for(0x20), Some("Label1"));
		assert_eq!(t.label_for(0x40), Some("Label2"));
		assert_eq!(t.label_for(0x60), Some("Function1"));
		assert_eq!(t.label_for(0x80), Some("Function2"));
		assert_eq!(t.label_for(0x22), None);
	}

	#[test]
	fn called_and_jumped_is_a_function()
	{
		let mut t = table(0x100);
		t.record_reference(RefKind::Jump, 0x10, 0x40, Mnemonic::Rjmp);
		t.record_reference(RefKind::Call, 0x12, 0x40, Mnemonic::Rcall);
		t.finalize();
		assert_eq!(t.label_for(0x40), Some("Function1"));
	}

	#[test]
	fn no_names_before_finalize()
	{
		let mut t = table(0x100);
		t.record_reference(RefKind::Jump, 0x10, 0x40, Mnemonic::Rjmp);
		assert_eq!(t.label_for(0x40), None);
	}

	#[test]
	fn odd_targets_are_ignored()
	{
		let mut t = table(0x100);
		t.record_reference(RefKind::Jump, 0x10, 0x41, Mnemonic::Rjmp);
		t.finalize();
		assert_eq!(t.label_for(0x40), None);
		assert_eq!(t.label_for(0x41), None);
	}

	#[test]
	fn targets_outside_the_image_are_ignored()
	{
		let mut t = LabelTable::new(0x100, 0x10);
		for a in (0x100 .. 0x110).step_by(2) {
			t.mark_instruction(a);
		}
		// Wrapped backward branch from the first word
		t.record_reference(RefKind::Jump, 0x100, 0xFFFF_FFFE, Mnemonic::Rjmp);
		t.record_reference(RefKind::Jump, 0x100, 0xFE, Mnemonic::Rjmp);
		t.record_reference(RefKind::Jump, 0x100, 0x110, Mnemonic::Rjmp);
		t.record_reference(RefKind::Jump, 0x100, 0x10E, Mnemonic::Rjmp);
		t.finalize();
		assert_eq!(t.label_for(0xFFFF_FFFE), None);
		assert_eq!(t.label_for(0xFE), None);
		assert_eq!(t.label_for(0x110), None);
		assert_eq!(t.label_for(0x10E), Some("Label1"));
	}

	#[test]
	fn targets_inside_an_instruction_are_dropped()
	{
		let mut t = LabelTable::new(0, 8);
		// A 4-byte instruction at 0, then words at 4 and 6
		t.mark_instruction(0);
		t.mark_instruction(4);
		t.mark_instruction(6);
		t.record_reference(RefKind::Jump, 6, 2, Mnemonic::Rjmp);
		t.record_reference(RefKind::Call, 6, 4, Mnemonic::Rcall);
		t.finalize();
		assert_eq!(t.label_for(2), None);
		assert_eq!(t.label_for(4), Some("Function1"));
		let mut s = String::new();
		t.emit(2, false, &mut s).unwrap();
		assert!(s.is_empty());
	}

	#[test]
	fn emitted_definitions()
	{
		let mut t = table(0x100);
		t.record_reference(RefKind::Branch, 0x10, 0x20, Mnemonic::Brne);
		t.record_reference(RefKind::Call, 0x12, 0x40, Mnemonic::Rcall);
		t.finalize();

		let mut s = String::new();
		t.emit(0x20, false, &mut s).unwrap();
		assert_eq!(s, "; Referenced from 0x0010 by brne\nLabel1:\n");

		let mut s = String::new();
		t.emit(0x40, false, &mut s).unwrap();
		assert_eq!(s, "\n; Referenced from 0x0012 by rcall\nFunction1:\n");

		let mut s = String::new();
		t.emit(0x40, true, &mut s).unwrap();
		assert_eq!(s, "}\n\n; Referenced from 0x0012 by rcall\nvoid Function1(void) {\n");

		let mut s = String::new();
		t.emit(0x30, false, &mut s).unwrap();
		assert!(s.is_empty());
	}
}

// vim: ft=rust
