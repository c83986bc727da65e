// avrdis
// - By John Hodge (thePowersGang)
//
// disasm/instruction.rs
// - View of a single matched instruction, handed to render handlers
use super::opcodes::Mnemonic;
use super::pattern::Fields;

pub struct Instr<'a>
{
	pub mnemonic: Mnemonic,
	/// Address of the first byte (base address + image offset)
	pub address: u32,
	/// The matched encoding, as stored in the image
	pub bytes: &'a [u8],
	fields: &'a Fields,
}

impl<'a> Instr<'a>
{
	pub fn new(mnemonic: Mnemonic, address: u32, bytes: &'a [u8], fields: &'a Fields) -> Instr<'a>
	{
		Instr {
			mnemonic: mnemonic,
			address: address,
			bytes: bytes,
			fields: fields,
		}
	}

	/// Raw value of an operand field
	pub fn field(&self, name: u8) -> u32 {
		self.fields.get(name)
	}
	/// Operand field interpreted as a `bits`-wide two's complement value
	pub fn signed_field(&self, name: u8, bits: u32) -> i32 {
		sign_extend(self.fields.get(name), bits)
	}

	pub fn next_address(&self) -> u32 {
		self.address.wrapping_add(self.bytes.len() as u32)
	}
	/// Destination of a PC-relative transfer of `words` instruction words
	pub fn relative_target(&self, words: i32) -> u32 {
		self.next_address().wrapping_add((words * 2) as u32)
	}
}

pub fn sign_extend(value: u32, bits: u32) -> i32
{
	let shift = 32 - bits;
	((value << shift) as i32) >> shift
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn sign_extension()
	{
		assert_eq!(sign_extend(0x7F, 7), -1);
		assert_eq!(sign_extend(0x3F, 7), 63);
		assert_eq!(sign_extend(0x800, 12), -2048);
		assert_eq!(sign_extend(0x7FF, 12), 2047);
	}

	#[test]
	fn relative_targets()
	{
		let f = Fields::new();
		let bytes = [0xFF, 0xCF];
		let i = Instr::new(Mnemonic::Rjmp, 0x100, &bytes, &f);
		assert_eq!(i.next_address(), 0x102);
		assert_eq!(i.relative_target(-1), 0x100);
		assert_eq!(i.relative_target(3), 0x108);
	}
}

// vim: ft=rust
