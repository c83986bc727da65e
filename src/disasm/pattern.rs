// avrdis
// - By John Hodge (thePowersGang)
//
// disasm/pattern.rs
// - Instruction bit patterns and the matcher
//
// A pattern is written most-significant bit first, one character per bit:
// '0'/'1' are literal, 'x' is ignored, any other letter names an operand field.
// Whitespace is only for readability.

/// Operand field values accumulated by a successful match, indexed by field character
pub struct Fields([u32; 256]);

impl Fields
{
	pub fn new() -> Fields {
		Fields([0; 256])
	}
	pub fn clear(&mut self) {
		self.0 = [0; 256];
	}
	/// Value of the named field (zero if the pattern has no such field)
	pub fn get(&self, name: u8) -> u32 {
		self.0[name as usize]
	}
	fn push_bit(&mut self, name: u8, bit: u8) {
		let slot = &mut self.0[name as usize];
		*slot = (*slot << 1) | bit as u32;
	}
}

impl Default for Fields
{
	fn default() -> Fields {
		Fields::new()
	}
}

/// Extract one bit from a byte stream (bit 0 is the MSB of the byte)
pub fn bit_at(bytes: &[u8], byte: usize, bit: usize) -> u8
{
	(bytes[byte] >> (7 - bit)) & 1
}

pub struct Pattern
{
	text: &'static str,
	// Significant characters only
	bits: Vec<u8>,
}

impl Pattern
{
	pub fn new(text: &'static str) -> Pattern
	{
		let bits: Vec<u8> = text.bytes().filter(|c| !c.is_ascii_whitespace()).collect();
		if bits.len() % 8 != 0 {
			error!("Pattern \"{}\" has {} significant bits, not a whole number of bytes", text, bits.len());
		}
		Pattern {
			text: text,
			bits: bits,
		}
	}

	pub fn text(&self) -> &'static str { self.text }
	/// Number of stream bytes an instruction with this encoding occupies
	pub fn byte_len(&self) -> usize { self.bits.len() / 8 }
	/// Whether the significant bits fill a whole number of bytes
	pub fn is_whole_bytes(&self) -> bool { !self.bits.is_empty() && self.bits.len() % 8 == 0 }

	/// Count of literal bits, used to rank overlapping encodings
	pub fn specificity(&self) -> usize
	{
		self.bits.iter().filter(|&&c| c == b'0' || c == b'1').count()
	}

	/// Test the pattern against the start of `window`.
	///
	/// On success `fields` holds the operand values. On failure its contents are
	/// meaningless.
	pub fn matches(&self, window: &[u8], fields: &mut Fields) -> bool
	{
		fields.clear();
		if window.len() < self.byte_len() {
			return false;
		}
		for (i, &c) in self.bits.iter().enumerate()
		{
			// Words are little-endian in the stream, the pattern is written high byte first
			let bit = bit_at(window, (i / 8) ^ 1, i % 8);
			match c
			{
			b'0' | b'1' => {
				if bit != c - b'0' {
					return false;
				}
				},
			b'x' => {},
			c if c.is_ascii_alphabetic() => fields.push_bit(c, bit),
			_ => {
				error!("Invalid character {:?} in pattern \"{}\"", c as char, self.text);
				return false;
				},
			}
		}
		true
	}
}

impl ::std::fmt::Debug for Pattern
{
	fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result
	{
		write!(f, "\"{}\"", self.text)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn bit_extraction_is_msb_first()
	{
		let bytes = [0b1000_0001, 0b0100_0000];
		assert_eq!(bit_at(&bytes, 0, 0), 1);
		assert_eq!(bit_at(&bytes, 0, 1), 0);
		assert_eq!(bit_at(&bytes, 0, 7), 1);
		assert_eq!(bit_at(&bytes, 1, 1), 1);
	}

	#[test]
	fn all_zero_word()
	{
		let p = Pattern::new("0000 0000 0000 0000");
		let mut f = Fields::new();
		assert!(p.matches(&[0x00, 0x00], &mut f));
		assert!((0..256).all(|i| f.get(i as u8) == 0));
	}

	#[test]
	fn two_register_fields()
	{
		// adc r13, r1 = 0x1CD1, little-endian
		let p = Pattern::new("0001 11rd  dddd rrrr");
		let mut f = Fields::new();
		assert!(p.matches(&[0b1101_0001, 0b0001_1100], &mut f));
		assert_eq!(f.get(b'd'), 13);
		assert_eq!(f.get(b'r'), 1);
	}

	#[test]
	fn split_fields_reassemble_in_pattern_order()
	{
		// ldi r20, 0xA5 = 0xEA45
		let p = Pattern::new("1110 KKKK  dddd KKKK");
		let mut f = Fields::new();
		assert!(p.matches(&[0x45, 0xEA], &mut f));
		assert_eq!(f.get(b'K'), 0xA5);
		assert_eq!(f.get(b'd'), 4);
	}

	#[test]
	fn literal_mismatch_fails()
	{
		let p = Pattern::new("0000 0000 0000 0000");
		let mut f = Fields::new();
		assert!(!p.matches(&[0x01, 0x00], &mut f));
		assert!(!p.matches(&[0x00, 0x80], &mut f));
	}

	#[test]
	fn field_bits_never_affect_result()
	{
		let p = Pattern::new("1100 kkkk  kkkk kkkk");
		let mut f = Fields::new();
		for k in 0..0x1000u16 {
			let word = 0xC000 | k;
			assert!(p.matches(&word.to_le_bytes(), &mut f));
			assert_eq!(f.get(b'k'), k as u32);
		}
		assert!(!p.matches(&0xD000u16.to_le_bytes(), &mut f));
	}

	#[test]
	fn wildcard_is_ignored()
	{
		let p = Pattern::new("1001 0101  xxxx 1000");
		let mut f = Fields::new();
		assert!(p.matches(&[0x08, 0x95], &mut f));
		assert!(p.matches(&[0xF8, 0x95], &mut f));
		assert_eq!(f.get(b'x'), 0);
	}

	#[test]
	fn long_form_reads_second_word()
	{
		// call 0x1234 (word address 0x091A)
		let p = Pattern::new("1001 010k  kkkk 111k    kkkk kkkk  kkkk kkkk");
		let mut f = Fields::new();
		assert!(p.matches(&[0x0E, 0x94, 0x1A, 0x09], &mut f));
		assert_eq!(f.get(b'k'), 0x091A);
		assert_eq!(p.byte_len(), 4);
	}

	#[test]
	fn short_window_does_not_match()
	{
		let p = Pattern::new("1001 010k  kkkk 111k    kkkk kkkk  kkkk kkkk");
		let mut f = Fields::new();
		assert!(!p.matches(&[0x0E, 0x94], &mut f));
		assert!(!Pattern::new("0000 0000 0000 0000").matches(&[0x00], &mut f));
	}

	#[test]
	fn invalid_character_is_a_non_match()
	{
		let p = Pattern::new("0000 0000 0000 000?");
		let mut f = Fields::new();
		assert!(!p.matches(&[0x00, 0x00], &mut f));
	}

	#[test]
	fn specificity_counts_literals()
	{
		assert_eq!(Pattern::new("0000 0000 0000 0000").specificity(), 16);
		assert_eq!(Pattern::new("0001 11rd  dddd rrrr").specificity(), 6);
		assert_eq!(Pattern::new("1001 0101  xxxx 1000").specificity(), 12);
		assert_eq!(Pattern::new("1001 000d  dddd 0000    kkkk kkkk  kkkk kkkk").specificity(), 11);
	}

	#[test]
	fn whole_bytes()
	{
		assert!(Pattern::new("0000 0000 0000 0000").is_whole_bytes());
		assert!(Pattern::new("1001 010k  kkkk 110k    kkkk kkkk  kkkk kkkk").is_whole_bytes());
		assert!(!Pattern::new("0000 0000 0000").is_whole_bytes());
		assert!(!Pattern::new("").is_whole_bytes());
	}
}

// vim: ft=rust
