//
//
//
use bit_set::BitSet;
use std::fmt::Write;

/// Offset of the I/O space within the data address space
pub const DATA_OFFSET: u32 = 0x20;

/// I/O register names for the classic ATmega I/O space (ATmega48/88/168/328 layout)
static IO_NAMES: &[(u32, &str)] = &[
	(0x03, "PINB"), (0x04, "DDRB"), (0x05, "PORTB"),
	(0x06, "PINC"), (0x07, "DDRC"), (0x08, "PORTC"),
	(0x09, "PIND"), (0x0A, "DDRD"), (0x0B, "PORTD"),
	(0x15, "TIFR0"), (0x16, "TIFR1"), (0x17, "TIFR2"),
	(0x1B, "PCIFR"), (0x1C, "EIFR"), (0x1D, "EIMSK"),
	(0x1E, "GPIOR0"), (0x1F, "EECR"), (0x20, "EEDR"),
	(0x21, "EEARL"), (0x22, "EEARH"), (0x23, "GTCCR"),
	(0x24, "TCCR0A"), (0x25, "TCCR0B"), (0x26, "TCNT0"),
	(0x27, "OCR0A"), (0x28, "OCR0B"),
	(0x2A, "GPIOR1"), (0x2B, "GPIOR2"),
	(0x2C, "SPCR"), (0x2D, "SPSR"), (0x2E, "SPDR"),
	(0x30, "ACSR"), (0x33, "SMCR"), (0x34, "MCUSR"), (0x35, "MCUCR"),
	(0x37, "SPMCSR"),
	(0x3D, "SPL"), (0x3E, "SPH"), (0x3F, "SREG"),
];

/// Name of the I/O register at `io` (I/O space address)
pub fn io_name(io: u32) -> Option<&'static str>
{
	IO_NAMES.binary_search_by(|&(a, _)| a.cmp(&io)).ok().map(|i| IO_NAMES[i].1)
}

/// Name of the I/O register mapped at data space address `addr`
pub fn data_name(addr: u32) -> Option<&'static str>
{
	if addr >= DATA_OFFSET && addr < DATA_OFFSET + 0x40 {
		io_name(addr - DATA_OFFSET)
	}
	else {
		None
	}
}

/// Set of I/O registers referenced by name in the output
#[derive(Default)]
pub struct RegisterUsage
{
	used: BitSet,
}

impl RegisterUsage
{
	pub fn new() -> RegisterUsage {
		Default::default()
	}
	pub fn mark(&mut self, io: u32) {
		self.used.insert(io as usize);
	}
	pub fn is_used(&self, io: u32) -> bool {
		self.used.contains(io as usize)
	}

	/// Define every used, named register (avr-gcc has no device include for plain names)
	pub fn emit(&self, out: &mut dyn Write) -> ::std::fmt::Result
	{
		let mut any = false;
		for io in self.used.iter()
		{
			if let Some(name) = io_name(io as u32)
			{
				write!(out, ".equ {}, 0x{:02x}\n", name, io)?;
				any = true;
			}
		}
		if any {
			write!(out, "\n")?;
		}
		Ok( () )
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn name_table_is_sorted()
	{
		assert!(IO_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
	}

	#[test]
	fn lookups()
	{
		assert_eq!(io_name(0x05), Some("PORTB"));
		assert_eq!(io_name(0x3F), Some("SREG"));
		assert_eq!(io_name(0x01), None);
		assert_eq!(data_name(0x25), Some("PORTB"));
		assert_eq!(data_name(0x05), None);
		assert_eq!(data_name(0x100), None);
	}

	#[test]
	fn preamble_lists_used_registers_in_order()
	{
		let mut u = RegisterUsage::new();
		u.mark(0x3F);
		u.mark(0x05);
		u.mark(0x01);
		let mut s = String::new();
		u.emit(&mut s).unwrap();
		assert_eq!(s, ".equ PORTB, 0x05\n.equ SREG, 0x3f\n\n");
	}

	#[test]
	fn empty_preamble()
	{
		let mut s = String::new();
		RegisterUsage::new().emit(&mut s).unwrap();
		assert!(s.is_empty());
	}
}

// vim: ft=rust
