// avrdis
// - By John Hodge (thePowersGang)
//
// parse/mod.rs
// - Tag file parsing, marks image ranges as data
use std::collections::BTreeMap;
use std::fmt;
use crate::disasm::DataTags;
use crate::error::Result;

mod lexer;

macro_rules! expect_token{
	($lex:expr, $pat:pat => $val:expr, $name:expr) => (match $lex.get_token()? {
		$pat => $val,
		tok @ _ => return Err( tagfile_error!($lex.line(), "Unexpected {:?}, expected {}", tok, $name) ),
		});
}

/// How a tagged range is rendered
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum DataKind
{
	/// `.byte`, eight per line
	Bytes,
	/// `.word`, little endian, four per line
	Words,
	/// `.ascii` string
	Ascii,
}

impl DataKind
{
	fn from_name(name: &str) -> Option<DataKind>
	{
		match name
		{
		"B" | "b" => Some(DataKind::Bytes),
		"W" | "w" => Some(DataKind::Words),
		"A" | "a" => Some(DataKind::Ascii),
		_ => None,
		}
	}
}

#[derive(Debug)]
struct DataRange
{
	kind: DataKind,
	length: usize,
}

/// Data ranges read from a tag file, keyed by image offset
#[derive(Default)]
pub struct TagFile
{
	ranges: BTreeMap<usize, DataRange>,
}

impl TagFile
{
	pub fn load(path: &str) -> Result<TagFile>
	{
		let text = ::std::fs::read_to_string(path)?;
		let ret = TagFile::parse(&text)?;
		info!("Loaded {} data ranges from '{}'", ret.ranges.len(), path);
		Ok(ret)
	}

	/// Parse tag file text, one `OFFSET KIND COUNT` entry per line
	pub fn parse(text: &str) -> Result<TagFile>
	{
		let mut ret = TagFile::default();
		let mut lex = lexer::Lexer::new(text);
		loop
		{
			let offset = match lex.get_token()?
				{
				lexer::TokEof => break,
				lexer::TokNewline => continue,
				lexer::TokInteger(v) => v as usize,
				tok @ _ => return Err( tagfile_error!(lex.line(), "Unexpected {:?}, expected offset", tok) ),
				};
			let line = lex.line();
			let kind_name = expect_token!(lex, lexer::TokIdent(s) => s, "data kind");
			let kind = DataKind::from_name(&kind_name)
				.ok_or_else(|| tagfile_error!(line, "Unknown data kind '{}'", kind_name))?;
			let length = expect_token!(lex, lexer::TokInteger(v) => v as usize, "byte count");
			expect_token!(lex, lexer::TokNewline | lexer::TokEof => (), "end of line");

			if offset.checked_add(length).is_none() {
				return Err( tagfile_error!(line, "Range {:#x}+{:#x} overflows", offset, length) );
			}
			if length == 0 {
				warn!("Tag file line {}: empty range at {:#x} ignored", line, offset);
				continue ;
			}
			debug!("Data {:?} {:#x}+{:#x}", kind, offset, length);
			if ret.ranges.insert(offset, DataRange { kind: kind, length: length }).is_some() {
				warn!("Tag file line {}: range at {:#x} redefined", line, offset);
			}
		}
		Ok(ret)
	}

	/// Range covering `position`, with the bytes remaining in it
	fn range_at(&self, position: usize) -> Option<(&DataRange, usize)>
	{
		let (&start, range) = self.ranges.range(..= position).next_back()?;
		let end = start + range.length;
		if position < end {
			Some( (range, end - position) )
		}
		else {
			None
		}
	}
}

fn write_list<T: fmt::Display>(out: &mut dyn fmt::Write, directive: &str, items: impl Iterator<Item=T>) -> fmt::Result
{
	write!(out, "{} ", directive)?;
	for (i, v) in items.enumerate()
	{
		if i > 0 {
			write!(out, ", ")?;
		}
		write!(out, "{}", v)?;
	}
	write!(out, "\n")
}

fn write_ascii(out: &mut dyn fmt::Write, data: &[u8]) -> fmt::Result
{
	write!(out, ".ascii \"")?;
	for &b in data
	{
		match b
		{
		b'"' => write!(out, "\\\"")?,
		b'\\' => write!(out, "\\\\")?,
		b'\n' => write!(out, "\\n")?,
		b'\r' => write!(out, "\\r")?,
		b'\t' => write!(out, "\\t")?,
		0x20 ..= 0x7E => write!(out, "{}", b as char)?,
		_ => write!(out, "\\{:03o}", b)?,
		}
	}
	write!(out, "\"\n")
}

impl DataTags for TagFile
{
	fn data_at(&self, image: &[u8], position: usize, out: &mut dyn fmt::Write) -> ::std::result::Result<usize, fmt::Error>
	{
		let (range, remaining) = match self.range_at(position)
			{
			Some(v) => v,
			None => return Ok(0),
			};
		let end = ::std::cmp::min(position + remaining, image.len());
		let data = &image[position .. end];
		match range.kind
		{
		DataKind::Bytes => {
			for chunk in data.chunks(8) {
				write_list(out, ".byte", chunk.iter().map(|b| format!("0x{:02x}", b)))?;
			}
			},
		DataKind::Words => {
			for chunk in data.chunks(8)
			{
				let words = chunk.chunks_exact(2);
				let odd = words.remainder();
				if !odd.is_empty() && chunk.len() == 1 {
					write_list(out, ".byte", odd.iter().map(|b| format!("0x{:02x}", b)))?;
					continue ;
				}
				write_list(out, ".word", words.map(|w| format!("0x{:04x}", u16::from_le_bytes([w[0], w[1]]))))?;
				if !odd.is_empty() {
					write_list(out, ".byte", odd.iter().map(|b| format!("0x{:02x}", b)))?;
				}
			}
			},
		DataKind::Ascii => write_ascii(out, data)?,
		}
		Ok(data.len())
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::disasm::decode;
	use crate::error::Error;
	use crate::options::Options;

	fn render(tags: &TagFile, image: &[u8], position: usize) -> (usize, String)
	{
		let mut s = String::new();
		let n = tags.data_at(image, position, &mut s).unwrap();
		(n, s)
	}

	fn line_of(r: Result<TagFile>) -> usize
	{
		match r
		{
		Err(Error::TagFile { line, .. }) => line,
		Err(e) => panic!("unexpected error {}", e),
		Ok(_) => panic!("parse succeeded"),
		}
	}

	#[test]
	fn parse_entries()
	{
		let t = TagFile::parse("# data ranges\n0x10 B 3\n\n32 W 8 ; table\n0x40 A 5").unwrap();
		assert_eq!(t.ranges.len(), 3);
		assert_eq!(t.ranges[&0x10].kind, DataKind::Bytes);
		assert_eq!(t.ranges[&32].length, 8);
		assert_eq!(t.ranges[&0x40].kind, DataKind::Ascii);
		assert!(TagFile::parse("").unwrap().ranges.is_empty());
	}

	#[test]
	fn parse_errors_carry_line()
	{
		assert_eq!(line_of(TagFile::parse("0 B 1\n0x10 Q 4\n")), 2);
		assert_eq!(line_of(TagFile::parse("0 B 1\n\n0x10 B\n")), 3);
		assert_eq!(line_of(TagFile::parse("B 0 1\n")), 1);
		assert_eq!(line_of(TagFile::parse("0 B 1 2\n")), 1);
	}

	#[test]
	fn overflowing_range_is_rejected()
	{
		assert_eq!(line_of(TagFile::parse("0 B 1\n0x10 B 0xFFFFFFFFFFFFFFFF\n")), 2);
		assert_eq!(line_of(TagFile::parse(&format!("{} W 1", usize::MAX))), 1);
		let t = TagFile::parse(&format!("{} B 1", usize::MAX - 1)).unwrap();
		assert_eq!(render(&t, &[0, 0], 0).0, 0);
	}

	#[test]
	fn untagged_positions()
	{
		let t = TagFile::parse("2 B 2").unwrap();
		let image = [0u8; 8];
		assert_eq!(render(&t, &image, 0).0, 0);
		assert_eq!(render(&t, &image, 4).0, 0);
	}

	#[test]
	fn bytes()
	{
		let t = TagFile::parse("0 B 10").unwrap();
		let image: Vec<u8> = (1 ..= 10).collect();
		let (n, s) = render(&t, &image, 0);
		assert_eq!(n, 10);
		assert_eq!(s, ".byte 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08\n.byte 0x09, 0x0a\n");
	}

	#[test]
	fn words()
	{
		let t = TagFile::parse("0 W 11").unwrap();
		let image: Vec<u8> = (0 .. 11).collect();
		let (n, s) = render(&t, &image, 0);
		assert_eq!(n, 11);
		assert_eq!(s, ".word 0x0100, 0x0302, 0x0504, 0x0706\n.word 0x0908\n.byte 0x0a\n");
	}

	#[test]
	fn ascii()
	{
		let t = TagFile::parse("0 A 6").unwrap();
		let (n, s) = render(&t, b"Hi \"x\"\x01", 0);
		assert_eq!(n, 6);
		assert_eq!(s, ".ascii \"Hi \\\"x\\\"\"\n");
	}

	#[test]
	fn clamped_to_image()
	{
		let t = TagFile::parse("4 B 100").unwrap();
		let (n, s) = render(&t, &[0, 0, 0, 0, 0xAA, 0xBB], 4);
		assert_eq!(n, 2);
		assert_eq!(s, ".byte 0xaa, 0xbb\n");
	}

	#[test]
	fn range_entered_midway()
	{
		let t = TagFile::parse("2 B 4").unwrap();
		let (n, s) = render(&t, &[0, 0, 1, 2, 3, 4], 4);
		assert_eq!(n, 2);
		assert_eq!(s, ".byte 0x03, 0x04\n");
	}

	#[test]
	fn driver_skips_tagged_bytes()
	{
		let t = TagFile::parse("2 W 4").unwrap();
		let image = [0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00];
		let mut s = String::new();
		decode(&image, 0, &Options::default(), &t, &mut s).unwrap();
		assert_eq!(s, "nop\n.word 0xffff, 0xffff\nnop\n");
	}
}

// vim: ft=rust
