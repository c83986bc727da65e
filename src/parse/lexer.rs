// avrdis
// - By John Hodge (thePowersGang)
//
// parse/lexer.rs
// - Line-oriented lexer used for the tag file
use std::iter::Peekable;
use std::str::Chars;
use crate::error::Result;

pub use self::Token::*;

#[derive(Debug,PartialEq)]
pub enum Token
{
	TokEof,
	TokNewline,
	TokInteger(u64),
	TokIdent(String),
	TokLineComment(String),
}

/// Core lexer type
pub struct Lexer<'r>
{
	instream: Peekable<Chars<'r>>,
	/// Line the cursor is on (1-based)
	line: usize,
	/// Line of the most recently returned token
	tok_line: usize,
}

impl<'a> Lexer<'a>
{
	pub fn new(text: &'a str) -> Lexer<'a> {
		Lexer {
			instream: text.chars().peekable(),
			line: 1,
			tok_line: 1,
		}
	}

	/// Line number of the last token returned by `get_token`
	pub fn line(&self) -> usize {
		self.tok_line
	}

	/// Next significant token, comments are skipped
	pub fn get_token(&mut self) -> Result<Token>
	{
		loop
		{
			match self.gettoken_int()?
			{
			TokLineComment(_) => continue,
			tok @ _ => return Ok(tok),
			}
		}
	}

	fn getc(&mut self) -> char {
		self.instream.next().unwrap_or('\0')
	}
	fn peekc(&mut self) -> char {
		self.instream.peek().cloned().unwrap_or('\0')
	}

	// Read and return the rest of the line, leaving the newline
	fn read_to_eol(&mut self) -> String
	{
		let mut ret = String::new();
		while self.peekc() != '\n' && self.peekc() != '\0' {
			ret.push( self.getc() );
		}
		ret
	}
	// Read and return a sequence of "identifier" characters
	fn read_ident(&mut self) -> String
	{
		let mut name = String::new();
		while self.peekc().is_ascii_alphanumeric() || self.peekc() == '_' {
			name.push( self.getc() );
		}
		name
	}
	// Read the remaining digits of an integer, `val` and `digits` cover those already consumed
	fn read_number(&mut self, base: u32, mut val: u64, mut digits: usize) -> Result<u64>
	{
		while let Some(d) = self.peekc().to_digit(base)
		{
			self.getc();
			digits += 1;
			val = val.checked_mul(base as u64).and_then(|v| v.checked_add(d as u64))
				.ok_or_else(|| tagfile_error!(self.line, "Integer too large"))?;
		}
		if digits == 0 {
			return Err( tagfile_error!(self.line, "Missing digits after radix prefix") );
		}
		if self.peekc().is_ascii_alphanumeric() {
			return Err( tagfile_error!(self.line, "Bad digit '{}' in integer", self.peekc()) );
		}
		Ok(val)
	}

	fn gettoken_int(&mut self) -> Result<Token>
	{
		while self.peekc() != '\n' && self.peekc().is_whitespace() {
			self.getc();
		}
		self.tok_line = self.line;

		let ch = self.getc();
		let ret = match ch
			{
			'\0' => TokEof,
			'\n' => {
				self.line += 1;
				TokNewline
				},
			'#' | ';' => TokLineComment( self.read_to_eol() ),
			'0' => TokInteger( match self.peekc()
				{
				'x' | 'X' => {
					self.getc();
					self.read_number(16, 0, 0)?
					},
				_ => self.read_number(10, 0, 1)?,
				}),
			'1' ..= '9' => TokInteger( self.read_number(10, ch as u64 - '0' as u64, 1)? ),
			'a' ..= 'z' | 'A' ..= 'Z' | '_' => {
				let mut ident = ch.to_string();
				ident.push_str( &self.read_ident() );
				TokIdent( ident )
				},
			_ => {
				return Err( tagfile_error!(self.line, "Bad character #{} '{}'", ch as u32, ch.escape_default()) );
				},
			};

		trace!("Token = {:?}", ret);
		Ok( ret )
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::error::Error;

	fn tokens(text: &str) -> Vec<Token>
	{
		let mut lex = Lexer::new(text);
		let mut ret = Vec::new();
		loop
		{
			match lex.get_token().unwrap()
			{
			TokEof => break,
			tok => ret.push(tok),
			}
		}
		ret
	}

	#[test]
	fn integers()
	{
		assert_eq!(tokens("0 7 0x1F 100 0123"), vec![TokInteger(0), TokInteger(7), TokInteger(0x1F), TokInteger(100), TokInteger(123)]);
	}

	#[test]
	fn comments_and_lines()
	{
		let t = tokens("# header\n0x10 W 4 ; words\n\n");
		assert_eq!(t, vec![TokNewline, TokInteger(0x10), TokIdent("W".to_string()), TokInteger(4), TokNewline, TokNewline]);
	}

	#[test]
	fn line_numbers()
	{
		let mut lex = Lexer::new("1\n\n  2");
		lex.get_token().unwrap();
		assert_eq!(lex.line(), 1);
		lex.get_token().unwrap();
		lex.get_token().unwrap();
		assert_eq!(lex.get_token().unwrap(), TokInteger(2));
		assert_eq!(lex.line(), 3);
	}

	#[test]
	fn bad_input()
	{
		let mut lex = Lexer::new("\n0x");
		lex.get_token().unwrap();
		match lex.get_token()
		{
		Err(Error::TagFile { line, .. }) => assert_eq!(line, 2),
		r => panic!("unexpected {:?}", r),
		}
		assert!(Lexer::new("12ab").get_token().is_err());
		assert!(Lexer::new("$").get_token().is_err());
	}
}

// vim: ft=rust
