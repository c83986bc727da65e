//
//
//
use std::io::Write;

#[macro_use] extern crate log;
extern crate env_logger;
extern crate getopts;
extern crate bit_set;

#[macro_use] mod error;	// Error type (and tag file error macro)
mod options;	// Display options
mod ioregs;	// I/O register names and usage
mod labels;	// Jump/call targets
mod disasm;	// Disassembler
mod render;	// Assembly and pseudocode renderers
mod parse;	// Tag file parsing

use error::Result;

fn main()
{
	env_logger::init();
	let str_args: Vec<_> = ::std::env::args().collect();
	match run(&str_args)
	{
	Ok( () ) => {},
	Err(e) => {
		error!("{}", e);
		::std::process::exit(1);
		},
	}
}

fn usage(program: &str, opts: &getopts::Options) -> String
{
	opts.usage(&format!("Usage: {} [options] IMAGE", program))
}

/// Parse a decimal or `0x` prefixed address
fn parse_address(s: &str) -> Option<u32>
{
	match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))
	{
	Some(hex) => u32::from_str_radix(hex, 16).ok(),
	None => s.parse().ok(),
	}
}

fn run(str_args: &[String]) -> Result<()>
{
	let program = str_args.first().map(|s| &s[..]).unwrap_or("avrdis");
	// - Parse arguments
	let mut opts = getopts::Options::new();
	opts.optflag("a", "addresses", "Show addresses");
	opts.optflag("o", "opcodes", "Show raw opcode bytes");
	opts.optflag("y", "cycles", "Show cycle costs");
	opts.optflag("c", "comments", "Show comments");
	opts.optflag("p", "pseudo", "Render pseudocode instead of assembly");
	opts.optflag("l", "labels", "Name jump and call targets");
	opts.optopt("s", "style", "Code style (avrasm, avr-gcc)", "STYLE");
	opts.optopt("t", "tagfile", "Tag file marking data ranges", "FILE");
	opts.optopt("b", "base", "Load address of the image", "ADDR");
	opts.optflag("h", "help", "Show this help");
	let args = match opts.parse(str_args.get(1..).unwrap_or(&[]))
		{
		Ok(v) => v,
		Err(reason) => {
			eprintln!("{}", usage(program, &opts));
			return Err( error::Error::Usage(reason.to_string()) );
			},
		};
	if args.opt_present("help") {
		println!("{}", usage(program, &opts));
		return Ok( () );
	}

	let style = match args.opt_str("style")
		{
		None => options::CodeStyle::AvrAsm,
		Some(name) => match options::CodeStyle::from_name(&name)
			{
			Some(s) => s,
			None => return Err( error::Error::Usage(format!("Unknown code style '{}'", name)) ),
			},
		};
	let base = match args.opt_str("base")
		{
		None => 0,
		Some(s) => match parse_address(&s)
			{
			Some(v) => v,
			None => return Err( error::Error::Usage(format!("Bad base address '{}'", s)) ),
			},
		};
	let options = options::Options {
		show_addresses: args.opt_present("addresses"),
		show_opcodes: args.opt_present("opcodes"),
		show_cycles: args.opt_present("cycles"),
		show_comments: args.opt_present("comments"),
		pseudocode: args.opt_present("pseudo"),
		process_labels: args.opt_present("labels"),
		style: style,
		};
	let path = match &args.free[..]
		{
		[path] => path,
		_ => {
			eprintln!("{}", usage(program, &opts));
			return Err( error::Error::Usage("Expected exactly one image file".to_string()) );
			},
		};

	// ------------------------------------------------------------
	// Load inputs
	// ------------------------------------------------------------
	let image = ::std::fs::read(path)?;
	info!("Read {} bytes from '{}'", image.len(), path);
	let tags: Box<dyn disasm::DataTags> = match args.opt_str("tagfile")
		{
		Some(tagpath) => Box::new( parse::TagFile::load(&tagpath)? ),
		None => Box::new( disasm::NoTags ),
		};

	// ------------------------------------------------------------
	// Run disassembler
	// ------------------------------------------------------------
	let stdout = ::std::io::stdout();
	let mut out = WriterWrapper(::std::io::BufWriter::new(stdout.lock()));
	disasm::decode(&image, base, &options, &*tags, &mut out)?;
	out.0.flush()?;
	Ok( () )
}

struct WriterWrapper<T: ::std::io::Write>(T);

impl<T: ::std::io::Write> ::std::fmt::Write for WriterWrapper<T>
{
	fn write_str(&mut self, bytes: &str) -> ::std::fmt::Result
	{
		match self.0.write_all(bytes.as_bytes())
		{
		Ok(_) => Ok( () ),
		Err(_) => Err( ::std::fmt::Error ),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn addresses()
	{
		assert_eq!(parse_address("0x100"), Some(0x100));
		assert_eq!(parse_address("256"), Some(256));
		assert_eq!(parse_address("0xZZ"), None);
		assert_eq!(parse_address(""), None);
	}

	#[test]
	fn bad_arguments_fail()
	{
		let args: Vec<String> = vec!["avrdis".into(), "--style".into(), "nasm".into(), "x.bin".into()];
		assert!(matches!(run(&args), Err(error::Error::Usage(_))));
		let args: Vec<String> = vec!["avrdis".into()];
		assert!(matches!(run(&args), Err(error::Error::Usage(_))));
		let args: Vec<String> = vec!["avrdis".into(), "--bogus".into()];
		assert!(matches!(run(&args), Err(error::Error::Usage(_))));
	}

	#[test]
	fn missing_image_is_io_error()
	{
		let args: Vec<String> = vec!["avrdis".into(), "/nonexistent/avrdis-image.bin".into()];
		assert!(matches!(run(&args), Err(error::Error::Io(_))));
	}
}

// vim: ft=rust
