// avrdis
// - By John Hodge (thePowersGang)
//
// disasm/mod.rs
// - Disassembly core
use std::fmt;
use crate::error::Result;
use crate::options::{Options,PassPlan};
use crate::labels::LabelTable;
use self::opcodes::Mnemonic;
use self::pattern::Fields;
use self::registry::Registry;
use self::state::{Context,Pass};
use self::instruction::Instr;

pub mod pattern;
pub mod opcodes;
pub mod registry;
pub mod instruction;
pub mod state;

/// Source of data ranges that must not be decoded as code
pub trait DataTags
{
	/// Render the data range starting at `position`, returning the number of bytes consumed.
	///
	/// Zero means the position is not tagged as data.
	fn data_at(&self, image: &[u8], position: usize, out: &mut dyn fmt::Write) -> ::std::result::Result<usize, fmt::Error>;
}

/// No data ranges, everything is code
pub struct NoTags;
impl DataTags for NoTags
{
	fn data_at(&self, _: &[u8], _: usize, _: &mut dyn fmt::Write) -> ::std::result::Result<usize, fmt::Error> {
		Ok(0)
	}
}

pub struct Disassembler<'o>
{
	registry: Registry,
	fields: Fields,
	ctx: Context<'o>,
	base: u32,
}

impl<'o> Disassembler<'o>
{
	pub fn new(options: &'o Options, base: u32) -> Result<Disassembler<'o>>
	{
		Ok(Disassembler {
			registry: crate::render::build_registry(options.pseudocode)?,
			fields: Fields::new(),
			ctx: Context::new(options),
			base: base,
			})
	}

	/// Run the planned passes over `image`
	pub fn run(&mut self, image: &[u8], tags: &dyn DataTags, out: &mut dyn fmt::Write) -> Result<()>
	{
		let plan = self.ctx.options.pass_plan();
		debug!("Pass plan: {:?}", plan);
		if plan == PassPlan::TwoPass {
			self.discover(image);
		}
		if self.ctx.options.style.lists_registers() {
			self.ctx.registers.emit(out)?;
		}
		self.render(image, tags, out)
	}

	/// Pass 1: run every handler for its side effects only
	fn discover(&mut self, image: &[u8])
	{
		info!("Discovery pass over {} bytes", image.len());
		self.ctx.pass = Pass::Discover;
		self.ctx.reset_flow();
		self.ctx.labels = LabelTable::new(self.base, u32::try_from(image.len()).unwrap_or(u32::MAX));
		let mut pos = 0;
		while pos < image.len()
		{
			pos += match self.step(image, pos)
				{
				Some( (_, len) ) => {
					let address = self.address(pos);
					self.ctx.labels.mark_instruction(address);
					len
					},
				None => 2,
				};
		}
		self.ctx.labels.finalize();
	}

	/// Pass 2: produce the listing
	pub fn render(&mut self, image: &[u8], tags: &dyn DataTags, out: &mut dyn fmt::Write) -> Result<()>
	{
		info!("Rendering {} bytes at base {:#x}", image.len(), self.base);
		self.ctx.pass = Pass::Render;
		self.ctx.reset_flow();
		let pseudocode = self.ctx.options.pseudocode;
		if pseudocode {
			write!(out, "void start(void) {{\n")?;
		}

		let mut pos = 0;
		while pos < image.len()
		{
			let mut data = String::new();
			let n = tags.data_at(image, pos, &mut data)?;
			if n > 0 {
				trace!("{} data bytes at {:#x}", n, pos);
				// Data is not an instruction, a skip block ends before it
				self.close_skip_block(out)?;
				out.write_str(&data)?;
				pos += n;
				continue ;
			}

			match self.step(image, pos)
			{
			Some( (mnemonic, len) ) => {
				self.print_instruction(image, pos, mnemonic, len, out)?;
				pos += len;
				},
			None if image.len() - pos < 2 => {
				let address = self.address(pos);
				warn!("Odd trailing byte at {:#x}", address);
				write!(out, ".byte 0x{:02x}      ; Trailing byte at 0x{:04x} ({}). Disassembler skipped it.\n",
					image[pos], address, address)?;
				self.close_skip_block(out)?;
				pos += 1;
				},
			None => {
				let address = self.address(pos);
				debug!("No opcode matches at {:#x}", address);
				write!(out, ".word 0x{:02x}{:02x}    ; Invalid opcode at 0x{:04x} ({}). Disassembler skipped two bytes.\n",
					image[pos+1], image[pos], address, address)?;
				// The skipped word stands in for the skipped instruction
				self.close_skip_block(out)?;
				pos += 2;
				},
			}
		}

		self.close_skip_block(out)?;
		if pseudocode {
			write!(out, "}}\n\n")?;
		}
		Ok( () )
	}

	/// Close a skip block whose guarded instruction was not decoded
	fn close_skip_block(&mut self, out: &mut dyn fmt::Write) -> Result<()>
	{
		if self.ctx.take_pending_close() {
			write!(out, "}}\n")?;
		}
		Ok( () )
	}

	fn address(&self, pos: usize) -> u32 {
		self.base.wrapping_add(pos as u32)
	}

	/// Resolve and run the handler for the instruction at `pos`
	fn step(&mut self, image: &[u8], pos: usize) -> Option<(Mnemonic, usize)>
	{
		let window = &image[pos..];
		let entry = self.registry.resolve(window, &mut self.fields)?;
		let len = entry.pattern.byte_len();
		trace!("{:#x}: {}", pos, entry.mnemonic.name());
		let instr = Instr::new(entry.mnemonic, self.base.wrapping_add(pos as u32), &window[..len], &self.fields);
		self.ctx.begin_instruction();
		(entry.handler)(&mut self.ctx, &instr);
		Some( (entry.mnemonic, len) )
	}

	fn print_instruction(&self, image: &[u8], pos: usize, mnemonic: Mnemonic, len: usize, out: &mut dyn fmt::Write) -> Result<()>
	{
		let opts = self.ctx.options;
		let address = self.address(pos);
		if opts.process_labels {
			self.ctx.labels.emit(address, opts.pseudocode, out)?;
		}
		if opts.show_addresses {
			write!(out, "{:4x}:   ", address)?;
		}
		if opts.show_cycles {
			write!(out, "[{:<3}] ", mnemonic.clocks())?;
		}
		if opts.show_opcodes
		{
			for b in &image[pos .. pos+len] {
				write!(out, "{:02x} ", b)?;
			}
			write!(out, " ")?;
			for _ in len .. 5 {
				write!(out, "   ")?;
			}
		}

		let o = &self.ctx.out;
		if o.code.is_empty() {
			write!(out, "; - Not implemented opcode: {} -\n", mnemonic.name())?;
		}
		else if o.comment.is_empty() || !opts.show_comments {
			write!(out, "{}\n", o.code)?;
		}
		else {
			let width = if opts.pseudocode { 35 } else { 23 };
			write!(out, "{:<width$} ; {}\n", o.code, o.comment, width = width)?;
		}
		write!(out, "{}", o.after_code)?;
		Ok( () )
	}
}

/// Disassemble `image`, loaded at `base`, into `out`
pub fn decode(image: &[u8], base: u32, options: &Options, tags: &dyn DataTags, out: &mut dyn fmt::Write) -> Result<()>
{
	let mut d = Disassembler::new(options, base)?;
	d.run(image, tags, out)
}


// vim: ft=rust
