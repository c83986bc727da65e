//
//
//
use crate::options::Options;
use crate::labels::{LabelTable,RefKind};
use crate::ioregs::{self,RegisterUsage};
use super::instruction::Instr;

#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum Pass
{
	/// Pass 1: collect jump targets and register usage, print nothing
	Discover,
	/// Pass 2: produce output
	Render,
}

/// Per-instruction text written by render handlers
#[derive(Default,Debug)]
pub struct Output
{
	pub code: String,
	pub comment: String,
	/// Printed on its own after the code line (e.g. a closing brace)
	pub after_code: String,
}

impl Output
{
	pub fn clear(&mut self) {
		self.code.clear();
		self.comment.clear();
		self.after_code.clear();
	}
}

/// Operands of the most recent compare, for pseudocode branch conditions
#[derive(Clone,Debug)]
pub struct Compare
{
	pub lhs: String,
	pub rhs: String,
}

/// Everything a render handler may touch during one disassembly run
pub struct Context<'o>
{
	pub options: &'o Options,
	pub pass: Pass,
	pub out: Output,
	pub labels: LabelTable,
	pub registers: RegisterUsage,

	compare: Option<Compare>,
	prev_compare: Option<Compare>,
	close_pending: bool,
}

impl<'o> Context<'o>
{
	pub fn new(options: &'o Options) -> Context<'o>
	{
		Context {
			options: options,
			pass: Pass::Discover,
			out: Default::default(),
			labels: Default::default(),
			registers: RegisterUsage::new(),
			compare: None,
			prev_compare: None,
			close_pending: false,
		}
	}

	/// Drop state carried between instructions (start of a pass)
	pub fn reset_flow(&mut self)
	{
		self.out.clear();
		self.compare = None;
		self.prev_compare = None;
		self.close_pending = false;
	}

	/// Prepare for the next handler invocation
	pub fn begin_instruction(&mut self)
	{
		self.out.clear();
		self.prev_compare = self.compare.take();
		if self.take_pending_close() {
			self.out.after_code.push_str("}\n");
		}
	}

	/// Consume a block close left by a skip whose following instruction never ran a handler
	pub fn take_pending_close(&mut self) -> bool {
		::std::mem::replace(&mut self.close_pending, false)
	}

	/// Note a control transfer to `target`, returning the target's label if it has one
	pub fn jump_target(&mut self, kind: RefKind, instr: &Instr, target: u32) -> Option<String>
	{
		if self.pass == Pass::Discover && self.options.process_labels {
			self.labels.record_reference(kind, instr.address, target, instr.mnemonic);
		}
		self.labels.label_for(target).map(String::from)
	}

	/// Operand text for an I/O space address, marking the register as used
	pub fn io_register(&mut self, io: u32) -> String
	{
		match ioregs::io_name(io)
		{
		Some(name) => {
			self.registers.mark(io);
			name.to_string()
			},
		None => format!("0x{:02x}", io),
		}
	}

	/// Name of an I/O register accessed through data space, marking it as used
	pub fn data_register(&mut self, addr: u32) -> Option<&'static str>
	{
		let name = ioregs::data_name(addr)?;
		self.registers.mark(addr - ioregs::DATA_OFFSET);
		Some(name)
	}

	pub fn set_compare(&mut self, lhs: String, rhs: String) {
		self.compare = Some(Compare { lhs: lhs, rhs: rhs });
	}
	/// Compare performed by the instruction immediately before this one
	pub fn last_compare(&self) -> Option<&Compare> {
		self.prev_compare.as_ref()
	}
	/// The next instruction is conditional; close its block after it
	pub fn close_after_next(&mut self) {
		self.close_pending = true;
	}
}


// vim: ft=rust
