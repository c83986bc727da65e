//
//
//

/// Assembler dialect the output targets
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum CodeStyle
{
	/// Atmel assembler, I/O names come from the device include file
	AvrAsm,
	/// GNU as, used I/O registers are defined in a preamble
	AvrGcc,
}

/// Whether the driver needs a discovery sweep before rendering
#[derive(Copy,Clone,PartialEq,Eq,Debug)]
pub enum PassPlan
{
	SinglePass,
	TwoPass,
}

/// Display configuration for one disassembly run
#[derive(Clone,Debug)]
pub struct Options
{
	pub show_addresses: bool,
	pub show_opcodes: bool,
	pub show_cycles: bool,
	pub show_comments: bool,
	pub pseudocode: bool,
	pub process_labels: bool,
	pub style: CodeStyle,
}

impl Default for Options
{
	fn default() -> Options
	{
		Options {
			show_addresses: false,
			show_opcodes: false,
			show_cycles: false,
			show_comments: false,
			pseudocode: false,
			process_labels: false,
			style: CodeStyle::AvrAsm,
		}
	}
}

impl Options
{
	/// Decide once whether a discovery pass is needed.
	///
	/// Labels need every jump target known before the first line is printed, and the
	/// avr-gcc register preamble needs every I/O access (pseudocode output names
	/// registers inline, so it does not need the preamble).
	pub fn pass_plan(&self) -> PassPlan
	{
		if self.process_labels || (!self.pseudocode && self.style == CodeStyle::AvrGcc) {
			PassPlan::TwoPass
		}
		else {
			PassPlan::SinglePass
		}
	}
}

impl CodeStyle
{
	pub fn from_name(name: &str) -> Option<CodeStyle>
	{
		match name
		{
		"avrasm" => Some(CodeStyle::AvrAsm),
		"avr-gcc" | "avrgcc" | "gcc" => Some(CodeStyle::AvrGcc),
		_ => None,
		}
	}

	/// Whether used I/O registers are listed before the code
	pub fn lists_registers(&self) -> bool
	{
		*self == CodeStyle::AvrGcc
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn single_pass_by_default()
	{
		assert_eq!(Options::default().pass_plan(), PassPlan::SinglePass);
	}

	#[test]
	fn labels_force_two_passes()
	{
		let o = Options { process_labels: true, pseudocode: true, ..Default::default() };
		assert_eq!(o.pass_plan(), PassPlan::TwoPass);
	}

	#[test]
	fn gcc_style_needs_discovery_unless_pseudocode()
	{
		let mut o = Options { style: CodeStyle::AvrGcc, ..Default::default() };
		assert_eq!(o.pass_plan(), PassPlan::TwoPass);
		o.pseudocode = true;
		assert_eq!(o.pass_plan(), PassPlan::SinglePass);
	}

	#[test]
	fn style_names()
	{
		assert_eq!(CodeStyle::from_name("avr-gcc"), Some(CodeStyle::AvrGcc));
		assert_eq!(CodeStyle::from_name("avrasm"), Some(CodeStyle::AvrAsm));
		assert_eq!(CodeStyle::from_name("nasm"), None);
	}
}

// vim: ft=rust
