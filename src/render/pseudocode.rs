// avrdis
// - By John Hodge (thePowersGang)
//
// render/pseudocode.rs
// - C-like pseudocode rendering
//
// Mnemonics without a pseudocode form fall through to the assembly handler of the
// same operand shape.
use crate::disasm::instruction::Instr;
use crate::disasm::opcodes::Mnemonic as M;
use crate::disasm::state::Context;
use crate::labels::RefKind;
use super::assembly;

fn goto_target(ctx: &mut Context, i: &Instr, target: u32) -> String
{
	match ctx.jump_target(RefKind::Jump, i, target)
	{
	Some(label) => format!("goto {};", label),
	None => format!("goto loc_{:04x};", target),
	}
}

fn call_target(ctx: &mut Context, i: &Instr, target: u32) -> String
{
	match ctx.jump_target(RefKind::Call, i, target)
	{
	Some(label) => format!("{}();", label),
	None => format!("sub_{:04x}();", target),
	}
}

/// Status flag condition tested by a named branch
fn flag_condition(m: M) -> &'static str
{
	match m
	{
	M::Brcc | M::Brsh => "!C",
	M::Brcs | M::Brlo => "C",
	M::Breq => "Z",
	M::Brne => "!Z",
	M::Brge => "!S",
	M::Brlt => "S",
	M::Brhc => "!H",
	M::Brhs => "H",
	M::Brid => "!I",
	M::Brie => "I",
	M::Brmi => "N",
	M::Brpl => "!N",
	M::Brtc => "!T",
	M::Brts => "T",
	M::Brvc => "!V",
	M::Brvs => "V",
	_ => "?",
	}
}

/// Branch condition, phrased as a comparison when the previous instruction was a compare
fn condition(ctx: &Context, m: M) -> String
{
	if let Some(c) = ctx.last_compare()
	{
		let cmp = match m
			{
			M::Breq => Some( format!("{} == {}", c.lhs, c.rhs) ),
			M::Brne => Some( format!("{} != {}", c.lhs, c.rhs) ),
			M::Brlo | M::Brcs => Some( format!("{} < {}", c.lhs, c.rhs) ),
			M::Brsh | M::Brcc => Some( format!("{} >= {}", c.lhs, c.rhs) ),
			M::Brlt => Some( format!("(int8_t){} < (int8_t){}", c.lhs, c.rhs) ),
			M::Brge => Some( format!("(int8_t){} >= (int8_t){}", c.lhs, c.rhs) ),
			_ => None,
			};
		if let Some(cmp) = cmp {
			return cmp;
		}
	}
	flag_condition(m).to_string()
}

pub fn reg_reg(ctx: &mut Context, i: &Instr)
{
	let d = i.field(b'd');
	let r = i.field(b'r');
	ctx.out.code = match i.mnemonic
		{
		M::Add => format!("r{d} += r{r};"),
		M::Adc => format!("r{d} += r{r} + C;"),
		M::Sub => format!("r{d} -= r{r};"),
		M::Sbc => format!("r{d} -= r{r} + C;"),
		M::Mov => format!("r{d} = r{r};"),
		M::And => format!("r{d} &= r{r};"),
		M::Or => format!("r{d} |= r{r};"),
		M::Eor if d == r => format!("r{d} = 0;"),
		M::Eor => format!("r{d} ^= r{r};"),
		M::Mul => format!("r1:r0 = r{d} * r{r};"),
		M::Cp | M::Cpc => {
			ctx.set_compare(format!("r{d}"), format!("r{r}"));
			if i.mnemonic == M::Cpc {
				ctx.out.comment = "with carry".to_string();
			}
			format!("cmp(r{d}, r{r});")
			},
		M::Cpse => {
			ctx.close_after_next();
			format!("if (r{d} != r{r}) {{")
			},
		_ => return assembly::reg_reg(ctx, i),
		};
}

pub fn reg_imm(ctx: &mut Context, i: &Instr)
{
	let d = 16 + i.field(b'd');
	let k = i.field(b'K');
	ctx.out.code = match i.mnemonic
		{
		M::Ldi => format!("r{d} = 0x{k:02x};"),
		M::Andi => format!("r{d} &= 0x{k:02x};"),
		M::Ori | M::Sbr => format!("r{d} |= 0x{k:02x};"),
		M::Subi => format!("r{d} -= 0x{k:02x};"),
		M::Sbci => format!("r{d} -= 0x{k:02x} + C;"),
		M::Cpi => {
			ctx.set_compare(format!("r{d}"), format!("0x{k:02x}"));
			format!("cmp(r{d}, 0x{k:02x});")
			},
		_ => return assembly::reg_imm(ctx, i),
		};
	ctx.out.comment = format!("{}", k);
}

pub fn single_reg(ctx: &mut Context, i: &Instr)
{
	let d = i.field(b'd');
	ctx.out.code = match i.mnemonic
		{
		M::Inc => format!("r{d}++;"),
		M::Dec => format!("r{d}--;"),
		M::Lsr => format!("r{d} >>= 1;"),
		M::Asr => format!("r{d} = (int8_t)r{d} >> 1;"),
		M::Ror => format!("r{d} = (r{d} >> 1) | (C << 7);"),
		M::Swap => format!("r{d} = (r{d} << 4) | (r{d} >> 4);"),
		_ => return assembly::single_reg(ctx, i),
		};
}

pub fn ser(ctx: &mut Context, i: &Instr)
{
	ctx.out.code = format!("r{} = 0xff;", 16 + i.field(b'd'));
}

pub fn movw(ctx: &mut Context, i: &Instr)
{
	let d = 2 * i.field(b'd');
	let r = 2 * i.field(b'r');
	ctx.out.code = format!("r{}:r{} = r{}:r{};", d + 1, d, r + 1, r);
}

pub fn adiw(ctx: &mut Context, i: &Instr)
{
	let d = 24 + 2 * i.field(b'd');
	let k = i.field(b'K');
	ctx.out.code = format!("r{}:r{} += 0x{:02x};", d + 1, d, k);
	ctx.out.comment = format!("{}", k);
}

pub fn io_in(ctx: &mut Context, i: &Instr)
{
	let name = ctx.io_register(i.field(b'A'));
	ctx.out.code = format!("r{} = {};", i.field(b'd'), name);
}

pub fn io_out(ctx: &mut Context, i: &Instr)
{
	let name = ctx.io_register(i.field(b'A'));
	ctx.out.code = format!("{} = r{};", name, i.field(b'r'));
}

/// cbi/sbi/sbic/sbis
pub fn io_bit(ctx: &mut Context, i: &Instr)
{
	let name = ctx.io_register(i.field(b'A'));
	let b = i.field(b'b');
	ctx.out.code = match i.mnemonic
		{
		M::Sbi => format!("{name} |= (1 << {b});"),
		M::Cbi => format!("{name} &= ~(1 << {b});"),
		// The next instruction runs only when the skip is not taken
		M::Sbis => {
			ctx.close_after_next();
			format!("if (!({name} & (1 << {b}))) {{")
			},
		M::Sbic => {
			ctx.close_after_next();
			format!("if ({name} & (1 << {b})) {{")
			},
		_ => return assembly::io_bit(ctx, i),
		};
}

pub fn lds(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'k');
	ctx.out.code = match ctx.data_register(k)
		{
		Some(name) => format!("r{} = {};", i.field(b'd'), name),
		None => format!("r{} = RAM[0x{:04x}];", i.field(b'd'), k),
		};
}

pub fn sts(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'k');
	ctx.out.code = match ctx.data_register(k)
		{
		Some(name) => format!("{} = r{};", name, i.field(b'd')),
		None => format!("RAM[0x{:04x}] = r{};", k, i.field(b'd')),
		};
}

pub fn lpm(ctx: &mut Context, _: &Instr)
{
	ctx.out.code = "r0 = Flash[Z];".to_string();
}

/// st X+, r
pub fn store_x_inc(ctx: &mut Context, i: &Instr)
{
	ctx.out.code = format!("RAM[X++] = r{};", i.field(b'r'));
}

pub fn branch(ctx: &mut Context, i: &Instr)
{
	let target = i.relative_target(i.signed_field(b'k', 7));
	let cond = condition(ctx, i.mnemonic);
	let goto = goto_target(ctx, i, target);
	ctx.out.code = format!("if ({}) {}", cond, goto);
}

pub fn relative_jump(ctx: &mut Context, i: &Instr)
{
	let target = i.relative_target(i.signed_field(b'k', 12));
	ctx.out.code = if i.mnemonic == M::Rcall {
			call_target(ctx, i, target)
		}
		else {
			goto_target(ctx, i, target)
		};
}

pub fn absolute_jump(ctx: &mut Context, i: &Instr)
{
	let target = 2 * i.field(b'k');
	ctx.out.code = if i.mnemonic == M::Call {
			call_target(ctx, i, target)
		}
		else {
			goto_target(ctx, i, target)
		};
}

pub fn implied(ctx: &mut Context, i: &Instr)
{
	ctx.out.code = match i.mnemonic
		{
		M::Cli => "DisableInterrupts();".to_string(),
		M::Sei => "EnableInterrupts();".to_string(),
		M::Ret => "return;".to_string(),
		M::Reti => {
			ctx.out.comment = "from interrupt".to_string();
			"return;".to_string()
			},
		_ => return assembly::implied(ctx, i),
		};
}


// vim: ft=rust
