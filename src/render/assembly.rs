// avrdis
// - By John Hodge (thePowersGang)
//
// render/assembly.rs
// - Plain assembly rendering
use crate::disasm::instruction::Instr;
use crate::disasm::opcodes::Mnemonic as M;
use crate::disasm::state::Context;
use crate::ioregs;
use crate::labels::RefKind;
use super::pointer_operand;

fn emit(ctx: &mut Context, i: &Instr, operands: String)
{
	ctx.out.code = format!("{:<6} {}", i.mnemonic.name(), operands);
}

/// Decimal value, with the character if printable
fn immediate_comment(k: u32) -> String
{
	match k
	{
	0x20 ..= 0x7E => format!("{} '{}'", k, k as u8 as char),
	_ => format!("{}", k),
	}
}

/// Name of an SREG bit
fn flag_name(bit: u32) -> &'static str
{
	["C", "Z", "N", "V", "S", "H", "T", "I"][(bit & 7) as usize]
}

fn relative_operand(ctx: &mut Context, i: &Instr, kind: RefKind, words: i32) -> String
{
	let target = i.relative_target(words);
	ctx.out.comment = format!("0x{:04x}", target);
	match ctx.jump_target(kind, i, target)
	{
	Some(label) => label,
	None => format!(".{:+}", words * 2),
	}
}

pub fn implied(ctx: &mut Context, i: &Instr)
{
	ctx.out.code = i.mnemonic.name().to_string();
}

/// Two full-range registers (`add r24, r25`)
pub fn reg_reg(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, r{}", i.field(b'd'), i.field(b'r')));
}

/// Two registers from r16..r31
pub fn reg_reg_upper(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, r{}", 16 + i.field(b'd'), 16 + i.field(b'r')));
}

/// Register pairs
pub fn movw(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, r{}", 2 * i.field(b'd'), 2 * i.field(b'r')));
}

/// Upper register pair and a 6-bit constant (adiw/sbiw)
pub fn pair_imm(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'K');
	emit(ctx, i, format!("r{}, 0x{:02x}", 24 + 2 * i.field(b'd'), k));
	ctx.out.comment = format!("{}", k);
}

/// Upper register and an 8-bit constant
pub fn reg_imm(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'K');
	emit(ctx, i, format!("r{}, 0x{:02x}", 16 + i.field(b'd'), k));
	ctx.out.comment = immediate_comment(k);
}

pub fn ser(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}", 16 + i.field(b'd')));
}

pub fn single_reg(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}", i.field(b'd')));
}

/// bclr/bset
pub fn sreg_bit(ctx: &mut Context, i: &Instr)
{
	let s = i.field(b's');
	emit(ctx, i, format!("{}", s));
	ctx.out.comment = format!("SREG.{}", flag_name(s));
}

/// bld/bst
pub fn reg_bit(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, {}", i.field(b'd'), i.field(b'b')));
}

/// sbrc/sbrs
pub fn skip_reg_bit(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, {}", i.field(b'r'), i.field(b'b')));
}

/// cbi/sbi/sbic/sbis
pub fn io_bit(ctx: &mut Context, i: &Instr)
{
	let a = i.field(b'A');
	let name = ctx.io_register(a);
	emit(ctx, i, format!("{}, {}", name, i.field(b'b')));
}

pub fn io_in(ctx: &mut Context, i: &Instr)
{
	let a = i.field(b'A');
	let name = ctx.io_register(a);
	emit(ctx, i, format!("r{}, {}", i.field(b'd'), name));
	if ioregs::io_name(a).is_some() {
		ctx.out.comment = format!("0x{:02x}", a);
	}
}

pub fn io_out(ctx: &mut Context, i: &Instr)
{
	let a = i.field(b'A');
	let name = ctx.io_register(a);
	emit(ctx, i, format!("{}, r{}", name, i.field(b'r')));
	if ioregs::io_name(a).is_some() {
		ctx.out.comment = format!("0x{:02x}", a);
	}
}

/// Named conditional branches (brne, brcs, ...)
pub fn branch(ctx: &mut Context, i: &Instr)
{
	let k = i.signed_field(b'k', 7);
	let target = relative_operand(ctx, i, RefKind::Branch, k);
	emit(ctx, i, target);
}

/// brbc/brbs
pub fn branch_bit(ctx: &mut Context, i: &Instr)
{
	let k = i.signed_field(b'k', 7);
	let target = relative_operand(ctx, i, RefKind::Branch, k);
	emit(ctx, i, format!("{}, {}", i.field(b's'), target));
}

/// rjmp/rcall
pub fn relative_jump(ctx: &mut Context, i: &Instr)
{
	let kind = if i.mnemonic == M::Rcall { RefKind::Call } else { RefKind::Jump };
	let k = i.signed_field(b'k', 12);
	let target = relative_operand(ctx, i, kind, k);
	emit(ctx, i, target);
}

/// jmp/call, operand is a word address
pub fn absolute_jump(ctx: &mut Context, i: &Instr)
{
	let kind = if i.mnemonic == M::Call { RefKind::Call } else { RefKind::Jump };
	let target = 2 * i.field(b'k');
	let operand = match ctx.jump_target(kind, i, target)
		{
		Some(label) => {
			ctx.out.comment = format!("0x{:04x}", target);
			label
			},
		None => format!("0x{:x}", target),
		};
	emit(ctx, i, operand);
}

/// ld/lpm/elpm through a pointer register
pub fn load(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, {}", i.field(b'd'), pointer_operand(i.mnemonic)));
}

pub fn store(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("{}, r{}", pointer_operand(i.mnemonic), i.field(b'r')));
}

/// ldd with displacement
pub fn load_displaced(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("r{}, {}+{}", i.field(b'd'), pointer_operand(i.mnemonic), i.field(b'q')));
}

pub fn store_displaced(ctx: &mut Context, i: &Instr)
{
	emit(ctx, i, format!("{}+{}, r{}", pointer_operand(i.mnemonic), i.field(b'q'), i.field(b'r')));
}

pub fn lds(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'k');
	emit(ctx, i, format!("r{}, 0x{:04x}", i.field(b'd'), k));
	if let Some(name) = ctx.data_register(k) {
		ctx.out.comment = name.to_string();
	}
}

pub fn sts(ctx: &mut Context, i: &Instr)
{
	let k = i.field(b'k');
	emit(ctx, i, format!("0x{:04x}, r{}", k, i.field(b'd')));
	if let Some(name) = ctx.data_register(k) {
		ctx.out.comment = name.to_string();
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::disasm::pattern::{Fields,Pattern};
	use crate::disasm::state::Output;
	use crate::options::Options;

	fn render(handler: fn(&mut Context, &Instr), pattern: &'static str, m: M, address: u32, bytes: &[u8]) -> Output
	{
		let o = Options::default();
		let mut ctx = Context::new(&o);
		let mut f = Fields::new();
		let p = Pattern::new(pattern);
		assert!(p.matches(bytes, &mut f));
		handler(&mut ctx, &Instr::new(m, address, bytes, &f));
		ctx.out
	}

	#[test]
	fn register_forms()
	{
		let o = render(reg_reg, "0001 11rd  dddd rrrr", M::Adc, 0, &[0xD1, 0x1C]);
		assert_eq!(o.code, "adc    r13, r1");
		let o = render(movw, "0000 0001  dddd rrrr", M::Movw, 0, &[0xCB, 0x01]);
		assert_eq!(o.code, "movw   r24, r22");
		let o = render(pair_imm, "1001 0110  KKdd KKKK", M::Adiw, 0, &[0x01, 0x96]);
		assert_eq!(o.code, "adiw   r24, 0x01");
	}

	#[test]
	fn immediate_comment_shows_character()
	{
		let o = render(reg_imm, "1110 KKKK  dddd KKKK", M::Ldi, 0, &[0x81, 0xE4]);
		assert_eq!(o.code, "ldi    r24, 0x41");
		assert_eq!(o.comment, "65 'A'");
		let o = render(reg_imm, "0111 KKKK  dddd KKKK", M::Andi, 0, &[0x0F, 0x70]);
		assert_eq!(o.code, "andi   r16, 0x0f");
		assert_eq!(o.comment, "15");
	}

	#[test]
	fn relative_operands()
	{
		let o = render(relative_jump, "1100 kkkk  kkkk kkkk", M::Rjmp, 0x10, &[0xFF, 0xCF]);
		assert_eq!(o.code, "rjmp   .-2");
		assert_eq!(o.comment, "0x0010");
		// brne .+6
		let o = render(branch, "1111 01kk  kkkk k001", M::Brne, 0x10, &[0x19, 0xF4]);
		assert_eq!(o.code, "brne   .+6");
		assert_eq!(o.comment, "0x0018");
	}

	#[test]
	fn absolute_operand()
	{
		let o = render(absolute_jump, "1001 010k  kkkk 110k    kkkk kkkk  kkkk kkkk", M::Jmp, 0, &[0x0C, 0x94, 0x34, 0x00]);
		assert_eq!(o.code, "jmp    0x68");
	}

	#[test]
	fn io_names()
	{
		let o = render(io_out, "1011 1AAr  rrrr AAAA", M::Out, 0, &[0x85, 0xB9]);
		assert_eq!(o.code, "out    PORTB, r24");
		assert_eq!(o.comment, "0x05");
		let o = render(io_bit, "1001 1010  AAAA Abbb", M::Sbi, 0, &[0x2D, 0x9A]);
		assert_eq!(o.code, "sbi    PORTB, 5");
		let o = render(io_in, "1011 0AAd  dddd AAAA", M::In, 0, &[0x81, 0xB1]);
		assert_eq!(o.code, "in     r24, 0x01");
		assert!(o.comment.is_empty());
	}

	#[test]
	fn pointer_forms()
	{
		let o = render(load, "1001 000d  dddd 1101", M::LdXInc, 0, &[0x8D, 0x91]);
		assert_eq!(o.code, "ld     r24, X+");
		let o = render(store_displaced, "10q0 qq1r  rrrr 1qqq", M::StdY, 0, &[0x8D, 0x83]);
		assert_eq!(o.code, "std    Y+5, r24");
		let o = render(lds, "1001 000d  dddd 0000    kkkk kkkk  kkkk kkkk", M::Lds, 0, &[0x80, 0x91, 0x5F, 0x00]);
		assert_eq!(o.code, "lds    r24, 0x005f");
		assert_eq!(o.comment, "SREG");
	}

	#[test]
	fn flags()
	{
		let o = render(sreg_bit, "1001 0100  0sss 1000", M::Bset, 0, &[0x78, 0x94]);
		assert_eq!(o.code, "bset   7");
		assert_eq!(o.comment, "SREG.I");
	}
}

// vim: ft=rust
