// avrdis
// - By John Hodge (thePowersGang)
//
// render/mod.rs
// - Render handler selection
//
// Every encoding is registered with its assembly handler. Pseudocode output then
// supersedes the handlers of the mnemonics it has a form for, before the registry is
// sorted.
use crate::disasm::opcodes::Mnemonic as M;
use crate::disasm::registry::{Handler,Registry};
use crate::error::Result;

pub mod assembly;
pub mod pseudocode;

/// Pointer register operand of the indirect load/store forms
pub fn pointer_operand(m: M) -> &'static str
{
	match m
	{
	M::LdX | M::StX => "X",
	M::LdXInc | M::StXInc => "X+",
	M::LdXDec | M::StXDec => "-X",
	M::LdY | M::StY | M::LddY | M::StdY => "Y",
	M::LdYInc | M::StYInc => "Y+",
	M::LdYDec | M::StYDec => "-Y",
	M::LdZ | M::StZ | M::LddZ | M::StdZ | M::LpmZ | M::ElpmZ => "Z",
	M::LdZInc | M::StZInc | M::LpmZInc | M::ElpmZInc => "Z+",
	M::LdZDec | M::StZDec => "-Z",
	_ => "?",
	}
}

/// AVR instruction set, in registration order
static BASE_SET: &[(&str, M, Handler)] = &[
	("0001 11rd  dddd rrrr", M::Adc, assembly::reg_reg),
	("0000 11rd  dddd rrrr", M::Add, assembly::reg_reg),
	("1001 0110  KKdd KKKK", M::Adiw, assembly::pair_imm),
	("0010 00rd  dddd rrrr", M::And, assembly::reg_reg),
	("0111 KKKK  dddd KKKK", M::Andi, assembly::reg_imm),
	("1001 010d  dddd 0101", M::Asr, assembly::single_reg),
	("1001 0100  1sss 1000", M::Bclr, assembly::sreg_bit),
	("1111 100d  dddd 0bbb", M::Bld, assembly::reg_bit),
	("1111 01kk  kkkk ksss", M::Brbc, assembly::branch_bit),
	("1111 00kk  kkkk ksss", M::Brbs, assembly::branch_bit),
	("1111 01kk  kkkk k000", M::Brcc, assembly::branch),
	("1111 00kk  kkkk k000", M::Brcs, assembly::branch),
	("1001 0101  1001 1000", M::Break, assembly::implied),
	("1111 00kk  kkkk k001", M::Breq, assembly::branch),
	("1111 01kk  kkkk k100", M::Brge, assembly::branch),
	("1111 01kk  kkkk k101", M::Brhc, assembly::branch),
	("1111 00kk  kkkk k101", M::Brhs, assembly::branch),
	("1111 01kk  kkkk k111", M::Brid, assembly::branch),
	("1111 00kk  kkkk k111", M::Brie, assembly::branch),
	("1111 00kk  kkkk k000", M::Brlo, assembly::branch),
	("1111 00kk  kkkk k100", M::Brlt, assembly::branch),
	("1111 00kk  kkkk k010", M::Brmi, assembly::branch),
	("1111 01kk  kkkk k001", M::Brne, assembly::branch),
	("1111 01kk  kkkk k010", M::Brpl, assembly::branch),
	("1111 01kk  kkkk k000", M::Brsh, assembly::branch),
	("1111 01kk  kkkk k110", M::Brtc, assembly::branch),
	("1111 00kk  kkkk k110", M::Brts, assembly::branch),
	("1111 01kk  kkkk k011", M::Brvc, assembly::branch),
	("1111 00kk  kkkk k011", M::Brvs, assembly::branch),
	("1001 0100  0sss 1000", M::Bset, assembly::sreg_bit),
	("1111 101d  dddd 0bbb", M::Bst, assembly::reg_bit),
	("1001 010k  kkkk 111k    kkkk kkkk  kkkk kkkk", M::Call, assembly::absolute_jump),
	("1001 1000  AAAA Abbb", M::Cbi, assembly::io_bit),
	("1001 0100  1000 1000", M::Clc, assembly::implied),
	("1001 0100  1101 1000", M::Clh, assembly::implied),
	("1001 0100  1111 1000", M::Cli, assembly::implied),
	("1001 0100  1010 1000", M::Cln, assembly::implied),
	("1001 0100  1100 1000", M::Cls, assembly::implied),
	("1001 0100  1110 1000", M::Clt, assembly::implied),
	("1001 0100  1011 1000", M::Clv, assembly::implied),
	("1001 0100  1001 1000", M::Clz, assembly::implied),
	("1001 010d  dddd 0000", M::Com, assembly::single_reg),
	("0001 01rd  dddd rrrr", M::Cp, assembly::reg_reg),
	("0000 01rd  dddd rrrr", M::Cpc, assembly::reg_reg),
	("0011 KKKK  dddd KKKK", M::Cpi, assembly::reg_imm),
	("0001 00rd  dddd rrrr", M::Cpse, assembly::reg_reg),
	("1001 010d  dddd 1010", M::Dec, assembly::single_reg),
	("1001 0101  0001 1001", M::Eicall, assembly::implied),
	("1001 0100  0001 1001", M::Eijmp, assembly::implied),
	("1001 0101  1101 1000", M::Elpm, assembly::implied),
	("1001 000d  dddd 0110", M::ElpmZ, assembly::load),
	("1001 000d  dddd 0111", M::ElpmZInc, assembly::load),
	("0010 01rd  dddd rrrr", M::Eor, assembly::reg_reg),
	("0000 0011  0ddd 1rrr", M::Fmul, assembly::reg_reg_upper),
	("0000 0011  1ddd 0rrr", M::Fmuls, assembly::reg_reg_upper),
	("0000 0011  1ddd 1rrr", M::Fmulsu, assembly::reg_reg_upper),
	("1001 0101  0000 1001", M::Icall, assembly::implied),
	("1001 0100  0000 1001", M::Ijmp, assembly::implied),
	("1011 0AAd  dddd AAAA", M::In, assembly::io_in),
	("1001 010d  dddd 0011", M::Inc, assembly::single_reg),
	("1001 010k  kkkk 110k    kkkk kkkk  kkkk kkkk", M::Jmp, assembly::absolute_jump),
	("1001 000d  dddd 1100", M::LdX, assembly::load),
	("1001 000d  dddd 1101", M::LdXInc, assembly::load),
	("1001 000d  dddd 1110", M::LdXDec, assembly::load),
	("1000 000d  dddd 1000", M::LdY, assembly::load),
	("1001 000d  dddd 1001", M::LdYInc, assembly::load),
	("1001 000d  dddd 1010", M::LdYDec, assembly::load),
	("10q0 qq0d  dddd 1qqq", M::LddY, assembly::load_displaced),
	("1000 000d  dddd 0000", M::LdZ, assembly::load),
	("1001 000d  dddd 0001", M::LdZInc, assembly::load),
	("1001 000d  dddd 0010", M::LdZDec, assembly::load),
	("10q0 qq0d  dddd 0qqq", M::LddZ, assembly::load_displaced),
	("1110 KKKK  dddd KKKK", M::Ldi, assembly::reg_imm),
	("1001 000d  dddd 0000    kkkk kkkk  kkkk kkkk", M::Lds, assembly::lds),
	("1001 0101  1100 1000", M::Lpm, assembly::implied),
	("1001 000d  dddd 0100", M::LpmZ, assembly::load),
	("1001 000d  dddd 0101", M::LpmZInc, assembly::load),
	("1001 010d  dddd 0110", M::Lsr, assembly::single_reg),
	("0010 11rd  dddd rrrr", M::Mov, assembly::reg_reg),
	("0000 0001  dddd rrrr", M::Movw, assembly::movw),
	("1001 11rd  dddd rrrr", M::Mul, assembly::reg_reg),
	("0000 0010  dddd rrrr", M::Muls, assembly::reg_reg_upper),
	("0000 0011  0ddd 0rrr", M::Mulsu, assembly::reg_reg_upper),
	("1001 010d  dddd 0001", M::Neg, assembly::single_reg),
	("0000 0000  0000 0000", M::Nop, assembly::implied),
	("0010 10rd  dddd rrrr", M::Or, assembly::reg_reg),
	("0110 KKKK  dddd KKKK", M::Ori, assembly::reg_imm),
	("1011 1AAr  rrrr AAAA", M::Out, assembly::io_out),
	("1001 000d  dddd 1111", M::Pop, assembly::single_reg),
	("1001 001d  dddd 1111", M::Push, assembly::single_reg),
	("1101 kkkk  kkkk kkkk", M::Rcall, assembly::relative_jump),
	("1001 0101  0000 1000", M::Ret, assembly::implied),
	("1001 0101  0001 1000", M::Reti, assembly::implied),
	("1100 kkkk  kkkk kkkk", M::Rjmp, assembly::relative_jump),
	("1001 010d  dddd 0111", M::Ror, assembly::single_reg),
	("0000 10rd  dddd rrrr", M::Sbc, assembly::reg_reg),
	("0100 KKKK  dddd KKKK", M::Sbci, assembly::reg_imm),
	("1001 1010  AAAA Abbb", M::Sbi, assembly::io_bit),
	("1001 1001  AAAA Abbb", M::Sbic, assembly::io_bit),
	("1001 1011  AAAA Abbb", M::Sbis, assembly::io_bit),
	("1001 0111  KKdd KKKK", M::Sbiw, assembly::pair_imm),
	("0110 KKKK  dddd KKKK", M::Sbr, assembly::reg_imm),
	("1111 110r  rrrr 0bbb", M::Sbrc, assembly::skip_reg_bit),
	("1111 111r  rrrr 0bbb", M::Sbrs, assembly::skip_reg_bit),
	("1001 0100  0000 1000", M::Sec, assembly::implied),
	("1001 0100  0101 1000", M::Seh, assembly::implied),
	("1001 0100  0111 1000", M::Sei, assembly::implied),
	("1001 0100  0010 1000", M::Sen, assembly::implied),
	("1110 1111  dddd 1111", M::Ser, assembly::ser),
	("1001 0100  0100 1000", M::Ses, assembly::implied),
	("1001 0100  0110 1000", M::Set, assembly::implied),
	("1001 0100  0011 1000", M::Sev, assembly::implied),
	("1001 0100  0001 1000", M::Sez, assembly::implied),
	("1001 0101  1000 1000", M::Sleep, assembly::implied),
	("1001 0101  1110 1000", M::Spm, assembly::implied),
	("1001 001r  rrrr 1100", M::StX, assembly::store),
	("1001 001r  rrrr 1101", M::StXInc, assembly::store),
	("1001 001r  rrrr 1110", M::StXDec, assembly::store),
	("1000 001r  rrrr 1000", M::StY, assembly::store),
	("1001 001r  rrrr 1001", M::StYInc, assembly::store),
	("1001 001r  rrrr 1010", M::StYDec, assembly::store),
	("10q0 qq1r  rrrr 1qqq", M::StdY, assembly::store_displaced),
	("1000 001r  rrrr 0000", M::StZ, assembly::store),
	("1001 001r  rrrr 0001", M::StZInc, assembly::store),
	("1001 001r  rrrr 0010", M::StZDec, assembly::store),
	("10q0 qq1r  rrrr 0qqq", M::StdZ, assembly::store_displaced),
	("1001 001d  dddd 0000    kkkk kkkk  kkkk kkkk", M::Sts, assembly::sts),
	("0001 10rd  dddd rrrr", M::Sub, assembly::reg_reg),
	("0101 KKKK  dddd KKKK", M::Subi, assembly::reg_imm),
	("1001 010d  dddd 0010", M::Swap, assembly::single_reg),
	("1001 0101  1010 1000", M::Wdr, assembly::implied),
];

/// Mnemonics with a pseudocode form
static PSEUDO_SET: &[(M, Handler)] = &[
	(M::Adc, pseudocode::reg_reg),
	(M::Add, pseudocode::reg_reg),
	(M::Sub, pseudocode::reg_reg),
	(M::Sbc, pseudocode::reg_reg),
	(M::Mov, pseudocode::reg_reg),
	(M::Brcc, pseudocode::branch),
	(M::Brcs, pseudocode::branch),
	(M::Breq, pseudocode::branch),
	(M::Brge, pseudocode::branch),
	(M::Brhc, pseudocode::branch),
	(M::Brhs, pseudocode::branch),
	(M::Brid, pseudocode::branch),
	(M::Brie, pseudocode::branch),
	(M::Brlo, pseudocode::branch),
	(M::Brlt, pseudocode::branch),
	(M::Brmi, pseudocode::branch),
	(M::Brne, pseudocode::branch),
	(M::Brpl, pseudocode::branch),
	(M::Brsh, pseudocode::branch),
	(M::Brtc, pseudocode::branch),
	(M::Brts, pseudocode::branch),
	(M::Brvc, pseudocode::branch),
	(M::Brvs, pseudocode::branch),
	(M::Out, pseudocode::io_out),
	(M::In, pseudocode::io_in),
	(M::Cli, pseudocode::implied),
	(M::Sei, pseudocode::implied),
	(M::Ret, pseudocode::implied),
	(M::Reti, pseudocode::implied),
	(M::Andi, pseudocode::reg_imm),
	(M::Subi, pseudocode::reg_imm),
	(M::Sbci, pseudocode::reg_imm),
	(M::Sbr, pseudocode::reg_imm),
	(M::Ori, pseudocode::reg_imm),
	(M::Ldi, pseudocode::reg_imm),
	(M::Lds, pseudocode::lds),
	(M::Sts, pseudocode::sts),
	(M::Call, pseudocode::absolute_jump),
	(M::Rcall, pseudocode::relative_jump),
	(M::Ror, pseudocode::single_reg),
	(M::Lsr, pseudocode::single_reg),
	(M::Eor, pseudocode::reg_reg),
	(M::Swap, pseudocode::single_reg),
	(M::Jmp, pseudocode::absolute_jump),
	(M::Rjmp, pseudocode::relative_jump),
	(M::Cpi, pseudocode::reg_imm),
	(M::Asr, pseudocode::single_reg),
	(M::Inc, pseudocode::single_reg),
	(M::Dec, pseudocode::single_reg),
	(M::Cp, pseudocode::reg_reg),
	(M::Cpc, pseudocode::reg_reg),
	(M::Cpse, pseudocode::reg_reg),
	(M::And, pseudocode::reg_reg),
	(M::Or, pseudocode::reg_reg),
	(M::Mul, pseudocode::reg_reg),
	(M::Sbi, pseudocode::io_bit),
	(M::Sbis, pseudocode::io_bit),
	(M::Sbic, pseudocode::io_bit),
	(M::Cbi, pseudocode::io_bit),
	(M::Ser, pseudocode::ser),
	(M::Movw, pseudocode::movw),
	(M::Adiw, pseudocode::adiw),
	(M::Lpm, pseudocode::lpm),
	(M::StXInc, pseudocode::store_x_inc),
];

/// Build the sorted, checked registry for one run
pub fn build_registry(pseudocode: bool) -> Result<Registry>
{
	let mut registry = Registry::new();
	for &(pattern, mnemonic, handler) in BASE_SET
	{
		registry.register(pattern, mnemonic, handler);
	}
	if pseudocode
	{
		for &(mnemonic, handler) in PSEUDO_SET
		{
			if let Err(e) = registry.supersede(mnemonic, handler) {
				error!("{}", e);
			}
		}
	}
	registry.sort();
	registry.check_consistency()?;
	debug!("{} opcodes registered", registry.entries().len());
	Ok(registry)
}


// vim: ft=rust
