// avrdis
// - By John Hodge (thePowersGang)
//
// disasm/opcodes.rs
// - AVR mnemonic identities and the opcode definition table
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Identity of every decodable AVR instruction form
///
/// Forms that share an assembler mnemonic but differ in addressing mode (e.g. the
/// nine `ld` variants) are separate identities.
#[derive(Copy,Clone,PartialEq,Eq,Hash,Debug,EnumCount,EnumIter,IntoStaticStr)]
pub enum Mnemonic
{
	Adc, Add, Adiw, And, Andi, Asr,
	Bclr, Bld, Brbc, Brbs, Brcc, Brcs, Break, Breq, Brge, Brhc, Brhs, Brid, Brie,
	Brlo, Brlt, Brmi, Brne, Brpl, Brsh, Brtc, Brts, Brvc, Brvs, Bset, Bst,
	Call, Cbi, Clc, Clh, Cli, Cln, Cls, Clt, Clv, Clz, Com, Cp, Cpc, Cpi, Cpse,
	Dec,
	Eicall, Eijmp, Elpm, ElpmZ, ElpmZInc, Eor,
	Fmul, Fmuls, Fmulsu,
	Icall, Ijmp, In, Inc,
	Jmp,
	LdX, LdXInc, LdXDec, LdY, LdYInc, LdYDec, LddY, LdZ, LdZInc, LdZDec, LddZ,
	Ldi, Lds, Lpm, LpmZ, LpmZInc, Lsr,
	Mov, Movw, Mul, Muls, Mulsu,
	Neg, Nop,
	Or, Ori, Out,
	Pop, Push,
	Rcall, Ret, Reti, Rjmp, Ror,
	Sbc, Sbci, Sbi, Sbic, Sbis, Sbiw, Sbr, Sbrc, Sbrs, Sec, Seh, Sei, Sen, Ser,
	Ses, Set, Sev, Sez, Sleep, Spm,
	StX, StXInc, StXDec, StY, StYInc, StYDec, StdY, StZ, StZInc, StZDec, StdZ,
	Sts, Sub, Subi, Swap,
	Wdr,
}

/// Static description of an opcode, independent of its encoding
pub struct OpcodeInfo
{
	pub mnemonic: Mnemonic,
	/// Assembler mnemonic
	pub name: &'static str,
	/// Cycle cost on the classic (AVRe) core
	pub clocks: &'static str,
}

macro_rules! opcode_table {
	( $( $m:ident $name:literal $clocks:literal, )* ) => {
		pub static OPCODES: &[OpcodeInfo] = &[
			$( OpcodeInfo { mnemonic: Mnemonic::$m, name: $name, clocks: $clocks }, )*
		];
	};
}

opcode_table! {
	Adc "adc" "1",
	Add "add" "1",
	Adiw "adiw" "2",
	And "and" "1",
	Andi "andi" "1",
	Asr "asr" "1",
	Bclr "bclr" "1",
	Bld "bld" "1",
	Brbc "brbc" "1/2",
	Brbs "brbs" "1/2",
	Brcc "brcc" "1/2",
	Brcs "brcs" "1/2",
	Break "break" "1",
	Breq "breq" "1/2",
	Brge "brge" "1/2",
	Brhc "brhc" "1/2",
	Brhs "brhs" "1/2",
	Brid "brid" "1/2",
	Brie "brie" "1/2",
	Brlo "brlo" "1/2",
	Brlt "brlt" "1/2",
	Brmi "brmi" "1/2",
	Brne "brne" "1/2",
	Brpl "brpl" "1/2",
	Brsh "brsh" "1/2",
	Brtc "brtc" "1/2",
	Brts "brts" "1/2",
	Brvc "brvc" "1/2",
	Brvs "brvs" "1/2",
	Bset "bset" "1",
	Bst "bst" "1",
	Call "call" "4",
	Cbi "cbi" "2",
	Clc "clc" "1",
	Clh "clh" "1",
	Cli "cli" "1",
	Cln "cln" "1",
	Cls "cls" "1",
	Clt "clt" "1",
	Clv "clv" "1",
	Clz "clz" "1",
	Com "com" "1",
	Cp "cp" "1",
	Cpc "cpc" "1",
	Cpi "cpi" "1",
	Cpse "cpse" "1-3",
	Dec "dec" "1",
	Eicall "eicall" "4",
	Eijmp "eijmp" "2",
	Elpm "elpm" "3",
	ElpmZ "elpm" "3",
	ElpmZInc "elpm" "3",
	Eor "eor" "1",
	Fmul "fmul" "2",
	Fmuls "fmuls" "2",
	Fmulsu "fmulsu" "2",
	Icall "icall" "3",
	Ijmp "ijmp" "2",
	In "in" "1",
	Inc "inc" "1",
	Jmp "jmp" "3",
	LdX "ld" "2",
	LdXInc "ld" "2",
	LdXDec "ld" "3",
	LdY "ld" "2",
	LdYInc "ld" "2",
	LdYDec "ld" "3",
	LddY "ldd" "2",
	LdZ "ld" "2",
	LdZInc "ld" "2",
	LdZDec "ld" "3",
	LddZ "ldd" "2",
	Ldi "ldi" "1",
	Lds "lds" "2",
	Lpm "lpm" "3",
	LpmZ "lpm" "3",
	LpmZInc "lpm" "3",
	Lsr "lsr" "1",
	Mov "mov" "1",
	Movw "movw" "1",
	Mul "mul" "2",
	Muls "muls" "2",
	Mulsu "mulsu" "2",
	Neg "neg" "1",
	Nop "nop" "1",
	Or "or" "1",
	Ori "ori" "1",
	Out "out" "1",
	Pop "pop" "2",
	Push "push" "2",
	Rcall "rcall" "3",
	Ret "ret" "4",
	Reti "reti" "4",
	Rjmp "rjmp" "2",
	Ror "ror" "1",
	Sbc "sbc" "1",
	Sbci "sbci" "1",
	Sbi "sbi" "2",
	Sbic "sbic" "1-3",
	Sbis "sbis" "1-3",
	Sbiw "sbiw" "2",
	Sbr "sbr" "1",
	Sbrc "sbrc" "1-3",
	Sbrs "sbrs" "1-3",
	Sec "sec" "1",
	Seh "seh" "1",
	Sei "sei" "1",
	Sen "sen" "1",
	Ser "ser" "1",
	Ses "ses" "1",
	Set "set" "1",
	Sev "sev" "1",
	Sez "sez" "1",
	Sleep "sleep" "1",
	Spm "spm" "-",
	StX "st" "2",
	StXInc "st" "2",
	StXDec "st" "2",
	StY "st" "2",
	StYInc "st" "2",
	StYDec "st" "2",
	StdY "std" "2",
	StZ "st" "2",
	StZInc "st" "2",
	StZDec "st" "2",
	StdZ "std" "2",
	Sts "sts" "2",
	Sub "sub" "1",
	Subi "subi" "1",
	Swap "swap" "1",
	Wdr "wdr" "1",
}

impl Mnemonic
{
	pub fn info(&self) -> &'static OpcodeInfo {
		&OPCODES[*self as usize]
	}
	/// Assembler mnemonic text
	pub fn name(&self) -> &'static str {
		self.info().name
	}
	pub fn clocks(&self) -> &'static str {
		self.info().clocks
	}
	/// Identity name, distinguishes addressing forms (e.g. "LdXInc")
	pub fn ident(&self) -> &'static str {
		self.into()
	}
}

/// Verify that the definition table is indexed by mnemonic identity
pub fn check_table() -> Result<(), String>
{
	if OPCODES.len() != Mnemonic::COUNT {
		return Err( format!("{} table entries for {} mnemonics", OPCODES.len(), Mnemonic::COUNT) );
	}
	for (i, info) in OPCODES.iter().enumerate()
	{
		if info.mnemonic as usize != i {
			return Err( format!("entry {} ({}) describes {}", i, info.name, info.mnemonic.ident()) );
		}
	}
	Ok( () )
}


// vim: ft=rust
