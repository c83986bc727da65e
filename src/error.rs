// avrdis
// - By John Hodge (thePowersGang)
//
// error.rs
// - Crate error type
use thiserror::Error;

/// Builds an `Error::TagFile` for the given line
macro_rules! tagfile_error {
	($line:expr, $msg:expr) => {
		crate::error::Error::TagFile {
			line: $line,
			message: $msg.to_string(),
		}
	};
	($line:expr, $fmt:expr, $($arg:tt)*) => {
		crate::error::Error::TagFile {
			line: $line,
			message: format!($fmt, $($arg)*),
		}
	};
}

#[derive(Error, Debug)]
pub enum Error
{
	/// The opcode definition table and the registry disagree on mnemonic identities.
	///
	/// Detected before any output is produced, and aborts the run.
	#[error("Opcode table broken: {0}")]
	TableMismatch(String),

	/// A handler substitution named a mnemonic that has no registered pattern
	#[error("No opcode registered for mnemonic '{0}', cannot supersede")]
	NotRegistered(&'static str),

	/// Malformed line in a tag file
	#[error("Tag file line {line}: {message}")]
	TagFile {
		line: usize,
		message: String,
	},

	/// Bad command line
	#[error("{0}")]
	Usage(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The output sink refused a write
	#[error("Output error")]
	Output(#[from] std::fmt::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

// vim: ft=rust
