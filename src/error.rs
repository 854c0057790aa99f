use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// Why a camera binary did not hand back its output.
#[derive(Error, Debug)]
pub enum CaptureError {
	#[error("camera executable not found: {0}")]
	NotFound(String),

	#[error("failed to launch {cmd}: {source}")]
	Launch {
		cmd: String,
		#[source]
		source: io::Error,
	},

	#[error("{cmd} exited with {status}")]
	Exit {
		cmd: String,
		status: ExitStatus,
	},

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
