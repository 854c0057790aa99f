use std::io::ErrorKind;
use std::process::Stdio;

use tokio::process::{Child, Command};

use crate::error::{CaptureError, Result};
use crate::implem::capture::CaptureCommand;

/// A resolved executable plus its argv, detached from the configuration
/// that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraArgs {
	cmd: String,
	args: Vec<String>,
}

impl<C: CaptureCommand + ?Sized> From<&C> for CameraArgs {
	fn from(capture: &C) -> Self {
		CameraArgs {
			cmd: capture.cmd().to_string(),
			args: capture.params(),
		}
	}
}

impl CameraArgs {
	pub fn cmd(&self) -> &str {
		&self.cmd
	}

	pub fn args(&self) -> &[String] {
		&self.args
	}

	/// Starts the binary with its image on a piped stdout.
	pub fn spawn(&self) -> Result<Child> {
		debug!("Spawning {} {:?}", self.cmd, self.args);

		Command::new(&self.cmd)
			.args(&self.args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::inherit())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| self.launch_error(e))
	}

	/// Runs the binary to completion and returns everything it wrote to stdout.
	pub async fn capture(&self) -> Result<Vec<u8>> {
		let output = self.spawn()?.wait_with_output().await?;

		if !output.status.success() {
			return Err(CaptureError::Exit {
				cmd: self.cmd.clone(),
				status: output.status,
			});
		}

		Ok(output.stdout)
	}

	fn launch_error(&self, e: std::io::Error) -> CaptureError {
		if e.kind() == ErrorKind::NotFound {
			CaptureError::NotFound(self.cmd.clone())
		} else {
			CaptureError::Launch {
				cmd: self.cmd.clone(),
				source: e,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::capture::{StillCapture, VidCapture};

	#[test]
	fn takes_cmd_and_params_from_capture() {
		let mut vid = VidCapture::new();
		vid.width = 1280;

		let args = CameraArgs::from(&vid);

		assert_eq!(args.cmd(), "raspivid");
		assert_eq!(args.args().to_vec(), vec!["--output", "-", "--width", "1280"]);
	}

	#[test]
	fn works_through_trait_objects() {
		let still: Box<dyn CaptureCommand> = Box::new(StillCapture::new());

		assert_eq!(CameraArgs::from(still.as_ref()).cmd(), "raspistill");
	}

	#[tokio::test]
	async fn missing_binary_is_not_found() {
		let mut still = StillCapture::new();
		still.command = "/nonexistent/raspistill".to_string();

		let err = CameraArgs::from(&still).capture().await.unwrap_err();

		assert!(matches!(err, CaptureError::NotFound(cmd) if cmd == "/nonexistent/raspistill"));
	}
}
