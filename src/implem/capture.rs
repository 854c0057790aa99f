use std::time::Duration;

use crate::implem::params::Params;
use crate::model::camera::Camera;
use crate::model::capture::{Capture, Encoding, Still, StillYuv, Vid};
use crate::model::preview::Preview;

pub const RASPISTILL: &str = "raspistill";
pub const RASPIVID: &str = "raspivid";

/// A camera binary invocation: what to run and with which argv.
pub trait CaptureCommand {
	/// The override when one is set, otherwise the mode's binary.
	fn cmd(&self) -> &str;

	/// `--output -`, then every non-default field, then the raw extra arguments.
	/// One token per element, never joined.
	fn params(&self) -> Vec<String>;
}

/// Per-mode defaults and fields for [`Capture`].
pub trait CaptureMode: Clone + Sized {
	const COMMAND: &'static str;
	const DEFAULT: Capture<Self>;

	/// Writes the mode specific flags, diffed against `Self::DEFAULT`.
	fn write_params(&self, params: &mut Params);
}

impl<M: CaptureMode> Capture<M> {
	pub fn new() -> Self {
		M::DEFAULT
	}
}

impl<M: CaptureMode> Default for Capture<M> {
	fn default() -> Self {
		Capture::new()
	}
}

impl<M: CaptureMode> CaptureCommand for Capture<M> {
	fn cmd(&self) -> &str {
		if self.command.is_empty() {
			M::COMMAND
		} else {
			&self.command
		}
	}

	fn params(&self) -> Vec<String> {
		let d = M::DEFAULT;
		let mut params = Params::to_stdout();

		params
			.diff_by("--timeout", self.timeout, d.timeout, Duration::as_millis)
			.diff("--width", self.width, d.width)
			.diff("--height", self.height, d.height);
		self.mode.write_params(&mut params);
		self.camera.write_params(&mut params);
		self.preview.write_params(&mut params);
		params.raw(&self.args);

		params.into_vec()
	}
}

impl CaptureMode for Still {
	const COMMAND: &'static str = RASPISTILL;
	const DEFAULT: Capture<Self> = Capture {
		timeout: Duration::from_secs(5),
		width: 2592,
		height: 1944,
		mode: Still {
			quality: 85,
			raw: false,
			encoding: Encoding::Jpeg,
		},
		camera: Camera::DEFAULT,
		preview: Preview::DEFAULT,
		command: String::new(),
		args: Vec::new(),
	};

	fn write_params(&self, params: &mut Params) {
		let d = Self::DEFAULT.mode;

		params
			.diff("--quality", self.quality, d.quality)
			.switch("--raw", self.raw, d.raw)
			.diff("--encoding", self.encoding, d.encoding);
	}
}

impl CaptureMode for StillYuv {
	const COMMAND: &'static str = RASPISTILL;
	const DEFAULT: Capture<Self> = Capture {
		timeout: Duration::from_secs(5),
		width: 2592,
		height: 1944,
		mode: StillYuv {
			use_rgb: false,
		},
		camera: Camera::DEFAULT,
		preview: Preview::DEFAULT,
		command: String::new(),
		args: Vec::new(),
	};

	fn write_params(&self, params: &mut Params) {
		params.switch("--rgb", self.use_rgb, Self::DEFAULT.mode.use_rgb);
	}
}

impl CaptureMode for Vid {
	const COMMAND: &'static str = RASPIVID;
	const DEFAULT: Capture<Self> = Capture {
		timeout: Duration::from_secs(5),
		width: 1920,
		height: 1080,
		mode: Vid {
			bitrate: 17_000_000,
			framerate: 30,
			intra_period: 0,
		},
		camera: Camera::DEFAULT,
		preview: Preview::DEFAULT,
		command: String::new(),
		args: Vec::new(),
	};

	fn write_params(&self, params: &mut Params) {
		let d = Self::DEFAULT.mode;

		params
			.diff("--bitrate", self.bitrate, d.bitrate)
			.diff("--framerate", self.framerate, d.framerate)
			.diff("--intra", self.intra_period, d.intra_period);
	}
}

named_modes!(Encoding {
	Jpeg => "jpg",
	Bmp => "bmp",
	Gif => "gif",
	Png => "png",
});

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::capture::{StillCapture, StillYuvCapture, VidCapture};

	#[test]
	fn still_fields_follow_dimensions() {
		let mut still = StillCapture::new();
		still.height = 480;
		still.mode.quality = 100;
		still.mode.raw = true;
		still.mode.encoding = Encoding::Png;

		assert_eq!(still.params(), vec![
			"--output", "-",
			"--height", "480",
			"--quality", "100",
			"--raw",
			"--encoding", "png",
		]);
	}

	#[test]
	fn still_yuv_has_no_jpeg_fields() {
		let mut yuv = StillYuvCapture::new();
		yuv.mode.use_rgb = true;

		assert_eq!(yuv.params(), vec!["--output", "-", "--rgb"]);
	}

	#[test]
	fn vid_fields_precede_camera_and_preview() {
		let mut vid = VidCapture::new();
		vid.timeout = Duration::ZERO;
		vid.mode.bitrate = 4_000_000;
		vid.mode.framerate = 25;
		vid.mode.intra_period = 50;
		vid.camera.rotation = 180;
		vid.preview = Preview::DISABLED;

		assert_eq!(vid.params(), vec![
			"--output", "-",
			"--timeout", "0",
			"--bitrate", "4000000",
			"--framerate", "25",
			"--intra", "50",
			"--rotation", "180",
			"--nopreview",
		]);
	}

	#[test]
	fn timeout_is_whole_milliseconds() {
		let mut still = StillCapture::new();
		still.timeout = Duration::from_micros(1_500_900);

		assert_eq!(still.params(), vec!["--output", "-", "--timeout", "1500"]);
	}

	#[test]
	fn sub_millisecond_change_still_writes_timeout() {
		let mut vid = VidCapture::new();
		vid.timeout = Duration::from_micros(5_000_500);

		assert_eq!(vid.params(), vec!["--output", "-", "--timeout", "5000"]);
	}

	#[test]
	fn defaults_are_not_shared_between_instances() {
		let mut first = VidCapture::new();
		first.camera.brightness = 80;
		first.args.push("--inline".to_string());

		assert_eq!(VidCapture::new().camera.brightness, 50);
		assert!(VidCapture::new().args.is_empty());
		assert_eq!(Vid::DEFAULT.camera, Camera::DEFAULT);
	}

	#[test]
	fn encoding_names() {
		assert_eq!(Encoding::Jpeg.to_string(), "jpg");
		assert_eq!("BMP".parse::<Encoding>(), Ok(Encoding::Bmp));
	}
}
