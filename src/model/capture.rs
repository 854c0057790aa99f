use std::time::Duration;

use crate::model::camera::Camera;
use crate::model::preview::Preview;

/// Everything needed to invoke one of the camera binaries.
///
/// The fields every mode shares live here, the mode specific ones in `mode`.
/// Start from [`Capture::new`] and mutate the fields directly; nothing is
/// validated until the binary itself parses its arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture<M> {
	/// Delay before the capture is taken (or the length of a recording)
	pub timeout: Duration,
	pub width: u32,
	pub height: u32,
	pub mode: M,
	pub camera: Camera,
	pub preview: Preview,
	/// Executable to run instead of the mode's default, when not empty
	pub command: String,
	/// Appended verbatim after every derived flag
	pub args: Vec<String>,
}

/// raspistill writing an encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Still {
	/// 0 to 100
	pub quality: u8,
	/// Add the raw bayer data to the JPEG metadata
	pub raw: bool,
	pub encoding: Encoding,
}

/// raspistill writing uncompressed planes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StillYuv {
	/// Emit RGB instead of YUV420
	pub use_rgb: bool,
}

/// raspivid writing a raw H.264 stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vid {
	/// Bits per second
	pub bitrate: u32,
	/// Frames per second
	pub framerate: u32,
	/// Frames between key frames, 0 keeps the encoder's choice
	pub intra_period: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
	Jpeg,
	Bmp,
	Gif,
	Png,
}

pub type StillCapture = Capture<Still>;
pub type StillYuvCapture = Capture<StillYuv>;
pub type VidCapture = Capture<Vid>;
