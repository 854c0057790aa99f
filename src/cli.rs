use std::net::{SocketAddr, SocketAddrV4};
use std::str::FromStr;
use std::time::Duration;

use hyper::Server;
use hyper::server::Builder;
use hyper::server::conn::AddrIncoming;
use raspicam::{Camera, Preview, StillCapture, VidCapture};
use tokio::io::Result as IoResult;
use tokio::net::TcpListener;

#[derive(FromArgs)]
/// serve a raspivid H.264 stream over TCP and raspistill snapshots over HTTP
pub struct CliArgs {
	#[argh(option, short = 'o', default = "SocketAddrV4::new([0, 0, 0, 0].into(), 1264)")]
	/// the host (ipv4) to bind to for the video stream (default: 0.0.0.0:1264)
	pub video_host: SocketAddrV4,
	#[argh(option, default = "SocketAddrV4::new([0, 0, 0, 0].into(), 8080)")]
	/// the host (ipv4) to bind to for the image http server (default: 0.0.0.0:8080)
	pub image_host: SocketAddrV4,
	#[argh(option, short = 'v', default = "Default::default()")]
	/// the video resolution specified in units of pixel in the form of WxH (default: 1280x720)
	pub video_resolution: Resolution,
	#[argh(option, short = 'i', default = "Default::default()")]
	/// the image resolution specified in units of pixel in the form of WxH (default: 1280x720)
	pub image_resolution: Resolution,
	#[argh(option, short = 'r', default = "Default::default()")]
	/// the number of degrees the camera is rotated by (available options: 0, 90, 180, 270) (default: 0)
	pub rotation: Rotation,
	#[argh(switch)]
	/// mirror the image horizontally
	pub hflip: bool,
	#[argh(switch)]
	/// mirror the image vertically
	pub vflip: bool,
	#[argh(option, short = 'b')]
	/// the video bitrate in bits per second (default: raspivid's)
	pub bitrate: Option<u32>,
	#[argh(option, short = 'f')]
	/// the video framerate in frames per second (default: raspivid's)
	pub framerate: Option<u32>,
	#[argh(option)]
	/// the number of frames between key frames (default: raspivid's)
	pub intra: Option<u32>,
	#[argh(option, short = 'q')]
	/// the JPEG quality of snapshots, 0 to 100 (default: raspistill's)
	pub quality: Option<u8>,
	#[argh(option, default = "1000")]
	/// the delay in milliseconds before a snapshot is taken (default: 1000)
	pub snapshot_delay: u64,
	#[argh(option, default = "String::new()")]
	/// the executable to run instead of raspivid
	pub raspivid: String,
	#[argh(option, default = "String::new()")]
	/// the executable to run instead of raspistill
	pub raspistill: String,
	#[argh(option)]
	/// an extra argument passed verbatim to raspivid (repeatable)
	pub video_arg: Vec<String>,
	#[argh(option)]
	/// an extra argument passed verbatim to raspistill (repeatable)
	pub image_arg: Vec<String>,
}

impl CliArgs {
	fn camera(&self) -> Camera {
		Camera {
			rotation: self.rotation.degrees(),
			hflip: self.hflip,
			vflip: self.vflip,
			..Camera::DEFAULT
		}
	}

	/// Streams until killed.
	pub fn video_capture(&self) -> VidCapture {
		let mut vid = VidCapture::new();
		vid.timeout = Duration::ZERO;
		vid.width = self.video_resolution.width;
		vid.height = self.video_resolution.height;
		if let Some(bitrate) = self.bitrate {
			vid.mode.bitrate = bitrate;
		}
		if let Some(framerate) = self.framerate {
			vid.mode.framerate = framerate;
		}
		if let Some(intra) = self.intra {
			vid.mode.intra_period = intra;
		}
		vid.camera = self.camera();
		vid.preview = Preview::DISABLED;
		vid.command = self.raspivid.clone();
		vid.args = self.video_arg.clone();

		vid
	}

	pub fn image_capture(&self) -> StillCapture {
		let mut still = StillCapture::new();
		still.timeout = Duration::from_millis(self.snapshot_delay);
		still.width = self.image_resolution.width;
		still.height = self.image_resolution.height;
		if let Some(quality) = self.quality {
			still.mode.quality = quality;
		}
		still.camera = self.camera();
		still.preview = Preview::DISABLED;
		still.command = self.raspistill.clone();
		still.args = self.image_arg.clone();

		still
	}

	pub async fn start_listening_for_video(&self) -> IoResult<TcpListener> {
		TcpListener::bind(&self.video_host).await
	}

	pub fn start_listening_for_image(&self) -> hyper::Result<Builder<AddrIncoming>> {
		Server::try_bind(&SocketAddr::V4(self.image_host))
	}
}

#[derive(Debug, PartialEq)]
pub struct Resolution {
	pub width: u32,
	pub height: u32,
}

impl Default for Resolution {
	fn default() -> Self {
		Resolution {
			width: 1280,
			height: 720,
		}
	}
}

impl FromStr for Resolution {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (width, height) = s.split_once('x')
			.ok_or_else(|| format!("failed to split the resolution {} by the delimiter 'x'", s))?;
		let parse = |n: &str| n.parse().map_err(|_| format!("invalid resolution {}", s));

		Ok(Resolution { width: parse(width)?, height: parse(height)? })
	}
}

#[derive(Debug, PartialEq)]
pub enum Rotation {
	Normal,
	Clockwise90,
	UpsideDown,
	Anticlockwise90,
}

impl Rotation {
	pub fn degrees(&self) -> u32 {
		match self {
			Rotation::Normal => 0,
			Rotation::Clockwise90 => 90,
			Rotation::UpsideDown => 180,
			Rotation::Anticlockwise90 => 270,
		}
	}
}

impl Default for Rotation {
	fn default() -> Self {
		Rotation::Normal
	}
}

impl FromStr for Rotation {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"0" => Rotation::Normal,
			"90" => Rotation::Clockwise90,
			"180" => Rotation::UpsideDown,
			"270" => Rotation::Anticlockwise90,
			_ => return Err(format!("unknown rotation {}", s))
		})
	}
}
