//! Argument building for the Raspberry Pi camera binaries.
//!
//! Each capture configuration starts from the defaults raspistill and raspivid
//! use themselves and only turns the fields that were changed into flags, so the
//! resulting argv stays short and readable in a process listing.
//!
//! ```
//! use raspicam::{CameraArgs, CaptureCommand, StillCapture};
//!
//! let mut still = StillCapture::new();
//! still.width = 1280;
//! still.height = 720;
//! assert_eq!(still.params(), ["--output", "-", "--width", "1280", "--height", "720"]);
//!
//! let args = CameraArgs::from(&still);
//! assert_eq!(args.cmd(), "raspistill");
//! ```
//!
//! Configurations share no state, so independent instances can be used from
//! different threads. Mutating a single instance concurrently is up to the caller
//! to serialize.

#[macro_use]
extern crate log;

pub mod error;
mod implem;
pub mod model;

pub use error::{CaptureError, Result};
pub use implem::capture::{CaptureCommand, CaptureMode, RASPISTILL, RASPIVID};
pub use implem::params::Params;
pub use implem::process::CameraArgs;
pub use model::camera::{AwbMode, Camera, ColourEffect, ExposureMode, ImageEffect, MeteringMode, RegionOfInterest};
pub use model::capture::{Capture, Encoding, Still, StillCapture, StillYuv, StillYuvCapture, Vid, VidCapture};
pub use model::preview::{Preview, PreviewMode, Rect};
