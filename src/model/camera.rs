use std::time::Duration;

/// Image tuning shared by every capture mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	/// -100 to 100
	pub sharpness: i32,
	/// -100 to 100
	pub contrast: i32,
	/// 0 to 100
	pub brightness: i32,
	/// -100 to 100
	pub saturation: i32,
	/// 0 lets the firmware pick
	pub iso: u32,
	pub video_stabilisation: bool,
	/// -10 to 10
	pub exposure_compensation: i32,
	pub exposure_mode: ExposureMode,
	pub metering_mode: MeteringMode,
	pub awb_mode: AwbMode,
	pub image_effect: ImageEffect,
	pub colour_effect: Option<ColourEffect>,
	/// Degrees, 0 to 359
	pub rotation: u32,
	pub hflip: bool,
	pub vflip: bool,
	pub region_of_interest: RegionOfInterest,
	/// Zero lets the firmware pick
	pub shutter_speed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExposureMode {
	Off,
	Auto,
	Night,
	NightPreview,
	Backlight,
	Spotlight,
	Sports,
	Snow,
	Beach,
	VeryLong,
	FixedFps,
	AntiShake,
	Fireworks,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeteringMode {
	Average,
	Spot,
	Backlit,
	Matrix,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwbMode {
	Off,
	Auto,
	Sun,
	Cloud,
	Shade,
	Tungsten,
	Fluorescent,
	Incandescent,
	Flash,
	Horizon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageEffect {
	None,
	Negative,
	Solarise,
	Sketch,
	Denoise,
	Emboss,
	OilPaint,
	Hatch,
	GPen,
	Pastel,
	Watercolour,
	Film,
	Blur,
	Saturation,
	ColourSwap,
	WashedOut,
	Posterise,
	ColourPoint,
	ColourBalance,
	Cartoon,
}

/// Fixed chroma applied to the whole frame, serialized as `U:V`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColourEffect {
	pub u: u8,
	pub v: u8,
}

/// Sensor crop, normalised to `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionOfInterest {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}
