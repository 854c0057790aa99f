use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use crate::implem::params::Params;
use crate::model::camera::{AwbMode, Camera, ColourEffect, ExposureMode, ImageEffect, MeteringMode, RegionOfInterest};

impl Camera {
	/// What raspistill/raspivid use when no flag is given.
	pub const DEFAULT: Camera = Camera {
		sharpness: 0,
		contrast: 0,
		brightness: 50,
		saturation: 0,
		iso: 0,
		video_stabilisation: false,
		exposure_compensation: 0,
		exposure_mode: ExposureMode::Auto,
		metering_mode: MeteringMode::Average,
		awb_mode: AwbMode::Auto,
		image_effect: ImageEffect::None,
		colour_effect: None,
		rotation: 0,
		hflip: false,
		vflip: false,
		region_of_interest: RegionOfInterest::FULL,
		shutter_speed: Duration::ZERO,
	};

	pub(crate) fn write_params(&self, params: &mut Params) {
		let d = &Camera::DEFAULT;

		params
			.diff("--sharpness", self.sharpness, d.sharpness)
			.diff("--contrast", self.contrast, d.contrast)
			.diff("--brightness", self.brightness, d.brightness)
			.diff("--saturation", self.saturation, d.saturation)
			.diff("--ISO", self.iso, d.iso)
			.switch("--vstab", self.video_stabilisation, d.video_stabilisation)
			.diff("--ev", self.exposure_compensation, d.exposure_compensation)
			.diff("--exposure", self.exposure_mode, d.exposure_mode)
			.diff("--metering", self.metering_mode, d.metering_mode)
			.diff("--awb", self.awb_mode, d.awb_mode)
			.diff("--imxfx", self.image_effect, d.image_effect)
			.optional("--colfx", self.colour_effect, d.colour_effect)
			.diff("--rotation", self.rotation, d.rotation)
			.switch("--hflip", self.hflip, d.hflip)
			.switch("--vflip", self.vflip, d.vflip)
			.diff("--roi", self.region_of_interest, d.region_of_interest)
			.diff_by("--shutter", self.shutter_speed, d.shutter_speed, Duration::as_micros);
	}
}

impl Default for Camera {
	fn default() -> Self {
		Camera::DEFAULT
	}
}

impl RegionOfInterest {
	pub const FULL: RegionOfInterest = RegionOfInterest {
		x: 0.0,
		y: 0.0,
		width: 1.0,
		height: 1.0,
	};
}

impl Display for RegionOfInterest {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
	}
}

impl Display for ColourEffect {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.u, self.v)
	}
}

impl FromStr for ColourEffect {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (u, v) = s.split_once(':')
			.ok_or_else(|| format!("expected U:V, got {}", s))?;
		let parse = |c: &str| c.parse().map_err(|_| format!("colour component out of range: {}", c));

		Ok(ColourEffect { u: parse(u)?, v: parse(v)? })
	}
}

named_modes!(ExposureMode {
	Off => "off",
	Auto => "auto",
	Night => "night",
	NightPreview => "nightpreview",
	Backlight => "backlight",
	Spotlight => "spotlight",
	Sports => "sports",
	Snow => "snow",
	Beach => "beach",
	VeryLong => "verylong",
	FixedFps => "fixedfps",
	AntiShake => "antishake",
	Fireworks => "fireworks",
});

named_modes!(MeteringMode {
	Average => "average",
	Spot => "spot",
	Backlit => "backlit",
	Matrix => "matrix",
});

named_modes!(AwbMode {
	Off => "off",
	Auto => "auto",
	Sun => "sun",
	Cloud => "cloud",
	Shade => "shade",
	Tungsten => "tungsten",
	Fluorescent => "fluorescent",
	Incandescent => "incandescent",
	Flash => "flash",
	Horizon => "horizon",
});

named_modes!(ImageEffect {
	None => "none",
	Negative => "negative",
	Solarise => "solarise",
	Sketch => "sketch",
	Denoise => "denoise",
	Emboss => "emboss",
	OilPaint => "oilpaint",
	Hatch => "hatch",
	GPen => "gpen",
	Pastel => "pastel",
	Watercolour => "watercolour",
	Film => "film",
	Blur => "blur",
	Saturation => "saturation",
	ColourSwap => "colourswap",
	WashedOut => "washedout",
	Posterise => "posterise",
	ColourPoint => "colourpoint",
	ColourBalance => "colourbalance",
	Cartoon => "cartoon",
});

#[cfg(test)]
mod tests {
	use super::*;

	fn params(camera: &Camera) -> Vec<String> {
		let mut params = Params::default();
		camera.write_params(&mut params);
		params.into_vec()
	}

	#[test]
	fn default_camera_writes_nothing() {
		assert!(params(&Camera::default()).is_empty());
	}

	#[test]
	fn fields_follow_flag_order() {
		let camera = Camera {
			saturation: -20,
			iso: 800,
			video_stabilisation: true,
			exposure_mode: ExposureMode::Night,
			awb_mode: AwbMode::Tungsten,
			colour_effect: Some(ColourEffect { u: 128, v: 128 }),
			vflip: true,
			shutter_speed: Duration::from_millis(20),
			..Camera::DEFAULT
		};

		assert_eq!(params(&camera), vec![
			"--saturation", "-20",
			"--ISO", "800",
			"--vstab",
			"--exposure", "night",
			"--awb", "tungsten",
			"--colfx", "128:128",
			"--vflip",
			"--shutter", "20000",
		]);
	}

	#[test]
	fn sub_microsecond_shutter_is_still_written() {
		let camera = Camera {
			shutter_speed: Duration::from_nanos(500),
			..Camera::DEFAULT
		};

		assert_eq!(params(&camera), vec!["--shutter", "0"]);
	}

	#[test]
	fn region_of_interest_is_comma_separated() {
		let camera = Camera {
			region_of_interest: RegionOfInterest { x: 0.25, y: 0.25, width: 0.5, height: 0.5 },
			..Camera::DEFAULT
		};

		assert_eq!(params(&camera), vec!["--roi", "0.25,0.25,0.5,0.5"]);
	}

	#[test]
	fn mode_names_round_trip_through_from_str() {
		assert_eq!("NightPreview".parse::<ExposureMode>(), Ok(ExposureMode::NightPreview));
		assert_eq!(ImageEffect::ColourSwap.to_string(), "colourswap");
		assert!("bogus".parse::<MeteringMode>().is_err());
	}

	#[test]
	fn colour_effect_parses_u_v() {
		assert_eq!("10:200".parse::<ColourEffect>(), Ok(ColourEffect { u: 10, v: 200 }));
		assert!("10".parse::<ColourEffect>().is_err());
		assert!("10:300".parse::<ColourEffect>().is_err());
	}
}
