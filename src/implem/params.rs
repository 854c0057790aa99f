use std::fmt::Display;

/// Ordered argv for a camera binary.
///
/// A value is only written when it differs from its default, so a freshly
/// built configuration produces nothing beyond `--output -`. A value set back
/// to its default is indistinguishable from one that was never touched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params {
	args: Vec<String>,
}

impl Params {
	/// Every capture writes to stdout.
	pub fn to_stdout() -> Self {
		let mut params = Params::default();
		params.flag("--output").value("-");

		params
	}

	pub fn flag(&mut self, flag: &str) -> &mut Self {
		self.value(flag)
	}

	/// `flag value` when `value != default`.
	pub fn diff<T: PartialEq + Display>(&mut self, flag: &str, value: T, default: T) -> &mut Self {
		if value != default {
			self.value(flag).value(value);
		}

		self
	}

	/// `flag value` when `value != default`, with the value written through `format`.
	pub fn diff_by<T: PartialEq, V: Display>(&mut self, flag: &str, value: T, default: T, format: impl Fn(&T) -> V) -> &mut Self {
		if value != default {
			self.value(flag).value(format(&value));
		}

		self
	}

	/// A bare `flag` when the switch is on and the default is off.
	pub fn switch(&mut self, flag: &str, value: bool, default: bool) -> &mut Self {
		if value && !default {
			self.value(flag);
		}

		self
	}

	/// `flag value` when a value is present and differs from the default.
	pub fn optional<T: PartialEq + Display>(&mut self, flag: &str, value: Option<T>, default: Option<T>) -> &mut Self {
		match value {
			Some(value) if Some(&value) != default.as_ref() => self.value(flag).value(value),
			_ => self,
		}
	}

	/// Append without diffing or splitting.
	pub fn raw(&mut self, args: &[String]) -> &mut Self {
		self.args.extend(args.iter().cloned());

		self
	}

	pub fn value<T: Display>(&mut self, token: T) -> &mut Self {
		self.args.push(token.to_string());

		self
	}

	pub fn into_vec(self) -> Vec<String> {
		self.args
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	#[test]
	fn starts_with_stdout() {
		assert_eq!(Params::to_stdout().into_vec(), vec!["--output", "-"]);
	}

	#[test]
	fn diff_skips_defaults() {
		let mut params = Params::default();
		params
			.diff("--width", 100, 1920)
			.diff("--height", 1080, 1080)
			.diff("--ev", -3, 0);

		assert_eq!(params.into_vec(), vec!["--width", "100", "--ev", "-3"]);
	}

	#[test]
	fn diff_by_compares_before_formatting() {
		let mut params = Params::default();
		params
			.diff_by("--timeout", Duration::from_micros(5_000_500), Duration::from_secs(5), Duration::as_millis)
			.diff_by("--shutter", Duration::from_micros(10), Duration::from_micros(10), Duration::as_micros);

		assert_eq!(params.into_vec(), vec!["--timeout", "5000"]);
	}

	#[test]
	fn switch_only_turns_on() {
		let mut params = Params::default();
		params
			.switch("--vstab", true, false)
			.switch("--hflip", false, false)
			.switch("--vflip", false, true);

		assert_eq!(params.into_vec(), vec!["--vstab"]);
	}

	#[test]
	fn optional_skips_absent_values() {
		let mut params = Params::default();
		params
			.optional("--colfx", None::<u8>, None)
			.optional("--intra", Some(10), Some(10))
			.optional("--quality", Some(75), None);

		assert_eq!(params.into_vec(), vec!["--quality", "75"]);
	}

	#[test]
	fn raw_keeps_whitespace() {
		let mut params = Params::default();
		params.raw(&["--annotate".to_string(), "front door".to_string()]);

		assert_eq!(params.into_vec(), vec!["--annotate", "front door"]);
	}
}
