/// `Display` and `FromStr` over the names the binaries accept.
macro_rules! named_modes {
	($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
		impl ::std::fmt::Display for $ty {
			fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
				f.write_str(match self {
					$($ty::$variant => $name),+
				})
			}
		}

		impl ::std::str::FromStr for $ty {
			type Err = String;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Ok(match s.to_lowercase().as_str() {
					$($name => $ty::$variant,)+
					_ => return Err(format!("unknown {} {}", stringify!($ty), s))
				})
			}
		}
	};
}

pub mod camera;
pub mod capture;
pub mod params;
pub mod preview;
pub mod process;
