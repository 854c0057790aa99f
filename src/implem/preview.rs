use std::fmt::{self, Display, Formatter};

use crate::implem::params::Params;
use crate::model::preview::{Preview, PreviewMode, Rect};

impl Preview {
	pub const DEFAULT: Preview = Preview {
		mode: PreviewMode::Fullscreen,
		opacity: 255,
	};

	/// Headless captures.
	pub const DISABLED: Preview = Preview {
		mode: PreviewMode::Disabled,
		..Preview::DEFAULT
	};

	pub(crate) fn write_params(&self, params: &mut Params) {
		let d = &Preview::DEFAULT;

		if self.mode != d.mode {
			match self.mode {
				PreviewMode::Fullscreen => params.flag("--fullscreen"),
				PreviewMode::Window(rect) => params.flag("--preview").value(rect),
				PreviewMode::Disabled => params.flag("--nopreview"),
			};
		}

		// Nothing is drawn, so opacity means nothing
		if self.mode != PreviewMode::Disabled {
			params.diff("--opacity", self.opacity, d.opacity);
		}
	}
}

impl Default for Preview {
	fn default() -> Self {
		Preview::DEFAULT
	}
}

impl Display for Rect {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
	}
}
