/// The on-screen preview raspistill/raspivid draws while capturing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preview {
	pub mode: PreviewMode,
	/// 0 is transparent, 255 opaque. Ignored while the preview is disabled.
	pub opacity: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewMode {
	Fullscreen,
	Window(Rect),
	Disabled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
}
