pub mod camera;
pub mod capture;
pub mod preview;
