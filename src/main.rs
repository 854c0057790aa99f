#[macro_use]
extern crate argh;
extern crate env_logger;
extern crate hyper;
#[macro_use]
extern crate log;
extern crate tokio;

use log::LevelFilter;
use raspicam::CameraArgs;

use crate::cli::CliArgs;
use crate::service::image::{ImageWrapper, listen_for_new_image_requests};
use crate::service::video::{listen_for_new_video_sockets, VideoWrapper};
use crate::utils::am;

mod cli;
mod service;
mod utils;

#[tokio::main]
async fn main() {
	let args = argh::from_env::<CliArgs>();

	env_logger::builder()
		.filter_level(LevelFilter::Info)
		.parse_default_env()
		.init();

	let camera = am(());
	let vw = VideoWrapper::create(CameraArgs::from(&args.video_capture()), camera.clone());
	let iw = ImageWrapper::create(CameraArgs::from(&args.image_capture()), vw.clone(), camera);

	let img = match args.start_listening_for_image() {
		Ok(img) => img,
		Err(e) => {
			error!("Failed to bind the image server to {}: {}", args.image_host, e);
			std::process::exit(1);
		}
	};
	info!("Serving snapshots on http://{}", args.image_host);
	tokio::spawn(async move {
		if let Err(e) = listen_for_new_image_requests(img, iw).await {
			error!("Image server stopped: {}", e);
		}
	});

	let vid = match args.start_listening_for_video().await {
		Ok(vid) => vid,
		Err(e) => {
			error!("Failed to bind the video server to {}: {}", args.video_host, e);
			std::process::exit(1);
		}
	};
	info!("Serving H.264 on tcp://{}", args.video_host);
	listen_for_new_video_sockets(vid, vw).await;
}
