use std::convert::Infallible;
use std::net::SocketAddr;

use hyper::{Body, Method, Request, Response, StatusCode};
use hyper::header::HeaderName;
use hyper::http::HeaderValue;
use hyper::server::Builder;
use hyper::server::conn::{AddrIncoming, AddrStream};
use hyper::service::{make_service_fn, service_fn};
use raspicam::CameraArgs;

use crate::service::video::VideoWrapper;
use crate::utils::Am;

/// Takes snapshots with raspistill, one at a time.
///
/// `camera` is shared with the video side, which does not start a session
/// while a snapshot holds it.
#[derive(Clone)]
pub struct ImageWrapper {
	args: CameraArgs,
	vw: VideoWrapper,
	camera: Am<()>,
}

pub enum Snapshot {
	Taken(Vec<u8>),
	CameraBusy,
	Failed(String),
}

impl ImageWrapper {
	pub fn create(args: CameraArgs, vw: VideoWrapper, camera: Am<()>) -> Self {
		ImageWrapper {
			args,
			vw,
			camera,
		}
	}

	pub async fn take_snapshot(&self, addr: &str) -> Snapshot {
		let _camera = self.camera.lock().await;
		if self.vw.is_active().await {
			info!("Snapshot refused for {}: video session is live", addr);
			return Snapshot::CameraBusy;
		}

		info!("Snapshot requested by {}", addr);
		match self.args.capture().await {
			Ok(buf) => {
				info!("Snapshot completed for {} ({} bytes)", addr, buf.len());
				Snapshot::Taken(buf)
			}
			Err(e) => {
				error!("Snapshot failed for {}: {}", addr, e);
				Snapshot::Failed(e.to_string())
			}
		}
	}
}

pub async fn listen_for_new_image_requests(server: Builder<AddrIncoming>, iw: ImageWrapper) -> hyper::Result<()> {
	let make_service = make_service_fn(move |conn: &AddrStream| {
		let iw = iw.clone();
		let addr = conn.remote_addr();

		async move {
			Ok::<_, Infallible>(service_fn(move |req| {
				handle(iw.clone(), addr, req)
			}))
		}
	});

	server
		.serve(make_service)
		.await
}

async fn handle(iw: ImageWrapper, addr: SocketAddr, req: Request<Body>) -> Result<Response<Body>, Infallible> {
	if req.method() != Method::GET || req.uri() != "/" {
		return Ok(status(StatusCode::BAD_REQUEST, Body::empty()));
	}

	Ok(match iw.take_snapshot(&addr.to_string()).await {
		Snapshot::Taken(bytes) => {
			let mut res = Response::new(Body::from(bytes));
			res.headers_mut().insert(
				HeaderName::from_static("content-type"),
				HeaderValue::from_static("image/jpeg"),
			);
			res
		}
		Snapshot::CameraBusy => status(StatusCode::SERVICE_UNAVAILABLE, Body::from("camera is streaming video")),
		Snapshot::Failed(e) => status(StatusCode::INTERNAL_SERVER_ERROR, Body::from(e)),
	})
}

fn status(code: StatusCode, body: Body) -> Response<Body> {
	let mut res = Response::new(body);
	*res.status_mut() = code;
	res
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use hyper::body::to_bytes;
	use raspicam::{StillCapture, VidCapture};
	use tokio::net::{TcpListener, TcpStream};
	use tokio::time::sleep;

	use super::*;
	use crate::service::testing::idle_camera;
	use crate::utils::am;

	fn wrapper(still_command: &str, vid_command: &str) -> ImageWrapper {
		let mut still = StillCapture::new();
		still.command = still_command.to_string();
		let mut vid = VidCapture::new();
		vid.command = vid_command.to_string();

		let camera = am(());
		let vw = VideoWrapper::create(CameraArgs::from(&vid), camera.clone());
		ImageWrapper::create(CameraArgs::from(&still), vw, camera)
	}

	fn get(method: Method, uri: &str) -> Request<Body> {
		Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
	}

	fn peer() -> SocketAddr {
		"127.0.0.1:50000".parse().unwrap()
	}

	#[tokio::test]
	async fn snapshot_body_is_stdout() {
		let res = handle(wrapper("echo", "false"), peer(), get(Method::GET, "/")).await.unwrap();

		assert_eq!(res.status(), StatusCode::OK);
		assert_eq!(res.headers()["content-type"], "image/jpeg");
		assert_eq!(to_bytes(res.into_body()).await.unwrap(), "--output -\n");
	}

	#[tokio::test]
	async fn other_requests_are_rejected() {
		let iw = wrapper("echo", "false");

		let post = handle(iw.clone(), peer(), get(Method::POST, "/")).await.unwrap();
		let path = handle(iw, peer(), get(Method::GET, "/latest.jpg")).await.unwrap();

		assert_eq!(post.status(), StatusCode::BAD_REQUEST);
		assert_eq!(path.status(), StatusCode::BAD_REQUEST);
	}

	#[tokio::test]
	async fn failed_capture_is_a_server_error() {
		let res = handle(wrapper("false", "false"), peer(), get(Method::GET, "/")).await.unwrap();

		assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[tokio::test]
	async fn busy_while_streaming() {
		let iw = wrapper("echo", &idle_camera("image"));
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let _client = TcpStream::connect(listener.local_addr().unwrap()).await.unwrap();
		let (server, _) = listener.accept().await.unwrap();
		iw.vw.register("viewer".to_string(), server).await;

		for _ in 0..40 {
			if iw.vw.is_active().await {
				break;
			}
			sleep(Duration::from_millis(50)).await;
		}
		let res = handle(iw, peer(), get(Method::GET, "/")).await.unwrap();

		assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
	}
}
