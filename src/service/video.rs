use std::collections::{HashMap, HashSet};
use std::io::{Error as IoError, ErrorKind};
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use h264_nal_paging::H264Stream;
use raspicam::{CameraArgs, CaptureError};
use tokio::io::{AsyncRead, AsyncWriteExt, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval, sleep};

use crate::utils::{am, Am, StreamsContainer};

/// Without new frames for this long the session is considered hung.
const STALL_TIMEOUT: Duration = Duration::from_secs(3);
const RESPAWN_BACKOFF: Duration = Duration::from_secs(5);

const NAL_IDR: u8 = 5;
const NAL_SPS: u8 = 7;
const NAL_PPS: u8 = 8;

/// Turns end of stream into an error so the NAL reader stops once raspivid exits.
struct UntilEof<R>(R);

impl<R: AsyncRead + Unpin> AsyncRead for UntilEof<R> {
	fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<std::io::Result<()>> {
		let before = buf.filled().len();
		match Pin::new(&mut self.0).poll_read(cx, buf) {
			Poll::Ready(Ok(())) if buf.remaining() > 0 && buf.filled().len() == before => {
				Poll::Ready(Err(IoError::new(ErrorKind::UnexpectedEof, "raspivid closed its output")))
			}
			poll => poll,
		}
	}
}

/// Fans NAL units out to clients. Clients seen for the first time are sent
/// the parameter sets and every frame since the last key frame beforehand.
#[derive(Default)]
struct Broadcast {
	seq_param: Option<Vec<u8>>,
	pic_param: Option<Vec<u8>>,
	frame_buffer: Vec<Vec<u8>>,
	known_addrs: HashSet<String>,
}

impl Broadcast {
	/// Returns whether the unit was a frame. Parameter sets are only cached.
	async fn push(&mut self, unit_code: u8, raw: Vec<u8>, streams: &mut HashMap<String, TcpStream>) -> bool {
		match unit_code {
			NAL_SPS => {
				self.seq_param = Some(raw);
				return false;
			}
			NAL_PPS => {
				self.pic_param = Some(raw);
				return false;
			}
			NAL_IDR => self.frame_buffer.clear(),
			_ => {}
		}

		let mut write_err = Vec::with_capacity(0);

		for (k, w) in streams.iter_mut() {
			let written = if self.known_addrs.contains(k) {
				w.write_all(&raw).await
			} else {
				info!("Connected {}", k);
				self.known_addrs.insert(k.to_string());
				w.write_all(&self.catch_up(&raw)).await
			};

			if written.is_err() {
				write_err.push(k.clone());
			}
		}
		self.frame_buffer.push(raw);

		for k in write_err {
			streams.remove(&k);
			self.known_addrs.remove(&k);
			info!("Disconnected {}", k);
		}

		true
	}

	fn catch_up(&self, raw: &[u8]) -> Vec<u8> {
		let mut buf = vec![];
		for p in [&self.seq_param, &self.pic_param].into_iter().flatten() {
			buf.extend(p);
		}
		for p in &self.frame_buffer {
			buf.extend(p);
		}
		buf.extend(raw);

		buf
	}
}

struct VideoSession {
	child: Child,
	main_task_handle: JoinHandle<()>,
}

impl VideoSession {
	async fn destroy(mut self) {
		self.main_task_handle.abort();
		if let Err(e) = self.child.kill().await {
			warn!("Failed to kill the video session: {}", e);
		}
	}

	fn start(args: &CameraArgs, streams: StreamsContainer, mon: Am<Instant>) -> Result<Self, CaptureError> {
		let mut child = args.spawn()?;
		let stdout = child.stdout.take()
			.ok_or_else(|| IoError::new(ErrorKind::BrokenPipe, "raspivid stdout was not piped"))?;

		let mut stream = H264Stream::new(UntilEof(stdout));
		let mut broadcast = Broadcast::default();

		let main_task_handle = tokio::spawn(async move {
			while let Ok(nal) = stream.next().await {
				let mut streams = streams.lock().await;
				if broadcast.push(nal.unit_code, nal.raw_bytes, &mut streams).await {
					*mon.lock().await = Instant::now();
				}
			}
			info!("Video session ended");
		});

		Ok(VideoSession {
			child,
			main_task_handle,
		})
	}

	fn has_ended(&self) -> bool {
		self.main_task_handle.is_finished()
	}
}

/// Why a running session should be torn down, if it should.
fn teardown_reason(ended: bool, stalled: bool, idle: bool) -> Option<&'static str> {
	if ended {
		Some("raspivid exited")
	} else if stalled {
		Some("timeout on receiving new bytes")
	} else if idle {
		Some("no clients left")
	} else {
		None
	}
}

/// Shares one raspivid session between every connected client.
///
/// The session starts with the first client and stops when the last one
/// leaves, or when raspivid stops producing output. It never starts while a
/// snapshot holds `camera`.
#[derive(Clone)]
pub struct VideoWrapper {
	session: Am<Option<VideoSession>>,
	streams: StreamsContainer,
}

impl VideoWrapper {
	pub fn create(args: CameraArgs, camera: Am<()>) -> Self {
		let session: Am<Option<VideoSession>> = am(None);
		let streams = am(HashMap::new());
		let mon = am(Instant::now());

		{
			let session = session.clone();
			let streams = streams.clone();

			tokio::spawn(async move {
				let mut int = interval(Duration::from_millis(50));

				loop {
					int.tick().await;

					let stalled = mon.lock().await.elapsed() > STALL_TIMEOUT;
					let idle = streams.lock().await.is_empty();
					{
						let mut session = session.lock().await;
						let reason = (*session).as_ref()
							.and_then(|vs| teardown_reason(vs.has_ended(), stalled, idle));
						if let Some(reason) = reason {
							info!("Destroying video session: {}.", reason);
							if let Some(vs) = session.take() {
								vs.destroy().await;
							}
						}
					}

					if idle || session.lock().await.is_some() {
						continue;
					}

					// Held until the session is visible to snapshots
					let camera_guard = match camera.try_lock() {
						Ok(guard) => guard,
						Err(_) => continue,
					};
					info!("Spawning new video session: {} {}", args.cmd(), args.args().join(" "));
					// Grace period for raspivid to produce its first frame
					*mon.lock().await = Instant::now();
					match VideoSession::start(&args, streams.clone(), mon.clone()) {
						Ok(vs) => *session.lock().await = Some(vs),
						Err(e) => {
							error!("Failed to start the video session: {}", e);
							drop(camera_guard);
							sleep(RESPAWN_BACKOFF).await;
						}
					}
				}
			});
		}

		VideoWrapper {
			session,
			streams,
		}
	}

	pub async fn register(&self, addr: String, sock: TcpStream) {
		self.streams.lock().await.insert(addr, sock);
	}

	/// Whether raspivid currently holds the camera.
	pub async fn is_active(&self) -> bool {
		self.session.lock().await.is_some()
	}
}

pub async fn listen_for_new_video_sockets(listener: TcpListener, vw: VideoWrapper) {
	loop {
		match listener.accept().await {
			Ok((client, addr)) => vw.register(addr.to_string(), client).await,
			Err(e) => warn!("Failed to accept a video client: {}", e),
		}
	}
}
