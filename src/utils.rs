use std::collections::HashMap;
use std::sync::Arc;

use tokio::net::TcpStream;
use tokio::sync::Mutex;

pub type Am<T> = Arc<Mutex<T>>;
pub type StreamsContainer = Am<HashMap<String, TcpStream>>;

pub fn am<T>(t: T) -> Am<T> {
	Arc::new(Mutex::new(t))
}
