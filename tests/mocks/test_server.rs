//! Spawned aggregator for tests that go over real HTTP

use axum::Router;
use lendpool_aggregator::{AggregatorBuilder, Settings};
use tokio::task::JoinHandle;

pub struct TestServer {
	pub base_url: String,
	pub handle: JoinHandle<()>,
}

impl TestServer {
	/// Start `builder` and serve its router on an ephemeral port
	pub async fn spawn(builder: AggregatorBuilder) -> Result<Self, Box<dyn std::error::Error>> {
		let (app, _state) = builder.start().await?;
		Self::spawn_app(app).await
	}

	/// Serve only what `settings` configures
	#[allow(dead_code)]
	pub async fn spawn_with_settings(
		settings: Settings,
	) -> Result<Self, Box<dyn std::error::Error>> {
		Self::spawn(AggregatorBuilder::new().with_settings(settings)).await
	}

	async fn spawn_app(app: Router) -> Result<Self, Box<dyn std::error::Error>> {
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let base_url = format!("http://{}:{}", addr.ip(), addr.port());

		let handle = tokio::spawn(async move {
			let _ = axum::serve(listener, app).await;
		});

		Ok(Self { base_url, handle })
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{}", self.base_url, path)
	}

	#[allow(dead_code)]
	pub fn abort(self) {
		self.handle.abort();
	}
}
