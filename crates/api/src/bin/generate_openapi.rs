//! Writes the OpenAPI document for the aggregator API to disk
//!
//! ```bash
//! cargo run -p lendpool-api --bin generate_openapi --features openapi -- docs/api/openapi.json
//! ```
//!
//! The output path defaults to `docs/api/openapi.json`; parent directories are
//! created as needed.
#[cfg(feature = "openapi")]
use std::{env, fs, path::Path};

#[cfg(feature = "openapi")]
use lendpool_api::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "docs/api/openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
	#[cfg(not(feature = "openapi"))]
	{
		eprintln!("The 'openapi' feature is required to write {}", DEFAULT_OUTPUT);
		eprintln!("Run with: cargo run -p lendpool-api --bin generate_openapi --features openapi");
		std::process::exit(1);
	}

	#[cfg(feature = "openapi")]
	{
		let output_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

		if let Some(parent) = Path::new(&output_path).parent() {
			fs::create_dir_all(parent)?;
		}

		let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
		fs::write(&output_path, json)?;
		println!("OpenAPI specification written to {}", output_path);
	}

	#[allow(unreachable_code)]
	Ok(())
}
