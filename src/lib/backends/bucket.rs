use std::io::Read;
use std::time::Duration;

use tracing::debug;
use ureq::{Agent, AgentBuilder};

use crate::backends::Backend;
use crate::error::BackendError;
use crate::sheet::XLSX_CONTENT_TYPE;

pub const DEFAULT_ENDPOINT: &str = "https://storage.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A workbook stored as one object in a bucket, addressed path-style as
/// `{endpoint}/{bucket}/{key}`.
///
/// This is the layout of the Google Cloud Storage XML API and of S3-compatible stores
/// that accept bearer tokens or pre-authorized access. Every call is a single attempt.
#[derive(Clone, Debug)]
pub struct BucketBackend {
	agent: Agent,
	endpoint: String,
	bucket: String,
	key: String,
	token: Option<String>,
}

impl BucketBackend {
	pub fn new<S: Into<String>>(endpoint: S, bucket: S, key: S) -> Self {
		Self {
			agent: AgentBuilder::new().timeout(DEFAULT_TIMEOUT).build(),
			endpoint: endpoint.into(),
			bucket: bucket.into(),
			key: key.into(),
			token: None,
		}
	}

	pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
		self.token = Some(token.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.agent = AgentBuilder::new().timeout(timeout).build();
		self
	}

	pub fn url(&self) -> String {
		let key = self.key.split('/').map(encode_segment).collect::<Vec<String>>().join("/");
		format!("{}/{}/{key}", self.endpoint.trim_end_matches('/'), encode_segment(&self.bucket))
	}

	fn request(&self, method: &str, url: &str) -> ureq::Request {
		let request = self.agent.request(method, url);
		match &self.token {
			Some(token) => request.set("Authorization", &format!("Bearer {token}")),
			None => request,
		}
	}
}

/// Percent-encodes everything outside RFC 3986's unreserved set.
fn encode_segment(segment: &str) -> String {
	let mut encoded = String::with_capacity(segment.len());
	for b in segment.bytes() {
		if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
			encoded.push(b as char);
		} else {
			encoded.push_str(&format!("%{b:02X}"));
		}
	}
	encoded
}

fn transport_err(url: &str, e: ureq::Error) -> BackendError {
	match e {
		ureq::Error::Status(status, _) => BackendError::Status { url: url.to_string(), status },
		ureq::Error::Transport(t) => BackendError::Transport { url: url.to_string(), msg: t.to_string() },
	}
}

impl Backend for BucketBackend {
	fn describe(&self) -> String {
		format!("bucket object {}/{}", self.bucket, self.key)
	}

	fn read(&self) -> Result<Option<Vec<u8>>, BackendError> {
		let url = self.url();
		debug!("GET {url}");

		let response = match self.request("GET", &url).call() {
			Ok(response) => response,
			Err(ureq::Error::Status(404, _)) => return Ok(None),
			Err(e) => return Err(transport_err(&url, e)),
		};

		let mut bytes = Vec::new();
		response.into_reader().read_to_end(&mut bytes)
			.map_err(|e| BackendError::Transport { url: url.clone(), msg: e.to_string() })?;
		Ok(Some(bytes))
	}

	fn write(&self, bytes: &[u8]) -> Result<(), BackendError> {
		let url = self.url();
		debug!("PUT {url} ({} bytes)", bytes.len());

		self.request("PUT", &url)
			.set("Content-Type", XLSX_CONTENT_TYPE)
			.send_bytes(bytes)
			.map_err(|e| transport_err(&url, e))?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn object_urls() {
		let backend = BucketBackend::new("https://storage.googleapis.com/", "my-colors", "catalogs/spring 2025.xlsx");
		assert_eq!(backend.url(), "https://storage.googleapis.com/my-colors/catalogs/spring%202025.xlsx");
		assert_eq!(backend.describe(), "bucket object my-colors/catalogs/spring 2025.xlsx");
	}
}
