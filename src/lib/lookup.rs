//! Client for The Color API (<https://www.thecolorapi.com>).
//!
//! Lookups are a convenience: any failure is logged and turned into `None`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ureq::{Agent, AgentBuilder};

use crate::colors::rgb::Rgb;

pub const DEFAULT_BASE_URL: &str = "https://www.thecolorapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
	pub h: f64,
	pub s: f64,
	pub l: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorInfo {
	pub name: String,
	pub hex: String,
	pub rgb: Rgb,
	pub hsl: Hsl,
}

#[derive(Deserialize)]
struct ApiValue {
	value: String,
}

#[derive(Deserialize)]
struct ApiRgb {
	r: u8,
	g: u8,
	b: u8,
}

#[derive(Deserialize)]
struct ApiColor {
	name: ApiValue,
	hex: ApiValue,
	rgb: ApiRgb,
	hsl: Hsl,
}

impl From<ApiColor> for ColorInfo {
	fn from(c: ApiColor) -> Self {
		Self {
			name: c.name.value,
			hex: c.hex.value,
			rgb: Rgb { r: c.rgb.r, g: c.rgb.g, b: c.rgb.b },
			hsl: c.hsl,
		}
	}
}

pub fn parse_response(body: &str) -> Option<ColorInfo> {
	match serde_json::from_str::<ApiColor>(body) {
		Ok(color) => Some(color.into()),
		Err(e) => {
			warn!("color lookup returned an unexpected body: {e}");
			None
		}
	}
}

#[derive(Clone, Debug)]
pub struct ColorLookup {
	agent: Agent,
	base_url: String,
}

impl ColorLookup {
	pub fn new<S: Into<String>>(base_url: S, timeout: Duration) -> Self {
		Self {
			agent: AgentBuilder::new().timeout(timeout).build(),
			base_url: base_url.into(),
		}
	}

	/// Describes the color with hex code `hex` (`#` optional).
	pub fn lookup(&self, hex: &str) -> Option<ColorInfo> {
		let Some(rgb) = Rgb::parse_hex(hex) else {
			warn!("\"{hex}\" is not a hex color, skipping lookup");
			return None;
		};

		let url = format!("{}/id", self.base_url.trim_end_matches('/'));
		debug!("GET {url}?hex={}", rgb.hex_digits());

		let response = match self.agent.get(&url).query("hex", &rgb.hex_digits()).call() {
			Ok(response) => response,
			Err(e) => {
				warn!("color lookup for {rgb} failed: {e}");
				return None;
			}
		};

		match response.into_string() {
			Ok(body) => parse_response(&body),
			Err(e) => {
				warn!("color lookup for {rgb} failed: {e}");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	// trimmed answer for /id?hex=7EC8E3
	const SKY_BLUE: &str = r##"{
		"hex": {"value": "#7EC8E3", "clean": "7EC8E3"},
		"rgb": {"fraction": {"r": 0.49, "g": 0.78, "b": 0.89}, "r": 126, "g": 200, "b": 227, "value": "rgb(126, 200, 227)"},
		"hsl": {"fraction": {"h": 0.54, "s": 0.63, "l": 0.69}, "h": 196, "s": 63, "l": 69, "value": "hsl(196, 63%, 69%)"},
		"name": {"value": "Sky Blue", "closest_named_hex": "#76D7EA", "exact_match_name": false, "distance": 1046},
		"contrast": {"value": "#000000"}
	}"##;

	#[test]
	fn parses_api_answer() {
		let info = parse_response(SKY_BLUE).unwrap();
		assert_eq!(info.name, "Sky Blue");
		assert_eq!(info.hex, "#7EC8E3");
		assert_eq!(info.rgb, Rgb { r: 126, g: 200, b: 227 });
		assert_eq!(info.hsl, Hsl { h: 196.0, s: 63.0, l: 69.0 });
	}

	#[test]
	fn bad_answers_yield_nothing() {
		assert_eq!(parse_response("{}"), None);
		assert_eq!(parse_response("<html>503</html>"), None);
	}

	#[test]
	fn invalid_hex_skips_request() {
		// nothing listens on port 9, but the request must not even be attempted
		let lookup = ColorLookup::new("http://127.0.0.1:9", Duration::from_millis(100));
		assert_eq!(lookup.lookup("not a color"), None);
	}

	#[test]
	fn unreachable_api_yields_nothing() {
		let lookup = ColorLookup::new("http://127.0.0.1:9", Duration::from_millis(500));
		assert_eq!(lookup.lookup("#7EC8E3"), None);
	}
}
