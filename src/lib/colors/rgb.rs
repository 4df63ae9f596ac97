use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static TRIPLET_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^\s*(?:rgb\s*)?\(?\s*(?P<r>\d{1,3})\s*[,;\s]\s*(?P<g>\d{1,3})\s*[,;\s]\s*(?P<b>\d{1,3})\s*\)?\s*$").unwrap()
});

/// An 8-bit RGB color.
///
/// Records keep hex codes and RGB values as the text the user typed; this type only
/// exists to interpret that text when something needs actual channel values, like
/// drawing a terminal swatch or querying the color lookup API.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl From<u32> for Rgb {
	fn from(v: u32) -> Self {
		Self {
			r: ((v >> 16) & 0xFF) as u8,
			g: ((v >> 8) & 0xFF) as u8,
			b: (v & 0xFF) as u8,
		}
	}
}

impl Rgb {
	/// Parses `#RRGGBB`, `RRGGBB`, `0xRRGGBB` and the short `#RGB` form.
	pub fn parse_hex(s: &str) -> Option<Self> {
		let trimmed = s.trim();
		let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
		let stripped = stripped.strip_prefix("#").unwrap_or(stripped);

		if !stripped.chars().all(|c| c.is_ascii_hexdigit()) {
			return None;
		}

		match stripped.len() {
			6 => u32::from_str_radix(stripped, 16).ok().map(Rgb::from),
			3 => {
				// #abc is shorthand for #aabbcc
				let expanded: String = stripped.chars().flat_map(|c| [c, c]).collect();
				u32::from_str_radix(&expanded, 16).ok().map(Rgb::from)
			}
			_ => None,
		}
	}

	/// Parses triplets like `126,200,227`, `126 200 227` or `rgb(126, 200, 227)`.
	pub fn parse_triplet(s: &str) -> Option<Self> {
		let groups = TRIPLET_RE.captures(s)?;
		let r = groups.name("r")?.as_str().parse::<u8>().ok()?;
		let g = groups.name("g")?.as_str().parse::<u8>().ok()?;
		let b = groups.name("b")?.as_str().parse::<u8>().ok()?;
		Some(Self { r, g, b })
	}

	/// The `r,g,b` text form used in the RGB Values column.
	pub fn triplet(&self) -> String {
		format!("{},{},{}", self.r, self.g, self.b)
	}

	/// Hex digits without the leading `#`.
	pub fn hex_digits(&self) -> String {
		format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
	}
}

impl Display for Rgb {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.hex_digits())
	}
}
