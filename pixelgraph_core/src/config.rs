//! Engine-wide configuration: a small struct of defaults that
//! collaborators consult rather than hard-coding.

/// Default tile size used when an output's own image backend doesn't
/// otherwise dictate one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
	pub default_tile_width: u32,
	pub default_tile_height: u32,
}

impl Config {
	pub fn new(default_tile_width: u32, default_tile_height: u32) -> Self {
		Config {
			default_tile_width,
			default_tile_height,
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Config::new(256, 256)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn default_tile_size_is_256() {
		let config = Config::default();
		assert_eq!(config.default_tile_width, 256);
		assert_eq!(config.default_tile_height, 256);
	}
}
