//! Rectangles and the tile grid derived from them.
//!
//! `Rectangle` models the half-open `[x, x+width) x [y, y+height)` regions
//! used as product bounds, union bounds, and tile rectangles; `TileGrid`
//! turns a union rectangle plus a tile size into the row-major iteration
//! the Tile Scheduler walks.

/// A half-open axis-aligned rectangle: `[x, x + width) x [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
	pub x: i64,
	pub y: i64,
	pub width: u32,
	pub height: u32,
}

impl Rectangle {
	pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
		Self { x, y, width, height }
	}

	/// A rectangle `[0, width) x [0, height)`, the shape of `bounds(Product)`.
	pub fn from_size(width: u32, height: u32) -> Self {
		Self::new(0, 0, width, height)
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}

	pub fn x_max(&self) -> i64 {
		self.x + self.width as i64
	}

	pub fn y_max(&self) -> i64 {
		self.y + self.height as i64
	}

	/// The smallest rectangle enclosing both `self` and `other`.
	///
	/// Empty rectangles act as an identity: unioning with one leaves the
	/// other's bounds untouched.
	pub fn union(&self, other: &Rectangle) -> Rectangle {
		if self.is_empty() {
			return *other;
		}
		if other.is_empty() {
			return *self;
		}
		let x = self.x.min(other.x);
		let y = self.y.min(other.y);
		let x_max = self.x_max().max(other.x_max());
		let y_max = self.y_max().max(other.y_max());
		Rectangle::new(x, y, (x_max - x) as u32, (y_max - y) as u32)
	}

	/// Folds `union` over a sequence of rectangles; an empty iterator yields
	/// the empty default rectangle.
	pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rectangle>) -> Rectangle {
		rects.into_iter().fold(Rectangle::default(), |acc, r| acc.union(r))
	}

	/// Whether `self` and `other` share any area.
	pub fn intersects(&self, other: &Rectangle) -> bool {
		if self.is_empty() || other.is_empty() {
			return false;
		}
		self.x < other.x_max() && other.x < self.x_max() && self.y < other.y_max() && other.y < self.y_max()
	}
}

/// A fixed-size tile grid covering a `Rectangle`, iterated row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
	bounds: Rectangle,
	tile_width: u32,
	tile_height: u32,
	num_x_tiles: u32,
	num_y_tiles: u32,
}

impl TileGrid {
	/// Builds the grid that tiles `bounds` with `(tile_width, tile_height)`
	/// tiles: `num_x_tiles = ceil(width / tile_width)`, likewise for y.
	pub fn new(bounds: Rectangle, tile_width: u32, tile_height: u32) -> TileGrid {
		let num_x_tiles = div_ceil(bounds.width, tile_width);
		let num_y_tiles = div_ceil(bounds.height, tile_height);
		TileGrid {
			bounds,
			tile_width,
			tile_height,
			num_x_tiles,
			num_y_tiles,
		}
	}

	pub fn num_x_tiles(&self) -> u32 {
		self.num_x_tiles
	}

	pub fn num_y_tiles(&self) -> u32 {
		self.num_y_tiles
	}

	pub fn tile_count(&self) -> u64 {
		self.num_x_tiles as u64 * self.num_y_tiles as u64
	}

	/// The pixel rectangle of tile `(tile_x, tile_y)`, relative to the grid's
	/// origin. Not clipped to `bounds`: the rectangle may extend past product
	/// bounds and is left for bounds-intersection checks downstream to
	/// ignore.
	pub fn tile_rect(&self, tile_x: u32, tile_y: u32) -> Rectangle {
		Rectangle::new(
			self.bounds.x + tile_x as i64 * self.tile_width as i64,
			self.bounds.y + tile_y as i64 * self.tile_height as i64,
			self.tile_width,
			self.tile_height,
		)
	}

	/// Row-major `(tile_x, tile_y)` pairs: outer `tile_y`, inner `tile_x`.
	/// This order is part of the scheduler's contract with observers.
	pub fn iter_row_major(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
		let nx = self.num_x_tiles;
		(0..self.num_y_tiles).flat_map(move |ty| (0..nx).map(move |tx| (tx, ty)))
	}
}

fn div_ceil(value: u32, divisor: u32) -> u32 {
	if divisor == 0 {
		return 0;
	}
	value.div_ceil(divisor)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[test]
	fn union_of_disjoint_rectangles_is_bounding_box() {
		let a = Rectangle::new(0, 0, 10, 10);
		let b = Rectangle::new(50, 50, 10, 10);
		let u = a.union(&b);
		assert_eq!(u, Rectangle::new(0, 0, 60, 60));
	}

	#[test]
	fn union_all_empty_is_empty() {
		let u = Rectangle::union_all(&[]);
		assert!(u.is_empty());
	}

	#[test]
	fn union_all_matches_pairwise_union() {
		let rects = vec![
			Rectangle::from_size(100, 100),
			Rectangle::from_size(50, 50),
			Rectangle::new(80, 10, 40, 40),
		];
		let u = Rectangle::union_all(&rects);
		assert_eq!(u, Rectangle::new(0, 0, 120, 100));
	}

	#[test]
	fn intersects_is_symmetric_and_excludes_touching_edges() {
		let a = Rectangle::new(0, 0, 10, 10);
		let b = Rectangle::new(10, 0, 10, 10);
		assert!(!a.intersects(&b));
		assert!(!b.intersects(&a));

		let c = Rectangle::new(9, 0, 10, 10);
		assert!(a.intersects(&c));
		assert!(c.intersects(&a));
	}

	#[test]
	fn empty_rectangle_intersects_nothing() {
		let empty = Rectangle::new(0, 0, 0, 0);
		let full = Rectangle::from_size(100, 100);
		assert!(!empty.intersects(&full));
	}

	#[rstest]
	#[case(100, 100, 64, 64, 2, 2)]
	#[case(128, 128, 64, 64, 2, 2)]
	#[case(1, 1, 64, 64, 1, 1)]
	#[case(0, 100, 64, 64, 0, 2)]
	fn grid_dimensions_match_ceiling_division(
		#[case] w: u32,
		#[case] h: u32,
		#[case] tw: u32,
		#[case] th: u32,
		#[case] expect_x: u32,
		#[case] expect_y: u32,
	) {
		let grid = TileGrid::new(Rectangle::from_size(w, h), tw, th);
		assert_eq!(grid.num_x_tiles(), expect_x);
		assert_eq!(grid.num_y_tiles(), expect_y);
	}

	#[test]
	fn zero_area_bounds_produce_no_tiles() {
		let grid = TileGrid::new(Rectangle::new(0, 0, 0, 0), 64, 64);
		assert_eq!(grid.tile_count(), 0);
		assert_eq!(grid.iter_row_major().count(), 0);
	}

	#[test]
	fn iteration_order_is_row_major() {
		let grid = TileGrid::new(Rectangle::from_size(130, 65), 64, 64);
		let coords: Vec<_> = grid.iter_row_major().collect();
		assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
	}

	#[test]
	fn tile_rect_is_not_clipped_to_bounds() {
		let grid = TileGrid::new(Rectangle::from_size(100, 100), 64, 64);
		let r = grid.tile_rect(1, 1);
		assert_eq!(r, Rectangle::new(64, 64, 64, 64));
		assert!(r.x_max() > 100);
	}
}
