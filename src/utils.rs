//! Small helpers shared across the compositor core.

use umbra_ipc::Transform;

/// Point in the shared layout coordinate space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn center(self) -> Point {
        Point::new(
            self.x as f64 + self.width as f64 / 2.,
            self.y as f64 + self.height as f64 / 2.,
        )
    }

    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x as f64
            && point.x < self.right() as f64
            && point.y >= self.y as f64
            && point.y < self.bottom() as f64
    }

    /// Returns the point within the rectangle closest to `point`.
    pub fn closest_point(self, point: Point) -> Point {
        let x = point.x.clamp(self.x as f64, (self.right() - 1).max(self.x) as f64);
        let y = point.y.clamp(self.y as f64, (self.bottom() - 1).max(self.y) as f64);
        Point::new(x, y)
    }

    /// Squared distance from `point` to the nearest edge or corner of the
    /// rectangle; zero if the point is inside.
    pub fn distance_sq(self, point: Point) -> f64 {
        let closest = self.closest_point(point);
        let dx = closest.x - point.x;
        let dy = closest.y - point.y;
        dx * dx + dy * dy
    }

    /// Intersection of two rectangles; a zero-sized rectangle when they are
    /// disjoint.
    pub fn intersection(self, other: Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let mut result = Rect::new(x, y, right - x, bottom - y);
        if result.is_empty() {
            result.width = 0;
            result.height = 0;
        }
        result
    }

    /// Returns whether `other` lies entirely within this rectangle.
    pub fn contains_rect(self, other: Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }
}

/// Logical size of an output: the current mode transformed and scaled.
pub fn logical_size(mode_size: (u16, u16), transform: Transform, scale: f64) -> (i32, i32) {
    let (mut w, mut h) = (i32::from(mode_size.0), i32::from(mode_size.1));
    if transform.swaps_dimensions() {
        std::mem::swap(&mut w, &mut h);
    }
    // Round up so that the logical size always covers the full mode.
    let w = (w as f64 / scale).ceil() as i32;
    let h = (h as f64 / scale).ceil() as i32;
    (w, h)
}

/// Case-insensitive output name match, ASCII only like connector names are.
pub fn output_matches_name(name: &str, target: &str) -> bool {
    name.eq_ignore_ascii_case(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_point_clamps_into_rect() {
        let rect = Rect::new(10, 10, 100, 50);
        assert_eq!(rect.closest_point(Point::new(0., 0.)), Point::new(10., 10.));
        assert_eq!(
            rect.closest_point(Point::new(500., 30.)),
            Point::new(109., 30.)
        );
        assert_eq!(rect.closest_point(Point::new(50., 30.)), Point::new(50., 30.));
    }

    #[test]
    fn distance_is_zero_inside() {
        let rect = Rect::new(0, 0, 100, 100);
        assert_eq!(rect.distance_sq(Point::new(50., 50.)), 0.);
        assert!(rect.distance_sq(Point::new(-3., 0.)) > 0.);
    }

    #[test]
    fn contains_rect_accepts_empty_and_subsets() {
        let outer = Rect::new(0, 0, 1920, 1080);
        assert!(outer.contains_rect(Rect::new(0, 30, 1920, 1050)));
        assert!(outer.contains_rect(Rect::default()));
        assert!(!outer.contains_rect(Rect::new(-1, 0, 10, 10)));
    }

    #[test]
    fn logical_size_applies_transform_and_scale() {
        assert_eq!(logical_size((2560, 1440), Transform::Normal, 1.), (2560, 1440));
        assert_eq!(logical_size((2560, 1440), Transform::_90, 1.), (1440, 2560));
        assert_eq!(logical_size((2560, 1440), Transform::Flipped270, 2.), (720, 1280));
        // Fractional scale rounds up.
        assert_eq!(logical_size((1920, 1080), Transform::Normal, 1.25), (1536, 864));
    }
}
