/// Center point of a drop target, in fractional terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Screen rectangle of a drop target (terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.x as f64 + self.width as f64 / 2.0,
            y: self.y as f64 + self.height as f64 / 2.0,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// The same rectangle repositioned so its center sits at the pointer.
    /// Used for the rect of an item mid-drag.
    pub fn centered_at(&self, column: u16, row: u16) -> Rect {
        Rect {
            x: column.saturating_sub(self.width / 2),
            y: row.saturating_sub(self.height / 2),
            width: self.width,
            height: self.height,
        }
    }
}

impl From<ratatui::layout::Rect> for Rect {
    fn from(r: ratatui::layout::Rect) -> Self {
        Rect {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_a_row() {
        let r = Rect::new(2, 5, 10, 1);
        let c = r.center();
        assert_eq!(c.x, 7.0);
        assert_eq!(c.y, 5.5);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 2, 4, 2);
        assert!(r.contains(2, 2));
        assert!(r.contains(5, 3));
        assert!(!r.contains(6, 2));
        assert!(!r.contains(2, 4));
    }

    #[test]
    fn distance_squared_is_symmetric() {
        let a = Rect::new(0, 0, 2, 2).center();
        let b = Rect::new(3, 4, 2, 2).center();
        assert_eq!(a.distance_squared(b), b.distance_squared(a));
        assert_eq!(a.distance_squared(b), 25.0);
    }
}
