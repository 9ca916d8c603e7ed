//! Planar coordinate type.
//!
//! The city is modelled on a flat plane in **kilometres**, with the origin at
//! a configured city-centre landmark (Puerta del Sol in the bundled demo
//! data), `x` growing east and `y` growing north.  At city scale the planar
//! approximation error is far below the fidelity of the traffic model, and
//! plain Euclidean distance keeps the route-decomposition arithmetic exact
//! enough that per-district segments re-sum to the straight-line distance
//! within float tolerance.

/// A planar city coordinate in kilometres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in kilometres.
    #[inline]
    pub fn distance_km(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
