//! Axis-aligned bounding volumes.

use super::Vec3;

/// Axis-aligned bounding box in 3D layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point, or `None` for an empty iterator.
    /// Non-finite points are skipped.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut bounds: Option<Bounds3> = None;
        for p in points.into_iter().filter(|p| p.is_finite()) {
            bounds = Some(match bounds {
                Some(b) => Bounds3::new(b.min.min(p), b.max.max(p)),
                None => Bounds3::new(p, p),
            });
        }
        bounds
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Longest side of the box.
    pub fn size(&self) -> f32 {
        let e = self.extent();
        e.x.max(e.y).max(e.z)
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        let m = Vec3::new(margin, margin, margin);
        Self::new(self.min - m, self.max + m)
    }

    /// Cube with the same center whose side is the longest side of this box.
    ///
    /// In planar mode the z extent collapses to zero so the cube degenerates
    /// into a square on the z = 0 plane.
    pub fn cubed(&self, planar: bool) -> Self {
        let center = self.center();
        let half = self.size() * 0.5;
        let half_z = if planar { 0.0 } else { half };
        Self::new(
            Vec3::new(center.x - half, center.y - half, center.z - half_z),
            Vec3::new(center.x + half, center.y + half, center.z + half_z),
        )
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Child slot of `p` relative to the midpoint: bit 0 = x, bit 1 = y, bit 2 = z.
    ///
    /// Planar boxes never set the z bit, so only slots 0..4 are used.
    pub fn octant(&self, p: Vec3, planar: bool) -> usize {
        let c = self.center();
        let mut index = 0;
        if p.x >= c.x {
            index |= 1;
        }
        if p.y >= c.y {
            index |= 2;
        }
        if !planar && p.z >= c.z {
            index |= 4;
        }
        index
    }

    /// Sub-box for a child slot produced by [`Bounds3::octant`].
    pub fn child(&self, octant: usize, planar: bool) -> Self {
        let c = self.center();
        let mut min = self.min;
        let mut max = c;
        if octant & 1 != 0 {
            min.x = c.x;
            max.x = self.max.x;
        }
        if octant & 2 != 0 {
            min.y = c.y;
            max.y = self.max.y;
        }
        if planar {
            min.z = self.min.z;
            max.z = self.max.z;
        } else if octant & 4 != 0 {
            min.z = c.z;
            max.z = self.max.z;
        }
        Self::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let bounds = Bounds3::from_points([
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, -4.0, 5.0),
            Vec3::new(f32::NAN, 0.0, 0.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 5.0));
        assert_eq!(bounds.size(), 6.0);
        assert!(Bounds3::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_cubed_planar() {
        let b = Bounds3::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 0.0));
        let cube = b.cubed(false);
        assert_eq!(cube.extent(), Vec3::new(4.0, 4.0, 4.0));

        let square = b.cubed(true);
        assert_eq!(square.extent(), Vec3::new(4.0, 4.0, 0.0));
    }

    #[test]
    fn test_octant_children_partition_box() {
        let b = Bounds3::new(Vec3::new(-2.0, -2.0, -2.0), Vec3::new(2.0, 2.0, 2.0));
        let p = Vec3::new(1.0, -1.0, 1.5);
        let octant = b.octant(p, false);
        assert_eq!(octant, 0b101);
        assert!(b.child(octant, false).contains(p));

        // Planar lookup ignores z entirely
        let planar_octant = b.octant(p, true);
        assert_eq!(planar_octant, 0b001);
        assert!(b.child(planar_octant, true).contains(p));
    }
}
