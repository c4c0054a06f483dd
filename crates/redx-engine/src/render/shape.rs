use crate::coords::Segment;

/// A thick "X" from corner to corner of a `width` x `height` surface.
///
/// Each diagonal bar is made of `thickness` pairs of one pixel lines, one line
/// anchored on the top edge and one on the left (bar 1) or right (bar 2) edge,
/// each pair shifted one pixel further from the diagonal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CrossShape {
    width: i32,
    height: i32,
    thickness: i32,
}

impl CrossShape {
    pub fn new(width: u32, height: u32, thickness: u32) -> Self {
        let clamp = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
        Self {
            width: clamp(width),
            height: clamp(height),
            thickness: clamp(thickness),
        }
    }

    /// Number of segments produced by [`CrossShape::segments`].
    pub fn segment_count(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        4 * self.thickness.max(0) as usize
    }

    /// Line segments of the X in draw order: all of the top-left to
    /// bottom-right bar, then all of the top-right to bottom-left bar.
    pub fn segments(&self) -> Vec<Segment> {
        let count = self.segment_count();
        if count == 0 {
            return Vec::new();
        }

        let mut out = Vec::with_capacity(count);

        let (w, h) = (self.width, self.height);

        for i in 0..self.thickness {
            out.push(Segment::from_coords(i, 0, w - 1, h - i - 1));
            out.push(Segment::from_coords(0, i, w - i - 1, h - 1));
        }

        for i in 0..self.thickness {
            out.push(Segment::from_coords(w - i - 1, 0, 0, h - i - 1));
            out.push(Segment::from_coords(w - 1, i, i, h - 1));
        }

        out
    }
}
