//! Rectangular chambers and the wall segments dividing them.

use pathvis_core::Pos;

/// An axis-aligned rectangle of cells: columns `[left, left + width)`,
/// rows `[top, top + height)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Chamber {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Chamber {
    #[inline]
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// The chamber covering a whole `dimension`×`dimension` grid.
    #[inline]
    pub const fn whole(dimension: i32) -> Self {
        Self::new(0, 0, dimension, dimension)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.col >= self.left
            && p.col < self.left + self.width
            && p.row >= self.top
            && p.row < self.top + self.height
    }

    /// Column of the vertical dividing line.
    #[inline]
    pub fn split_col(&self) -> i32 {
        self.left + self.width / 2
    }

    /// Row of the horizontal dividing line.
    #[inline]
    pub fn split_row(&self) -> i32 {
        self.top + self.height / 2
    }

    /// The four chambers around the crossing of the dividing lines, in
    /// top-left, top-right, bottom-left, bottom-right order. The dividing
    /// row and column belong to none of them.
    pub fn quadrants(&self) -> [Chamber; 4] {
        let xd = self.width / 2;
        let yd = self.height / 2;
        let right_w = self.width - xd - 1;
        let bottom_h = self.height - yd - 1;
        let right = self.left + xd + 1;
        let bottom = self.top + yd + 1;
        [
            Chamber::new(self.left, self.top, xd, yd),
            Chamber::new(right, self.top, right_w, yd),
            Chamber::new(self.left, bottom, xd, bottom_h),
            Chamber::new(right, bottom, right_w, bottom_h),
        ]
    }

    /// The cells of the vertical dividing line.
    pub fn vertical_line(&self) -> impl Iterator<Item = Pos> + '_ {
        let col = self.split_col();
        (self.top..self.top + self.height).map(move |row| Pos::new(row, col))
    }

    /// The cells of the horizontal dividing line.
    pub fn horizontal_line(&self) -> impl Iterator<Item = Pos> + '_ {
        let row = self.split_row();
        (self.left..self.left + self.width).map(move |col| Pos::new(row, col))
    }

    /// Non-empty halves of the dividing lines, excluding the crossing
    /// cell: left and right halves of the horizontal line, then top and
    /// bottom halves of the vertical line. Only lines that were drawn
    /// contribute.
    pub fn segments(&self, vertical: bool, horizontal: bool) -> Vec<Segment> {
        let xd = self.width / 2;
        let yd = self.height / 2;
        let mut out = Vec::with_capacity(4);
        if horizontal {
            let row = self.split_row();
            out.push(Segment::new(Orientation::Horizontal, row, self.left, xd));
            out.push(Segment::new(
                Orientation::Horizontal,
                row,
                self.left + xd + 1,
                self.width - xd - 1,
            ));
        }
        if vertical {
            let col = self.split_col();
            out.push(Segment::new(Orientation::Vertical, col, self.top, yd));
            out.push(Segment::new(
                Orientation::Vertical,
                col,
                self.top + yd + 1,
                self.height - yd - 1,
            ));
        }
        out.retain(|s| s.len > 0);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Runs along a row.
    Horizontal,
    /// Runs along a column.
    Vertical,
}

/// A straight run of wall cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub orientation: Orientation,
    /// Row of a horizontal segment, column of a vertical one.
    pub line: i32,
    /// First column (horizontal) or row (vertical).
    pub start: i32,
    pub len: i32,
}

impl Segment {
    pub const fn new(orientation: Orientation, line: i32, start: i32, len: i32) -> Self {
        Self {
            orientation,
            line,
            start,
            len,
        }
    }

    /// The cell at `offset` along the segment's axis, where `offset` is an
    /// absolute column or row.
    #[inline]
    pub fn cell(&self, offset: i32) -> Pos {
        match self.orientation {
            Orientation::Horizontal => Pos::new(self.line, offset),
            Orientation::Vertical => Pos::new(offset, self.line),
        }
    }

    #[inline]
    pub fn contains_offset(&self, offset: i32) -> bool {
        offset >= self.start && offset < self.start + self.len
    }

    /// Offsets along this segment where a perpendicular wall from a
    /// neighbouring chamber may end. A gap there would be sealed.
    pub fn landmarks(&self, division_limit: i32) -> Vec<i32> {
        let mut out = Vec::new();
        collect_landmarks(self.start, self.len, division_limit, &mut out);
        out
    }
}

/// Split points of the span `[start, start + len)` under repeated halving,
/// mirroring how chambers of that width keep dividing.
fn collect_landmarks(start: i32, len: i32, division_limit: i32, out: &mut Vec<i32>) {
    if len < division_limit {
        return;
    }
    let mid = start + len / 2;
    out.push(mid);
    collect_landmarks(start, mid - start, division_limit, out);
    collect_landmarks(mid + 1, start + len - mid - 1, division_limit, out);
}
