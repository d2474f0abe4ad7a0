use super::Packer;
use crate::model::Rect;

#[derive(Clone, Copy, Debug)]
struct SkylineNode {
    x: u32,
    y: u32,
    w: u32,
}

impl SkylineNode {
    #[inline]
    fn left(&self) -> u32 {
        self.x
    }
    #[inline]
    fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
}

/// Bottom-left skyline packer over a bounded sheet.
///
/// Rectangles are placed exactly as requested (the caller inflates them by
/// border/padding beforehand); there is no rotation.
pub struct SkylinePacker {
    bounds: Rect,
    skylines: Vec<SkylineNode>,
}

impl SkylinePacker {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            bounds: Rect::new(0, 0, max_width, max_height),
            skylines: vec![SkylineNode {
                x: 0,
                y: 0,
                w: max_width,
            }],
        }
    }

    fn can_put(&self, mut i: usize, w: u32, h: u32) -> Option<Rect> {
        let mut rect = Rect::new(self.skylines[i].x, 0, w, h);
        let mut width_left = rect.w;
        loop {
            rect.y = rect.y.max(self.skylines[i].y);
            if !self.bounds.contains(&rect) {
                return None;
            }
            if self.skylines[i].w >= width_left {
                return Some(rect);
            }
            width_left -= self.skylines[i].w;
            i += 1;
            if i >= self.skylines.len() {
                return None;
            }
        }
    }

    fn find_bottom_left(&self, w: u32, h: u32) -> Option<(usize, Rect)> {
        let mut best_bottom = u32::MAX;
        let mut best_width = u32::MAX;
        let mut best: Option<(usize, Rect)> = None;

        for i in 0..self.skylines.len() {
            if let Some(r) = self.can_put(i, w, h) {
                if r.bottom() < best_bottom
                    || (r.bottom() == best_bottom && self.skylines[i].w < best_width)
                {
                    best_bottom = r.bottom();
                    best_width = self.skylines[i].w;
                    best = Some((i, r));
                }
            }
        }
        best
    }

    fn split(&mut self, index: usize, rect: &Rect) {
        // A placement touching the sheet bottom leaves its node one past
        // the bottom edge; can_put rejects anything landing on it.
        let skyline = SkylineNode {
            x: rect.x,
            y: rect.bottom().saturating_add(1),
            w: rect.w,
        };
        debug_assert!(skyline.right() <= self.bounds.right());

        self.skylines.insert(index, skyline);

        let i = index + 1;
        while i < self.skylines.len() {
            if self.skylines[i - 1].left() <= self.skylines[i].left() {
                if self.skylines[i].left() <= self.skylines[i - 1].right() {
                    let shrink = self.skylines[i - 1].right() - self.skylines[i].left() + 1;
                    if self.skylines[i].w <= shrink {
                        self.skylines.remove(i);
                    } else {
                        self.skylines[i].x += shrink;
                        self.skylines[i].w -= shrink;
                        break;
                    }
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    fn merge(&mut self) {
        let mut i = 1;
        while i < self.skylines.len() {
            if self.skylines[i - 1].y == self.skylines[i].y {
                let w = self.skylines[i].w;
                self.skylines[i - 1].w = self.skylines[i - 1].w.saturating_add(w);
                self.skylines.remove(i);
            } else {
                i += 1;
            }
        }
    }
}

impl Packer for SkylinePacker {
    fn can_pack(&self, w: u32, h: u32) -> bool {
        w > 0 && h > 0 && self.find_bottom_left(w, h).is_some()
    }

    fn pack(&mut self, w: u32, h: u32) -> Option<Rect> {
        if w == 0 || h == 0 {
            return None;
        }
        let (i, place) = self.find_bottom_left(w, h)?;
        self.split(i, &place);
        self.merge();
        Some(place)
    }
}
