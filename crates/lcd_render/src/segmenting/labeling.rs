use std::collections::VecDeque;

/// Tight bounding box of one labeled region, in mask coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Result of labeling one binary mask. `labels` is row-major; 0 is
/// background and regions are numbered from 1 in the order their first
/// pixel is reached by a row-major scan (top-to-bottom, left-to-right).
/// `boxes[n]` is the bounding box of label `n + 1`.
#[derive(Clone, Debug)]
pub struct LabelMap {
    pub width: u32,
    pub height: u32,
    pub labels: Vec<u32>,
    pub boxes: Vec<BoundingBox>,
}

impl LabelMap {
    pub fn count(&self) -> u32 {
        self.boxes.len() as u32
    }

    pub fn label_at(&self, x: u32, y: u32) -> u32 {
        self.labels[(y * self.width + x) as usize]
    }
}

/// 4-connected component labeling over a 0/255 mask. Regions touching only
/// at a pixel corner stay distinct; regions sharing an edge merge.
pub fn label_components(mask: &[u8], width: u32, height: u32) -> LabelMap {
    assert_eq!(mask.len(), (width * height) as usize);

    let mut labels = vec![0u32; mask.len()];
    let mut boxes = Vec::new();
    let mut queue = VecDeque::new();
    let mut next_label = 1u32;

    for seed_y in 0..height {
        for seed_x in 0..width {
            let seed = (seed_y * width + seed_x) as usize;
            if mask[seed] == 0 || labels[seed] != 0 {
                continue;
            }

            let label = next_label;
            next_label += 1;
            labels[seed] = label;
            queue.push_back((seed_x, seed_y));

            let (mut min_x, mut min_y) = (seed_x, seed_y);
            let (mut max_x, mut max_y) = (seed_x, seed_y);

            while let Some((x, y)) = queue.pop_front() {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                let mut visit = |nx: u32, ny: u32| {
                    let idx = (ny * width + nx) as usize;
                    if mask[idx] != 0 && labels[idx] == 0 {
                        labels[idx] = label;
                        queue.push_back((nx, ny));
                    }
                };

                if x > 0 {
                    visit(x - 1, y);
                }
                if x + 1 < width {
                    visit(x + 1, y);
                }
                if y > 0 {
                    visit(x, y - 1);
                }
                if y + 1 < height {
                    visit(x, y + 1);
                }
            }

            boxes.push(BoundingBox {
                x: min_x,
                y: min_y,
                width: max_x - min_x + 1,
                height: max_y - min_y + 1,
            });
        }
    }

    LabelMap { width, height, labels, boxes }
}
