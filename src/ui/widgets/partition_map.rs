use crate::models::PartitionScan;
use crate::utils::layout::{LayoutParams, Rgb, Segment, layout};
use colored::Colorize;

/// Cell-sized spacing for a terminal grid.
const TERMINAL_LAYOUT: LayoutParams = LayoutParams {
    margin: 1,
    gap: 1,
    min_segment_width: 5,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    bg: Option<Rgb>,
}

const BLANK: Cell = Cell { ch: ' ', bg: None };

/// Terminal partition bar. Holds only the latest layout and redraws from it.
pub struct PartitionMapWidget {
    width: u32,
    height: u32,
    segments: Vec<Segment>,
}

impl PartitionMapWidget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            segments: layout(&[], width, height, TERMINAL_LAYOUT),
        }
    }

    /// Replace the snapshot wholesale.
    pub fn update_partitions(&mut self, scan: &PartitionScan) {
        self.segments = layout(&scan.sizes(), self.width, self.height, TERMINAL_LAYOUT);
    }

    #[allow(dead_code)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn render(&self) -> String {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut grid = vec![vec![BLANK; width]; height];

        for segment in &self.segments {
            let bounds = segment.bounds();
            let (x, y) = (bounds.x as usize, bounds.y as usize);
            let (w, h) = (bounds.width as usize, bounds.height as usize);
            match segment {
                Segment::Placeholder { message, .. } => {
                    put_centered(&mut grid, y + h / 2, x, w, message, None);
                }
                Segment::Partition { color, label, .. } => {
                    for row in grid.iter_mut().skip(y).take(h) {
                        for cell in row.iter_mut().skip(x).take(w) {
                            *cell = Cell { ch: ' ', bg: Some(*color) };
                        }
                    }
                    if h > 0 {
                        put_centered(&mut grid, y + h / 2, x, w, label, Some(*color));
                    }
                }
            }
        }

        grid.iter().map(|row| render_row(row)).collect::<Vec<_>>().join("\n")
    }
}

/// Write `text` centered in `[x, x + w)` on `row`, truncated to `w` and
/// clipped to the grid.
fn put_centered(grid: &mut [Vec<Cell>], row: usize, x: usize, w: usize, text: &str, bg: Option<Rgb>) {
    let Some(cells) = grid.get_mut(row) else {
        return;
    };
    let len = text.chars().count().min(w);
    let start = x + (w - len) / 2;
    for (i, ch) in text.chars().take(len).enumerate() {
        if let Some(cell) = cells.get_mut(start + i) {
            *cell = Cell { ch, bg };
        }
    }
}

fn render_row(row: &[Cell]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < row.len() {
        let bg = row[i].bg;
        let run: String = row[i..]
            .iter()
            .take_while(|c| c.bg == bg)
            .map(|c| c.ch)
            .collect();
        i += run.chars().count();

        match bg {
            Some(Rgb(r, g, b)) => out.push_str(&run.white().on_truecolor(r, g, b).to_string()),
            None if i == row.len() => out.push_str(run.trim_end()),
            None => out.push_str(&run),
        }
    }
    out
}
