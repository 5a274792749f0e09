//! Proportional partition bar geometry.
//!
//! Pure function of the partition sizes and the available area; the renderer
//! only draws what comes out of [`layout`].

pub const NO_PARTITIONS: &str = "No Partitions Found";
pub const ZERO_SIZES: &str = "Partitions sizes are zero";

/// Fixed segment palette. Colors are assigned by position, modulo its length.
pub const PALETTE: [Rgb; 9] = [
    Rgb(0x00, 0x78, 0xD7),
    Rgb(0xE8, 0x11, 0x23),
    Rgb(0x10, 0x7C, 0x10),
    Rgb(0xFF, 0xB9, 0x00),
    Rgb(0x5C, 0x2D, 0x91),
    Rgb(0x00, 0x82, 0x72),
    Rgb(0xFF, 0x8C, 0x00),
    Rgb(0xE3, 0x00, 0x8C),
    Rgb(0x60, 0x3C, 0xBA),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Whole-area message drawn instead of a bar.
    Placeholder { bounds: Rect, message: &'static str },
    Partition {
        bounds: Rect,
        color: Rgb,
        label: String,
    },
}

impl Segment {
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Placeholder { bounds, .. } | Self::Partition { bounds, .. } => *bounds,
        }
    }
}

/// Spacing rules, in whatever unit the caller draws in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Left/right inset of the bar.
    pub margin: u32,
    /// Space between neighbouring segments.
    pub gap: u32,
    /// Smallest width any segment is drawn at, so tiny partitions stay visible.
    pub min_segment_width: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            margin: 10,
            gap: 5,
            min_segment_width: 5,
        }
    }
}

pub fn palette_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

pub fn segment_label(number: u32, size_mb: u64) -> String {
    format!("P{}: {} MB", number, size_mb)
}

/// Lay out `(number, size_mb)` pairs left to right in a band covering the
/// middle third of `width × height`.
///
/// Widths are floored then clamped to `min_segment_width`, so with many tiny
/// partitions the bar can run past `width`.
pub fn layout(partitions: &[(u32, u64)], width: u32, height: u32, params: LayoutParams) -> Vec<Segment> {
    let whole = Rect {
        x: 0,
        y: 0,
        width,
        height,
    };

    if partitions.is_empty() {
        return vec![Segment::Placeholder {
            bounds: whole,
            message: NO_PARTITIONS,
        }];
    }

    let total: u128 = partitions.iter().map(|(_, size)| u128::from(*size)).sum();
    if total == 0 {
        return vec![Segment::Placeholder {
            bounds: whole,
            message: ZERO_SIZES,
        }];
    }

    let usable = u128::from(width.saturating_sub(params.margin.saturating_mul(2)));
    let band_y = height / 3;
    let band_height = height / 3;
    let min_width = params.min_segment_width.max(1);

    let mut x = params.margin;
    partitions
        .iter()
        .enumerate()
        .map(|(i, (number, size_mb))| {
            let scaled = u128::from(*size_mb) * usable / total;
            let seg_width = u32::try_from(scaled).unwrap_or(u32::MAX).max(min_width);
            let segment = Segment::Partition {
                bounds: Rect {
                    x,
                    y: band_y,
                    width: seg_width,
                    height: band_height,
                },
                color: palette_color(i),
                label: segment_label(*number, *size_mb),
            };
            x = x.saturating_add(seg_width).saturating_add(params.gap);
            segment
        })
        .collect()
}
