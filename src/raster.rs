//! History-to-pixel rasterization.
//!
//! Turns the measurement ring and the current scale into plot pixels and
//! legend labels. Column 0 of the plot is the rightmost interior column
//! (newest sample); history scrolls left over time. Each series maps to a
//! single pixel row per column via `row = value * height / ceiling`;
//! values at or above the ceiling land outside the visible band and are
//! reported as overflow so the scale can double next frame.

use crate::canvas::{Canvas, Rgba};
use crate::history::HistoryRing;
use crate::scale::{Overflow, ScaleState};

/// Fixed inflight hue; read/write hues are derived per column from the
/// age fade.
const INFLIGHT_COLOR: Rgba = Rgba::opaque(0xb0, 0x60, 0x00);

/// Render the ring into the canvas interior and report scale overflow.
///
/// Columns without a sample are left untouched (transparent, so they
/// blend to the terminal background). The border rows and columns are
/// never written.
pub fn rasterize(ring: &HistoryRing, scale: &ScaleState, canvas: &mut Canvas) -> Overflow {
    let width = canvas.width();
    let height = canvas.height();
    let mut overflow = Overflow::default();
    if width < 3 || height < 3 {
        return overflow;
    }

    for age in 0..width - 2 {
        let Some(sample) = ring.at(age) else {
            break;
        };
        overflow.observe(sample, scale);

        // Older columns fade toward the left edge.
        let brightness = (0x40 + 0xb0 * (width - age) / width).min(0xff) as u8;
        let read_color = Rgba::opaque(0, brightness, 0);
        let write_color = Rgba::opaque(brightness, 0, 0);

        let read_row = (sample.read_rate as usize).saturating_mul(height) / scale.max_bandwidth() as usize;
        let write_row = (sample.write_rate as usize).saturating_mul(height) / scale.max_bandwidth() as usize;
        let ops_row = (sample.inflight as usize).saturating_mul(height) / scale.max_ops() as usize;

        let x = width - 2 - age;
        for level in 1..height - 1 {
            // Draw order green, red, orange: last writer wins.
            let mut color = Rgba::opaque(0, 0, 0);
            if level == read_row {
                color = read_color;
            }
            if level == write_row {
                color = write_color;
            }
            if level == ops_row {
                color = INFLIGHT_COLOR;
            }
            canvas.set_pixel(x, height - 1 - level, color);
        }
    }

    overflow
}

/// Stamp the axis labels for the current scale into the legend grid.
///
/// Bandwidth quarter-marks on the left, operation quarter-marks on the
/// right, at the top and at 1/8, 2/8, 3/8 of the pixel height.
pub fn stamp_scale_labels(scale: &ScaleState, canvas: &mut Canvas) {
    let width = canvas.width();
    let height = canvas.height();
    let quarter_bw = scale.quarter_bandwidth_mib().max(1);
    let quarter_ops = scale.quarter_ops();

    let rows = [1, height / 8, height / 8 * 2, height / 8 * 3];
    for (i, &row) in rows.iter().enumerate() {
        let multiple = 4 - i as u64;
        let bw_label = format!("{} MiB/s", multiple * quarter_bw);
        let ops_label = format!("{} ops", multiple * quarter_ops);
        canvas.stamp_legend(1, row, &bw_label);
        let ops_x = width.saturating_sub(1 + ops_label.len());
        canvas.stamp_legend(ops_x, row, &ops_label);
    }
}
