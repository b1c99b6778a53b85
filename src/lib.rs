//! Live disk I/O graph in the terminal.
//!
//! Samples a block device's kernel counters (`/sys/block/<dev>/stat`)
//! every 200 ms and renders read/write bandwidth plus in-flight
//! operations as a scrolling bar chart, using 24-bit color escapes at
//! double vertical resolution (two pixel rows per character cell via the
//! upper-half-block glyph).
//!
//! Pipeline: [`sampler`] feeds a fixed-capacity [`history`] ring; the
//! [`raster`] module draws the ring against the auto-growing [`scale`]
//! into a [`canvas`]; the [`encoder`] packs the canvas into escape-coded
//! text; [`app`] drives the whole thing under a raw-mode guard.

pub mod app;
pub mod canvas;
pub mod config;
pub mod device;
pub mod encoder;
pub mod error;
pub mod history;
pub mod raster;
pub mod sampler;
pub mod scale;

pub use app::App;
pub use canvas::{Canvas, Rgba};
pub use config::Config;
pub use device::Device;
pub use encoder::{encode, Background};
pub use error::GraphError;
pub use history::{HistoryRing, Measurement, HIST_CAPACITY};
pub use raster::{rasterize, stamp_scale_labels};
pub use sampler::Sampler;
pub use scale::{Overflow, ScaleState};
