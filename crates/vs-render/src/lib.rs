pub mod hit;
pub mod raster;

pub use hit::hit_test;
pub use raster::{RasterError, rasterize, render_pixmap};
