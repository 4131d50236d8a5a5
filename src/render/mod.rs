mod surface;

pub use surface::CanvasSurface;

pub(crate) use surface::{circle_path, cubic_path, paint_color, segment_path};
