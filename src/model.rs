mod axis;
mod dataset;
mod error;
mod metadata;
mod pixels;


pub use axis::{AxisKind, Dimension, FillMode, PixelType, default_axis_for_index};
pub use dataset::{Dataset, DatasetF32};
pub use error::{CoreError, Result};
pub use metadata::{Dim, Dimensions, Metadata};
pub use pixels::{PixelBuffer, PixelPlane, Rect};
