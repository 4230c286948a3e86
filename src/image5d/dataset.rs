use ndarray::{Array, IxDyn};

use crate::model::{AxisKind, CoreError, DatasetF32, Dimensions, PixelBuffer, PixelType, Result};

use super::Image5D;

const AXES: [AxisKind; 5] = [
    AxisKind::Time,
    AxisKind::Z,
    AxisKind::Channel,
    AxisKind::Y,
    AxisKind::X,
];

impl Image5D {
    /// Builds a container from a dataset. Axes missing from the metadata
    /// count as size 1; `Unknown` axes must have size 1.
    pub fn from_dataset(dataset: &DatasetF32, pixel_type: PixelType) -> Result<Self> {
        dataset.validate()?;
        let metadata = &dataset.metadata;
        if let Some(dim) = metadata
            .dims
            .iter()
            .find(|dim| dim.axis == AxisKind::Unknown && dim.size != 1)
        {
            return Err(CoreError::InvalidMetadata(format!(
                "unmapped axis of size {} in dataset",
                dim.size
            )));
        }
        let lookup = AXES.map(|axis| metadata.axis_index(axis));
        let [frames, slices, channels, height, width] =
            AXES.map(|axis| dataset.axis_len(axis));
        let dimensions = Dimensions::new(width, height, channels, slices, frames);
        dimensions.validate()?;

        let mut coordinates = vec![0usize; dataset.ndim()];
        let mut planes = Vec::with_capacity(dimensions.plane_count());
        let mut values = Vec::with_capacity(dimensions.plane_len());
        for frame in 0..frames {
            for slice in 0..slices {
                for channel in 0..channels {
                    values.clear();
                    for y in 0..height {
                        for x in 0..width {
                            for (axis, value) in lookup.iter().zip([frame, slice, channel, y, x]) {
                                if let Some(axis) = axis {
                                    coordinates[*axis] = value;
                                }
                            }
                            values.push(dataset.data[coordinates.as_slice()]);
                        }
                    }
                    planes.push(PixelBuffer::from_f32(pixel_type, &values));
                }
            }
        }

        let title = metadata.title.clone().unwrap_or_default();
        let mut image = Self::from_planes(title, dimensions, planes)?;
        for (channel, name) in metadata.channel_names.iter().enumerate().take(channels) {
            image.set_channel_label(channel + 1, name.clone())?;
        }
        Ok(image)
    }

    /// Exports every plane into a `[time, z, channel, y, x]` dataset.
    pub fn to_dataset(&self) -> Result<DatasetF32> {
        let shape = vec![
            self.frame_count(),
            self.slice_count(),
            self.channel_count(),
            self.height,
            self.width,
        ];
        let mut data = Vec::with_capacity(shape.iter().product());
        for plane in self.store.planes() {
            data.extend(plane.read().to_f32_vec());
        }
        let array = Array::from_shape_vec(IxDyn(&shape), data).map_err(|err| {
            CoreError::InvalidMetadata(format!("cannot shape exported planes: {err}"))
        })?;

        let mut dataset = DatasetF32::with_export_axes(array, self.pixel_type())?;
        dataset.metadata.title = Some(self.title.clone());
        dataset.metadata.channel_names = self
            .calibrations
            .iter()
            .map(|calibration| calibration.label.clone())
            .collect();
        Ok(dataset)
    }
}
