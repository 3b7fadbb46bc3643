//! Input side of densiscii: image loading, grayscale preparation and folder iteration.

pub mod folder_batch;
pub mod image;
pub mod resize;
