use serde::{Deserialize, Serialize};

use super::data_url::{DataUrl, DataUrlError};

/// An indexed image placed in 3D by its reduced embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub id: i64,
    pub position: [f32; 3],
    /// Thumbnail as a `data:` URL.
    pub image_data: String,
}

impl ImagePoint {
    pub fn thumbnail(&self) -> Result<DataUrl, DataUrlError> {
        DataUrl::parse(&self.image_data)
    }
}
