//! Wire formats of the image index service.

use serde::{Deserialize, Serialize};

use imace_core::{ImagePath, ImagePoint, SearchResultItem};

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchHitDto {
    pub path: String,
    pub similarity: f64,
}

impl From<SearchHitDto> for SearchResultItem {
    fn from(dto: SearchHitDto) -> Self {
        SearchResultItem::new(dto.path, dto.similarity)
    }
}

/// `GET /paginated_images`. `page` and `page_size` are echoed back.
#[derive(Debug, Deserialize)]
pub(crate) struct PaginatedImagesDto {
    pub images: Vec<ImagePath>,
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImagePointDto {
    pub id: i64,
    pub position: [f32; 3],
    pub image_data: String,
}

impl From<ImagePointDto> for ImagePoint {
    fn from(dto: ImagePointDto) -> Self {
        ImagePoint {
            id: dto.id,
            position: dto.position,
            image_data: dto.image_data,
        }
    }
}
