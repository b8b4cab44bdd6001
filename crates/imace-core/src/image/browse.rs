use serde::{Deserialize, Serialize};

use super::ImagePath;

/// Number of images per browse page.
///
/// Only the sizes offered by the gallery are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    #[default]
    Twelve,
    TwentyFour,
    ThirtySix,
    FortyEight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported page size {0}, expected one of 12, 24, 36, 48")]
pub struct InvalidPageSize(pub u32);

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Twelve,
        PageSize::TwentyFour,
        PageSize::ThirtySix,
        PageSize::FortyEight,
    ];

    pub const fn get(self) -> u32 {
        match self {
            PageSize::Twelve => 12,
            PageSize::TwentyFour => 24,
            PageSize::ThirtySix => 36,
            PageSize::FortyEight => 48,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(InvalidPageSize(value))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Browse request parameters. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowseKey {
    pub page: u32,
    pub page_size: PageSize,
}

impl BrowseKey {
    /// Builds a key, lifting page 0 to the first page.
    pub fn new(page: u32, page_size: PageSize) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    pub fn first(page_size: PageSize) -> Self {
        Self::new(1, page_size)
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size.get())
    }
}

impl Default for BrowseKey {
    fn default() -> Self {
        Self::first(PageSize::default())
    }
}

/// One page of the unfiltered image listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowsePage {
    items: Vec<ImagePath>,
    key: BrowseKey,
    total: u64,
}

impl BrowsePage {
    /// Builds a page for `key`. Items beyond the page size are dropped so the
    /// page never holds more than `page_size` entries.
    pub fn new(key: BrowseKey, mut items: Vec<ImagePath>, total: u64) -> Self {
        let capacity = key.page_size.get() as usize;
        if items.len() > capacity {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                received = items.len(),
                page_size = capacity,
                page = key.page,
                "browse page larger than page size, truncating"
            );
            items.truncate(capacity);
        }
        Self { items, key, total }
    }

    pub fn empty(key: BrowseKey) -> Self {
        Self::new(key, Vec::new(), 0)
    }

    pub fn items(&self) -> &[ImagePath] {
        &self.items
    }

    pub fn key(&self) -> BrowseKey {
        self.key
    }

    pub fn page(&self) -> u32 {
        self.key.page
    }

    pub fn page_size(&self) -> PageSize {
        self.key.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.key.page_size)
    }
}

/// `ceil(total / page_size)`.
pub fn total_pages(total: u64, page_size: PageSize) -> u32 {
    let size = u64::from(page_size.get());
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(n: usize) -> Vec<ImagePath> {
        (0..n).map(|i| ImagePath::from(format!("{i}.jpg"))).collect()
    }

    #[test]
    fn page_size_accepts_only_enumerated_values() {
        assert_eq!(PageSize::try_from(24), Ok(PageSize::TwentyFour));
        assert_eq!(PageSize::try_from(13), Err(InvalidPageSize(13)));
    }

    #[test]
    fn page_size_deserializes_from_number() {
        let size: PageSize = serde_json::from_str("36").unwrap();
        assert_eq!(size, PageSize::ThirtySix);
        assert!(serde_json::from_str::<PageSize>("10").is_err());
    }

    #[test]
    fn browse_key_lifts_page_zero() {
        assert_eq!(BrowseKey::new(0, PageSize::Twelve).page, 1);
        assert_eq!(BrowseKey::new(3, PageSize::Twelve).offset(), 24);
    }

    #[test]
    fn browse_page_truncates_to_page_size() {
        let page = BrowsePage::new(BrowseKey::first(PageSize::Twelve), paths(15), 15);
        assert_eq!(page.items().len(), 12);
        assert_eq!(page.total(), 15);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, PageSize::Twelve), 0);
        assert_eq!(total_pages(12, PageSize::Twelve), 1);
        assert_eq!(total_pages(13, PageSize::Twelve), 2);
        assert_eq!(total_pages(100, PageSize::FortyEight), 3);
    }
}
