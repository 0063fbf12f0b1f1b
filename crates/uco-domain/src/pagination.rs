//! Zero-based pagination shared by the users listing and the admin console.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_SIZE: u32 = 10;
pub const MAX_SIZE: u32 = 100;

/// Pagination parameters for list endpoints.
///
/// - `page`: zero-based, default 0
/// - `size`: 1–100, default 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl PageRequest {
    /// Build from raw query-string values. Missing, negative or unparsable
    /// values fall back to the defaults; the result is already normalized.
    pub fn parse(page: Option<&str>, size: Option<&str>) -> Self {
        let page = page
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v >= 0)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_PAGE);
        let size = size
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v > 0)
            .map(|v| u32::try_from(v).unwrap_or(MAX_SIZE))
            .unwrap_or(DEFAULT_SIZE);
        Self { page, size }.normalized()
    }

    /// Clamp `size` to 1–100.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page,
            size: self.size.clamp(1, MAX_SIZE),
        }
    }

    /// Row offset for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            size: request.size,
            total_elements: 0,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
