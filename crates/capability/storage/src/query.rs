//! 列表查询辅助：分页、大小写不敏感搜索、机队筛选条件。

use domain::{ActivityKind, Aircraft, AircraftStatus};
use serde::Serialize;

/// 默认机队分页大小。
pub const DEFAULT_FLEET_PAGE_SIZE: usize = 6;
/// 默认动态分页大小。
pub const DEFAULT_ACTIVITY_PAGE_SIZE: usize = 10;

/// 一页数据。页码从 1 开始。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// 对已筛选的列表分页。
///
/// `total_pages = ceil(total / page_size)`；越界页返回空列表。
/// `page` 为 0 时按第 1 页处理，`page_size` 为 0 时按 1 处理。
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let items = items.into_iter().skip(start).take(page_size).collect();
    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// 大小写不敏感的包含判断；空查询匹配一切。
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// 机队列表筛选条件。
#[derive(Debug, Clone)]
pub struct FleetQuery {
    pub status: Option<AircraftStatus>,
    pub search: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for FleetQuery {
    fn default() -> Self {
        Self {
            status: None,
            search: None,
            page: 1,
            page_size: DEFAULT_FLEET_PAGE_SIZE,
        }
    }
}

impl FleetQuery {
    /// 状态筛选 + 型号/序列号搜索。
    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        if let Some(status) = self.status {
            if aircraft.status != status {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(search) => {
                contains_ci(&aircraft.model, search) || contains_ci(&aircraft.serial, search)
            }
            None => true,
        }
    }
}

/// 动态列表筛选条件。
#[derive(Debug, Clone)]
pub struct ActivityQuery {
    pub kind: Option<ActivityKind>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            kind: None,
            page: 1,
            page_size: DEFAULT_ACTIVITY_PAGE_SIZE,
        }
    }
}
