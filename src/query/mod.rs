pub mod handlers;
pub mod queries;

use serde::{Deserialize, Serialize};

/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
/// 이보다 큰 페이지 번호는 마지막 허용 페이지로 취급
pub const MAX_PAGE: i64 = 1_000_000;

/// 페이지 요청 파라미터
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageRequest {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }
}

/// 페이지 응답
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        let page_size = request.page_size();
        Self {
            items,
            total,
            page: request.page(),
            page_size,
            total_pages: ((total + page_size - 1) / page_size).max(1),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_bounds() {
        let req = PageRequest {
            page: Some(0),
            page_size: Some(1000),
        };
        assert_eq!(req.page(), 1);
        assert_eq!(req.page_size(), MAX_PAGE_SIZE);
        assert_eq!(req.offset(), 0);

        let req = PageRequest {
            page: Some(3),
            page_size: None,
        };
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let req = PageRequest {
            page: Some(i64::MAX),
            page_size: Some(100),
        };
        assert_eq!(req.page(), MAX_PAGE);
        assert_eq!(req.offset(), (MAX_PAGE - 1) * 100);
        assert!(req.offset() > 0);

        let req = PageRequest {
            page: Some(i64::MIN),
            page_size: Some(i64::MIN),
        };
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_total_pages() {
        let req = PageRequest::default();
        assert_eq!(Page::<()>::new(vec![], 0, req).total_pages, 1);
        assert_eq!(Page::<()>::new(vec![], 10, req).total_pages, 1);
        assert_eq!(Page::<()>::new(vec![], 11, req).total_pages, 2);
    }
}
