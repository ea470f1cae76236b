//! Pagination utilities for list endpoints.
//!
//! List endpoints accept `limit`, `offset`, and `page` query parameters and
//! answer with a `pagination` object describing where the returned slice sits
//! within the full result set.
//!
//! - `limit`: items per page, clamped to [1, 100], default 10
//! - `offset`: items to skip, clamped to a minimum of 0, default 0
//! - `page`: 1-indexed page number; when present it takes precedence over `offset`
//!
//! # Example
//!
//! ```ignore
//! async fn list_documents(
//!     Query(params): Query<PaginationParams>,
//! ) -> Result<Json<DocumentListResponse>, AppError> {
//!     let (documents, total) = fetch(params.limit(), params.offset()).await?;
//!     let pagination = PaginationMeta::new(total, &params);
//!     Ok(Json(DocumentListResponse { documents, pagination }))
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Query strings carry numbers as text, and an empty value means "not set".
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Position of a page within a result set.
///
/// ```json
/// { "totalCount": 42, "pages": 5, "currentPage": 2, "pageSize": 10 }
/// ```
///
/// An empty result set reports `pages: 0` and `currentPage: 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of matching items across all pages
    pub total_count: i64,
    /// Number of pages, `ceil(totalCount / pageSize)`
    pub pages: i64,
    /// 1-indexed page the returned slice starts on
    pub current_page: i64,
    /// Effective page size that was applied
    pub page_size: i64,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total_count: i64, params: &PaginationParams) -> Self {
        Self::from_parts(total_count, params.limit(), params.offset())
    }

    /// An offset past the last row keeps its page number, except over an
    /// empty result set where the page is always 1.
    #[must_use]
    pub fn from_parts(total_count: i64, limit: i64, offset: i64) -> Self {
        let page_size = limit.max(1);
        let total_count = total_count.max(0);
        let current_page = if total_count == 0 {
            1
        } else {
            (offset.max(0) / page_size).saturating_add(1)
        };
        Self {
            total_count,
            pages: total_count.saturating_add(page_size - 1) / page_size,
            current_page,
            page_size,
        }
    }
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (default: 0, ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            offset: Some(0),
            page: None,
        }
    }
}

impl PaginationParams {
    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Returns the effective offset.
    ///
    /// If `page` is set the offset is derived from it, otherwise the explicit
    /// offset (or 0) is used. Never negative.
    #[must_use]
    pub fn offset(&self) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1).saturating_mul(self.limit())
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<i64>, offset: Option<i64>, page: Option<i64>) -> PaginationParams {
        PaginationParams {
            limit,
            offset,
            page,
        }
    }

    #[test]
    fn test_pagination_params_defaults() {
        let p = params(None, None, None);
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.page(), None);
    }

    #[test]
    fn test_pagination_params_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ];

        for (input, expected) in test_cases {
            assert_eq!(params(input, Some(0), None).limit(), expected);
        }
    }

    #[test]
    fn test_pagination_params_negative_offset_clamped() {
        assert_eq!(params(Some(10), Some(-5), None).offset(), 0);
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let p = params(Some(20), Some(7), Some(3));
        assert_eq!(p.offset(), 40);
        assert_eq!(p.page(), Some(3));
    }

    #[test]
    fn test_page_zero_treated_as_first_page() {
        assert_eq!(params(Some(10), None, Some(0)).offset(), 0);
    }

    #[test]
    fn test_pagination_params_deserialize_strings() {
        let json = r#"{"limit":"25","offset":"50"}"#;
        let p: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.limit(), 25);
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn test_pagination_params_deserialize_empty_strings() {
        let json = r#"{"limit":"","offset":""}"#;
        let p: PaginationParams = serde_json::from_str(json).unwrap();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_pagination_params_deserialize_garbage_fails() {
        let json = r#"{"limit":"ten"}"#;
        assert!(serde_json::from_str::<PaginationParams>(json).is_err());
    }

    #[test]
    fn test_meta_42_items_second_page() {
        let meta = PaginationMeta::from_parts(42, 10, 10);
        assert_eq!(meta.total_count, 42);
        assert_eq!(meta.pages, 5);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.page_size, 10);
    }

    #[test]
    fn test_meta_exact_multiple() {
        let meta = PaginationMeta::from_parts(30, 10, 0);
        assert_eq!(meta.pages, 3);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_meta_empty_result_set() {
        let meta = PaginationMeta::from_parts(0, 10, 0);
        assert_eq!(meta.pages, 0);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_meta_offset_not_on_page_boundary() {
        let meta = PaginationMeta::from_parts(100, 10, 15);
        assert_eq!(meta.current_page, 2);
    }

    #[test]
    fn test_meta_uses_effective_limit() {
        let meta = PaginationMeta::new(500, &params(Some(1000), None, Some(2)));
        assert_eq!(meta.page_size, 100);
        assert_eq!(meta.pages, 5);
        assert_eq!(meta.current_page, 2);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let p = params(Some(10), None, Some(i64::MAX));
        assert_eq!(p.offset(), i64::MAX);

        let meta = PaginationMeta::new(3, &p);
        assert_eq!(meta.pages, 1);
        assert_eq!(meta.current_page, i64::MAX / 10 + 1);
    }

    #[test]
    fn test_meta_offset_past_end() {
        let meta = PaginationMeta::from_parts(12, 10, 50);
        assert_eq!(meta.total_count, 12);
        assert_eq!(meta.pages, 2);
        assert_eq!(meta.current_page, 6);
    }

    #[test]
    fn test_meta_offset_past_end_of_empty_set() {
        let meta = PaginationMeta::from_parts(0, 10, 50);
        assert_eq!(meta.pages, 0);
        assert_eq!(meta.current_page, 1);
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let meta = PaginationMeta::from_parts(42, 10, 10);
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "totalCount": 42,
                "pages": 5,
                "currentPage": 2,
                "pageSize": 10
            })
        );
    }
}
