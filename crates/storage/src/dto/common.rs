use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LimitOffsetParams {
    /// Page size, 1 to 100
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of records to skip
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl Default for LimitOffsetParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl LimitOffsetParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
        }
        if self.offset < 0 {
            return Err("offset must be >= 0".to_string());
        }
        Ok(())
    }
}

/// One slice of a filtered collection plus the size of the whole collection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, params: LimitOffsetParams) -> Self {
        Self {
            items,
            total,
            limit: params.limit,
            offset: params.offset,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = LimitOffsetParams::default();
        assert_eq!(params.limit, 50);
        assert_eq!(params.offset, 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_limit_bounds() {
        let zero = LimitOffsetParams { limit: 0, offset: 0 };
        let too_big = LimitOffsetParams { limit: 101, offset: 0 };
        let max = LimitOffsetParams { limit: 100, offset: 0 };
        assert!(zero.validate().is_err());
        assert!(too_big.validate().is_err());
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_negative_offset_rejected() {
        let params = LimitOffsetParams { limit: 10, offset: -1 };
        assert_eq!(params.validate().unwrap_err(), "offset must be >= 0");
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let params = LimitOffsetParams { limit: 2, offset: 4 };
        let page = Page::new(vec![1, 2], 7, params).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 7);
        assert_eq!(page.limit, 2);
        assert_eq!(page.offset, 4);
    }
}
