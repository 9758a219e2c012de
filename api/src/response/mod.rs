use db::thresholds::Exceedance;
use serde::Serialize;

/// Standardized response envelope for all outgoing JSON:
///
/// ```json
/// { "success": true, "data": { ... }, "pagination": { ... } }
/// { "success": false, "error": "Measurement not found" }
/// ```
///
/// `pagination` appears only on list responses; `exceedances` only on
/// create responses whose readings crossed a severity threshold.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exceedances: Option<Vec<Exceedance>>,
}

#[derive(Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            pagination: None,
            exceedances: None,
        }
    }

    pub fn success_paginated(data: T, pagination: Pagination) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::success(data)
        }
    }

    /// Success carrying threshold exceedances; the field is omitted
    /// entirely when the list is empty.
    pub fn success_with_exceedances(data: T, exceedances: Vec<Exceedance>) -> Self {
        Self {
            exceedances: (!exceedances.is_empty()).then_some(exceedances),
            ..Self::success(data)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            pagination: None,
            exceedances: None,
        }
    }
}
