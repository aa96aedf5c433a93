use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::projection::{CategoryFilter, StatusFilter},
    error::{AppError, AppResult},
};

/// Explicit confirmation for destructive actions.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmQuery {
    pub confirm: Option<bool>,
    pub confirm_again: Option<bool>,
}

impl ConfirmQuery {
    pub fn confirmed() -> Self {
        Self {
            confirm: Some(true),
            confirm_again: None,
        }
    }

    pub fn confirmed_twice() -> Self {
        Self {
            confirm: Some(true),
            confirm_again: Some(true),
        }
    }

    pub fn require_once(&self) -> AppResult<()> {
        if self.confirm != Some(true) {
            return Err(AppError::BadRequest(
                "confirmation required: pass confirm=true".into(),
            ));
        }
        Ok(())
    }

    pub fn require_twice(&self) -> AppResult<()> {
        self.require_once()?;
        if self.confirm_again != Some(true) {
            return Err(AppError::BadRequest(
                "second confirmation required: pass confirm_again=true".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    /// Category name, or `all`.
    pub category: Option<String>,
}

impl CategoryQuery {
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::parse(self.category.as_deref())
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    /// `new`, `preparing`, `ready` or `all`.
    pub status: Option<String>,
}

impl StatusQuery {
    pub fn filter(&self) -> AppResult<StatusFilter> {
        Ok(StatusFilter::parse(self.status.as_deref())?)
    }
}
