//! Error conversion glue between the form and service layers.
//!
//! The domain layer must not depend on service error types, so conversions
//! for domain and form errors live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::news::{CategoryFilterFormError, NewsFormError};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<NewsFormError> for ServiceError {
    fn from(val: NewsFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CategoryFilterFormError> for ServiceError {
    fn from(val: CategoryFilterFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
