//! Error conversion glue between the form, domain and service layers.
//!
//! The domain and form modules must not depend on service error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::Invalid(fields) => ServiceError::Form(fields),
        }
    }
}
