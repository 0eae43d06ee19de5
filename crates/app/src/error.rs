//! Application error surface.
//!
//! The engines return typed errors and never format user-facing text; this
//! layer maps every failure kind to the plain-language message the UI
//! shows.

use thiserror::Error;

use domain::DomainError;
use persistence::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Plain-language message for the staff-facing UI.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Domain(DomainError::InvalidAmount(_)) => {
                "El monto ingresado no es válido.".to_string()
            }
            AppError::Domain(DomainError::UnknownCustomer(_)) => {
                "No encontramos ese cliente.".to_string()
            }
            AppError::Domain(DomainError::UnknownCommerce(_)) => {
                "No encontramos ese comercio.".to_string()
            }
            AppError::Domain(DomainError::RewardMismatch(_)) => {
                "El premio no se puede canjear en esta compra.".to_string()
            }
            AppError::Store(StoreError::NotFound { .. }) => {
                "No encontramos el registro solicitado.".to_string()
            }
            AppError::Store(_) => "Ocurrió un error interno. Probá de nuevo.".to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let detail = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_user_messages_are_plain_language() {
        let err = AppError::Domain(DomainError::InvalidAmount("NaN".to_string()));
        assert_eq!(err.user_message(), "El monto ingresado no es válido.");

        let err = AppError::Domain(DomainError::UnknownCustomer(Uuid::new_v4()));
        assert_eq!(err.user_message(), "No encontramos ese cliente.");
    }

    #[test]
    fn test_validation_errors_flatten_to_one_message() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 2, message = "Name must be 2-100 characters"))]
            name: String,
        }

        let err: AppError = Probe {
            name: "x".to_string(),
        }
        .validate()
        .unwrap_err()
        .into();
        assert!(err.user_message().contains("name"));
        assert!(err.user_message().contains("2-100"));
    }
}
