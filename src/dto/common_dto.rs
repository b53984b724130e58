use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::errors::{AppError, AppResult};

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

// Request opcional para anular o eliminar
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VoidRequest {
    #[validate(length(max = 1024, message = "Void reason must be at most 1024 characters"))]
    pub reason: Option<String>,
}

impl VoidRequest {
    /// Body opcional: vacío equivale a no enviar motivo; JSON inválido es un 400
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let request = if body.iter().all(u8::is_ascii_whitespace) {
            Self::default()
        } else {
            serde_json::from_slice(body)
                .map_err(|e| AppError::BadRequest(format!("Invalid void request body: {}", e)))?
        };
        request.validate()?;
        Ok(request)
    }
}

// Estado de anulación enviado desde la consola de administración.
// Sin `voided` el registro conserva su estado actual.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AdminVoidState {
    pub voided: Option<bool>,
    #[validate(length(max = 1024, message = "Void reason must be at most 1024 characters"))]
    pub void_reason: Option<String>,
}
