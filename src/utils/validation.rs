//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por las políticas de cada entidad.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    /// Color en formato `#RRGGBB`
    pub static ref HEX_COLOUR: Regex = Regex::new(r"^#[0-9a-fA-F]{6}$").unwrap();
}

/// Acumulador de errores por campo, convertible a `AppError::Validation`
#[derive(Debug)]
pub struct FieldErrors {
    errors: ValidationErrors,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self {
            errors: ValidationErrors::new(),
        }
    }

    /// Registrar el resultado de una validación para un campo
    pub fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) -> &mut Self {
        if let Err(error) = result {
            self.errors.add(field, error);
        }
        self
    }

    /// Registrar un error con mensaje explícito
    pub fn add(&mut self, field: &'static str, code: &'static str, message: &'static str) -> &mut Self {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        self.errors.add(field, error);
        self
    }

    pub fn finish(self) -> AppResult<()> {
        if self.errors.errors().is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima y máxima
pub fn validate_length(value: &str, min: usize, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        let mut error = ValidationError::new("length");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &len);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum<T: PartialEq + std::fmt::Debug + Serialize>(
    value: T,
    allowed_values: &[T],
) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &format!("{:?}", allowed_values));
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar color hexadecimal `#RRGGBB`
pub fn validate_hex_colour(value: &str) -> Result<(), ValidationError> {
    if !HEX_COLOUR.is_match(value) {
        let mut error = ValidationError::new("hex_colour");
        error.message = Some("Colour must match the #RRGGBB pattern".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if value.trim().is_empty() || len > 10 {
        let mut error = ValidationError::new("registration_number");
        error.message = Some("Registration number is required and must be at most 10 characters".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        let value = "test";
        assert!(validate_length(value, 1, 10).is_ok());
        assert!(validate_length(value, 5, 10).is_err());
        assert!(validate_length(value, 1, 3).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(50, 0, 100).is_ok());
        assert!(validate_range(0, 0, 100).is_ok());
        assert!(validate_range(100, 0, 100).is_ok());
        assert!(validate_range(101, 0, 100).is_err());
        assert!(validate_range(-1, 0, 100).is_err());
    }

    #[test]
    fn test_validate_enum() {
        let allowed = vec!["Saddar", "Malir"];
        assert!(validate_enum("Saddar", &allowed).is_ok());
        assert!(validate_enum("Lahore", &allowed).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(24.86, 67.01).is_ok());
        assert!(validate_coordinates(91.0, 67.0).is_err());
        assert!(validate_coordinates(24.0, -181.0).is_err());
    }

    #[test]
    fn test_validate_hex_colour() {
        assert!(validate_hex_colour("#1A2B3C").is_ok());
        assert!(validate_hex_colour("#ffffff").is_ok());
        assert!(validate_hex_colour("blue").is_err());
        assert!(validate_hex_colour("#12345").is_err());
        assert!(validate_hex_colour("#1234567").is_err());
        assert!(validate_hex_colour("1A2B3C").is_err());
    }

    #[test]
    fn test_validate_registration_number() {
        assert!(validate_registration_number("ABC-877").is_ok());
        assert!(validate_registration_number("").is_err());
        assert!(validate_registration_number("   ").is_err());
        assert!(validate_registration_number("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_field_errors_collects() {
        let mut errors = FieldErrors::new();
        errors
            .check("vendor", validate_not_empty(""))
            .check("model", validate_not_empty("Corolla"));
        match errors.finish() {
            Err(AppError::Validation(e)) => {
                let fields = e.field_errors();
                assert!(fields.contains_key("vendor"));
                assert!(!fields.contains_key("model"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
