//! Modelo de Contract
//!
//! Acuerdo entre un vehículo y un acompañante (UserProfile) con reparto
//! porcentual de combustible y mantenimiento.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::audit::{AuditEnvelope, Auditable};
use crate::utils::errors::AppResult;
use crate::utils::validation::{validate_length, validate_not_empty, validate_range, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contract {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditEnvelope,
    pub vehicle_id: i64,
    pub companion_id: i64,
    pub effective_start_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub is_active: bool,
    /// Porcentaje de aporte al combustible
    pub fuel_share: i16,
    /// Porcentaje de aporte al mantenimiento
    pub maintenance_share: i16,
    // TODO: reemplazar el texto libre por una regla de recurrencia (días + hora de salida)
    pub schedule: String,
}

impl Auditable for Contract {
    const KIND: &'static str = "Contract";

    fn envelope(&self) -> &AuditEnvelope {
        &self.audit
    }

    fn envelope_mut(&mut self) -> &mut AuditEnvelope {
        &mut self.audit
    }

    fn validate_policy(&mut self) -> AppResult<()> {
        let mut errors = FieldErrors::new();
        errors
            .check("fuel_share", validate_range(self.fuel_share, 0, 100))
            .check("maintenance_share", validate_range(self.maintenance_share, 0, 100))
            .check("schedule", validate_not_empty(&self.schedule))
            .check("schedule", validate_length(&self.schedule, 0, 255));

        if self.expiry_date < self.effective_start_date {
            errors.add(
                "expiry_date",
                "date_order",
                "Expiry date cannot be earlier than the effective start date",
            );
        }
        errors.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;

    fn contract(fuel: i16, maintenance: i16) -> Contract {
        Contract {
            audit: AuditEnvelope::new(),
            vehicle_id: 1,
            companion_id: 1,
            effective_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            is_active: true,
            fuel_share: fuel,
            maintenance_share: maintenance,
            schedule: "Mon-Fri 08:00".into(),
        }
    }

    #[test]
    fn test_share_bounds() {
        assert!(contract(0, 100).validate_policy().is_ok());
        assert!(contract(50, 25).validate_policy().is_ok());
        assert!(matches!(contract(101, 0).validate_policy(), Err(AppError::Validation(_))));
        assert!(matches!(contract(10, -1).validate_policy(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_expiry_before_start_is_rejected() {
        let mut c = contract(50, 50);
        c.expiry_date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(matches!(c.validate_policy(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_blank_schedule_is_rejected() {
        let mut c = contract(50, 50);
        c.schedule = " ".into();
        assert!(matches!(c.validate_policy(), Err(AppError::Validation(_))));
    }
}
