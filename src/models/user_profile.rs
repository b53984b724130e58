//! Modelo de UserProfile
//!
//! Perfil de usuario, uno a uno con un principal. Lleva su propio ciclo
//! de activación (`active` / `date_deactivated`), independiente de la anulación.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

use crate::models::audit::{AuditEnvelope, Auditable};
use crate::utils::errors::AppResult;
use crate::utils::validation::{
    validate_coordinates, validate_enum, validate_length, validate_not_empty, FieldErrors,
};

/// Zonas de la ciudad admitidas
pub const TOWNS: [&str; 18] = [
    "Baldia",
    "Bin Qasim",
    "Gadap",
    "Gulberg",
    "Gulshan-e-Iqbal",
    "Jamshed",
    "Kemari",
    "Korangi",
    "Landhi",
    "Liaquatabad",
    "Lyari",
    "Malir",
    "New Karachi",
    "North Nazimabad",
    "Orangi",
    "Saddar",
    "Shah Faisal",
    "SITE",
];

pub const GENDERS: [&str; 2] = ["M", "F"];

/// Tipo de usuario - mapea al ENUM user_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Owner,
    Companion,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: AuditEnvelope,
    pub user_id: i64,
    pub birthdate: NaiveDate,
    pub gender: String,
    pub user_type: UserType,
    pub primary_contact: String,
    pub alternate_contact: Option<String>,
    pub address: String,
    pub address_latitude: Option<Decimal>,
    pub address_longitude: Option<Decimal>,
    pub landmark: String,
    pub town: String,
    pub active: bool,
    pub date_deactivated: Option<DateTime<Utc>>,
    pub bio: Option<String>,
}

impl UserProfile {
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.date_deactivated = Some(now);
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.date_deactivated = None;
    }
}

impl Auditable for UserProfile {
    const KIND: &'static str = "UserProfile";

    fn envelope(&self) -> &AuditEnvelope {
        &self.audit
    }

    fn envelope_mut(&mut self) -> &mut AuditEnvelope {
        &mut self.audit
    }

    fn validate_policy(&mut self) -> AppResult<()> {
        self.primary_contact = self.primary_contact.trim().to_string();

        let mut errors = FieldErrors::new();
        errors
            .check("gender", validate_enum(self.gender.as_str(), &GENDERS))
            .check("town", validate_enum(self.town.as_str(), &TOWNS))
            .check("primary_contact", validate_not_empty(&self.primary_contact))
            .check("primary_contact", validate_length(&self.primary_contact, 0, 20))
            .check("address", validate_length(&self.address, 0, 255))
            .check("landmark", validate_not_empty(&self.landmark))
            .check("landmark", validate_length(&self.landmark, 0, 255));

        if let Some(alternate) = &self.alternate_contact {
            errors.check("alternate_contact", validate_length(alternate, 0, 20));
        }

        match (self.address_latitude, self.address_longitude) {
            (Some(lat), Some(lng)) => {
                let lat = lat.to_f64().unwrap_or(f64::NAN);
                let lng = lng.to_f64().unwrap_or(f64::NAN);
                errors.check("address_latitude", validate_coordinates(lat, lng));
            }
            (None, None) => {}
            _ => {
                errors.add(
                    "address_latitude",
                    "coordinates",
                    "Latitude and longitude must be provided together",
                );
            }
        }

        errors.finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::str::FromStr;

    pub(crate) fn profile(user_id: i64) -> UserProfile {
        UserProfile {
            audit: AuditEnvelope::new(),
            user_id,
            birthdate: NaiveDate::from_ymd_opt(1995, 3, 14).unwrap(),
            gender: "F".into(),
            user_type: UserType::Companion,
            primary_contact: "03001234567".into(),
            alternate_contact: None,
            address: "House 12, Block 4".into(),
            address_latitude: Some(Decimal::from_str("24.860700").unwrap()),
            address_longitude: Some(Decimal::from_str("67.001100").unwrap()),
            landmark: "Near Dolmen Mall".into(),
            town: "Gulshan-e-Iqbal".into(),
            active: true,
            date_deactivated: None,
            bio: None,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(profile(1).validate_policy().is_ok());
    }

    #[test]
    fn test_unknown_town_is_rejected() {
        let mut p = profile(1);
        p.town = "Lahore".into();
        assert!(matches!(p.validate_policy(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_half_coordinates_are_rejected() {
        let mut p = profile(1);
        p.address_longitude = None;
        assert!(matches!(p.validate_policy(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_out_of_range_latitude_is_rejected() {
        let mut p = profile(1);
        p.address_latitude = Some(Decimal::from(95));
        assert!(matches!(p.validate_policy(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_deactivate_and_activate() {
        let mut p = profile(1);
        let now = Utc::now();
        p.deactivate(now);
        assert!(!p.active);
        assert_eq!(p.date_deactivated, Some(now));
        assert!(!p.audit.voided);

        p.activate();
        assert!(p.active);
        assert!(p.date_deactivated.is_none());
    }
}
