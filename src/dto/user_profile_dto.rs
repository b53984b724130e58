use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{AuditEnvelope, UserProfile, UserType};

// Request para crear un perfil
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserProfileRequest {
    /// Por defecto, el principal que hace la request
    pub user_id: Option<i64>,
    pub birthdate: NaiveDate,
    pub gender: String,
    pub user_type: UserType,
    #[validate(length(min = 1, max = 20, message = "Primary contact is required (max 20 characters)"))]
    pub primary_contact: String,
    #[validate(length(max = 20))]
    pub alternate_contact: Option<String>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub address: String,
    pub address_latitude: Option<Decimal>,
    pub address_longitude: Option<Decimal>,
    #[validate(length(min = 1, max = 255, message = "Landmark is required (max 255 characters)"))]
    pub landmark: String,
    pub town: String,
    pub bio: Option<String>,
}

impl CreateUserProfileRequest {
    pub fn into_entity(self, user_id: i64) -> UserProfile {
        UserProfile {
            audit: AuditEnvelope::new(),
            user_id,
            birthdate: self.birthdate,
            gender: self.gender,
            user_type: self.user_type,
            primary_contact: self.primary_contact,
            alternate_contact: self.alternate_contact,
            address: self.address,
            address_latitude: self.address_latitude,
            address_longitude: self.address_longitude,
            landmark: self.landmark,
            town: self.town,
            active: true,
            date_deactivated: None,
            bio: self.bio,
        }
    }
}

// Request para actualizar un perfil
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserProfileRequest {
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub user_type: Option<UserType>,
    #[validate(length(min = 1, max = 20, message = "Primary contact is required (max 20 characters)"))]
    pub primary_contact: Option<String>,
    #[validate(length(max = 20))]
    pub alternate_contact: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    pub address_latitude: Option<Decimal>,
    pub address_longitude: Option<Decimal>,
    #[validate(length(min = 1, max = 255, message = "Landmark is required (max 255 characters)"))]
    pub landmark: Option<String>,
    pub town: Option<String>,
    pub bio: Option<String>,
}

impl UpdateUserProfileRequest {
    pub fn apply(self, entity: &mut UserProfile) {
        if let Some(birthdate) = self.birthdate {
            entity.birthdate = birthdate;
        }
        if let Some(gender) = self.gender {
            entity.gender = gender;
        }
        if let Some(user_type) = self.user_type {
            entity.user_type = user_type;
        }
        if let Some(primary_contact) = self.primary_contact {
            entity.primary_contact = primary_contact;
        }
        if let Some(alternate_contact) = self.alternate_contact {
            entity.alternate_contact = Some(alternate_contact);
        }
        if let Some(address) = self.address {
            entity.address = address;
        }
        if self.address_latitude.is_some() || self.address_longitude.is_some() {
            entity.address_latitude = self.address_latitude;
            entity.address_longitude = self.address_longitude;
        }
        if let Some(landmark) = self.landmark {
            entity.landmark = landmark;
        }
        if let Some(town) = self.town {
            entity.town = town;
        }
        if let Some(bio) = self.bio {
            entity.bio = Some(bio);
        }
    }
}

// Filtros del listado de administración
#[derive(Debug, Default, Deserialize)]
pub struct UserProfileFilter {
    pub user_type: Option<UserType>,
    pub active: Option<bool>,
    pub town: Option<String>,
}

impl UserProfileFilter {
    pub fn matches(&self, entity: &UserProfile) -> bool {
        self.user_type.map_or(true, |t| entity.user_type == t)
            && self.active.map_or(true, |active| entity.active == active)
            && self.town.as_deref().map_or(true, |town| entity.town == town)
    }
}
