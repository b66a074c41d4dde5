use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Company,
    LicenseType,
    Message,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Company,
        Field::LicenseType,
        Field::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Company => "Company",
            Field::LicenseType => "License Type",
            Field::Message => "Message",
        }
    }

    pub fn required_message(self) -> &'static str {
        match self {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::Company => "Company is required",
            Field::LicenseType => "License Type is required",
            Field::Message => "Message is required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseType {
    Software,
    Hardware,
    Subscription,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown license type '{0}' (expected software, hardware or subscription)")]
pub struct UnknownLicenseType(pub String);

impl FromStr for LicenseType {
    type Err = UnknownLicenseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "software" => Ok(Self::Software),
            "hardware" => Ok(Self::Hardware),
            "subscription" => Ok(Self::Subscription),
            _ => Err(UnknownLicenseType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Software => "software",
            Self::Hardware => "hardware",
            Self::Subscription => "subscription",
        };
        f.write_str(name)
    }
}

/// Validation messages keyed by field, in form order.
pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub license_type: Option<LicenseType>,
    pub message: String,
}

impl ContactForm {
    /// Stores a raw value. A blank license type clears the selection.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), UnknownLicenseType> {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
            Field::Company => self.company = value.to_string(),
            Field::Message => self.message = value.to_string(),
            Field::LicenseType => {
                self.license_type = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                };
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let text_fields = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Company, &self.company),
            (Field::Message, &self.message),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                errors.insert(field, field.required_message());
            }
        }
        if self.license_type.is_none() {
            errors.insert(Field::LicenseType, Field::LicenseType.required_message());
        }
        errors
    }

    /// Accepts a complete form and resets it; an incomplete form keeps its
    /// values.
    pub fn submit(&mut self) -> Result<ContactForm, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let submitted = std::mem::take(self);
        info!(
            name = %submitted.name,
            email = %submitted.email,
            company = %submitted.company,
            license_type = ?submitted.license_type,
            "Contact form submitted"
        );
        Ok(submitted)
    }
}
