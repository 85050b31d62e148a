//! Add-cafe form view model

use cafe_core::NewCafe;

/// A required field left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Address,
    Features,
}

impl MissingField {
    pub fn message(&self) -> &'static str {
        match self {
            MissingField::Name => "Please enter the cafe name",
            MissingField::Address => "Please enter the cafe address",
            MissingField::Features => "Please list at least one feature",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AddCafeForm {
    pub name: String,
    pub address: String,
    /// Comma-separated, e.g. "Quiet Zone, Fast Wi-Fi, Power Outlets"
    pub features: String,
    pub pet_friendly: bool,
}

impl AddCafeForm {
    /// Fields that block submission, in form order
    pub fn missing_fields(&self) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(MissingField::Name);
        }
        if self.address.trim().is_empty() {
            missing.push(MissingField::Address);
        }
        if NewCafe::parse_features(&self.features).is_empty() {
            missing.push(MissingField::Features);
        }
        missing
    }

    pub fn to_listing(&self) -> NewCafe {
        NewCafe::new(
            self.name.trim(),
            self.address.trim(),
            NewCafe::parse_features(&self.features),
        )
        .pet_friendly(self.pet_friendly)
    }
}
