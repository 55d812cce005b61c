use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub contact_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    pub contact_email: String,
    pub contact_role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub instruction_type: String,
    pub instruction_description: String,
    pub instruction_creation_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub location_name: String,
    pub address: Address,
    pub company_name: String,
    pub contacts: Vec<Contact>,
    pub instructions: Vec<Instruction>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of location create and update requests.
///
/// The dashboard sends either the list forms (`contacts`, `instructions`) or a
/// single `contact` / `instruction`; both are accepted and merged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub location_name: String,
    pub address: Address,
    pub company_name: String,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub contact: Option<Contact>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    pub instruction: Option<Instruction>,
    pub is_active: Option<bool>,
}

impl LocationInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.location_name.trim().is_empty() {
            return Err("Location name is required".to_string());
        }
        if self.company_name.trim().is_empty() {
            return Err("Company name is required".to_string());
        }
        Ok(())
    }

    fn merged_contacts(&mut self) -> Vec<Contact> {
        let mut contacts = std::mem::take(&mut self.contacts);
        contacts.extend(self.contact.take());
        contacts
    }

    fn merged_instructions(&mut self) -> Vec<Instruction> {
        let mut instructions = std::mem::take(&mut self.instructions);
        instructions.extend(self.instruction.take());
        instructions
    }

    pub fn into_location(mut self, id: String) -> Location {
        let now = Utc::now();
        Location {
            id,
            contacts: self.merged_contacts(),
            instructions: self.merged_instructions(),
            location_name: self.location_name,
            address: self.address,
            company_name: self.company_name,
            is_active: self.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_to(mut self, location: &mut Location) {
        location.contacts = self.merged_contacts();
        location.instructions = self.merged_instructions();
        location.location_name = self.location_name;
        location.address = self.address;
        location.company_name = self.company_name;
        if let Some(is_active) = self.is_active {
            location.is_active = is_active;
        }
        location.updated_at = Utc::now();
    }
}
