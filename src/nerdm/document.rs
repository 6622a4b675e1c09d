//! NERDm document construction
//!
//! [`NerdmDocument`] is the JSON-serializable record. Its serde field order
//! is the property order of the exported file, matching the form catalog's
//! declaration order with the record envelope (`$schema`, `@id`, `@type`)
//! up front. The mapping from form to document is field-by-field: scalar
//! fields map directly, list fields map to ordered sequences, and the two
//! contact fields nest into the schema's `contactPoint` object.

use super::validate::ValidatedForm;
use crate::state::FormState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URI of the schema version this tool writes
pub const SCHEMA_URI: &str = "https://data.nist.gov/od/dm/nerdm-schema/pub/v0.3";

/// `@type` of exported resource records
pub const RESOURCE_TYPE: &str = "nrdp:PublicDataResource";

/// Contact point nested object (`fn` + `hasEmail`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactPoint {
    #[serde(rename = "fn")]
    pub full_name: String,
    /// Stored in the schema's `mailto:` form
    #[serde(rename = "hasEmail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A resource record conforming to the external schema's shape.
///
/// Created fresh per export; equality covers keys, values and the order of
/// array-valued properties, which is what the export round-trip preserves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NerdmDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub types: Vec<String>,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub theme: Vec<String>,
    #[serde(rename = "accessLevel")]
    pub access_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(rename = "landingPage", skip_serializing_if = "Option::is_none")]
    pub landing_page: Option<String>,
    #[serde(rename = "contactPoint", skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    pub author: String,
    #[serde(rename = "createdOn")]
    pub created_on: DateTime<Utc>,
}

impl NerdmDocument {
    /// Load this record's values back into a form, the inverse of
    /// [`build_document`]. Envelope properties are regenerated on the next
    /// export and are not loaded.
    pub fn prefill_form(&self, form: &mut FormState) {
        form.set_text("title", self.title.clone());
        form.set_text("description", self.description.clone());
        form.set_list("keyword", self.keyword.clone());
        if let Some(theme) = self.theme.first() {
            form.set_text("theme", theme.clone());
        }
        form.set_text("accessLevel", self.access_level.clone());
        if let Some(license) = &self.license {
            form.set_text("license", license.clone());
        }
        if let Some(issued) = &self.issued {
            form.set_text("issued", issued.clone());
        }
        if let Some(modified) = &self.modified {
            form.set_text("modified", modified.clone());
        }
        if let Some(page) = &self.landing_page {
            form.set_text("landingPage", page.clone());
        }
        if let Some(contact) = &self.contact_point {
            form.set_text("contact_name", contact.full_name.clone());
            if let Some(email) = &contact.email {
                form.set_text("contact_email", email.trim_start_matches("mailto:"));
            }
        }
    }
}

/// Envelope properties stamped into every exported record.
///
/// Kept separate from the form so the builder stays deterministic under
/// test: author, id and timestamp are explicit inputs, not ambient reads.
#[derive(Debug, Clone)]
pub struct RecordEnvelope {
    pub id: String,
    pub author: String,
    pub created_on: DateTime<Utc>,
}

impl RecordEnvelope {
    /// Fresh envelope: random id, login name, current time
    pub fn generate() -> Self {
        Self {
            id: format!("urn:uuid:{}", Uuid::new_v4()),
            author: login_name(),
            created_on: Utc::now(),
        }
    }
}

/// Login name of the user running the tool
fn login_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Map a validated form into a document.
///
/// Only a [`ValidatedForm`] witness is accepted, so the invalid-form case
/// cannot reach this function.
pub fn build_document(validated: ValidatedForm<'_>, envelope: RecordEnvelope) -> NerdmDocument {
    let form = validated.form();
    let text_opt = |name: &str| {
        let value = form.text(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    };

    let contact_point = match (text_opt("contact_name"), text_opt("contact_email")) {
        (None, None) => None,
        (name, email) => Some(ContactPoint {
            full_name: name.unwrap_or_default(),
            email: email.map(|e| format!("mailto:{e}")),
        }),
    };

    NerdmDocument {
        schema: SCHEMA_URI.to_string(),
        id: envelope.id,
        types: vec![RESOURCE_TYPE.to_string()],
        title: form.text("title").trim().to_string(),
        description: form.text("description").trim().to_string(),
        keyword: form.list("keyword").to_vec(),
        theme: text_opt("theme").into_iter().collect(),
        access_level: form.text("accessLevel").to_string(),
        license: text_opt("license"),
        issued: text_opt("issued"),
        modified: text_opt("modified"),
        landing_page: text_opt("landingPage"),
        contact_point,
        author: envelope.author,
        created_on: envelope.created_on,
    }
}
