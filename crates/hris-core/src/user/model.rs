//! UserProfile domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the signed-in user.
///
/// The server decides which fields exist, so the profile is an open field map
/// with accessors for the fields the client relies on. Profiles are merged
/// rather than replaced when refreshed, so a partial response never drops
/// fields that were already known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a profile from a JSON object. Returns `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self {
            fields: fields.clone(),
        })
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Copies every non-null field of `patch` over this profile.
    pub fn merge(&mut self, patch: &UserProfile) {
        for (key, value) in &patch.fields {
            if !value.is_null() {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.get_str("role")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// Company identifier; the API uses both `company_id` and `companyId`.
    pub fn company_id(&self) -> Option<String> {
        ["company_id", "companyId"]
            .iter()
            .filter_map(|k| self.fields.get(*k))
            .find_map(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn is_admin(&self) -> bool {
        self.role()
            .is_some_and(|r| r.eq_ignore_ascii_case("admin"))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
