//! Test fixtures for REST API testing.
//!
//! Provides authors and request bodies for use in tests.

use chrono::{DateTime, FixedOffset};
use courselib_persistence::types::Author;
use serde_json::{Value, json};
use uuid::Uuid;

/// Vendor type for creating an author.
pub const AUTHOR_FOR_CREATION: &str = "application/vnd.marvin.authorforcreation+json";

/// Vendor type for creating an author with a date of death.
pub const AUTHOR_WITH_DATE_OF_DEATH: &str =
    "application/vnd.marvin.authorforcreationwithdateofdeath+json";

/// Friendly shape with links.
pub const HATEOAS: &str = "application/vnd.marvin.hateoas+json";

/// Full shape without links.
pub const AUTHOR_FULL: &str = "application/vnd.marvin.author.full+json";

/// Full shape with links.
pub const AUTHOR_FULL_HATEOAS: &str = "application/vnd.marvin.author.full.hateoas+json";

/// JSON Patch media type.
pub const JSON_PATCH: &str = "application/json-patch+json";

fn date(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("Invalid fixture date")
}

/// Builder for a test author.
#[derive(Debug, Clone)]
pub struct AuthorFixture {
    /// Identifier.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// RFC 3339 date of birth.
    pub date_of_birth: String,
    /// RFC 3339 date of death.
    pub date_of_death: Option<String>,
    /// Main category.
    pub main_category: String,
}

impl AuthorFixture {
    /// Creates an author born on 1 January 1700 in category "General".
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: "1700-01-01T00:00:00+00:00".to_string(),
            date_of_death: None,
            main_category: "General".to_string(),
        }
    }

    /// Ada Lovelace, who died aged 36.
    pub fn ada() -> Self {
        Self::new("Ada", "Lovelace")
            .born("1815-12-10T00:00:00+00:00")
            .died("1852-11-27T00:00:00+00:00")
            .category("Maths")
    }

    /// Sets the date of birth.
    pub fn born(mut self, date: &str) -> Self {
        self.date_of_birth = date.to_string();
        self
    }

    /// Sets the date of death.
    pub fn died(mut self, date: &str) -> Self {
        self.date_of_death = Some(date.to_string());
        self
    }

    /// Sets the main category.
    pub fn category(mut self, category: &str) -> Self {
        self.main_category = category.to_string();
        self
    }

    /// Converts to an entity.
    pub fn to_author(&self) -> Author {
        Author {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: date(&self.date_of_birth),
            date_of_death: self.date_of_death.as_deref().map(date),
            main_category: self.main_category.clone(),
        }
    }

    /// Converts to an author creation body, without the date of death.
    pub fn to_json(&self) -> Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "dateOfBirth": self.date_of_birth,
            "mainCategory": self.main_category,
        })
    }

    /// Converts to an author creation body including the date of death.
    pub fn to_json_with_date_of_death(&self) -> Value {
        let mut body = self.to_json();
        body["dateOfDeath"] = json!(self.date_of_death);
        body
    }
}

/// A course creation or update body.
pub fn course_json(title: &str, description: &str) -> Value {
    json!({ "title": title, "description": description })
}
