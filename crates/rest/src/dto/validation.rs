//! Input validation for request DTOs.
//!
//! Each request DTO implements [`Validate`], returning every violated
//! constraint rather than stopping at the first one. An empty list means the
//! body is acceptable.

use serde::Serialize;

use super::author::{CreateAuthorDto, CreateAuthorWithDateOfDeathDto};
use super::course::{CreateCourseDto, UpdateCourseDto};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 1500;

/// Maximum length of author names and categories in characters.
pub const MAX_AUTHOR_TEXT_LENGTH: usize = 50;

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field, or of the object for cross-field rules.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A request body with constraints.
pub trait Validate {
    /// Returns all violated constraints.
    fn validate(&self) -> Vec<FieldViolation>;
}

fn path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

fn course_violations(
    prefix: &str,
    title: &str,
    description: Option<&str>,
    description_required: bool,
) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if title.trim().is_empty() {
        violations.push(FieldViolation::new(
            path(prefix, "title"),
            "The title is required.",
        ));
    } else if too_long(title, MAX_TITLE_LENGTH) {
        violations.push(FieldViolation::new(
            path(prefix, "title"),
            format!("The title should not have more than {MAX_TITLE_LENGTH} characters."),
        ));
    }

    match description {
        Some(d) if too_long(d, MAX_DESCRIPTION_LENGTH) => {
            violations.push(FieldViolation::new(
                path(prefix, "description"),
                format!(
                    "The description should not have more than {MAX_DESCRIPTION_LENGTH} characters."
                ),
            ));
        }
        Some(d) if description_required && d.trim().is_empty() => {
            violations.push(FieldViolation::new(
                path(prefix, "description"),
                "The description is required.",
            ));
        }
        None if description_required => {
            violations.push(FieldViolation::new(
                path(prefix, "description"),
                "The description is required.",
            ));
        }
        _ => {}
    }

    if description == Some(title) {
        let field = if prefix.is_empty() { "course" } else { prefix };
        violations.push(FieldViolation::new(
            field,
            "The description must be different from the title.",
        ));
    }

    violations
}

fn required_text(field: &str, label: &str, value: &str, violations: &mut Vec<FieldViolation>) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, format!("The {label} is required.")));
    } else if too_long(value, MAX_AUTHOR_TEXT_LENGTH) {
        violations.push(FieldViolation::new(
            field,
            format!("The {label} should not have more than {MAX_AUTHOR_TEXT_LENGTH} characters."),
        ));
    }
}

impl Validate for CreateCourseDto {
    fn validate(&self) -> Vec<FieldViolation> {
        course_violations("", &self.title, self.description.as_deref(), false)
    }
}

impl Validate for UpdateCourseDto {
    fn validate(&self) -> Vec<FieldViolation> {
        course_violations("", &self.title, self.description.as_deref(), true)
    }
}

impl Validate for CreateAuthorDto {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        required_text("firstName", "first name", &self.first_name, &mut violations);
        required_text("lastName", "last name", &self.last_name, &mut violations);
        required_text(
            "mainCategory",
            "main category",
            &self.main_category,
            &mut violations,
        );

        for (index, course) in self.courses.iter().enumerate() {
            violations.extend(course_violations(
                &format!("courses[{index}]"),
                &course.title,
                course.description.as_deref(),
                false,
            ));
        }

        violations
    }
}

impl Validate for CreateAuthorWithDateOfDeathDto {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = self.author.validate();
        if let Some(death) = self.date_of_death {
            if death < self.author.date_of_birth {
                violations.push(FieldViolation::new(
                    "dateOfDeath",
                    "The date of death cannot precede the date of birth.",
                ));
            }
        }
        violations
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Vec<FieldViolation> {
        self.iter()
            .enumerate()
            .flat_map(|(index, item)| {
                item.validate().into_iter().map(move |v| FieldViolation {
                    field: format!("[{index}].{}", v.field),
                    message: v.message,
                })
            })
            .collect()
    }
}
