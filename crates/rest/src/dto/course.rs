//! Course transfer objects.

use courselib_persistence::types::Course;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{Shape, ShapeId};

/// Course shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    /// Identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// The owning author.
    pub author_id: Uuid,
}

impl From<&Course> for CourseDto {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            author_id: course.author_id,
        }
    }
}

impl Shape for CourseDto {
    fn shape_id(&self) -> ShapeId {
        ShapeId::Course
    }

    fn field_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(Value::String(self.id.to_string())),
            "title" => Some(Value::String(self.title.clone())),
            "description" => Some(
                self.description
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            ),
            "authorId" => Some(Value::String(self.author_id.to_string())),
            _ => None,
        }
    }
}

/// Request body for creating a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCourseDto {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
}

impl CreateCourseDto {
    /// Builds a new course entity owned by `author_id`.
    pub fn into_course(self, author_id: Uuid) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            author_id,
        }
    }
}

/// Request body for replacing a course, and the target document of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCourseDto {
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
}

impl UpdateCourseDto {
    /// Builds a course with the given identity from this body.
    pub fn into_course(self, course_id: Uuid, author_id: Uuid) -> Course {
        Course {
            id: course_id,
            title: self.title,
            description: self.description,
            author_id,
        }
    }
}

impl From<&Course> for UpdateCourseDto {
    fn from(course: &Course) -> Self {
        Self {
            title: course.title.clone(),
            description: course.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_dto_description_null() {
        let course = Course {
            id: Uuid::new_v4(),
            title: "Knots".to_string(),
            description: None,
            author_id: Uuid::new_v4(),
        };
        let dto = CourseDto::from(&course);
        assert_eq!(dto.field_value("description"), Some(Value::Null));
        assert_eq!(dto.field_value("authorId"), Some(Value::String(course.author_id.to_string())));
    }

    #[test]
    fn test_update_dto_round_trip_keeps_identity() {
        let course = Course {
            id: Uuid::new_v4(),
            title: "Knots".to_string(),
            description: Some("Tying them".to_string()),
            author_id: Uuid::new_v4(),
        };
        let mut dto = UpdateCourseDto::from(&course);
        dto.title = "Better knots".to_string();

        let updated = dto.into_course(course.id, course.author_id);
        assert_eq!(updated.id, course.id);
        assert_eq!(updated.title, "Better knots");
        assert_eq!(updated.description, course.description);
    }

    #[test]
    fn test_missing_fields_default() {
        let dto: CreateCourseDto = serde_json::from_str("{}").unwrap();
        assert!(dto.title.is_empty());
        assert!(dto.description.is_none());
    }
}
