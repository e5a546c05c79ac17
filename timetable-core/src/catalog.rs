//! Course catalog: the flat list of courses shown in the picker.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TimetableError, TimetableResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    pub fn from_json(content: &str) -> TimetableResult<Self> {
        let courses: Vec<Course> = serde_json::from_str(content)?;
        Ok(CourseCatalog { courses })
    }

    pub fn load(path: &Path) -> TimetableResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TimetableError::Dataset(format!("Could not read {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&content)?;
        debug!(path = %path.display(), courses = catalog.len(), "Loaded course catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, course_id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_id == course_id)
    }

    pub fn name_of(&self, course_id: &str) -> Option<&str> {
        self.get(course_id).map(|c| c.course_name.as_str())
    }

    /// Case-insensitive substring search over course ID and name.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Course> {
        let query = query.trim();
        if query.is_empty() {
            return self.courses.iter().collect();
        }

        let needle = query.to_lowercase();
        self.courses
            .iter()
            .filter(|c| {
                c.course_id.to_lowercase().contains(&needle)
                    || c.course_name.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CourseCatalog {
        CourseCatalog::from_json(
            r#"[
                {"courseId": "MATH101", "courseName": "Calculus I"},
                {"courseId": "PHYS201", "courseName": "Classical Mechanics"},
                {"courseId": "CHEM110", "courseName": "General Chemistry"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_blank_query_returns_all_in_order() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.search("   ").iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["MATH101", "PHYS201", "CHEM110"]);
    }

    #[test]
    fn test_search_matches_id_or_name_case_insensitively() {
        let catalog = catalog();
        let ids: Vec<_> = catalog.search("CHEM").iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["CHEM110"]);

        let ids: Vec<_> = catalog.search("mech").iter().map(|c| c.course_id.as_str()).collect();
        assert_eq!(ids, vec!["PHYS201"]);

        // "cal" hits both "Calculus" and "Classical"
        assert_eq!(catalog.search("cal").len(), 2);
    }

    #[test]
    fn test_name_of() {
        let catalog = catalog();
        assert_eq!(catalog.name_of("MATH101"), Some("Calculus I"));
        assert_eq!(catalog.name_of("BIO300"), None);
    }
}
