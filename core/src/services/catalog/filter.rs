//! Store listing filters.

use crate::domain::entities::{Category, Course, Enrollment};

use super::resolve::{course_category, resolve_category};

/// Whether `course_id` is among the enrolled courses
pub fn is_enrolled(enrolled: &[Enrollment], course_id: &str) -> bool {
    enrolled.iter().any(|e| e.course.id == course_id)
}

/// Filters applied to the course list in the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Main category id or name
    pub category: Option<String>,
    /// Subcategory id or name
    pub subcategory: Option<String>,
    /// Case-insensitive text matched against title and description
    pub search: String,
    pub only_unenrolled: bool,
}

impl CourseFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.subcategory.is_none()
            && self.search.trim().is_empty()
            && !self.only_unenrolled
    }

    pub fn apply<'a>(
        &self,
        courses: &'a [Course],
        categories: &[Category],
        enrolled: &[Enrollment],
    ) -> Vec<&'a Course> {
        let wanted = resolve_category(categories, self.category.as_deref(), self.subcategory.as_deref());
        let hinted = self.category.is_some() || self.subcategory.is_some();
        let search = self.search.trim().to_lowercase();

        courses
            .iter()
            .filter(|course| {
                if !hinted {
                    return true;
                }
                let Some(wanted) = wanted else { return false };
                let Some(actual) = course_category(categories, course) else { return false };
                if actual.main.id != wanted.main.id {
                    return false;
                }
                match (self.subcategory.is_some(), wanted.sub, actual.sub) {
                    (false, _, _) => true,
                    (true, Some(w), Some(a)) => w.id == a.id,
                    (true, _, _) => false,
                }
            })
            .filter(|course| {
                search.is_empty()
                    || course.title.to_lowercase().contains(&search)
                    || course.description.to_lowercase().contains(&search)
            })
            .filter(|course| !self.only_unenrolled || !is_enrolled(enrolled, &course.id))
            .collect()
    }
}
