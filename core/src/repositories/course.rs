//! Catalog endpoints of the portal backend.

use async_trait::async_trait;

use crate::domain::entities::{Category, Course, Enrollment};
use crate::errors::ClientResult;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// `GET /api/course/all`
    async fn all_courses(&self) -> ClientResult<Vec<Course>>;

    /// `GET /api/course/:id`
    async fn course(&self, id: &str) -> ClientResult<Course>;

    /// `GET /api/user/enrolled-courses`
    async fn enrolled_courses(&self) -> ClientResult<Vec<Enrollment>>;

    /// `GET /api/user/all-categories`
    async fn categories(&self) -> ClientResult<Vec<Category>>;
}
