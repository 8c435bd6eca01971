//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod category_repo;
pub mod course_repo;
pub mod note_repo;
pub mod toc_item_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use category_repo::CategoryRepo;
pub use course_repo::CourseRepo;
pub use note_repo::NoteRepo;
pub use toc_item_repo::TocItemRepo;
pub use user_repo::UserRepo;
