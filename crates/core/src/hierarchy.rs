//! Category hierarchy manager.
//!
//! [`CategoryHierarchy`] owns the rules for placing, editing, moving, and
//! deleting categories. Storage is reached only through the
//! [`CategoryStore`] trait, so the same rules run against PostgreSQL in the
//! server and against an in-memory map in tests.
//!
//! Rules:
//! - `level`/`path` are computed on insert and never touched by `update`.
//! - `update` rejects any attempt to change `parent_id`; subtrees are
//!   relocated only through [`CategoryHierarchy::move_category`].
//! - `delete` refuses while child categories, articles, or courses still
//!   reference the category. Nothing cascades.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::category::{
    effective_path, placement_for, Category, CategoryChanges, CreateCategory, UpdateCategory,
    PATH_SEPARATOR,
};
use crate::error::CoreError;
use crate::tree::{materialize_tree, CategoryNode};
use crate::types::{new_id, DbId};

/// Entity label used in not-found errors for the category itself.
pub const ENTITY_CATEGORY: &str = "category";

/// Entity label used when a referenced parent does not exist.
pub const ENTITY_PARENT: &str = "parent category";

/// Persistence operations the hierarchy manager depends on.
///
/// Implementations report their own failures through `Error`; domain errors
/// raised by the manager are converted into it via `From<CoreError>`.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    type Error: From<CoreError> + Send;

    /// All categories ordered by `(level, sort_order)`.
    async fn find_all(&self) -> Result<Vec<Category>, Self::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, Self::Error>;

    /// Direct children of `parent_id` ordered by `sort_order`.
    async fn find_by_parent_id(&self, parent_id: DbId) -> Result<Vec<Category>, Self::Error>;

    async fn create(&self, category: &Category) -> Result<Category, Self::Error>;

    /// Apply `changes`. Returns `None` if no row with `id` exists.
    async fn update(
        &self,
        id: DbId,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, Self::Error>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: DbId) -> Result<bool, Self::Error>;

    /// Number of articles filed under `category_id`.
    async fn count_articles(&self, category_id: DbId) -> Result<i64, Self::Error>;

    /// Number of courses filed under `category_id`.
    async fn count_courses(&self, category_id: DbId) -> Result<i64, Self::Error>;

    /// Re-home category `id` under `new_parent_id` and rewrite the subtree.
    ///
    /// Every row whose path equals `old_path` or starts with `old_path/` gets
    /// that prefix replaced by `new_path` and its level shifted by
    /// `level_delta`. Must be atomic.
    async fn relocate_subtree(
        &self,
        id: DbId,
        new_parent_id: Option<DbId>,
        old_path: &str,
        new_path: &str,
        level_delta: i32,
    ) -> Result<Category, Self::Error>;
}

/// Hierarchy rules over an injected [`CategoryStore`].
#[derive(Debug, Clone)]
pub struct CategoryHierarchy<S> {
    store: S,
}

impl<S: CategoryStore> CategoryHierarchy<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch a category or fail with `NotFound`.
    pub async fn get(&self, id: DbId) -> Result<Category, S::Error> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_CATEGORY, id).into())
    }

    /// Create a category, deriving `level` and `path` from its parent.
    pub async fn insert(&self, input: &CreateCategory) -> Result<Category, S::Error> {
        input.validate()?;

        let parent = match input.parent_id {
            Some(parent_id) => Some(
                self.store
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found(ENTITY_PARENT, parent_id))?,
            ),
            None => None,
        };

        let id = new_id();
        let placement = placement_for(id, parent.as_ref());
        let now = chrono::Utc::now();

        let record = Category {
            id,
            parent_id: input.parent_id,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            sort_order: input.sort_order,
            level: placement.level,
            path: Some(placement.path),
            created_at: now,
            updated_at: now,
        };

        self.store.create(&record).await
    }

    /// Edit title, description, or sort order. Re-parenting is rejected.
    pub async fn update(&self, id: DbId, input: &UpdateCategory) -> Result<Category, S::Error> {
        input.validate()?;

        let current = self.get(id).await?;

        if let Some(requested) = input.parent_id {
            if requested != current.parent_id {
                return Err(CoreError::PolicyViolation(
                    "re-parent not supported; move the category instead".into(),
                )
                .into());
            }
        }

        let changes = CategoryChanges::from(input);
        self.store
            .update(id, &changes)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY_CATEGORY, id).into())
    }

    /// Delete a category that nothing depends on.
    ///
    /// Checks run in a fixed order and the first failing one is reported:
    /// child categories, then articles, then courses.
    pub async fn delete(&self, id: DbId) -> Result<(), S::Error> {
        self.get(id).await?;

        if !self.store.find_by_parent_id(id).await?.is_empty() {
            return Err(CoreError::PolicyViolation(
                "category has child categories; delete them first".into(),
            )
            .into());
        }

        if self.store.count_articles(id).await? > 0 {
            return Err(CoreError::PolicyViolation(
                "category is referenced by articles; reassign them first".into(),
            )
            .into());
        }

        if self.store.count_courses(id).await? > 0 {
            return Err(CoreError::PolicyViolation(
                "category is referenced by courses; reassign them first".into(),
            )
            .into());
        }

        if !self.store.delete(id).await? {
            return Err(CoreError::not_found(ENTITY_CATEGORY, id).into());
        }
        Ok(())
    }

    /// Move a category and its whole subtree under `new_parent_id`
    /// (`None` for top level), recomputing `level` and `path` throughout.
    pub async fn move_category(
        &self,
        id: DbId,
        new_parent_id: Option<DbId>,
    ) -> Result<Category, S::Error> {
        let current = self.get(id).await?;

        if current.parent_id == new_parent_id {
            return Ok(current);
        }

        let new_parent = match new_parent_id {
            Some(pid) if pid == id => {
                return Err(CoreError::PolicyViolation(
                    "a category cannot be its own parent".into(),
                )
                .into());
            }
            Some(pid) => Some(
                self.store
                    .find_by_id(pid)
                    .await?
                    .ok_or_else(|| CoreError::not_found(ENTITY_PARENT, pid))?,
            ),
            None => None,
        };

        let old_path = effective_path(&current);

        if let Some(ref parent) = new_parent {
            if self.is_within_subtree(&current, parent).await? {
                return Err(CoreError::PolicyViolation(
                    "a category cannot be moved under its own descendant".into(),
                )
                .into());
            }
        }

        let placement = placement_for(id, new_parent.as_ref());
        let level_delta = placement.level - current.level;

        self.store
            .relocate_subtree(id, new_parent_id, &old_path, &placement.path, level_delta)
            .await
    }

    /// Whether `candidate` sits somewhere below `root`.
    ///
    /// A matching stored path answers directly. Otherwise `parent_id` links
    /// are walked upward from `candidate`, which also covers rows stored
    /// without a path or placed under one.
    async fn is_within_subtree(
        &self,
        root: &Category,
        candidate: &Category,
    ) -> Result<bool, S::Error> {
        if let (Some(root_path), Some(candidate_path)) = (&root.path, &candidate.path) {
            if candidate_path.starts_with(&format!("{root_path}{PATH_SEPARATOR}")) {
                return Ok(true);
            }
        }

        let mut seen = HashSet::from([candidate.id]);
        let mut next = candidate.parent_id;
        while let Some(ancestor) = next {
            if ancestor == root.id {
                return Ok(true);
            }
            if !seen.insert(ancestor) {
                break;
            }
            next = match self.store.find_by_id(ancestor).await? {
                Some(category) => category.parent_id,
                None => None,
            };
        }
        Ok(false)
    }

    /// Load every category and assemble the navigation forest.
    pub async fn tree(&self) -> Result<Vec<CategoryNode>, S::Error> {
        let categories = self.store.find_all().await?;
        Ok(materialize_tree(&categories))
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory [`CategoryStore`] for exercising the hierarchy rules.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryCategoryStore {
        pub categories: Mutex<HashMap<DbId, Category>>,
        pub article_refs: Mutex<HashMap<DbId, i64>>,
        pub course_refs: Mutex<HashMap<DbId, i64>>,
    }

    impl MemoryCategoryStore {
        pub fn snapshot(&self, id: DbId) -> Option<Category> {
            self.categories.lock().unwrap().get(&id).cloned()
        }

        pub fn set_articles(&self, category_id: DbId, count: i64) {
            self.article_refs.lock().unwrap().insert(category_id, count);
        }

        pub fn set_courses(&self, category_id: DbId, count: i64) {
            self.course_refs.lock().unwrap().insert(category_id, count);
        }
    }

    #[async_trait]
    impl CategoryStore for MemoryCategoryStore {
        type Error = CoreError;

        async fn find_all(&self) -> Result<Vec<Category>, CoreError> {
            let mut all: Vec<_> = self.categories.lock().unwrap().values().cloned().collect();
            all.sort_by_key(|c| (c.level, c.sort_order));
            Ok(all)
        }

        async fn find_by_id(&self, id: DbId) -> Result<Option<Category>, CoreError> {
            Ok(self.snapshot(id))
        }

        async fn find_by_parent_id(&self, parent_id: DbId) -> Result<Vec<Category>, CoreError> {
            let mut children: Vec<_> = self
                .categories
                .lock()
                .unwrap()
                .values()
                .filter(|c| c.parent_id == Some(parent_id))
                .cloned()
                .collect();
            children.sort_by_key(|c| c.sort_order);
            Ok(children)
        }

        async fn create(&self, category: &Category) -> Result<Category, CoreError> {
            self.categories
                .lock()
                .unwrap()
                .insert(category.id, category.clone());
            Ok(category.clone())
        }

        async fn update(
            &self,
            id: DbId,
            changes: &CategoryChanges,
        ) -> Result<Option<Category>, CoreError> {
            let mut map = self.categories.lock().unwrap();
            let Some(row) = map.get_mut(&id) else {
                return Ok(None);
            };
            if let Some(ref title) = changes.title {
                row.title = title.clone();
            }
            if let Some(ref description) = changes.description {
                row.description = Some(description.clone());
            }
            if let Some(sort_order) = changes.sort_order {
                row.sort_order = sort_order;
            }
            row.updated_at = chrono::Utc::now();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
            Ok(self.categories.lock().unwrap().remove(&id).is_some())
        }

        async fn count_articles(&self, category_id: DbId) -> Result<i64, CoreError> {
            Ok(*self
                .article_refs
                .lock()
                .unwrap()
                .get(&category_id)
                .unwrap_or(&0))
        }

        async fn count_courses(&self, category_id: DbId) -> Result<i64, CoreError> {
            Ok(*self
                .course_refs
                .lock()
                .unwrap()
                .get(&category_id)
                .unwrap_or(&0))
        }

        async fn relocate_subtree(
            &self,
            id: DbId,
            new_parent_id: Option<DbId>,
            old_path: &str,
            new_path: &str,
            level_delta: i32,
        ) -> Result<Category, CoreError> {
            let mut map = self.categories.lock().unwrap();
            let below = format!("{old_path}/");
            for row in map.values_mut().filter(|c| c.id != id) {
                let Some(rest) = row
                    .path
                    .as_deref()
                    .and_then(|p| p.strip_prefix(&below))
                    .map(str::to_string)
                else {
                    continue;
                };
                row.path = Some(format!("{new_path}/{rest}"));
                row.level += level_delta;
            }
            let moved = map
                .get_mut(&id)
                .ok_or_else(|| CoreError::not_found(ENTITY_CATEGORY, id))?;
            moved.parent_id = new_parent_id;
            moved.path = Some(new_path.to_string());
            moved.level += level_delta;
            Ok(moved.clone())
        }
    }
}
