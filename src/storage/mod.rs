pub mod collections;
pub mod jsonl;
pub mod memory;
pub mod records;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;
pub use records::{Comment, CommentId, NewComment, NewRestaurant, Restaurant, RestaurantId, Tag};

use async_trait::async_trait;
use std::path::PathBuf;

/// Failures raised by the document store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A required field was missing or empty at creation
    #[error("{0}")]
    Validation(String),

    #[error("restaurant {0} not found")]
    NotFound(RestaurantId),

    /// The identity text is not in the store's identity format
    #[error("malformed identity: {0:?}")]
    InvalidIdentity(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt document at {path}:{line}: {source}", path = path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Restaurant collection operations
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Persist a new restaurant.
    ///
    /// Non-empty `comments` on the payload are stored as separate comment
    /// records referencing the new restaurant, and the returned record has
    /// `has_comments` set.
    async fn create_restaurant(&self, new: NewRestaurant) -> StoreResult<Restaurant>;

    async fn find_restaurants(&self) -> StoreResult<Vec<Restaurant>>;

    /// `Ok(None)` on a miss; `InvalidIdentity` if `id` is not an identity at all
    async fn find_restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>>;

    async fn set_has_comments(&self, id: &RestaurantId, value: bool) -> StoreResult<Restaurant>;

    /// Remove a restaurant, returning it. Comments referencing it are kept.
    async fn delete_restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>>;

    async fn distinct_tag_names(&self) -> StoreResult<Vec<String>>;

    async fn distinct_city_names(&self) -> StoreResult<Vec<String>>;

    async fn distinct_img_urls(&self) -> StoreResult<Vec<String>>;

    async fn count_restaurants(&self) -> StoreResult<usize>;
}

/// Comment collection operations
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist a comment. Does not check that `restaurant` exists.
    async fn create_comment(
        &self,
        new: NewComment,
        restaurant: Option<RestaurantId>,
    ) -> StoreResult<Comment>;

    async fn find_comments_by_restaurant(&self, id: &RestaurantId) -> StoreResult<Vec<Comment>>;

    async fn find_comment(&self, id: &str) -> StoreResult<Option<Comment>>;
}

/// The store handed to request handlers
#[async_trait]
pub trait DocumentStore: RestaurantStore + CommentStore {
    /// Create a comment on an existing restaurant and raise its flag.
    ///
    /// This default runs the two writes one after the other, so a failure
    /// between them leaves the comment stored with the flag unset. Stores
    /// that can write both under one lock override it.
    async fn attach_comment(
        &self,
        restaurant: &RestaurantId,
        new: NewComment,
    ) -> StoreResult<Comment> {
        let comment = self.create_comment(new, Some(*restaurant)).await?;
        self.set_has_comments(restaurant, true).await?;
        Ok(comment)
    }
}
