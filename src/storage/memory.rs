use super::collections::Collections;
use super::records::{Comment, CommentId, NewComment, NewRestaurant, Restaurant, RestaurantId};
use super::{CommentStore, DocumentStore, RestaurantStore, StoreResult};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Volatile document store, used for development and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn create_restaurant(&self, new: NewRestaurant) -> StoreResult<Restaurant> {
        let (restaurant, comments) = self.state.write().await.insert_restaurant(new)?;
        debug!(restaurant_id = %restaurant.key, comments = comments.len(), "Inserted restaurant");
        Ok(restaurant)
    }

    async fn find_restaurants(&self) -> StoreResult<Vec<Restaurant>> {
        Ok(self.state.read().await.restaurants().cloned().collect())
    }

    async fn find_restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        let id = RestaurantId::parse(id)?;
        Ok(self.state.read().await.restaurant(&id).cloned())
    }

    async fn set_has_comments(&self, id: &RestaurantId, value: bool) -> StoreResult<Restaurant> {
        self.state.write().await.set_has_comments(id, value)
    }

    async fn delete_restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        let id = RestaurantId::parse(id)?;
        Ok(self.state.write().await.remove_restaurant(&id))
    }

    async fn distinct_tag_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.state.read().await.distinct_tag_names())
    }

    async fn distinct_city_names(&self) -> StoreResult<Vec<String>> {
        Ok(self.state.read().await.distinct_city_names())
    }

    async fn distinct_img_urls(&self) -> StoreResult<Vec<String>> {
        Ok(self.state.read().await.distinct_img_urls())
    }

    async fn count_restaurants(&self) -> StoreResult<usize> {
        Ok(self.state.read().await.restaurant_count())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn create_comment(
        &self,
        new: NewComment,
        restaurant: Option<RestaurantId>,
    ) -> StoreResult<Comment> {
        self.state.write().await.insert_comment(new, restaurant)
    }

    async fn find_comments_by_restaurant(&self, id: &RestaurantId) -> StoreResult<Vec<Comment>> {
        Ok(self.state.read().await.comments_for(id))
    }

    async fn find_comment(&self, id: &str) -> StoreResult<Option<Comment>> {
        let id = CommentId::parse(id)?;
        Ok(self.state.read().await.comment(&id).cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn attach_comment(
        &self,
        restaurant: &RestaurantId,
        new: NewComment,
    ) -> StoreResult<Comment> {
        self.state.write().await.attach_comment(restaurant, new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;

    fn pho_house() -> NewRestaurant {
        NewRestaurant {
            name: Some("Pho House".into()),
            city_name: Some("Hanoi".into()),
            img_url: Some("http://x/1.jpg".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn find_all_is_stable_between_reads() {
        let store = MemoryStore::new();
        store.create_restaurant(pho_house()).await.unwrap();
        store.create_restaurant(pho_house()).await.unwrap();

        let first = store.find_restaurants().await.unwrap();
        let second = store.find_restaurants().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn lookup_distinguishes_miss_from_malformed() {
        let store = MemoryStore::new();

        let miss = store
            .find_restaurant(&RestaurantId::new().to_string())
            .await
            .unwrap();
        assert!(miss.is_none());

        let err = store.find_restaurant("42").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidIdentity(_)));
    }

    #[tokio::test]
    async fn attach_raises_flag() {
        let store = MemoryStore::new();
        let created = store.create_restaurant(pho_house()).await.unwrap();
        assert!(!created.has_comments);

        let new = NewComment {
            id: Some(7),
            content: Some("rich broth".into()),
        };
        let comment = store.attach_comment(&created.key, new).await.unwrap();
        assert_eq!(comment.restaurant, Some(created.key));

        let reloaded = store
            .find_restaurant(&created.key.to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.has_comments);
        assert_eq!(
            store.find_comments_by_restaurant(&created.key).await.unwrap(),
            vec![comment]
        );
    }

    #[tokio::test]
    async fn unassociated_comment_is_allowed() {
        let store = MemoryStore::new();
        let new = NewComment {
            id: Some(1),
            content: Some("floating".into()),
        };

        let comment = store.create_comment(new, None).await.unwrap();
        let found = store.find_comment(&comment.key.to_string()).await.unwrap();
        assert_eq!(found.and_then(|c| c.restaurant), None);
    }
}
