use super::collections::Collections;
use super::records::{Comment, CommentId, NewComment, NewRestaurant, Restaurant, RestaurantId};
use super::{CommentStore, DocumentStore, RestaurantStore, StoreError, StoreResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

const RESTAURANTS_FILE: &str = "restaurants.jsonl";
const COMMENTS_FILE: &str = "comments.jsonl";

/// Durable document store keeping one JSON document per line.
///
/// Writes are staged on a copy of the collections, flushed to disk, and only
/// then made visible, so a failed flush leaves the previous state in place.
#[derive(Debug)]
pub struct JsonlStore {
    dir: PathBuf,
    state: RwLock<Collections>,
}

impl JsonlStore {
    /// Open the store in `dir`, creating the directory if needed
    pub async fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;

        let restaurants: Vec<Restaurant> = read_lines(&dir.join(RESTAURANTS_FILE)).await?;
        let comments: Vec<Comment> = read_lines(&dir.join(COMMENTS_FILE)).await?;
        info!(
            path = %dir.display(),
            restaurants = restaurants.len(),
            comments = comments.len(),
            "Opened JSONL store"
        );

        Ok(Self {
            dir,
            state: RwLock::new(Collections::from_records(restaurants, comments)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn commit<T>(
        &self,
        op: impl FnOnce(&mut Collections) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = op(&mut next)?;

        let restaurants_path = self.dir.join(RESTAURANTS_FILE);
        let comments_path = self.dir.join(COMMENTS_FILE);
        let restaurants_tmp = stage_lines(&restaurants_path, next.restaurants()).await?;
        let comments_tmp = stage_lines(&comments_path, next.comments()).await?;

        // Comments are published first: an interrupted publish can leave
        // orphaned comments, never a raised flag without its comments.
        fs::rename(&comments_tmp, &comments_path).await?;
        fs::rename(&restaurants_tmp, &restaurants_path).await?;
        debug!(path = %self.dir.display(), "Flushed collections");

        *guard = next;
        Ok(out)
    }
}

async fn read_lines<T: DeserializeOwned>(path: &Path) -> StoreResult<Vec<T>> {
    let raw = match fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| StoreError::Corrupt {
                path: path.to_path_buf(),
                line: i + 1,
                source,
            })
        })
        .collect()
}

/// Write one line per document to a temp file beside `path`, returning it
async fn stage_lines<'a, T, I>(path: &Path, docs: I) -> StoreResult<PathBuf>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buf = Vec::new();
    for doc in docs {
        serde_json::to_writer(&mut buf, doc)?;
        buf.push(b'\n');
    }

    let tmp = path.with_extension("jsonl.tmp");
    fs::write(&tmp, &buf).await?;
    Ok(tmp)
}

#[async_trait]
impl RestaurantStore for JsonlStore {
    async fn create_restaurant(&self, new: NewRestaurant) -> StoreResult<Restaurant> {
        let (restaurant, _) = self.commit(|c| c.insert_restaurant(new)).await?;
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
        self.commit(|c| c.set_has_comments(id, value)).await
    }

    async fn delete_restaurant(&self, id: &str) -> StoreResult<Option<Restaurant>> {
        let id = RestaurantId::parse(id)?;
        if self.state.read().await.restaurant(&id).is_none() {
            return Ok(None);
        }
        self.commit(|c| Ok(c.remove_restaurant(&id))).await
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
impl CommentStore for JsonlStore {
    async fn create_comment(
        &self,
        new: NewComment,
        restaurant: Option<RestaurantId>,
    ) -> StoreResult<Comment> {
        self.commit(|c| c.insert_comment(new, restaurant)).await
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
impl DocumentStore for JsonlStore {
    async fn attach_comment(
        &self,
        restaurant: &RestaurantId,
        new: NewComment,
    ) -> StoreResult<Comment> {
        self.commit(|c| c.attach_comment(restaurant, new)).await
    }
}
