use super::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned identity of a restaurant record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity taken from a request path or body
    pub fn parse(raw: &str) -> StoreResult<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::InvalidIdentity(raw.to_string()))
    }
}

impl Default for RestaurantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Store-assigned identity of a comment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> StoreResult<Self> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StoreError::InvalidIdentity(raw.to_string()))
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Tag embedded in a restaurant; it has no identity of its own in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

/// Persisted restaurant record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub key: RestaurantId,
    /// Caller-supplied number, unrelated to `key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub city_name: String,
    pub img_url: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Cached "some comment references this restaurant"
    #[serde(rename = "hasComments", default)]
    pub has_comments: bool,
}

/// Persisted comment record, linked to its restaurant by reference only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub key: CommentId,
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub restaurant: Option<RestaurantId>,
}

/// Restaurant creation payload
///
/// Required fields are optional here so that a missing field surfaces as a
/// [`StoreError::Validation`] naming it, rather than as a decode failure.
/// `comments` is input only: each entry becomes a separate [`Comment`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRestaurant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub img_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub comments: Vec<NewComment>,
}

/// Comment creation payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewRestaurant {
    /// Validate required fields and split into the record to persist plus the
    /// pending initial comments.
    pub fn into_record(self) -> StoreResult<(Restaurant, Vec<NewComment>)> {
        let name = required(self.name, || "Insert restaurant name".to_string())?;
        let city_name = required(self.city_name, || missing("city_name"))?;
        let img_url = required(self.img_url, || missing("img_url"))?;
        if let Some(i) = self.tags.iter().position(|t| t.name.is_empty()) {
            return Err(StoreError::Validation(missing(&format!("tags.{}.name", i))));
        }

        let restaurant = Restaurant {
            key: RestaurantId::new(),
            id: self.id,
            name,
            city_name,
            img_url,
            tags: self.tags,
            has_comments: false,
        };

        Ok((restaurant, self.comments))
    }
}

impl NewComment {
    pub fn into_record(self, restaurant: Option<RestaurantId>) -> StoreResult<Comment> {
        let id = self
            .id
            .ok_or_else(|| StoreError::Validation(missing("id")))?;
        let content = required(self.content, || missing("content"))?;

        Ok(Comment {
            key: CommentId::new(),
            id,
            content,
            restaurant,
        })
    }
}

fn missing(field: &str) -> String {
    format!("Path `{}` is required.", field)
}

fn required(value: Option<String>, message: impl FnOnce() -> String) -> StoreResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(StoreError::Validation(message())),
    }
}
