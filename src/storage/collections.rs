use super::records::{Comment, CommentId, NewComment, NewRestaurant, Restaurant, RestaurantId};
use super::{StoreError, StoreResult};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Both record collections, kept in insertion order.
///
/// Every store wraps one of these behind a single lock, which is what makes
/// the multi-record writes below atomic with respect to other requests.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    restaurants: IndexMap<RestaurantId, Restaurant>,
    comments: IndexMap<CommentId, Comment>,
}

impl Collections {
    pub fn from_records(restaurants: Vec<Restaurant>, comments: Vec<Comment>) -> Self {
        Self {
            restaurants: restaurants.into_iter().map(|r| (r.key, r)).collect(),
            comments: comments.into_iter().map(|c| (c.key, c)).collect(),
        }
    }

    pub fn restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.values()
    }

    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.values()
    }

    pub fn restaurant(&self, id: &RestaurantId) -> Option<&Restaurant> {
        self.restaurants.get(id)
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.len()
    }

    /// Insert a restaurant and its initial comments.
    ///
    /// The restaurant and every comment are validated before anything is
    /// inserted, so a bad comment leaves no partial restaurant behind.
    pub fn insert_restaurant(
        &mut self,
        new: NewRestaurant,
    ) -> StoreResult<(Restaurant, Vec<Comment>)> {
        let (mut restaurant, pending) = new.into_record()?;
        let comments = pending
            .into_iter()
            .map(|c| c.into_record(Some(restaurant.key)))
            .collect::<StoreResult<Vec<_>>>()?;

        restaurant.has_comments = !comments.is_empty();
        self.restaurants.insert(restaurant.key, restaurant.clone());
        for comment in &comments {
            self.comments.insert(comment.key, comment.clone());
        }

        Ok((restaurant, comments))
    }

    pub fn set_has_comments(&mut self, id: &RestaurantId, value: bool) -> StoreResult<Restaurant> {
        let restaurant = self
            .restaurants
            .get_mut(id)
            .ok_or(StoreError::NotFound(*id))?;
        restaurant.has_comments = value;
        Ok(restaurant.clone())
    }

    pub fn remove_restaurant(&mut self, id: &RestaurantId) -> Option<Restaurant> {
        self.restaurants.shift_remove(id)
    }

    pub fn insert_comment(
        &mut self,
        new: NewComment,
        restaurant: Option<RestaurantId>,
    ) -> StoreResult<Comment> {
        let comment = new.into_record(restaurant)?;
        self.comments.insert(comment.key, comment.clone());
        Ok(comment)
    }

    /// Insert a comment referencing `restaurant` and raise its flag together
    pub fn attach_comment(
        &mut self,
        restaurant: &RestaurantId,
        new: NewComment,
    ) -> StoreResult<Comment> {
        if !self.restaurants.contains_key(restaurant) {
            return Err(StoreError::NotFound(*restaurant));
        }
        let comment = self.insert_comment(new, Some(*restaurant))?;
        self.set_has_comments(restaurant, true)?;
        Ok(comment)
    }

    pub fn comments_for(&self, restaurant: &RestaurantId) -> Vec<Comment> {
        self.comments
            .values()
            .filter(|c| c.restaurant.as_ref() == Some(restaurant))
            .cloned()
            .collect()
    }

    /// Unique values of a restaurant field across the collection, ascending
    pub fn distinct<'a, F, I>(&'a self, field: F) -> Vec<String>
    where
        F: Fn(&'a Restaurant) -> I,
        I: IntoIterator<Item = &'a str>,
    {
        self.restaurants
            .values()
            .flat_map(field)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    pub fn distinct_tag_names(&self) -> Vec<String> {
        self.distinct(|r| r.tags.iter().map(|t| t.name.as_str()))
    }

    pub fn distinct_city_names(&self) -> Vec<String> {
        self.distinct(|r| std::iter::once(r.city_name.as_str()))
    }

    pub fn distinct_img_urls(&self) -> Vec<String> {
        self.distinct(|r| std::iter::once(r.img_url.as_str()))
    }
}
