//! Request/response payloads for the Petstore API.
//!
//! Every field is optional and absent fields stay off the wire, matching
//! how the backend echoes partial objects. Construction is by plain
//! functions taking all fields; there is no invariant to enforce beyond
//! field assignment.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Pending,
    Sold,
}

impl PetStatus {
    /// The wire value, e.g. `available`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Pending => "pending",
            PetStatus::Sold => "sold",
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Approved,
    Delivered,
}

impl OrderStatus {
    /// The wire value, e.g. `placed`.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Approved => "approved",
            OrderStatus::Delivered => "delivered",
        }
    }
}

/// A pet category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }
}

/// A pet tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tag {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }
}

/// A pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Pet {
    pub fn new(
        id: i64,
        category: Category,
        name: impl Into<String>,
        photo_urls: Vec<String>,
        tags: Vec<Tag>,
        status: PetStatus,
    ) -> Self {
        Self {
            id: Some(id),
            category: Some(category),
            name: Some(name.into()),
            photo_urls: Some(photo_urls),
            tags: Some(tags),
            status: Some(status.as_str().to_string()),
        }
    }
}

/// A store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

impl Order {
    pub fn new(
        id: i64,
        pet_id: i64,
        quantity: i32,
        ship_date_iso: impl Into<String>,
        status: OrderStatus,
        complete: bool,
    ) -> Self {
        Self {
            id: Some(id),
            pet_id: Some(pet_id),
            quantity: Some(quantity),
            ship_date: Some(ship_date_iso.into()),
            status: Some(status.as_str().to_string()),
            complete: Some(complete),
        }
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i32>,
}

impl User {
    /// Initial create payload: name, email, username, nothing else.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            password: None,
            phone: None,
            user_status: None,
        }
    }

    /// Full profile payload, as sent on update.
    #[allow(clippy::too_many_arguments)]
    pub fn complete_profile(
        id: i64,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        phone: impl Into<String>,
        user_status: i32,
    ) -> Self {
        Self {
            id: Some(id),
            username: Some(username.into()),
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            email: Some(email.into()),
            password: Some(password.into()),
            phone: Some(phone.into()),
            user_status: Some(user_status),
        }
    }
}
