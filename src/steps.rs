//! Test-step glue over the JSON client.
//!
//! Each step builds a payload, fires the call, soft-asserts on the echoed
//! fields, and returns the raw body so a flow can chain on it. Assertion
//! failures panic with the full mismatch list; HTTP failures flow through
//! `Result` as usual.

use crate::assert::SoftAssert;
use crate::client::JsonClient;
use crate::json;
use crate::model::{Category, Order, OrderStatus, Pet, PetStatus, Tag, User};
use crate::paths::ApiPath;
use crate::Result;
use http::StatusCode;

/// Query pairs for the login endpoint.
pub fn login_query<'a>(username: &'a str, password: &'a str) -> [(&'static str, &'a str); 2] {
    [("username", username), ("password", password)]
}

/// Pet CRUD steps.
pub struct PetSteps<'a> {
    client: &'a JsonClient,
}

impl<'a> PetSteps<'a> {
    pub fn new(client: &'a JsonClient) -> Self {
        Self { client }
    }

    /// Creates a pet and asserts the echoed `name` and `status`.
    pub async fn create_pet(
        &self,
        id: i64,
        category: Category,
        name: &str,
        photo_urls: Vec<String>,
        tags: Vec<Tag>,
        status: PetStatus,
    ) -> Result<String> {
        let request_body = Pet::new(id, category, name, photo_urls, tags, status);
        let response_body = self.client.post(None, &request_body, ApiPath::Pet, &[]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_str_eq(&node, "name", name, "Create Pet");
        if json::has(&node, "status") {
            soft.check_str_eq(&node, "status", status.as_str(), "Create Pet");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Updates a pet and asserts the echoed `status`.
    pub async fn update_pet(
        &self,
        id: i64,
        category: Category,
        name: &str,
        photo_urls: Vec<String>,
        tags: Vec<Tag>,
        status: PetStatus,
    ) -> Result<String> {
        let request_body = Pet::new(id, category, name, photo_urls, tags, status);
        let response_body = self.client.put(None, &request_body, ApiPath::Pet, &[]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        if json::has(&node, "status") {
            soft.check_str_eq(&node, "status", status.as_str(), "Update Pet");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Fetches a pet and asserts the echoed id.
    pub async fn get_pet_by_id(&self, pet_id: i64) -> Result<String> {
        let id = pet_id.to_string();
        let response_body = self.client.get(None, ApiPath::PetId, &[id.as_str()]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_i64_eq(&node, "id", pet_id, "Get Pet By Id");
        soft.finish();

        Ok(response_body)
    }

    /// Deletes a pet; asserts the petstore-style `code` when present.
    pub async fn delete_pet(&self, pet_id: i64) -> Result<String> {
        let id = pet_id.to_string();
        let response_body = self.client.delete(None, ApiPath::PetId, &[id.as_str()]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Delete Pet");
        soft.finish();

        Ok(response_body)
    }
}

/// Order (store) steps.
pub struct OrderSteps<'a> {
    client: &'a JsonClient,
}

impl<'a> OrderSteps<'a> {
    pub fn new(client: &'a JsonClient) -> Self {
        Self { client }
    }

    /// Places an order and asserts id, petId, and quantity when echoed.
    pub async fn place_order(
        &self,
        order_id: i64,
        pet_id: i64,
        quantity: i32,
        ship_date_iso: &str,
        status: OrderStatus,
        complete: bool,
    ) -> Result<String> {
        let request_body = Order::new(order_id, pet_id, quantity, ship_date_iso, status, complete);
        let response_body = self
            .client
            .post(None, &request_body, ApiPath::StoreOrder, &[])
            .await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        if json::has(&node, "id") {
            soft.check_i64_eq(&node, "id", order_id, "Place Order");
        }
        if json::has(&node, "petId") {
            soft.check_i64_eq(&node, "petId", pet_id, "Place Order");
        }
        if json::has(&node, "quantity") {
            soft.check_i64_eq(&node, "quantity", quantity.into(), "Place Order");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Fetches an order and asserts the echoed id when present.
    pub async fn get_order(&self, order_id: i64) -> Result<String> {
        let id = order_id.to_string();
        let response_body = self.client.get(None, ApiPath::StoreOrderId, &[id.as_str()]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        if json::has(&node, "id") {
            soft.check_i64_eq(&node, "id", order_id, "Get Order");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Deletes an order; asserts the petstore-style `code` when present.
    pub async fn delete_order(&self, order_id: i64) -> Result<String> {
        let id = order_id.to_string();
        let response_body = self.client.delete(None, ApiPath::StoreOrderId, &[id.as_str()]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Delete Order");
        soft.finish();

        Ok(response_body)
    }

    /// Fetches the inventory counts.
    pub async fn inventory(&self) -> Result<String> {
        self.client.get(None, ApiPath::StoreInventory, &[]).await
    }

    /// Negative path: GET an order expecting a specific failure status.
    pub async fn get_order_expecting_status(
        &self,
        order_id: i64,
        expected: StatusCode,
    ) -> Result<String> {
        let id = order_id.to_string();
        let response = self
            .client
            .get_raw(None, ApiPath::StoreOrderId, &[], &[id.as_str()])
            .await?;

        let mut soft = SoftAssert::new();
        soft.check_status(&response, expected, "Get Order (negative)");
        soft.finish();

        Ok(response.body)
    }

    /// Negative path: DELETE an order expecting a specific failure status.
    pub async fn delete_order_expecting_status(
        &self,
        order_id: i64,
        expected: StatusCode,
    ) -> Result<String> {
        let id = order_id.to_string();
        let response = self
            .client
            .delete_raw(None, ApiPath::StoreOrderId, &[id.as_str()])
            .await?;

        let mut soft = SoftAssert::new();
        soft.check_status(&response, expected, "Delete Order (negative)");
        soft.finish();

        Ok(response.body)
    }
}

/// User steps, including login/logout.
pub struct UserSteps<'a> {
    client: &'a JsonClient,
}

impl<'a> UserSteps<'a> {
    pub fn new(client: &'a JsonClient) -> Self {
        Self { client }
    }

    /// Creates a user (initial create, no password yet).
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        username: &str,
    ) -> Result<String> {
        let request_body = User::new(first_name, last_name, email, username);
        let response_body = self.client.post(None, &request_body, ApiPath::User, &[]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Create User");
        soft.finish();

        Ok(response_body)
    }

    /// Updates a user to a full profile.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_user(
        &self,
        username: &str,
        id: i64,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        phone: &str,
        user_status: i32,
    ) -> Result<String> {
        let request_body = User::complete_profile(
            id, username, first_name, last_name, email, password, phone, user_status,
        );
        let response_body = self
            .client
            .put(None, &request_body, ApiPath::UserUsername, &[username])
            .await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Update User");
        soft.finish();

        Ok(response_body)
    }

    /// Fetches a user and asserts the echoed username when present.
    pub async fn get_user(&self, username: &str) -> Result<String> {
        let response_body = self
            .client
            .get(None, ApiPath::UserUsername, &[username])
            .await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        if json::has(&node, "username") {
            soft.check_str_eq(&node, "username", username, "Get User");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Deletes a user; asserts the petstore-style `code` when present.
    pub async fn delete_user(&self, username: &str) -> Result<String> {
        let response_body = self
            .client
            .delete(None, ApiPath::UserUsername, &[username])
            .await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Delete User");
        soft.finish();

        Ok(response_body)
    }

    /// Logs in via query parameters and asserts the session message.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let query = login_query(username, password);
        let response_body = self
            .client
            .get_with_query(None, ApiPath::UserLogin, &query, &[])
            .await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Login");
        if json::has(&node, "message") {
            let message = json::get_str(&node, "message").unwrap_or_default();
            soft.check_true(
                message.to_lowercase().contains("logged in user session"),
                "Login -> 'message' should contain 'logged in user session'",
            );
        }
        soft.finish();

        Ok(response_body)
    }

    /// Logs out the current session.
    pub async fn logout(&self) -> Result<String> {
        let response_body = self.client.get(None, ApiPath::UserLogout, &[]).await?;

        let node = json::parse(&response_body)?;
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Logout");
        if json::has(&node, "message") {
            soft.check_str_eq(&node, "message", "ok", "Logout");
        }
        soft.finish();

        Ok(response_body)
    }

    /// Negative path: GET a user expecting a specific failure status.
    pub async fn get_user_expecting_status(
        &self,
        username: &str,
        expected: StatusCode,
    ) -> Result<String> {
        let response = self
            .client
            .get_raw(None, ApiPath::UserUsername, &[], &[username])
            .await?;

        let mut soft = SoftAssert::new();
        soft.check_status(&response, expected, "Get User (negative)");
        soft.finish();

        Ok(response.body)
    }
}
