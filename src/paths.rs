//! The Petstore path catalog.
//!
//! Each endpoint is a template with positional `%s` placeholders plus a
//! short description used in logs and report titles. Templates are static
//! data; all behavior lives in [`ApiPath::resolve`].

/// Catalog of Petstore endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPath {
    /// Create or update a pet.
    Pet,
    /// Pet by id.
    PetId,
    /// Upload an image for a pet.
    PetUploadImage,
    /// Place an order.
    StoreOrder,
    /// Order by id.
    StoreOrderId,
    /// Store inventory counts.
    StoreInventory,
    /// Create a user.
    User,
    /// Create users from an array payload.
    UserCreateWithArray,
    /// Create users from a list payload.
    UserCreateWithList,
    /// User by username.
    UserUsername,
    /// Login via query parameters.
    UserLogin,
    /// Logout the current session.
    UserLogout,
}

impl ApiPath {
    /// The URL template, with `%s` standing in for positional parameters.
    pub fn url(&self) -> &'static str {
        match self {
            ApiPath::Pet => "/pet",
            ApiPath::PetId => "/pet/%s",
            ApiPath::PetUploadImage => "/pet/%s/uploadImage",
            ApiPath::StoreOrder => "/store/order",
            ApiPath::StoreOrderId => "/store/order/%s",
            ApiPath::StoreInventory => "/store/inventory",
            ApiPath::User => "/user",
            ApiPath::UserCreateWithArray => "/user/createWithArray",
            ApiPath::UserCreateWithList => "/user/createWithList",
            ApiPath::UserUsername => "/user/%s",
            ApiPath::UserLogin => "/user/login",
            ApiPath::UserLogout => "/user/logout",
        }
    }

    /// Human-readable description for logs and report titles.
    pub fn description(&self) -> &'static str {
        match self {
            ApiPath::Pet => "Create/Update Pet",
            ApiPath::PetId => "Pet by ID",
            ApiPath::PetUploadImage => "Upload Pet Image",
            ApiPath::StoreOrder => "Place Order",
            ApiPath::StoreOrderId => "Order by ID",
            ApiPath::StoreInventory => "Inventory",
            ApiPath::User => "Create User",
            ApiPath::UserCreateWithArray => "Create Users (array)",
            ApiPath::UserCreateWithList => "Create Users (list)",
            ApiPath::UserUsername => "User by Username",
            ApiPath::UserLogin => "User Login",
            ApiPath::UserLogout => "User Logout",
        }
    }

    /// Substitutes positional parameters into the template.
    ///
    /// Each parameter replaces the next remaining `%s`, left to right. Too
    /// few parameters leave the trailing placeholders in the output on
    /// purpose: a visibly broken path in a failing test's log beats a
    /// panic inside the request builder.
    pub fn resolve(&self, params: &[&str]) -> String {
        let mut resolved = self.url().to_string();
        for param in params {
            if let Some(pos) = resolved.find("%s") {
                resolved.replace_range(pos..pos + 2, param);
            }
        }
        resolved
    }
}

impl std::fmt::Display for ApiPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}
