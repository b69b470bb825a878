//! Authenticated user as returned by the remote API.

use serde::{Deserialize, Serialize};

use super::cart::CartItems;
use super::id::UserId;

/// A signed-in customer together with their remembered cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier, used as the key for cart pushes.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Cart persisted on the server for this user.
    #[serde(default)]
    pub cart_items: CartItems,
}
