use serde::{Deserialize, Serialize};

/// JWT payload: the identity asserted by a signed token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: i32,      // user ID
    pub name: String, // display name
    pub email: String,
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
