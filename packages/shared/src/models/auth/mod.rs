use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenClaims {
    pub sub: String, // subject (player ID)
    pub exp: usize,  // expiration time
    pub iat: usize,  // issued at
}
