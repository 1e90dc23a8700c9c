use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateMatchRequest {
    pub player2_id: String,
}

/// Zero-based, row-major coordinates. Signed so that negative input reaches
/// the board engine and is rejected as out of range.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MakeMoveRequest {
    #[serde(alias = "position_x")]
    pub row: i64,
    #[serde(alias = "position_y")]
    pub col: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompleteMatchRequest {
    #[serde(default)]
    pub winner_id: Option<String>,
}
