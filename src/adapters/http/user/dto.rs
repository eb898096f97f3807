//! DTOs for the profile and stats endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::UserStats;

use super::super::auth::dto::UserResponse;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub avatar_key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub user: UserResponse,
    pub stats: UserStats,
}
