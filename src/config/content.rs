//! Static content and gameplay configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Static content directories and gameplay tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Directory served under `/avatars`
    #[serde(default = "default_avatars_dir")]
    pub avatars_dir: PathBuf,

    /// Directory served under `/phishing-examples`
    #[serde(default = "default_phishing_examples_dir")]
    pub phishing_examples_dir: PathBuf,

    /// XP awarded per correctly answered question
    #[serde(default = "default_xp_per_correct_answer")]
    pub xp_per_correct_answer: i64,

    /// Number of entries returned by the leaderboard
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: u32,
}

impl ContentConfig {
    /// Validate content configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.xp_per_correct_answer <= 0 {
            return Err(ValidationError::InvalidXpAward);
        }
        if self.leaderboard_size == 0 || self.leaderboard_size > 500 {
            return Err(ValidationError::InvalidLeaderboardSize);
        }
        Ok(())
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            avatars_dir: default_avatars_dir(),
            phishing_examples_dir: default_phishing_examples_dir(),
            xp_per_correct_answer: default_xp_per_correct_answer(),
            leaderboard_size: default_leaderboard_size(),
        }
    }
}

fn default_avatars_dir() -> PathBuf {
    PathBuf::from("public/avatars")
}

fn default_phishing_examples_dir() -> PathBuf {
    PathBuf::from("public/phishing-examples")
}

fn default_xp_per_correct_answer() -> i64 {
    10
}

fn default_leaderboard_size() -> u32 {
    50
}
