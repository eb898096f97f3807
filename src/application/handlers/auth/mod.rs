//! Account registration and login.

mod login_user;
mod register_user;

pub use login_user::{LoginUserCommand, LoginUserHandler};
pub use register_user::{RegisterUserCommand, RegisterUserHandler};

use crate::domain::user::User;
use crate::ports::IssuedToken;

/// A signed-in user together with their fresh session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: IssuedToken,
}
