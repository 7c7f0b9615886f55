//! DTOs for users_sea adapter.

/// DTO for creating a new user at first login.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub sub: String,
    pub email: String,
    pub username: Option<String>,
    pub name: String,
}

impl UserCreate {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            username: None,
            name: name.into(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// DTO for a partial profile update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.bio.is_none()
    }
}
