//! User identity and profile services.

use std::sync::LazyLock;

use regex::Regex;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::logging::pii::Redacted;
use crate::repos::sports::{self, Sport};
use crate::repos::users::{self, ProfileUpdate, User, UserCreate};
use crate::services::game_records::UserSummary;

pub const MAX_NAME_CHARS: usize = 100;
pub const SEARCH_LIMIT: u64 = 25;

// Literal pattern; compilation is covered by the tests below.
#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Profile view. `email` is only present on the owner's own profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub username: Option<String>,
    pub name: String,
    pub bio: String,
    pub favorite_sports: Vec<Sport>,
}

/// Changes requested by the profile owner. Absent fields are kept.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub favorite_sports: Option<Vec<i64>>,
}

pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if !EMAIL.is_match(&email) {
        return Err(DomainError::validation(
            ValidationKind::InvalidEmail,
            "Email address is not valid",
        ));
    }
    Ok(email)
}

fn clean_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidField,
            format!("name must be at most {MAX_NAME_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}

/// Derives a username from the provided name or email local-part.
fn derive_username(name: &str, email: &str) -> Option<String> {
    let name = name.trim();
    if !name.is_empty() {
        return Some(name.chars().take(MAX_NAME_CHARS).collect());
    }
    email
        .split_once('@')
        .map(|(local, _)| local)
        .filter(|local| !local.is_empty())
        .map(str::to_string)
}

/// Find or create the user behind an SSO login.
///
/// The email is the lookup key. An existing user whose stored subject
/// differs from `sub` is refused with `Conflict(SubMismatch)`.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    name: &str,
    sub: &str,
) -> Result<User, DomainError> {
    let email = normalize_email(email)?;
    let sub = sub.trim();
    if sub.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidField,
            "sub must not be empty",
        ));
    }

    if let Some(user) = users::find_user_by_email(conn, &email).await? {
        if user.sub != sub {
            warn!(
                user_id = user.id,
                email = %Redacted(&email),
                "SSO subject mismatch for existing email"
            );
            return Err(DomainError::conflict(
                ConflictKind::SubMismatch,
                "This email is already linked to a different account",
            ));
        }
        debug!(user_id = user.id, "Repeat login for existing user");
        return Ok(user);
    }

    let display_name: String = name.trim().chars().take(MAX_NAME_CHARS).collect();
    let mut dto = UserCreate::new(sub, email.as_str(), display_name.as_str());
    if let Some(username) = derive_username(&display_name, &email) {
        dto = dto.with_username(username);
    }
    let user = users::create_user(conn, dto).await?;

    info!(user_id = user.id, email = %Redacted(&email), "user.created");
    Ok(user)
}

async fn profile_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user: User,
    include_email: bool,
) -> Result<Profile, DomainError> {
    let favorite_ids = users::favorite_sport_ids(conn, user.id).await?;
    let favorite_sports = sports::find_sports_by_ids(conn, &favorite_ids).await?;
    Ok(Profile {
        id: user.id,
        email: include_email.then_some(user.email),
        username: user.username,
        name: user.name,
        bio: user.bio,
        favorite_sports,
    })
}

pub async fn public_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Profile, DomainError> {
    let user = users::require_user(conn, user_id).await?;
    profile_of(conn, user, false).await
}

pub async fn own_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Profile, DomainError> {
    let user = users::require_user(conn, user_id).await?;
    profile_of(conn, user, true).await
}

/// Apply profile changes. `favorite_sports`, when given, replaces the set.
pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    changes: ProfileChanges,
) -> Result<Profile, DomainError> {
    let mut dto = ProfileUpdate::default();
    if let Some(name) = changes.name.as_deref() {
        dto.name = Some(clean_name(name)?);
    }
    if let Some(email) = changes.email.as_deref() {
        dto.email = Some(normalize_email(email)?);
    }
    dto.bio = changes.bio;

    let user = if dto.is_empty() {
        users::require_user(conn, user_id).await?
    } else {
        users::update_profile(conn, user_id, dto).await?
    };

    if let Some(mut ids) = changes.favorite_sports {
        ids.sort_unstable();
        ids.dedup();
        let known = sports::find_sports_by_ids(conn, &ids).await?;
        if known.len() != ids.len() {
            let missing: Vec<String> = ids
                .iter()
                .filter(|id| !known.iter().any(|s| s.id == **id))
                .map(i64::to_string)
                .collect();
            return Err(DomainError::validation(
                ValidationKind::UnknownSport,
                format!("Unknown sport ids: {}", missing.join(", ")),
            ));
        }
        users::replace_favorite_sports(conn, user_id, &ids).await?;
    }

    info!(user_id, "profile.updated");
    profile_of(conn, user, true).await
}

/// Case-insensitive substring search. A blank query matches nobody.
pub async fn search_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    query: &str,
) -> Result<Vec<UserSummary>, DomainError> {
    let needle = query.trim();
    if needle.is_empty() {
        return Ok(Vec::new());
    }
    let users = users::search_users(conn, needle, SEARCH_LIMIT).await?;
    Ok(users.iter().map(UserSummary::from).collect())
}
