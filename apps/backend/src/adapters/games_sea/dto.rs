//! DTOs for games_sea adapter.

use time::OffsetDateTime;

use crate::entities::games::SkillLevel;

/// DTO for inserting a game. Status always starts as `open`.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub created_by: i64,
    pub sport_id: i64,
    pub name: Option<String>,
    pub location: String,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub skill_level: SkillLevel,
    pub capacity: Option<i32>,
}

/// DTO for a partial game update.
///
/// Outer `None` leaves a column untouched; for the nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub id: i64,
    pub name: Option<Option<String>>,
    pub location: Option<String>,
    pub sport_id: Option<i64>,
    pub start_time: Option<OffsetDateTime>,
    pub end_time: Option<OffsetDateTime>,
    pub skill_level: Option<SkillLevel>,
    pub capacity: Option<Option<i32>>,
}

impl GameUpdate {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            name: None,
            location: None,
            sport_id: None,
            start_time: None,
            end_time: None,
            skill_level: None,
            capacity: None,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_sport_id(mut self, sport_id: i64) -> Self {
        self.sport_id = Some(sport_id);
        self
    }

    pub fn with_window(mut self, start_time: OffsetDateTime, end_time: OffsetDateTime) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn with_skill_level(mut self, skill_level: SkillLevel) -> Self {
        self.skill_level = Some(skill_level);
        self
    }

    pub fn with_capacity(mut self, capacity: Option<i32>) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Optional filters for the public upcoming-games listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpcomingFilter {
    pub sport_id: Option<i64>,
    pub start_from: Option<OffsetDateTime>,
}
