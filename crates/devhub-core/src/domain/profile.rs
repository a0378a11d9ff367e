use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile entity - the public description attached 1:1 to a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profession: Option<String>,
    pub skill_level: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub dribbble_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profession: Option<String>,
    pub skill_level: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub dribbble_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

impl Profile {
    /// Create an empty profile for a freshly registered user.
    pub fn empty_for(user_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    pub fn apply(&mut self, changes: ProfileChanges) {
        fn merge(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        merge(&mut self.first_name, changes.first_name);
        merge(&mut self.last_name, changes.last_name);
        merge(&mut self.profession, changes.profession);
        merge(&mut self.skill_level, changes.skill_level);
        merge(&mut self.description, changes.description);
        merge(&mut self.github_url, changes.github_url);
        merge(&mut self.dribbble_url, changes.dribbble_url);
        merge(&mut self.linkedin_url, changes.linkedin_url);
        merge(&mut self.portfolio_url, changes.portfolio_url);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_overwrites_provided_fields() {
        let mut profile = Profile::empty_for(Uuid::new_v4());
        profile.first_name = Some("Grace".into());
        profile.profession = Some("Engineer".into());

        profile.apply(ProfileChanges {
            profession: Some("Admiral".into()),
            github_url: Some("https://github.com/grace".into()),
            ..Default::default()
        });

        assert_eq!(profile.first_name.as_deref(), Some("Grace"));
        assert_eq!(profile.profession.as_deref(), Some("Admiral"));
        assert_eq!(profile.github_url.as_deref(), Some("https://github.com/grace"));
        assert!(profile.updated_at >= profile.created_at);
    }
}
