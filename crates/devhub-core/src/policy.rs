//! Ownership policy.
//!
//! Every mutation of a user-owned resource and every read of private user data
//! goes through these checks: the owner may act, and so may an admin.

use uuid::Uuid;

use crate::domain::{Role, User};
use crate::error::DomainError;

/// Whoever is making the request.
///
/// Only the id is trusted to identify the actor. Path segments that name a
/// user must be resolved to an id before they reach these checks.
pub trait Actor {
    fn user_id(&self) -> Uuid;
    fn role(&self) -> Role;

    fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }
}

impl Actor for User {
    fn user_id(&self) -> Uuid {
        self.id
    }

    fn role(&self) -> Role {
        self.role
    }
}

/// Allow the owner of a resource, or an admin.
pub fn authorize<A: Actor + ?Sized>(actor: &A, owner_id: Uuid) -> Result<(), DomainError> {
    if actor.user_id() == owner_id || actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::NotAuthorized)
    }
}

/// Allow only the user `user_id` itself. Admins get no exception here:
/// this guards actions performed *as* someone, like sending a message.
pub fn ensure_self<A: Actor + ?Sized>(actor: &A, user_id: Uuid) -> Result<(), DomainError> {
    if actor.user_id() == user_id {
        Ok(())
    } else {
        Err(DomainError::NotAuthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        let mut user = User::new("linus".into(), "linus@example.com".into(), "hash".into());
        user.role = role;
        user
    }

    #[test]
    fn owner_is_authorized() {
        let owner = user(Role::User);
        assert!(authorize(&owner, owner.id).is_ok());
    }

    #[test]
    fn stranger_is_rejected() {
        let stranger = user(Role::User);
        let result = authorize(&stranger, Uuid::new_v4());
        assert!(matches!(result, Err(DomainError::NotAuthorized)));
    }

    #[test]
    fn admin_passes_every_ownership_check() {
        let admin = user(Role::Admin);
        assert!(authorize(&admin, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn demoted_admin_loses_the_bypass() {
        let mut actor = user(Role::Admin);
        actor.role = Role::User;
        assert!(matches!(
            authorize(&actor, Uuid::new_v4()),
            Err(DomainError::NotAuthorized)
        ));
    }

    #[test]
    fn ensure_self_has_no_admin_bypass() {
        let admin = user(Role::Admin);
        assert!(ensure_self(&admin, admin.id).is_ok());
        assert!(ensure_self(&admin, Uuid::new_v4()).is_err());
    }
}
