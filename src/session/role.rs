//! Role gate

use crate::{
    client::{ClientError, ClientResult},
    models::user::User,
};

/// Label recorded as the creator of anything a guest produces
pub const GUEST_LABEL: &str = "guest";

/// The party driving the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Entered without an account; read-only calendar access
    Guest,
    Member(User),
    Admin(User),
}

/// Gated actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewCalendar,
    AddEvent,
    EditEvent,
    DeleteEvent,
    ReviewRegistrations,
    ViewAdminDashboard,
}

impl Actor {
    /// Classify a logged-in user
    pub fn from_user(user: User) -> Self {
        if user.is_admin {
            Actor::Admin(user)
        } else {
            Actor::Member(user)
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Actor::Guest)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin(_))
    }

    /// Guests count as approved; admins are approved by definition
    pub fn is_approved(&self) -> bool {
        match self {
            Actor::Guest | Actor::Admin(_) => true,
            Actor::Member(user) => user.approved,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Actor::Guest => None,
            Actor::Member(user) | Actor::Admin(user) => Some(user),
        }
    }

    /// Name recorded as the creator of new events
    pub fn display_name(&self) -> &str {
        self.user().map(|u| u.nickname.as_str()).unwrap_or(GUEST_LABEL)
    }

    pub fn can(&self, action: Action) -> bool {
        match action {
            Action::ViewCalendar => true,
            Action::AddEvent | Action::EditEvent | Action::DeleteEvent => {
                !self.is_guest() && self.is_approved()
            }
            Action::ReviewRegistrations | Action::ViewAdminDashboard => self.is_admin(),
        }
    }

    pub fn require(&self, action: Action) -> ClientResult<()> {
        if self.can(action) {
            return Ok(());
        }
        let message = match action {
            Action::ReviewRegistrations | Action::ViewAdminDashboard => {
                "Administrator privileges required"
            }
            _ => "Only approved members can change the calendar",
        };
        Err(ClientError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(approved: bool, is_admin: bool) -> User {
        User {
            id: 7,
            nickname: "abc".to_string(),
            password: None,
            note: String::new(),
            approved,
            is_admin,
        }
    }

    const MUTATIONS: [Action; 3] = [Action::AddEvent, Action::EditEvent, Action::DeleteEvent];
    const ADMIN_ONLY: [Action; 2] = [Action::ReviewRegistrations, Action::ViewAdminDashboard];

    #[test]
    fn guest_is_read_only() {
        let guest = Actor::Guest;
        assert!(guest.can(Action::ViewCalendar));
        assert!(guest.is_approved());
        for action in MUTATIONS.iter().chain(ADMIN_ONLY.iter()) {
            assert!(!guest.can(*action), "{:?}", action);
        }
        assert!(matches!(guest.require(Action::AddEvent), Err(ClientError::Forbidden(_))));
        assert_eq!(guest.display_name(), GUEST_LABEL);
    }

    #[test]
    fn approved_member_edits_but_does_not_administer() {
        let member = Actor::from_user(user(true, false));
        assert!(MUTATIONS.iter().all(|a| member.can(*a)));
        assert!(ADMIN_ONLY.iter().all(|a| !member.can(*a)));
        assert_eq!(member.display_name(), "abc");
    }

    #[test]
    fn unapproved_member_cannot_edit() {
        let member = Actor::from_user(user(false, false));
        assert!(member.can(Action::ViewCalendar));
        assert!(MUTATIONS.iter().all(|a| !member.can(*a)));
    }

    #[test]
    fn admin_can_do_everything() {
        // Even with a stale approved flag, an admin counts as approved.
        let admin = Actor::from_user(user(false, true));
        assert!(admin.is_admin());
        assert!(MUTATIONS.iter().chain(ADMIN_ONLY.iter()).all(|a| admin.can(*a)));
    }
}
