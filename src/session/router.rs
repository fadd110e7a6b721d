//! Client router
//!
//! [`AppSession`] is the whole navigation state of a client: the screen on
//! display and the actor using it. Every transition returns a new value and
//! leaves the old one untouched.

use crate::{
    client::{ClientError, ClientResult},
    models::user::User,
};

use super::role::{Action, Actor};

/// The seven screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Register,
    Login,
    Calendar,
    Admin,
    AdminEvents,
    AdminUsers,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Home,
        View::Register,
        View::Login,
        View::Calendar,
        View::Admin,
        View::AdminEvents,
        View::AdminUsers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Register => "register",
            View::Login => "login",
            View::Calendar => "calendar",
            View::Admin => "admin",
            View::AdminEvents => "admin-events",
            View::AdminUsers => "admin-users",
        }
    }

    fn is_admin_view(self) -> bool {
        matches!(self, View::Admin | View::AdminEvents | View::AdminUsers)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppSession {
    view: View,
    actor: Option<Actor>,
}

impl AppSession {
    /// Fresh session on the home screen, nobody logged in
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// Whether the current actor may perform `action`
    pub fn can(&self, action: Action) -> bool {
        self.actor.as_ref().is_some_and(|a| a.can(action))
    }

    /// Navigate to `view` if the current actor may see it
    pub fn open(&self, view: View) -> ClientResult<Self> {
        match &self.actor {
            None if view == View::Calendar => {
                return Err(ClientError::Forbidden("Please log in first".to_string()));
            }
            _ if view.is_admin_view() && !self.can(Action::ViewAdminDashboard) => {
                return Err(ClientError::Forbidden(
                    "Administrator privileges required".to_string(),
                ));
            }
            _ => {}
        }
        Ok(Self {
            view,
            actor: self.actor.clone(),
        })
    }

    /// Enter the calendar as a guest, without any request
    pub fn enter_as_guest(&self) -> Self {
        Self {
            view: View::Calendar,
            actor: Some(Actor::Guest),
        }
    }

    /// After a successful login: admins land on the dashboard, members on
    /// the calendar
    pub fn logged_in(&self, user: User) -> Self {
        let actor = Actor::from_user(user);
        let view = if actor.is_admin() {
            View::Admin
        } else {
            View::Calendar
        };
        Self {
            view,
            actor: Some(actor),
        }
    }

    /// After a registration was submitted; the user is not logged in
    pub fn registered(&self) -> Self {
        Self {
            view: View::Home,
            actor: self.actor.clone(),
        }
    }

    pub fn logout(&self) -> Self {
        Self::new()
    }

    /// The "back" control of each screen. From the admin dashboard it
    /// leads home and ends the session.
    pub fn back(&self) -> Self {
        let view = match self.view {
            View::Admin => return Self::new(),
            View::Calendar if self.can(Action::ViewAdminDashboard) => View::Admin,
            View::AdminEvents | View::AdminUsers => View::Admin,
            _ => View::Home,
        };
        Self {
            view,
            actor: self.actor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: 1,
            nickname: "abc".to_string(),
            password: None,
            note: String::new(),
            approved: true,
            is_admin,
        }
    }

    #[test]
    fn starts_at_home() {
        let session = AppSession::new();
        assert_eq!(session.view(), View::Home);
        assert!(session.actor().is_none());
    }

    #[test]
    fn login_routes_by_role() {
        let session = AppSession::new();
        assert_eq!(session.logged_in(user(false)).view(), View::Calendar);
        assert_eq!(session.logged_in(user(true)).view(), View::Admin);
    }

    #[test]
    fn guest_entry_is_local_and_read_only() {
        let guest = AppSession::new().enter_as_guest();
        assert_eq!(guest.view(), View::Calendar);
        assert_eq!(guest.actor(), Some(&Actor::Guest));
        assert!(!guest.can(Action::AddEvent));
    }

    #[test]
    fn admin_views_are_gated() {
        let guest = AppSession::new().enter_as_guest();
        let member = AppSession::new().logged_in(user(false));
        let admin = AppSession::new().logged_in(user(true));

        for view in [View::Admin, View::AdminEvents, View::AdminUsers] {
            assert!(guest.open(view).is_err());
            assert!(member.open(view).is_err());
            assert_eq!(admin.open(view).unwrap().view(), view);
        }
        for view in View::ALL {
            assert!(admin.open(view).is_ok(), "{}", view.name());
        }
    }

    #[test]
    fn calendar_needs_an_actor() {
        assert!(AppSession::new().open(View::Calendar).is_err());
        assert!(AppSession::new().open(View::Register).is_ok());
    }

    #[test]
    fn transitions_do_not_mutate() {
        let before = AppSession::new();
        let after = before.enter_as_guest();
        assert_eq!(before, AppSession::new());
        assert_ne!(before, after);
    }

    #[test]
    fn back_and_logout() {
        let admin = AppSession::new().logged_in(user(true));
        let calendar = admin.open(View::Calendar).unwrap();
        assert_eq!(calendar.back().view(), View::Admin);
        assert_eq!(admin.open(View::AdminUsers).unwrap().back().view(), View::Admin);

        let member = AppSession::new().logged_in(user(false));
        assert_eq!(member.back().view(), View::Home);

        let home = admin.back();
        assert_eq!(home.view(), View::Home);
        assert!(home.actor().is_none());

        let out = calendar.logout();
        assert_eq!(out, AppSession::new());
        assert_eq!(AppSession::new().registered().view(), View::Home);
    }
}
