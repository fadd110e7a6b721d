//! Per-screen state
//!
//! Each screen owns the lists it displays. A mutation is always followed by
//! a fresh read of the affected list before the call returns, and a failed
//! call leaves the previous contents in place.

use chrono::NaiveDate;

use crate::{
    calendar::{self, Locale, MonthGrid, YearMonth},
    client::{ClientError, ClientResult, EventStore, UserStore, VisitorCounter},
    models::{
        event::{CreateEvent, Event, DEFAULT_RECENT_LIMIT},
        user::User,
    },
    session::{Action, Actor, View},
};

/// The calendar screen
#[derive(Debug, Clone)]
pub struct CalendarScreen {
    month: YearMonth,
    locale: Locale,
    events: Vec<Event>,
}

impl CalendarScreen {
    pub fn new(month: YearMonth, locale: Locale) -> Self {
        Self {
            month,
            locale,
            events: Vec::new(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Fetch every event
    pub async fn load<S: EventStore + ?Sized>(&mut self, store: &S) -> ClientResult<()> {
        self.events = store.list_events().await?;
        Ok(())
    }

    /// Render the current month for `actor`
    pub fn grid(&self, actor: &Actor) -> MonthGrid<'_> {
        calendar::render(self.month, &self.events, self.locale, actor.can(Action::EditEvent))
    }

    /// Whether the "add event" control is shown
    pub fn shows_add_control(&self, actor: &Actor) -> bool {
        actor.can(Action::AddEvent)
    }

    pub fn next_month(&mut self) {
        self.month = self.month.next();
    }

    pub fn prev_month(&mut self) {
        self.month = self.month.prev();
    }

    /// Jump to the month typed into the year/month fields
    pub fn jump(&mut self, year_text: &str, month_text: &str) -> ClientResult<()> {
        self.month = YearMonth::jump(year_text, month_text)
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        Ok(())
    }

    /// Clicking an event entry: opens it for members, does nothing for guests
    pub fn select(&self, actor: &Actor, event_id: i64) -> Option<&Event> {
        if !actor.can(Action::EditEvent) {
            return None;
        }
        self.events.iter().find(|e| e.id == event_id)
    }

    pub async fn add_event<S: EventStore + ?Sized>(
        &mut self,
        store: &S,
        actor: &Actor,
        date: Option<NaiveDate>,
        title: &str,
    ) -> ClientResult<Event> {
        actor.require(Action::AddEvent)?;
        let date = match date {
            Some(date) if !title.is_empty() => date,
            _ => return Err(ClientError::Validation("Please enter a date and a title".to_string())),
        };

        let request = CreateEvent {
            id: 0,
            title: title.to_string(),
            date,
            created_by: actor.display_name().to_string(),
        };
        let created = store.add_event(&request).await?;
        self.load(store).await?;
        Ok(created)
    }

    /// Change the title of an event
    pub async fn edit_event<S: EventStore + ?Sized>(
        &mut self,
        store: &S,
        actor: &Actor,
        event_id: i64,
        title: &str,
    ) -> ClientResult<Event> {
        actor.require(Action::EditEvent)?;
        if title.is_empty() {
            return Err(ClientError::Validation("Please enter a title".to_string()));
        }
        let mut event = self.find(event_id)?.clone();
        event.title = title.to_string();

        let updated = store.edit_event(&event).await?;
        self.load(store).await?;
        Ok(updated)
    }

    /// Delete an event once `confirm` agrees.
    ///
    /// Returns `Ok(false)` without any request when the confirmation is
    /// declined.
    pub async fn delete_event<S, F>(
        &mut self,
        store: &S,
        actor: &Actor,
        event_id: i64,
        confirm: F,
    ) -> ClientResult<bool>
    where
        S: EventStore + ?Sized,
        F: FnOnce(&Event) -> bool,
    {
        actor.require(Action::DeleteEvent)?;
        if !confirm(self.find(event_id)?) {
            return Ok(false);
        }
        store.delete_event(event_id).await?;
        self.load(store).await?;
        Ok(true)
    }

    fn find(&self, event_id: i64) -> ClientResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| ClientError::Validation("This event no longer exists".to_string()))
    }
}

/// A summary tile on the admin dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: &'static str,
    pub value: i64,
    /// Screen opened by clicking the tile
    pub target: Option<View>,
}

/// The admin dashboard
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub recent_events: Vec<Event>,
    pub pending_users: Vec<User>,
    pub visitor_count: i64,
}

impl AdminDashboard {
    /// Fetch recent events, users and today's visitor count concurrently
    pub async fn load<E, U, V>(actor: &Actor, events: &E, users: &U, visitors: &V) -> ClientResult<Self>
    where
        E: EventStore + ?Sized,
        U: UserStore + ?Sized,
        V: VisitorCounter + ?Sized,
    {
        actor.require(Action::ViewAdminDashboard)?;
        let (recent_events, all_users, visitor_count) = tokio::try_join!(
            events.recent_events(DEFAULT_RECENT_LIMIT),
            users.list_users(),
            visitors.visitor_count(),
        )?;

        Ok(Self {
            recent_events,
            pending_users: pending(all_users),
            visitor_count,
        })
    }

    pub fn pending_count(&self) -> usize {
        self.pending_users.len()
    }

    pub fn tiles(&self) -> [Tile; 3] {
        [
            Tile {
                label: "Recent events",
                value: self.recent_events.len() as i64,
                target: Some(View::AdminEvents),
            },
            Tile {
                label: "Pending registrations",
                value: self.pending_count() as i64,
                target: Some(View::AdminUsers),
            },
            Tile {
                label: "Visitors today",
                value: self.visitor_count,
                target: None,
            },
        ]
    }
}

/// Recent events list for admins
#[derive(Debug, Clone, Default)]
pub struct AdminEventsScreen {
    pub events: Vec<Event>,
}

impl AdminEventsScreen {
    pub async fn load<S: EventStore + ?Sized>(actor: &Actor, store: &S) -> ClientResult<Self> {
        actor.require(Action::ViewAdminDashboard)?;
        let events = store.recent_events(DEFAULT_RECENT_LIMIT).await?;
        Ok(Self { events })
    }
}

/// Activity of one member, shown from the pending-users screen
#[derive(Debug, Clone)]
pub struct MemberActivity {
    pub events: Vec<Event>,
    pub event_count: i64,
}

/// Pending registrations, with approve/reject controls
#[derive(Debug, Clone, Default)]
pub struct AdminUsersScreen {
    pending: Vec<User>,
}

impl AdminUsersScreen {
    pub async fn load<S: UserStore + ?Sized>(actor: &Actor, store: &S) -> ClientResult<Self> {
        actor.require(Action::ReviewRegistrations)?;
        let mut screen = Self::default();
        screen.refresh(store).await?;
        Ok(screen)
    }

    pub fn pending(&self) -> &[User] {
        &self.pending
    }

    async fn refresh<S: UserStore + ?Sized>(&mut self, store: &S) -> ClientResult<()> {
        self.pending = pending(store.list_users().await?);
        Ok(())
    }

    /// Approve or reject a registration, then reload the list.
    /// Returns the message to show.
    pub async fn review<S: UserStore + ?Sized>(
        &mut self,
        store: &S,
        actor: &Actor,
        user_id: i64,
        approved: bool,
    ) -> ClientResult<&'static str> {
        actor.require(Action::ReviewRegistrations)?;
        store.approve_user(user_id, approved).await?;
        self.refresh(store).await?;
        Ok(if approved { "Approved" } else { "Rejected" })
    }

    /// Delete a member and their events once `confirm` agrees
    pub async fn delete_user<S, F>(
        &mut self,
        store: &S,
        actor: &Actor,
        user_id: i64,
        confirm: F,
    ) -> ClientResult<bool>
    where
        S: UserStore + ?Sized,
        F: FnOnce() -> bool,
    {
        actor.require(Action::ReviewRegistrations)?;
        if !confirm() {
            return Ok(false);
        }
        store.delete_user(user_id).await?;
        self.refresh(store).await?;
        Ok(true)
    }

    /// Events a member has posted
    pub async fn activity<S: UserStore + ?Sized>(
        &self,
        store: &S,
        actor: &Actor,
        user_id: i64,
    ) -> ClientResult<MemberActivity> {
        actor.require(Action::ReviewRegistrations)?;
        let (events, event_count) =
            tokio::try_join!(store.user_events(user_id), store.user_event_count(user_id))?;
        Ok(MemberActivity { events, event_count })
    }
}

fn pending(users: Vec<User>) -> Vec<User> {
    users.into_iter().filter(User::is_pending).collect()
}
