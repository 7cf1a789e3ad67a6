//! View routing and app state

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::inbox::Inbox;
use crate::inbox::PollHandle;
use crate::views;
use crate::views::Page;
use crate::views::ViewContext;

/// The console's screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Sites,
    Equipment,
    /// Site picker, or one site's stock.
    Inventory { site: Option<i64> },
    WorkOrders,
    Supply,
    Planning,
    Inbox,
    Reports,
    Users,
}

impl View {
    pub const NAMES: [&'static str; 10] = [
        "dashboard",
        "sites",
        "equipment",
        "inventory",
        "workorders",
        "supply",
        "planning",
        "inbox",
        "reports",
        "users",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Sites => "sites",
            Self::Equipment => "equipment",
            Self::Inventory { .. } => "inventory",
            Self::WorkOrders => "workorders",
            Self::Supply => "supply",
            Self::Planning => "planning",
            Self::Inbox => "inbox",
            Self::Reports => "reports",
            Self::Users => "users",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dashboard" => Self::Dashboard,
            "sites" => Self::Sites,
            "equipment" => Self::Equipment,
            "inventory" => Self::Inventory { site: None },
            "workorders" => Self::WorkOrders,
            "supply" => Self::Supply,
            "planning" => Self::Planning,
            "inbox" => Self::Inbox,
            "reports" => Self::Reports,
            "users" => Self::Users,
            other => {
                return Err(Error::invalid_input(format!(
                    "unknown view '{}', expected one of: {}",
                    other,
                    Self::NAMES.join(", ")
                )));
            }
        })
    }
}

/// What navigation produced.
#[derive(Debug)]
pub enum Screen {
    Page(Page),
    /// The feed is live; frames arrive on the inbox receiver.
    Inbox,
}

/// Navigation state owned by the router.
#[derive(Debug, Default)]
pub struct AppState {
    pub active: Option<View>,
    pub inbox_poll: Option<PollHandle>,
}

/// Switches views and owns the feed's poll task.
pub struct Router {
    ctx: ViewContext,
    inbox: Inbox,
    state: AppState,
}

impl Router {
    pub fn new(ctx: ViewContext, inbox: Inbox) -> Self {
        Self {
            ctx,
            inbox,
            state: AppState::default(),
        }
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn active(&self) -> Option<View> {
        self.state.active
    }

    /// Makes `view` active and builds its screen.
    ///
    /// Leaving the inbox stops its polling before anything else happens.
    /// Entering it (again) cancels any previous poll task first, so at most
    /// one is ever alive.
    pub async fn navigate(&mut self, view: View) -> Result<Screen, Error> {
        log::debug!("navigate to {}", view);
        self.state.active = Some(view);
        self.stop_polling();

        let page = match view {
            View::Inbox => {
                self.state.inbox_poll = Some(self.inbox.activate());
                return Ok(Screen::Inbox);
            }
            View::Dashboard => views::dashboard::page(&self.ctx).await?,
            View::Reports => views::dashboard::reports(&self.ctx).await?,
            View::Sites => views::sites::page(&self.ctx).await?,
            View::Equipment => views::equipment::page(&self.ctx).await?,
            View::Inventory { site } => views::inventory::page(&self.ctx, site).await?,
            View::WorkOrders => views::work_orders::page(&self.ctx).await?,
            View::Supply => views::supply::page(&self.ctx).await?,
            View::Planning => views::planning::page(&self.ctx).await?,
            View::Users => views::users::page(&self.ctx).await?,
        };
        Ok(Screen::Page(page))
    }

    fn stop_polling(&mut self) {
        if let Some(handle) = self.state.inbox_poll.take() {
            // The loop exits on its own; nothing waits for it.
            drop(self.inbox.deactivate(handle));
        }
    }

    /// Stops background work and waits for the poll task to exit.
    pub async fn shutdown(&mut self) {
        self.state.active = None;
        if let Some(handle) = self.state.inbox_poll.take() {
            if let Err(e) = self.inbox.deactivate(handle).await {
                log::warn!("inbox poll task ended abnormally: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_names_round_trip() {
        for name in View::NAMES {
            let view: View = name.parse().unwrap();
            assert_eq!(view.as_str(), name);
        }
        assert_eq!("inventory".parse::<View>().unwrap(), View::Inventory { site: None });
    }

    #[test]
    fn test_unknown_view() {
        let err = "settings".parse::<View>().unwrap_err();
        assert!(err.message().contains("unknown view 'settings'"));
    }
}
