//! Presentation Ports
//!
//! What the flows are allowed to do to the screen: show and hide the
//! loading indicator, set inline field errors, drive the dashboard
//! counters, and change page. The terminal front end implements both
//! traits in [`TerminalView`].

mod terminal;

pub use terminal::TerminalView;

use std::fmt;

/// Pages the flows navigate between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Dashboard,
}

impl Page {
    /// Document name of the page
    pub fn path(self) -> &'static str {
        match self {
            Page::Login => "login.html",
            Page::Dashboard => "dashboard.html",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Login form fields that carry an inline error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PhoneNumber,
    Password,
}

impl Field {
    /// Element holding the field's error text
    pub fn error_element(self) -> &'static str {
        match self {
            Field::PhoneNumber => "phoneError",
            Field::Password => "passwordError",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::PhoneNumber => "Phone number",
            Field::Password => "Password",
        }
    }
}

/// Named counters on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    ActiveUsers,
    TotalSubscriptions,
    MonthlySubscriptions,
    SixMonthSubscriptions,
    AnnualSubscriptions,
}

impl Counter {
    /// All counters in dashboard order
    pub const ALL: [Counter; 5] = [
        Counter::ActiveUsers,
        Counter::TotalSubscriptions,
        Counter::MonthlySubscriptions,
        Counter::SixMonthSubscriptions,
        Counter::AnnualSubscriptions,
    ];

    /// Element id of the counter on the dashboard page
    pub fn element_id(self) -> &'static str {
        match self {
            Counter::ActiveUsers => "activeUsersCount",
            Counter::TotalSubscriptions => "totalSubs",
            Counter::MonthlySubscriptions => "monthlySubs",
            Counter::SixMonthSubscriptions => "sixMonthSubs",
            Counter::AnnualSubscriptions => "annualSubs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Counter::ActiveUsers => "Active users",
            Counter::TotalSubscriptions => "Subscriptions",
            Counter::MonthlySubscriptions => "Monthly",
            Counter::SixMonthSubscriptions => "Six months",
            Counter::AnnualSubscriptions => "Annual",
        }
    }
}

/// Visible UI effects of the flows
pub trait Presenter: Send + Sync {
    fn show_loading(&self);

    fn hide_loading(&self);

    /// Replace a field's error text; an empty message clears it
    fn set_field_error(&self, field: Field, message: &str);

    fn clear_field_error(&self, field: Field) {
        self.set_field_error(field, "");
    }

    /// Count a dashboard counter up to `value`
    fn animate_counter(&self, counter: Counter, value: u64);
}

/// Page changes requested by the flows
pub trait Navigator: Send + Sync {
    fn navigate(&self, page: Page);
}
