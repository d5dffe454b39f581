//! # Backoffice
//!
//! Admin back-office client: signs administrators in against the admin
//! API, guards protected pages on the stored session, and renders the
//! dashboard counters.
//!
//! ## Modules
//!
//! - [`session`]: Session storage port and its memory/file stores
//! - [`client`]: Admin API port and its reqwest client
//! - [`ui`]: Presentation and navigation ports
//! - [`flows`]: Session guard, login and dashboard flows
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use backoffice::client::{AdminClient, AdminClientConfig};
//! use backoffice::flows::{
//!     ensure_authenticated, DashboardFlow, GuardOutcome, LoadingPolicy, LoginFlow,
//!     LoginSettings, Ports,
//! };
//! use backoffice::session::MemoryStore;
//! use backoffice::ui::TerminalView;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AdminClient::new(AdminClientConfig::default())?;
//!     let store = MemoryStore::new();
//!     let view = TerminalView::new();
//!     let ports = Ports::new(&client, &store, &view, &view);
//!
//!     // Log in; admins only
//!     LoginFlow::new(
//!         ports,
//!         LoginSettings::new("http://localhost:8080"),
//!         LoadingPolicy::default(),
//!     )
//!     .submit("0123456789", "secret")
//!     .await?;
//!
//!     // Protected page
//!     if ensure_authenticated(&store, &view)? == GuardOutcome::Authenticated {
//!         DashboardFlow::new(ports, "http://localhost:8080", LoadingPolicy::default())
//!             .load()
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod flows;
pub mod session;
pub mod ui;

// Re-export top-level types for convenience
pub use client::{AdminApi, AdminClient, ApiError, DashboardStats};
pub use config::Config;
pub use flows::{DashboardFlow, DashboardState, GuardOutcome, LoginError, LoginFlow, Ports};
pub use session::{FileStore, MemoryStore, SessionCredential, SessionStore};
pub use ui::{Counter, Field, Navigator, Page, Presenter};
