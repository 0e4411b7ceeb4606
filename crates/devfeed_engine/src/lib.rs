//! Devfeed engine: remote fetches, article rendering, preference
//! persistence and the contact relay.
mod contact;
mod engine;
mod fetch;
mod persist;
mod relay;
mod render;
mod types;

pub use contact::{
    compose, ContactRelay, MailTransport, OutgoingMail, RelayError, SmtpMailer, SmtpSettings,
    DEFAULT_SMTP_HOST,
};
pub use engine::EngineHandle;
pub use fetch::{DevToClient, FetchSettings, PageSource, DEFAULT_API_BASE, TAGS_PER_PAGE};
pub use persist::{ensure_state_dir, PersistError, ThemeStore, PREFERENCES_FILE};
pub use relay::{contact_router, CONTACT_PATH};
pub use render::{extract_body_html, render_article, Converter, Html2MdConverter};
pub use types::{EngineEvent, FailureKind, FetchError};
