//! Mail Triage Common Library
//!
//! CLIとWeb(WASM)で共有されるコントローラと型

pub mod api;
pub mod config;
pub mod error;
pub mod layout;
pub mod notify;
pub mod orchestrator;
pub mod results;
pub mod session;
pub mod theme;
pub mod types;
pub mod validator;

pub use api::{decode_response, ClassifyRequest};
pub use config::{ControllerConfig, InputRetention};
pub use error::{Error, Result};
pub use layout::{Layout, LayoutSelector, Presentation};
pub use notify::{Notification, NotificationKind};
pub use orchestrator::{
    copy_suggestion, copy_text, submit_file, submit_text, Classifier, Clipboard, SessionHandle,
};
pub use results::{EmptyState, ResultList};
pub use session::{Session, Submission, Ticket};
pub use theme::{DisplayEnv, PreferenceStore, ThemeManager, ThemeMode};
pub use types::{ClassificationOutcome, ClassificationResult, StagedFile};
pub use validator::{validate_file_name, validate_text, ValidationError};
