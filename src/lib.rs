pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{DryRunRelay, HttpMailRelay};
pub use config::{cli::LocalStorage, toml_config::SiteConfig};
pub use crate::core::{
    contact_form::{ContactForm, FieldError, FormField, FormState, SubmitAction},
    content::{ContentRepository, ContentSource, Snapshot},
    sections::{SectionId, SectionView},
    site::{Page, Site},
    theme::{Theme, ThemeStore},
};
pub use utils::error::{PortfolioError, Result};
