pub mod contact_form;
pub mod content;
pub mod sections;
pub mod site;
pub mod theme;

pub use crate::domain::model::{ContentDocument, RelayPayload};
pub use crate::domain::ports::{ConfigProvider, MailRelay, Storage};
pub use crate::utils::error::Result;
