pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::AppConfig;
pub use crate::core::{report::Report, AddressBook, Entry, Gender, Reader, ValidationMode};
pub use utils::error::{AddressBookError, ErrorKind, Result};
