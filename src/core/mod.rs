pub mod address_book;
pub mod reader;
pub mod report;

pub use crate::domain::model::{Entry, Gender, ValidationMode};
pub use crate::domain::ports::ReaderSettings;
pub use crate::utils::error::Result;
pub use address_book::AddressBook;
pub use reader::Reader;
