use crate::core::{Entry, Gender, ValidationMode};
use crate::utils::error::{AddressBookError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;

/// In-memory store of entries keyed by name. A later `add` with the same name
/// replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    entries: HashMap<String, Entry>,
    validation: ValidationMode,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_validation(validation: ValidationMode) -> Self {
        Self {
            entries: HashMap::new(),
            validation,
        }
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation
    }

    pub fn add(&mut self, name: impl Into<String>, gender: Gender, date_of_birth: NaiveDate) -> Result<()> {
        let entry = match self.validation {
            ValidationMode::Strict => Entry::new(name, gender, date_of_birth)?,
            ValidationMode::Permissive => Entry::new_unchecked(name.into(), gender, date_of_birth),
        };

        self.insert(entry);
        Ok(())
    }

    /// Stores an already-built entry under its name.
    pub fn insert(&mut self, entry: Entry) {
        let key = entry.name().to_string();
        if let Some(previous) = self.entries.insert(key, entry) {
            tracing::debug!("Replaced existing entry for {}", previous.name());
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, gender: Gender) -> usize {
        self.entries().filter(|e| e.gender() == gender).count()
    }

    /// Name of the earliest-born entry. When several entries share that date
    /// any one of them may be returned.
    pub fn find_oldest(&self) -> Option<&str> {
        self.entries()
            .min_by_key(|e| e.date_of_birth())
            .map(Entry::name)
    }

    /// Days from `first`'s date of birth to `second`'s. Negative when
    /// `second` is older than `first`.
    pub fn age_difference(&self, first: &str, second: &str) -> Result<i64> {
        let first = self.lookup(first)?;
        let second = self.lookup(second)?;
        Ok((second.date_of_birth() - first.date_of_birth()).num_days())
    }

    fn lookup(&self, name: &str) -> Result<&Entry> {
        self.get(name).ok_or_else(|| AddressBookError::NotFound {
            name: name.to_string(),
        })
    }
}
