use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::validate_non_empty_string;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `Male`, `MALE` and `male` all parse to [`Gender::Male`].
impl FromStr for Gender {
    type Err = AddressBookError;

    fn from_str(s: &str) -> Result<Self> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AddressBookError::InvalidArgument {
                field: "gender".to_string(),
                value: s.to_string(),
                reason: "expected one of MALE, FEMALE".to_string(),
            })
    }
}

/// Controls whether [`crate::AddressBook::add`] validates its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Strict,
    Permissive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    gender: Gender,
    date_of_birth: NaiveDate,
}

impl Entry {
    /// Builds an entry, rejecting a blank name.
    pub fn new(name: impl Into<String>, gender: Gender, date_of_birth: NaiveDate) -> Result<Self> {
        let name = name.into();
        validate_non_empty_string("name", &name)?;
        Ok(Self::new_unchecked(name, gender, date_of_birth))
    }

    pub(crate) fn new_unchecked(name: String, gender: Gender, date_of_birth: NaiveDate) -> Self {
        Self {
            name,
            gender,
            date_of_birth,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }
}
