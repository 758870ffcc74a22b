use crate::core::{AddressBook, Entry, Gender, ReaderSettings, ValidationMode};
use crate::utils::error::{AddressBookError, Result};
use crate::utils::validation::validate_range;
use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_PIVOT_OFFSET_YEARS: i32 = 80;
pub const MIN_PIVOT_OFFSET_YEARS: i32 = 1;
pub const MAX_PIVOT_OFFSET_YEARS: i32 = 99;

const FIELD_COUNT: usize = 3;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*").expect("separator pattern is valid"));

static DATE_OF_BIRTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{2})$").expect("date pattern is valid")
});

/// Loads an [`AddressBook`] from `name, gender, dd/mm/yy` lines.
///
/// Blank lines and lines that do not split into exactly three fields are
/// skipped. A bad name, gender or date aborts the whole load.
#[derive(Debug, Clone)]
pub struct Reader {
    pivot_offset_years: i32,
    validation: ValidationMode,
}

impl Default for Reader {
    fn default() -> Self {
        Self {
            pivot_offset_years: DEFAULT_PIVOT_OFFSET_YEARS,
            validation: ValidationMode::default(),
        }
    }
}

impl Reader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a reader from settings, rejecting a pivot offset outside
    /// `1..=99` years.
    pub fn from_settings<S: ReaderSettings>(settings: &S) -> Result<Self> {
        let pivot_offset_years = settings.pivot_offset_years();
        validate_pivot_offset(pivot_offset_years)?;

        Ok(Self {
            pivot_offset_years,
            validation: settings.validation_mode(),
        })
    }

    pub fn pivot_offset_years(&self) -> i32 {
        self.pivot_offset_years
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<AddressBook> {
        let path = path.as_ref();
        tracing::debug!("Reading address book from {}", path.display());

        let file = File::open(path).map_err(|source| AddressBookError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(BufReader::new(file), path)
    }

    pub fn read_from<R: BufRead>(&self, input: R) -> Result<AddressBook> {
        self.load(input, Path::new("<input>"))
    }

    fn load<R: BufRead>(&self, input: R, origin: &Path) -> Result<AddressBook> {
        let mut book = AddressBook::with_validation(self.validation);
        let mut skipped = 0usize;

        for (index, line) in input.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|source| AddressBookError::IoError {
                path: origin.to_path_buf(),
                source,
            })?;

            match self.parse_line(&line).map_err(|e| e.at_line(line_number))? {
                Some(entry) => book.insert(entry),
                None if line.trim().is_empty() => {}
                None => {
                    skipped += 1;
                    tracing::debug!("Skipping line {}: expected {} fields", line_number, FIELD_COUNT);
                }
            }
        }

        tracing::info!(
            "Loaded {} entries from {} ({} lines skipped)",
            book.len(),
            origin.display(),
            skipped
        );
        Ok(book)
    }

    /// Parses one line. `Ok(None)` means the line is blank or has the wrong
    /// number of fields.
    pub fn parse_line(&self, line: &str) -> Result<Option<Entry>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let fields = split_fields(line);
        if fields.len() != FIELD_COUNT {
            return Ok(None);
        }

        let gender: Gender = fields[1].parse()?;
        let date_of_birth = parse_date_of_birth(fields[2], pivot_year(self.pivot_offset_years)?)?;
        Entry::new(fields[0], gender, date_of_birth).map(Some)
    }
}

/// Splits on commas with optional surrounding whitespace. Trailing empty
/// fields are dropped, so a stray delimiter at the end of a line is ignored.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = SEPARATOR.split(line).collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

pub(crate) fn validate_pivot_offset(offset_years: i32) -> Result<()> {
    validate_range(
        "reader.pivot_offset_years",
        offset_years,
        MIN_PIVOT_OFFSET_YEARS,
        MAX_PIVOT_OFFSET_YEARS,
    )
    .map_err(|e| match e {
        AddressBookError::InvalidArgument { field, value, reason } => AddressBookError::ConfigError {
            field,
            message: format!("'{}': {}", value, reason),
        },
        other => other,
    })
}

/// First year of the hundred-year window two-digit years resolve into.
pub fn pivot_year(offset_years: i32) -> Result<i32> {
    Local::now()
        .year()
        .checked_sub(offset_years)
        .ok_or_else(|| AddressBookError::ConfigError {
            field: "reader.pivot_offset_years".to_string(),
            message: format!("'{}': pivot year out of range", offset_years),
        })
}

/// Maps `yy` to the year in `[pivot, pivot + 99]` ending in those digits.
fn resolve_year(two_digit_year: i32, pivot: i32) -> i32 {
    let year = pivot.div_euclid(100) * 100 + two_digit_year;
    if year < pivot {
        year + 100
    } else {
        year
    }
}

/// Parses a `DD/MM/YY` date, resolving the year against `pivot`.
pub fn parse_date_of_birth(value: &str, pivot: i32) -> Result<NaiveDate> {
    let invalid = |reason: &str| AddressBookError::DateParseError {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let caps = DATE_OF_BIRTH
        .captures(value)
        .ok_or_else(|| invalid("expected DD/MM/YY"))?;
    // the pattern guarantees two ASCII digits per group
    let number = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid("expected DD/MM/YY"));

    let day = number(1)?;
    let month = number(2)?;
    let year = resolve_year(number(3)? as i32, pivot);

    if !(1..=12).contains(&month) {
        return Err(invalid("month out of range"));
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    const PIVOT: i32 = 1946;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_resolve_year_window() {
        assert_eq!(resolve_year(77, PIVOT), 1977);
        assert_eq!(resolve_year(46, PIVOT), 1946);
        assert_eq!(resolve_year(45, PIVOT), 2045);
        assert_eq!(resolve_year(12, PIVOT), 2012);
        assert_eq!(resolve_year(0, 2000), 2000);
        assert_eq!(resolve_year(99, 2000), 2099);
    }

    #[test]
    fn test_parse_date_of_birth() {
        assert_eq!(parse_date_of_birth("16/03/77", PIVOT).unwrap(), date(1977, 3, 16));
        assert_eq!(parse_date_of_birth("16/03/12", PIVOT).unwrap(), date(2012, 3, 16));
        assert_eq!(parse_date_of_birth("29/02/80", PIVOT).unwrap(), date(1980, 2, 29));
    }

    #[test]
    fn test_parse_date_of_birth_rejects_bad_input() {
        for value in ["16/13/77", "31/04/77", "29/02/77", "00/01/77", "6/3/77", "16-03-77", "16/03/1977", ""] {
            let err = parse_date_of_birth(value, PIVOT).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "value {:?}", value);
        }
    }

    #[test]
    fn test_pivot_year_follows_clock() {
        assert_eq!(pivot_year(80).unwrap(), Local::now().year() - 80);
    }

    #[test]
    fn test_pivot_year_overflow_is_config_error() {
        let err = pivot_year(i32::MIN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_validate_pivot_offset() {
        assert!(validate_pivot_offset(1).is_ok());
        assert!(validate_pivot_offset(99).is_ok());
        for offset in [0, 100, 1000, -1, i32::MIN] {
            let err = validate_pivot_offset(offset).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "offset {}", offset);
        }
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("Bill McKnight, Male, 16/03/77"), vec!["Bill McKnight", "Male", "16/03/77"]);
        assert_eq!(
            split_fields("Bill McKnight    , Male  \t ,  \t16/03/77"),
            vec!["Bill McKnight", "Male", "16/03/77"]
        );
        assert_eq!(split_fields("Bill McKnight, Male, 16/03/77,"), vec!["Bill McKnight", "Male", "16/03/77"]);
        assert_eq!(split_fields(", Male, 16/03/77"), vec!["", "Male", "16/03/77"]);
        assert_eq!(split_fields("Bill McKnight, , 16/03/77"), vec!["Bill McKnight", "", "16/03/77"]);
    }

    #[test]
    fn test_parse_line_skips_wrong_shape() {
        let reader = Reader::new();
        assert!(reader.parse_line("").unwrap().is_none());
        assert!(reader.parse_line("  \t").unwrap().is_none());
        assert!(reader.parse_line("Bill McKnight, Male").unwrap().is_none());
        assert!(reader.parse_line("Bill McKnight, Male, 16/03/77, address").unwrap().is_none());
    }

    #[test]
    fn test_parse_line_errors() {
        let reader = Reader::new();

        let err = reader.parse_line("Bill McKnight, UNKNOWN, 16/03/77").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = reader.parse_line(", Male, 16/03/77").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = reader.parse_line("Bill McKnight, Male, 16/13/77").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        // gender and date are checked before the name
        let err = reader.parse_line(", Male, 16/13/77").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        let err = reader.parse_line(", UNKNOWN, 16/13/77").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_read_from_reports_line_number() {
        let input = "Bill McKnight, Male, 16/03/77\n\nGemma Lane, Other, 20/11/91\n";
        let err = Reader::new().read_from(input.as_bytes()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.line(), Some(3));
    }
}
