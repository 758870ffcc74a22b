use crate::domain::model::ValidationMode;

/// Settings consumed by [`crate::Reader::from_settings`].
pub trait ReaderSettings {
    /// Years subtracted from the current year to get the two-digit year pivot.
    fn pivot_offset_years(&self) -> i32;
    fn validation_mode(&self) -> ValidationMode;
}
