use super::Record;

/// Writes records to an output destination.
pub trait Recorder {
    /// Writes a record immediately.
    fn write(&mut self, record: Record);

    /// Stores a record for later flushing.
    fn store(&mut self, record: Record);

    /// Writes values from the stored records, tagged with `step`.
    fn flush(&mut self, step: i64);
}
