/// All primary keys are application-generated UUIDs.
///
/// Category paths embed ids, so an id must be known before the row is written.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh primary key.
pub fn new_id() -> DbId {
    uuid::Uuid::new_v4()
}
