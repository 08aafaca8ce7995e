/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (maintenance, warranty, go-live) carry no time zone.
pub type Date = chrono::NaiveDate;
