//! Export time window
//!
//! An export run covers the UTC hour that started one hour before "now".
//! The store is queried in UTC (`queued_at` begins with `YYYY-MM-DDTHH`),
//! while the object key is named in the configured local offset and laid
//! out Hive-style for Athena partitions:
//!
//! ```text
//! year=2019/month=07/day=24/2019072417.json
//! ```

use chrono::{DateTime, Duration, FixedOffset, Utc};

/// The hour exported by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportWindow {
    start: DateTime<Utc>,
    offset: FixedOffset,
}

impl ExportWindow {
    /// Window starting one hour before `now`
    pub fn previous_hour(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            start: now - Duration::hours(1),
            offset,
        }
    }

    /// Window start in UTC
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Window start in the naming offset
    pub fn local_start(&self) -> DateTime<FixedOffset> {
        self.start.with_timezone(&self.offset)
    }

    /// `begins_with` prefix for `queued_at`, e.g. `2019-07-24T08`
    pub fn query_prefix(&self) -> String {
        self.start.format("%Y-%m-%dT%H").to_string()
    }

    /// `year=YYYY/month=MM/day=DD` in local time
    pub fn partition_path(&self) -> String {
        self.local_start()
            .format("year=%Y/month=%m/day=%d")
            .to_string()
    }

    /// `YYYYMMDDHH.json` in local time
    pub fn file_name(&self) -> String {
        self.local_start().format("%Y%m%d%H.json").to_string()
    }

    /// Full object key: partition path plus file name
    pub fn object_key(&self) -> String {
        format!("{}/{}", self.partition_path(), self.file_name())
    }
}
