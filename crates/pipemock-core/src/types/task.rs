//! Task records served by the task pipeline fixture.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task as seen by the pipeline under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            date,
        }
    }
}

/// Task wrapped in the marshalling envelope the client-side decoder expects.
///
/// The envelope keys sit next to the task fields, so a plain [`Task`] reader
/// decodes an encoded record as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedTask {
    #[serde(rename = "^EncodedType")]
    pub encoded_type: String,
    #[serde(rename = "^ObjectID")]
    pub object_id: String,
    #[serde(flatten)]
    pub task: Task,
}

impl EncodedTask {
    /// Type name the client marshaller registers tasks under.
    pub const TASK_TYPE: &'static str = "org.jboss.errai.aerogear.api.pipeline.impl.PipeTest$Task";

    pub fn new(task: Task) -> Self {
        Self {
            encoded_type: Self::TASK_TYPE.to_string(),
            object_id: "1".to_string(),
            task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    fn test_encoded_task_json_shape() {
        let encoded = EncodedTask::new(Task::new(12345, "Do Something", date(2012, 8, 1)));
        let value = serde_json::to_value(&encoded).expect("Should serialize");
        assert_eq!(
            value,
            json!({
                "^EncodedType": "org.jboss.errai.aerogear.api.pipeline.impl.PipeTest$Task",
                "^ObjectID": "1",
                "id": 12345,
                "title": "Do Something",
                "date": "2012-08-01"
            })
        );
    }

    #[rstest]
    fn test_plain_task_reads_encoded_record() {
        let value = json!({
            "^EncodedType": EncodedTask::TASK_TYPE,
            "^ObjectID": "1",
            "id": 67890,
            "title": "Do Something Else",
            "date": "2012-08-02"
        });
        let task: Task = serde_json::from_value(value).expect("Should deserialize");
        assert_eq!(task, Task::new(67890, "Do Something Else", date(2012, 8, 2)));
    }

    #[rstest]
    #[case(json!({"id": 1, "title": "t", "date": "2012-13-01"}))]
    #[case(json!({"id": 1, "title": "t", "date": "yesterday"}))]
    #[case(json!({"id": "1", "title": "t", "date": "2012-08-01"}))]
    fn test_task_rejects_malformed(#[case] value: serde_json::Value) {
        assert!(serde_json::from_value::<Task>(value).is_err());
    }
}
