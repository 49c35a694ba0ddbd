use serde::{Deserialize, Deserializer, Serialize};

/// Data payload of an incoming push message. Push transports deliver data as
/// string maps, so `job_id` may arrive as either a number or a numeric
/// string; both are accepted, and anything else is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    #[serde(default, deserialize_with = "lenient_job_id")]
    pub job_id: Option<i64>,
}

fn lenient_job_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::PushMessage;

    #[test]
    fn job_id_parses_from_number_and_string() {
        let from_number: PushMessage =
            serde_json::from_str(r#"{"title":"t","body":"b","job_id":42}"#).unwrap();
        assert_eq!(from_number.job_id, Some(42));

        let from_string: PushMessage =
            serde_json::from_str(r#"{"title":"t","body":"b","job_id":"42"}"#).unwrap();
        assert_eq!(from_string.job_id, Some(42));
    }

    #[test]
    fn missing_or_garbage_job_id_is_none() {
        let missing: PushMessage = serde_json::from_str(r#"{"title":"t","body":"b"}"#).unwrap();
        assert_eq!(missing.job_id, None);

        let garbage: PushMessage =
            serde_json::from_str(r#"{"title":"t","body":"b","job_id":"soon"}"#).unwrap();
        assert_eq!(garbage.job_id, None);
    }
}
