use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};

const STATUS_OK: i64 = 200;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    /// 旧版接口把数据放在 meta 里
    #[serde(default)]
    pub data: Option<Value>,
}

/// OneSky 响应体的两种形态
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope {
    /// 没有 meta，整个响应体就是翻译数据
    Raw(Value),
    Wrapped { meta: Meta, data: Option<Value> },
}

impl ResponseEnvelope {
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let body: Value = serde_json::from_slice(bytes)
            .map_err(|e| AppError::remote(format!("failed to decode response body: {}", e)))?;
        Self::from_value(body)
    }

    pub fn from_value(body: Value) -> AppResult<Self> {
        let mut map = match body {
            Value::Object(map) => map,
            other => return Ok(ResponseEnvelope::Raw(other)),
        };

        // meta 为假值（null、false、0、""）时与不存在等价
        if map.get("meta").map_or(true, is_falsy) {
            return Ok(ResponseEnvelope::Raw(Value::Object(map)));
        }

        let meta_value = map.remove("meta").unwrap_or(Value::Null);
        let meta: Meta = serde_json::from_value(meta_value)
            .map_err(|e| AppError::remote(format!("malformed meta in response: {}", e)))?;
        let data = map.remove("data");

        Ok(ResponseEnvelope::Wrapped { meta, data })
    }

    /// 有 meta 且 status 不是 200
    pub fn is_service_error(&self) -> bool {
        matches!(self, ResponseEnvelope::Wrapped { meta, .. } if meta.status != Some(STATUS_OK))
    }

    /// 取出有效载荷；meta.status != 200 时返回服务端的错误信息
    pub fn into_payload(self) -> AppResult<Value> {
        match self {
            ResponseEnvelope::Raw(body) => Ok(body),
            ResponseEnvelope::Wrapped { meta, data } => {
                if meta.status != Some(STATUS_OK) {
                    let message = meta.message.unwrap_or_else(|| match meta.status {
                        Some(status) => format!("request failed with status {}", status),
                        None => "response meta has no status".to_string(),
                    });
                    return Err(AppError::RemoteService(message));
                }
                Ok(data.or(meta.data).unwrap_or(Value::Null))
            }
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload_of(body: Value) -> AppResult<Value> {
        ResponseEnvelope::from_value(body)?.into_payload()
    }

    #[test]
    fn ok_envelope_yields_data() {
        let payload = payload_of(json!({
            "meta": {"status": 200},
            "data": {"en-US": {"hello": "hi"}}
        }))
        .unwrap();
        assert_eq!(payload, json!({"en-US": {"hello": "hi"}}));
    }

    #[test]
    fn error_status_surfaces_service_message() {
        let err = payload_of(json!({"meta": {"status": 400, "message": "bad request"}})).unwrap_err();
        assert!(matches!(err, AppError::RemoteService(ref msg) if msg == "bad request"));
    }

    #[test]
    fn error_status_without_message_names_the_status() {
        let err = payload_of(json!({"meta": {"status": 401}})).unwrap_err();
        assert!(matches!(err, AppError::RemoteService(ref msg) if msg.contains("401")));
    }

    #[test]
    fn missing_status_is_not_success() {
        assert!(payload_of(json!({"meta": {}, "data": {"a": 1}})).is_err());
    }

    #[test]
    fn body_without_meta_is_the_payload() {
        let payload = payload_of(json!({"hello": "hi"})).unwrap();
        assert_eq!(payload, json!({"hello": "hi"}));
    }

    #[test]
    fn null_meta_is_treated_as_absent() {
        let body = json!({"meta": null, "hello": "hi"});
        assert_eq!(payload_of(body.clone()).unwrap(), body);
    }

    #[test]
    fn falsy_meta_is_treated_as_absent() {
        for meta in [json!(false), json!(0), json!("")] {
            let body = json!({"meta": meta, "hello": "hi"});
            assert_eq!(payload_of(body.clone()).unwrap(), body);
        }
    }

    #[test]
    fn truthy_non_object_meta_is_malformed() {
        for meta in [json!(true), json!(1), json!("ok")] {
            let err = ResponseEnvelope::from_value(json!({"meta": meta})).unwrap_err();
            assert!(matches!(err, AppError::RemoteService(_)));
        }
    }

    #[test]
    fn service_error_is_detected() {
        let failed = ResponseEnvelope::from_value(json!({"meta": {"status": 500}})).unwrap();
        let ok = ResponseEnvelope::from_value(json!({"meta": {"status": 200}})).unwrap();
        assert!(failed.is_service_error());
        assert!(!ok.is_service_error());
        assert!(!ResponseEnvelope::Raw(json!({})).is_service_error());
    }

    #[test]
    fn legacy_data_inside_meta_is_accepted() {
        let payload = payload_of(json!({"meta": {"status": 200, "data": {"x": "y"}}})).unwrap();
        assert_eq!(payload, json!({"x": "y"}));
    }

    #[test]
    fn ok_envelope_without_data_is_null() {
        assert_eq!(payload_of(json!({"meta": {"status": 200}})).unwrap(), Value::Null);
    }

    #[test]
    fn undecodable_body_is_remote_error() {
        let err = ResponseEnvelope::from_bytes(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, AppError::RemoteService(_)));
    }

    #[test]
    fn malformed_meta_is_remote_error() {
        let err = ResponseEnvelope::from_value(json!({"meta": "oops"})).unwrap_err();
        assert!(matches!(err, AppError::RemoteService(_)));
    }
}
