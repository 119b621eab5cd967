use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::domain::{SendSms, SentSms};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected value for {field}: {token}")]
    UnexpectedValue { field: &'static str, token: String },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonRequest<'a> {
    sender: &'a str,
    recipient: &'a str,
    content: &'a str,
    #[serde(rename = "type")]
    sms_type: &'static str,
    unicode_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsJsonResponse {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    message_id: Option<Box<RawValue>>,
    #[serde(default)]
    sms_count: Option<u32>,
    #[serde(default)]
    used_credits: Option<Box<RawValue>>,
    #[serde(default)]
    remaining_credits: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonResponse {
    #[serde(default)]
    message: Option<String>,
}

pub fn encode_send_sms_body(request: &SendSms) -> Result<String, TransportError> {
    let options = request.options();
    let body = SendSmsJsonRequest {
        sender: request.sender().as_str(),
        recipient: request.recipient(),
        content: request.content().as_str(),
        sms_type: options.sms_type.as_str(),
        unicode_enabled: options.unicode_enabled,
        tag: options.tag.as_ref().map(|tag| tag.as_str()),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn decode_send_sms_response(json: &str) -> Result<SentSms, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;
    Ok(SentSms {
        message_id: scalar_text("messageId", parsed.message_id.as_deref())?,
        reference: parsed.reference,
        sms_count: parsed.sms_count,
        used_credits: scalar_text("usedCredits", parsed.used_credits.as_deref())?,
        remaining_credits: scalar_text("remainingCredits", parsed.remaining_credits.as_deref())?,
    })
}

/// Text of a field Brevo sends as either a JSON string or a JSON number.
///
/// Numbers keep their raw token, so `1511882900176220` never goes through `f64`.
fn scalar_text(
    field: &'static str,
    raw: Option<&RawValue>,
) -> Result<Option<String>, TransportError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let token = raw.get();
    if token.starts_with('"') {
        return Ok(Some(serde_json::from_str(token)?));
    }
    if token.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(Some(token.to_owned()));
    }
    Err(TransportError::UnexpectedValue {
        field,
        token: token.to_owned(),
    })
}

/// The `message` field of an error body, if the body is JSON and carries one.
pub fn decode_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorJsonResponse>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use crate::domain::{Country, MessageText, SendOptions, SenderName, SmsType, Tag};

    use super::*;

    fn request(options: SendOptions) -> SendSms {
        let recipient = Country::UsCa.profile().normalize("5551234567").unwrap();
        SendSms::new(
            SenderName::new("MyShop").unwrap(),
            &recipient,
            MessageText::new("Hi Sam").unwrap(),
            options,
        )
    }

    #[test]
    fn encode_body_without_tag() {
        let body = encode_send_sms_body(&request(SendOptions::default())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "sender": "MyShop",
                "recipient": "15551234567",
                "content": "Hi Sam",
                "type": "marketing",
                "unicodeEnabled": true
            })
        );
    }

    #[test]
    fn encode_body_with_tag_and_options() {
        let options = SendOptions {
            sms_type: SmsType::Transactional,
            unicode_enabled: false,
            tag: Some(Tag::new("spring").unwrap()),
        };
        let body = encode_send_sms_body(&request(options)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["type"], "transactional");
        assert_eq!(value["unicodeEnabled"], false);
        assert_eq!(value["tag"], "spring");
    }

    #[test]
    fn decode_success_response() {
        let json = r#"
        {
          "reference": "ab1cde2fgh3i4jklmno",
          "messageId": 1511882900176220,
          "smsCount": 2,
          "usedCredits": 0.7,
          "remainingCredits": "82.85"
        }
        "#;

        let sent = decode_send_sms_response(json).unwrap();
        assert_eq!(sent.message_id.as_deref(), Some("1511882900176220"));
        assert_eq!(sent.reference.as_deref(), Some("ab1cde2fgh3i4jklmno"));
        assert_eq!(sent.sms_count, Some(2));
        assert_eq!(sent.used_credits.as_deref(), Some("0.7"));
        assert_eq!(sent.remaining_credits.as_deref(), Some("82.85"));
    }

    #[test]
    fn decode_success_response_tolerates_missing_fields() {
        let sent = decode_send_sms_response("{}").unwrap();
        assert_eq!(sent.message_id, None);
        assert_eq!(sent.sms_count, None);
    }

    #[test]
    fn decode_keeps_string_message_id_and_rejects_other_shapes() {
        let sent = decode_send_sms_response(r#"{"messageId":"ab-12","usedCredits":"0.70"}"#)
            .unwrap();
        assert_eq!(sent.message_id.as_deref(), Some("ab-12"));
        assert_eq!(sent.used_credits.as_deref(), Some("0.70"));

        let sent = decode_send_sms_response(r#"{"messageId":null}"#).unwrap();
        assert_eq!(sent.message_id, None);

        assert!(matches!(
            decode_send_sms_response(r#"{"messageId":true}"#),
            Err(TransportError::UnexpectedValue { field: "messageId", .. })
        ));
        assert!(matches!(
            decode_send_sms_response(r#"{"usedCredits":{"amount":1}}"#),
            Err(TransportError::UnexpectedValue { field: "usedCredits", .. })
        ));
    }

    #[test]
    fn decode_rejects_non_json() {
        assert!(matches!(
            decode_send_sms_response("created"),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn decode_error_message_reads_message_field() {
        let body = r#"{"code":"invalid_parameter","message":"Invalid phone number"}"#;
        assert_eq!(
            decode_error_message(body).as_deref(),
            Some("Invalid phone number")
        );
        assert_eq!(decode_error_message(r#"{"code":"x"}"#), None);
        assert_eq!(decode_error_message(r#"{"message":"  "}"#), None);
        assert_eq!(decode_error_message("Bad Gateway"), None);
    }
}
