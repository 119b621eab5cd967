#[derive(Debug, Clone, PartialEq)]
/// Accepted send as reported by Brevo.
pub struct SentSms {
    pub message_id: Option<String>,
    pub reference: Option<String>,
    pub sms_count: Option<u32>,
    pub used_credits: Option<String>,
    pub remaining_credits: Option<String>,
}
