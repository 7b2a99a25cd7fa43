use serde::Serialize;

/// One captured webhook delivery, as returned by the single-item lookup.
///
/// `headers_json` is serialized even when absent so the field key is always
/// present in the response.
#[derive(Debug, Clone, Serialize)]
pub struct Capture {
    pub id: i64,
    pub received_at: String,
    pub source_ip: Option<String>,
    pub headers_json: Option<String>,
    pub body_json: Option<String>,
    pub raw_body: String,
}

/// The listing view of a capture. Header data is only exposed through the
/// single-item lookup, so it is omitted here entirely.
#[derive(Debug, Clone, Serialize)]
pub struct CaptureSummary {
    pub id: i64,
    pub received_at: String,
    pub source_ip: Option<String>,
    pub body_json: Option<String>,
    pub raw_body: String,
}

/// A capture about to be stored; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewCapture {
    pub received_at: String,
    pub source_ip: Option<String>,
    pub headers_json: Option<String>,
    pub body_json: Option<String>,
    pub raw_body: String,
}
