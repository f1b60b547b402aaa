use serde::{Deserialize, Serialize};

/// 資料檔格式，由副檔名決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Case-insensitive suffix match on `.csv` / `.json`, so `dir/.csv` counts too.
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else if lower.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceType {
    /// Data embedded in the request body.
    Internal,
    /// Only the path is sent; the server reads the file itself.
    File,
}

impl DataSourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::File => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileSpec {
    pub path: String,
    pub send_inline: bool,
    pub field_separator: Option<String>,
}

impl DataFileSpec {
    pub fn new(path: impl Into<String>, send_inline: bool) -> Self {
        Self {
            path: path.into(),
            send_inline,
            field_separator: None,
        }
    }

    pub fn with_field_separator(mut self, separator: impl Into<String>) -> Self {
        self.field_separator = Some(separator.into());
        self
    }

    pub fn source_type(&self) -> DataSourceType {
        if self.send_inline {
            DataSourceType::Internal
        } else {
            DataSourceType::File
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The `status` / `errors` envelope the modelling server adds to its replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResponseSummary {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ResponseSummary {
    /// Never fails: replies that do not follow the envelope give an empty summary.
    pub fn from_reply(reply: &serde_json::Value) -> Self {
        serde_json::from_value(reply.clone()).unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub output_path: String,
    pub request_bytes: usize,
    pub http_status: u16,
    pub response_bytes: usize,
    pub summary: ResponseSummary,
}
