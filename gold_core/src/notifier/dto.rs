use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct PushRequest<'a> {
    pub token: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub template: &'a str,
}

/// Envelope the push service wraps every reply in.
#[derive(Debug, Deserialize)]
pub struct PushResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

impl PushResponse {
    pub fn is_accepted(&self) -> bool {
        self.code == 200
    }
}
