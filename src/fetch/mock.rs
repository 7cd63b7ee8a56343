use std::sync::Mutex;

use super::{FetchError, PageText};

/// Serves one fixed page text (or a failure) for every URL and records requests.
pub(crate) struct FixedPage {
    text: Option<String>,
    requested: Mutex<Vec<String>>,
}

impl FixedPage {
    pub(crate) fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            text: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl PageText for FixedPage {
    async fn extract(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.text.clone().ok_or(FetchError::Status(503))
    }
}
