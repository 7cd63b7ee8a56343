use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::{ChatClient, ChatRequest, LlmError};

/// Replies from a script, in order, and records every request it receives.
/// An exhausted script answers with `EmptyResponse`.
pub(crate) struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedChat {
    pub(crate) fn replying(replies: Vec<&str>) -> Self {
        Self::scripted(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn failing(error: LlmError) -> Self {
        Self::scripted(VecDeque::from([Err(error)]))
    }

    pub(crate) fn scripted(replies: VecDeque<Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatClient for ScriptedChat {
    async fn complete(&self, request: &ChatRequest, _timeout: Duration) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}
