//! Generation Adapter: turns a free-text prompt into a task list through
//! a hosted language model.
//!
//! The adapter is the only suspending operation in the app. It runs on a
//! spawned worker thread and reports back over a channel polled from the
//! update loop, so the UI thread never blocks.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::model::Task;

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Failures of a generation request. Surfaced as a status message; no
/// partial task replacement ever happens.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Describe your project first — the prompt is empty")]
    EmptyPrompt,
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected reply from the model: {0}")]
    Malformed(String),
    #[error("generation worker exited unexpectedly")]
    WorkerGone,
}

/// Prompt in, task list out.
pub trait TaskGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<Vec<Task>, AdapterError>;
}

/// Production adapter: OpenAI chat completions, JSON-object response mode.
pub struct OpenAiGenerator {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: OPENAI_MODEL.to_string(),
        }
    }

    /// Build from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, AdapterError> {
        let key = std::env::var("OPENAI_API_KEY").map_err(|_| AdapterError::MissingApiKey)?;
        if key.trim().is_empty() {
            return Err(AdapterError::MissingApiKey);
        }
        Ok(Self::new(key))
    }

    fn system_prompt() -> String {
        let today = chrono::Local::now().date_naive().format("%Y-%m-%d");
        format!(
            "You are a project management assistant. Based on the user's input, \
             generate a list of tasks for a project plan. Respond ONLY with a valid \
             JSON object containing a single key \"tasks\" holding an array of task \
             objects. Do not add any other text, markdown or explanations. Each task \
             object must have this structure: {{ \"id\": number, \"name\": string, \
             \"start\": string (YYYY-MM-DD), \"end\": string (YYYY-MM-DD), \
             \"color\": string (blue, green, yellow or red), \"dependencies\": \
             number[] (ids of tasks it depends on), \"completed\": boolean }}. \
             The first task must have id 1. If no time frame is given, schedule \
             relative to today ({today}); the project starts today."
        )
    }
}

impl TaskGenerator for OpenAiGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<Task>, AdapterError> {
        if prompt.trim().is_empty() {
            return Err(AdapterError::EmptyPrompt);
        }

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": Self::system_prompt() },
                { "role": "user", "content": prompt },
            ],
            "response_format": { "type": "json_object" },
        });

        let response: ChatResponse = self
            .client
            .post(OPENAI_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AdapterError::Malformed("reply carried no choices".to_string()))?;

        let tasks = parse_plan(content)?;
        info!(count = tasks.len(), "generated task plan");
        Ok(tasks)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedPlan {
    tasks: Vec<Task>,
}

/// Parse the model's JSON-object reply (`{"tasks": [...]}`). Per-record
/// validation happens later in `TaskStore::replace_all`.
fn parse_plan(content: &str) -> Result<Vec<Task>, AdapterError> {
    let plan: GeneratedPlan = serde_json::from_str(content)
        .map_err(|e| AdapterError::Malformed(e.to_string()))?;
    Ok(plan.tasks)
}

/// A single in-flight generation request.
///
/// The id is a monotonic ticket handed out by the app; a response whose
/// job id no longer matches the latest ticket is stale and must be
/// discarded instead of overwriting newer state.
pub struct GenerationJob {
    request_id: u64,
    rx: Receiver<Result<Vec<Task>, AdapterError>>,
}

impl GenerationJob {
    pub fn spawn(generator: Arc<dyn TaskGenerator>, prompt: String, request_id: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The app may have dropped the job; a dead receiver is fine.
            let _ = tx.send(generator.generate(&prompt));
        });
        Self { request_id, rx }
    }

    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Non-blocking poll for the worker's result.
    pub fn try_result(&self) -> Option<Result<Vec<Task>, AdapterError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(AdapterError::WorkerGone)),
        }
    }
}
