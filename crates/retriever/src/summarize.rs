//! Summarization of retrieved abstracts through a language model.
//!
//! The model sits behind the [`LanguageModel`] trait: text in, text out.
//! [`summarize_papers`] builds one prompt per paper from its title and
//! abstract and collects the completions; a failed completion is recorded
//! against that paper and reported, never aborting the batch or invalidating
//! the retrieved paper list.
//!
//! The production implementation is [`AnthropicClient`], which calls the
//! Anthropic Messages API with the key from `ANTHROPIC_API_KEY`.

use super::*;

/// System prompt steering the model toward extraction rather than chat.
const SYSTEM_PROMPT: &str = "You are a helpful AI assistant specializing in summarizing \
                             scientific papers, extracting the most meaningful parts of the \
                             paper.";

/// Anthropic Messages API endpoint.
const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// An opaque completion backend: prompt in, text out.
#[allow(async_fn_in_trait)]
pub trait LanguageModel {
  /// Produces a completion for `prompt`.
  ///
  /// # Errors
  ///
  /// Returns [`RetrieverError::Summarizer`] on timeout, quota exhaustion, or
  /// a malformed backend response.
  async fn complete(&self, prompt: &str) -> Result<String, RetrieverError>;
}

/// The summarization result for one paper.
#[derive(Debug)]
pub struct PaperSummary {
  /// Title of the summarized paper.
  pub title:     String,
  /// The extracted essential information, or the per-paper failure.
  pub extracted: Result<String, RetrieverError>,
}

/// Summarizes each paper's abstract through `model`, in input order.
///
/// Infallible at the batch level: every paper yields a [`PaperSummary`], with
/// per-paper failures carried in [`PaperSummary::extracted`] and logged.
pub async fn summarize_papers<M: LanguageModel>(model: &M, papers: &[Paper]) -> Vec<PaperSummary> {
  let mut summaries = Vec::with_capacity(papers.len());
  for paper in papers {
    let extracted = model.complete(&build_prompt(paper)).await;
    if let Err(e) = &extracted {
      warn!("summarization failed for {:?}: {e}", paper.title);
    }
    summaries.push(PaperSummary { title: paper.title.clone(), extracted });
  }
  summaries
}

/// Builds the extraction prompt for one paper.
fn build_prompt(paper: &Paper) -> String {
  format!(
    "Extract the essential information from the following paper abstract: the problem \
     addressed, the approach, and the key findings.\n\nTitle: {}\n\nAbstract: {}",
    paper.title, paper.summary
  )
}

/// Language model backend using the Anthropic Messages API.
pub struct AnthropicClient {
  /// Internal web client used to reach the API.
  client:  reqwest::Client,
  /// API key sent in the `x-api-key` header.
  api_key: String,
  /// Model identifier to request.
  model:   String,
}

/// Request payload for the Messages API.
#[derive(Debug, Serialize)]
struct MessagesRequest {
  /// Model identifier.
  model:       String,
  /// Completion length cap.
  max_tokens:  u32,
  /// Sampling temperature; zero for reproducible extraction.
  temperature: f32,
  /// System prompt.
  system:      String,
  /// The conversation, a single user turn here.
  messages:    Vec<Message>,
}

/// One conversation turn.
#[derive(Debug, Serialize)]
struct Message {
  /// Turn role, always `user` here.
  role:    String,
  /// Turn text.
  content: String,
}

/// Response payload of the Messages API, reduced to what we read.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
  /// Content blocks of the completion.
  content: Vec<ContentBlock>,
}

/// One content block of a completion.
#[derive(Debug, Deserialize)]
struct ContentBlock {
  /// Text of the block.
  text: String,
}

impl AnthropicClient {
  /// Creates a client for the given API key, using the default model.
  pub fn new(api_key: String) -> Self {
    Self {
      client: reqwest::Client::new(),
      api_key,
      model: "claude-3-5-sonnet-20240620".to_string(),
    }
  }

  /// Creates a client from the `ANTHROPIC_API_KEY` environment variable.
  ///
  /// # Errors
  ///
  /// Returns [`RetrieverError::Summarizer`] when the variable is unset.
  pub fn from_env() -> Result<Self, RetrieverError> {
    let api_key = std::env::var("ANTHROPIC_API_KEY")
      .map_err(|_| RetrieverError::Summarizer("ANTHROPIC_API_KEY is not set".into()))?;
    Ok(Self::new(api_key))
  }
}

impl LanguageModel for AnthropicClient {
  async fn complete(&self, prompt: &str) -> Result<String, RetrieverError> {
    let request = MessagesRequest {
      model:       self.model.clone(),
      max_tokens:  1024,
      temperature: 0.0,
      system:      SYSTEM_PROMPT.to_string(),
      messages:    vec![Message { role: "user".to_string(), content: prompt.to_string() }],
    };

    let response = self
      .client
      .post(MESSAGES_URL)
      .header("x-api-key", &self.api_key)
      .header("anthropic-version", "2023-06-01")
      .json(&request)
      .send()
      .await
      .map_err(|e| RetrieverError::Summarizer(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(RetrieverError::Summarizer(format!("API returned HTTP {status}")));
    }

    let body: MessagesResponse = response
      .json()
      .await
      .map_err(|e| RetrieverError::Summarizer(format!("malformed API response: {e}")))?;

    body
      .content
      .first()
      .map(|block| block.text.clone())
      .ok_or_else(|| RetrieverError::Summarizer("API response had no content".into()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Canned backend echoing a fixed completion, or failing on demand.
  struct CannedModel {
    /// Completion to return, or `None` to fail every call.
    reply: Option<String>,
  }

  impl LanguageModel for CannedModel {
    async fn complete(&self, _prompt: &str) -> Result<String, RetrieverError> {
      match &self.reply {
        Some(reply) => Ok(reply.clone()),
        None => Err(RetrieverError::Summarizer("quota exceeded".into())),
      }
    }
  }

  fn paper(title: &str) -> Paper {
    Paper {
      title:         title.to_string(),
      authors:       vec!["John Doe".to_string()],
      summary:       "An abstract.".to_string(),
      published:     "2024-07-05T12:00:00Z".to_string(),
      abstract_link: "http://arxiv.org/abs/2407.00001".to_string(),
      pdf_link:      None,
    }
  }

  #[tokio::test]
  async fn test_summaries_keep_input_order() {
    let model = CannedModel { reply: Some("essential info".to_string()) };
    let papers = vec![paper("First"), paper("Second")];
    let summaries = summarize_papers(&model, &papers).await;
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "First");
    assert_eq!(summaries[1].title, "Second");
    assert_eq!(summaries[0].extracted.as_deref().unwrap(), "essential info");
  }

  #[tokio::test]
  async fn test_failures_are_per_paper() {
    let model = CannedModel { reply: None };
    let papers = vec![paper("Unlucky")];
    let summaries = summarize_papers(&model, &papers).await;
    assert_eq!(summaries.len(), 1);
    assert!(matches!(summaries[0].extracted, Err(RetrieverError::Summarizer(_))));
  }

  #[test]
  fn test_prompt_contains_title_and_abstract() {
    let prompt = build_prompt(&paper("Prompted"));
    assert!(prompt.contains("Prompted"));
    assert!(prompt.contains("An abstract."));
  }

  #[test]
  fn test_messages_request_shape() {
    let request = MessagesRequest {
      model:       "claude-3-5-sonnet-20240620".to_string(),
      max_tokens:  1024,
      temperature: 0.0,
      system:      SYSTEM_PROMPT.to_string(),
      messages:    vec![Message { role: "user".to_string(), content: "hi".to_string() }],
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "claude-3-5-sonnet-20240620");
    assert_eq!(value["max_tokens"], 1024);
    assert_eq!(value["messages"][0]["role"], "user");
  }
}
