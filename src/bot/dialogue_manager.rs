//! Dialogue Manager module for handling dialogue state transitions
//!
//! [`DialogueController::handle_text`] is the whole state machine: it takes the current
//! session state and the incoming text, and returns the replies to send plus the next
//! state. It never talks to Telegram, so it can be driven directly from tests.

use tracing::{debug, info, warn};

use crate::dialogue::ScheduleDialogueState;
use crate::document_loader::DocumentLoader;
use crate::localization::LocalizationManager;
use crate::news_service::{format_search_result, NewsService};
use crate::schedule_catalog::{DocumentRef, ScheduleCatalog};

pub const START_COMMAND: &str = "/start";
pub const HELP_COMMAND: &str = "/help";
pub const SEARCH_COMMAND: &str = "/search";

/// Reply keyboard as rows of button labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<String>>,
}

impl Keyboard {
    /// One button per row
    pub fn single_column<I: IntoIterator<Item = String>>(labels: I) -> Self {
        Self {
            rows: labels.into_iter().map(|label| vec![label]).collect(),
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.rows.iter().flatten().any(|button| button == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().flatten().map(String::as_str).collect()
    }
}

/// Schedule file ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDocument {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub caption: String,
}

/// One outgoing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    /// `fallback` is sent instead if the transport rejects the document
    Document {
        document: ScheduleDocument,
        fallback: String,
    },
}

impl Reply {
    fn text(text: String) -> Self {
        Reply::Text {
            text,
            keyboard: None,
        }
    }

    fn with_keyboard(text: String, keyboard: Keyboard) -> Self {
        Reply::Text {
            text,
            keyboard: Some(keyboard),
        }
    }

    /// Reply to send instead when the transport rejects this one
    pub fn fallback(&self) -> Option<Reply> {
        match self {
            Reply::Text { .. } => None,
            Reply::Document { fallback, .. } => Some(Reply::text(fallback.clone())),
        }
    }
}

/// Result of handling one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub replies: Vec<Reply>,
    pub next: ScheduleDialogueState,
}

/// Menu button labels, taken from the localization bundle
#[derive(Debug, Clone)]
pub struct MenuLabels {
    pub news: String,
    pub schedule: String,
    pub back: String,
}

impl MenuLabels {
    pub fn from_localization(texts: &LocalizationManager) -> Self {
        Self {
            news: texts.get_message("menu-news"),
            schedule: texts.get_message("menu-schedule"),
            back: texts.get_message("menu-back"),
        }
    }
}

/// Drives the category → group → document flow
pub struct DialogueController {
    catalog: ScheduleCatalog,
    news: NewsService,
    loader: DocumentLoader,
    texts: LocalizationManager,
    labels: MenuLabels,
    news_limit: usize,
}

impl DialogueController {
    pub fn new(
        catalog: ScheduleCatalog,
        news: NewsService,
        loader: DocumentLoader,
        texts: LocalizationManager,
        news_limit: usize,
    ) -> Self {
        let labels = MenuLabels::from_localization(&texts);
        Self {
            catalog,
            news,
            loader,
            texts,
            labels,
            news_limit,
        }
    }

    pub fn main_menu(&self) -> Keyboard {
        Keyboard::single_column([self.labels.news.clone(), self.labels.schedule.clone()])
    }

    /// Reply for messages that carry no text
    pub fn use_menu(&self) -> Reply {
        Reply::with_keyboard(self.texts.get_message("use-menu"), self.main_menu())
    }

    /// Handle one text message for a session in `state`
    pub async fn handle_text(&self, state: &ScheduleDialogueState, text: &str) -> Step {
        if text == START_COMMAND {
            return self.start();
        }
        if text == HELP_COMMAND {
            return Step {
                replies: vec![Reply::with_keyboard(
                    self.texts.get_message("help-text"),
                    self.main_menu(),
                )],
                next: state.clone(),
            };
        }
        if let Some(query) = search_query(text) {
            return Step {
                replies: vec![self.search(query).await],
                next: state.clone(),
            };
        }
        if text == self.labels.schedule {
            return self.choose_category();
        }

        match state {
            ScheduleDialogueState::Idle => self.handle_idle(text).await,
            ScheduleDialogueState::ChoosingCategory => self.handle_category(text),
            ScheduleDialogueState::ChoosingGroup { category } => {
                if text == self.labels.back {
                    debug!(category = %category, "Back to category selection");
                    self.choose_category()
                } else {
                    self.handle_group(category, text).await
                }
            }
        }
    }

    fn start(&self) -> Step {
        Step {
            replies: vec![Reply::with_keyboard(
                self.texts.get_message("greeting"),
                self.main_menu(),
            )],
            next: ScheduleDialogueState::Idle,
        }
    }

    fn choose_category(&self) -> Step {
        Step {
            replies: vec![Reply::with_keyboard(
                self.texts.get_message("choose-category"),
                Keyboard::single_column(self.catalog.list_categories()),
            )],
            next: ScheduleDialogueState::ChoosingCategory,
        }
    }

    async fn handle_idle(&self, text: &str) -> Step {
        let reply = if text == self.labels.news {
            self.latest_news().await
        } else {
            self.use_menu()
        };

        Step {
            replies: vec![reply],
            next: ScheduleDialogueState::Idle,
        }
    }

    fn handle_category(&self, category: &str) -> Step {
        let groups = self.catalog.list_groups(category);
        if groups.is_empty() {
            debug!(category = %category, "Unknown schedule category");
            return Step {
                replies: vec![Reply::text(self.texts.get_message("invalid-category"))],
                next: ScheduleDialogueState::ChoosingCategory,
            };
        }

        let mut keyboard = Keyboard::single_column(groups);
        keyboard.rows.push(vec![self.labels.back.clone()]);

        Step {
            replies: vec![Reply::with_keyboard(
                self.texts
                    .get_message_with_args("choose-group", &[("category", category)]),
                keyboard,
            )],
            next: ScheduleDialogueState::ChoosingGroup {
                category: category.to_string(),
            },
        }
    }

    async fn handle_group(&self, category: &str, group: &str) -> Step {
        let mut replies = Vec::with_capacity(2);

        match self.catalog.resolve_document(category, group) {
            None => {
                debug!(category = %category, group = %group, "No schedule for group");
                replies.push(Reply::text(self.texts.get_message("schedule-not-found")));
            }
            Some(document_ref) => {
                let fallback = self.delivery_fallback(&document_ref);
                match self.loader.load(&document_ref).await {
                    Ok(bytes) => {
                        info!(category = %category, group = %group, "Sending schedule document");
                        replies.push(Reply::Document {
                            document: ScheduleDocument {
                                bytes,
                                file_name: document_ref.file_name(),
                                caption: self.texts.get_message_with_args(
                                    "schedule-caption",
                                    &[("category", category), ("group", group)],
                                ),
                            },
                            fallback,
                        });
                    }
                    Err(e) => {
                        warn!(
                            category = %category,
                            group = %group,
                            document = %document_ref,
                            error = %e,
                            "Schedule document could not be loaded"
                        );
                        replies.push(Reply::text(fallback));
                    }
                }
            }
        }

        replies.push(Reply::with_keyboard(
            self.texts.get_message("next-section"),
            self.main_menu(),
        ));

        Step {
            replies,
            next: ScheduleDialogueState::Idle,
        }
    }

    fn delivery_fallback(&self, document_ref: &DocumentRef) -> String {
        match document_ref {
            DocumentRef::Remote(url) => self
                .texts
                .get_message_with_args("schedule-remote-fallback", &[("url", url.as_str())]),
            DocumentRef::Local(_) => self.texts.get_message("schedule-local-fallback"),
        }
    }

    async fn latest_news(&self) -> Reply {
        let news = self.news.get_latest_news(self.news_limit).await;
        let text = if news.is_empty() {
            self.texts.get_message("news-empty")
        } else {
            format!(
                "{}\n\n{}",
                self.texts.get_message("news-title"),
                news.join("\n\n")
            )
        };
        Reply::with_keyboard(text, self.main_menu())
    }

    async fn search(&self, query: &str) -> Reply {
        if query.is_empty() {
            return Reply::text(self.texts.get_message("search-usage"));
        }

        let results = self.news.search_news(query).await;
        if results.is_empty() {
            return Reply::text(self.texts.get_message("search-empty"));
        }

        let mut text = self.texts.get_message("search-title");
        for item in &results {
            text.push_str("\n\n• ");
            text.push_str(&format_search_result(item));
        }
        Reply::text(text)
    }
}

/// Query part of a `/search` command, `None` for any other text
fn search_query(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(SEARCH_COMMAND)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
