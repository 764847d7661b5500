//! Application adapter: front-end events in, state transitions out.
//!
//! `App` owns one session: the builder, its configuration and the snapshot
//! store. A front end (the CLI here) turns user input into an [`Action`] and
//! calls [`App::handle`]; nothing else touches the build. Every failure is
//! reported as a [`Notice`] and leaves the build as it was.

mod state;

pub use state::{Action, Notice, NoticeLevel, Outcome};

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::ForgeConfig;
use crate::dispatch::{self, DispatchOutcome, DraftFile, MailClient, QuoteChannel};
use crate::export::{self, BuildDocument, DEFAULT_BUILD_NAME};
use crate::quote;
use crate::selection::{PcBuilder, SnapshotLoad};
use crate::storage::{SnapshotStore, StoredBuild};
use crate::types::Category;

/// Draft written when the mail client cannot be opened
const DRAFT_FILE_NAME: &str = "quote-request.txt";

/// One configurator session
#[derive(Debug)]
pub struct App {
    config: ForgeConfig,
    builder: PcBuilder,
    store: SnapshotStore,
}

impl App {
    /// Session with the store at the configured storage directory
    pub fn new(config: ForgeConfig, catalog: Arc<Catalog>) -> Self {
        let store = SnapshotStore::new(config.resolved_storage_dir());
        Self::with_store(config, catalog, store)
    }

    pub fn with_store(config: ForgeConfig, catalog: Arc<Catalog>, store: SnapshotStore) -> Self {
        let builder = PcBuilder::new(catalog).with_policy(config.unresolved_policy);
        Self {
            config,
            builder,
            store,
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn builder(&self) -> &PcBuilder {
        &self.builder
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Load the saved build, if any. A malformed blob is discarded with a notice.
    pub fn restore(&mut self) -> Vec<Notice> {
        match self.store.load() {
            StoredBuild::Missing => Vec::new(),
            StoredBuild::Discarded(reason) => {
                debug!("Saved build discarded: {}", reason);
                vec![Notice::warning(
                    "Saved build could not be read and was discarded. Starting with an empty build.",
                )]
            }
            StoredBuild::Found(saved) => match self.builder.load_snapshot(&saved.components) {
                Ok(report) => unresolved_notice(&report).into_iter().collect(),
                Err(e) => vec![Notice::warning(format!(
                    "Saved build was not restored: {}",
                    e
                ))],
            },
        }
    }

    /// Apply one action and recompute the summary
    pub fn handle(&mut self, action: Action) -> Outcome {
        debug!("Handling {:?}", action);
        let before = action.mutates().then(|| self.builder.build().clone());
        let mut output = None;

        let mut notices = match action {
            Action::Select { category, id } => self.select(category, &id),
            Action::Clear(category) => self.clear(category),
            Action::ClearAll => {
                self.builder.clear_all();
                vec![Notice::info("Build cleared successfully!")]
            }
            Action::LoadPreset(key) => self.load_preset(&key),
            Action::Import(path) => self.import(path),
            Action::OpenShare(token) => self.open_share(&token),
            Action::Export(path) => self.export(path),
            Action::Share => match export::share_url(&self.config.share_base_url, &self.builder.snapshot()) {
                Ok(url) => {
                    output = Some(url);
                    vec![Notice::success("Share link created.")]
                }
                Err(e) => vec![Notice::error(format!("Could not create share link: {}", e))],
            },
            Action::RequestQuote { send, draft } => {
                let (notices, text) = self.request_quote(send, draft);
                output = text;
                notices
            }
        };

        // Failed or no-op actions leave the saved build alone
        if before.is_some_and(|b| &b != self.builder.build()) {
            notices.extend(self.persist());
        }

        Outcome {
            notices,
            output,
            summary: self.builder.summary(),
        }
    }

    /// Write the build to the store; an emptied build removes the saved blob
    fn persist(&self) -> Option<Notice> {
        let build = self.builder.build();
        let result = if build.is_empty() {
            self.store.clear()
        } else {
            self.store.save(build).map(|_| ())
        };
        result.err().map(|e| {
            warn!("Could not save build: {}", e);
            Notice::warning(format!("Build could not be saved locally: {}", e))
        })
    }

    fn select(&mut self, category: Category, id: &str) -> Vec<Notice> {
        let component = match self.builder.select(category, id) {
            Ok(component) => component,
            Err(e) => return vec![Notice::error(e.to_string())],
        };

        let mut notices = vec![Notice::success(format!(
            "{} selected: {} ({})",
            category.display_name(),
            component.name,
            self.config.currency.format(u64::from(component.price))
        ))];
        if !component.availability.is_orderable() {
            notices.push(Notice::warning(format!(
                "{} is {}. Ask about alternatives in your quote request.",
                component.name, component.availability
            )));
        }
        notices
    }

    fn clear(&mut self, category: Category) -> Vec<Notice> {
        match self.builder.clear(category) {
            Some(component) => vec![Notice::info(format!(
                "{} cleared: {}",
                category.display_name(),
                component.name
            ))],
            None => vec![Notice::info(format!(
                "No {} was selected.",
                category.display_name()
            ))],
        }
    }

    fn load_preset(&mut self, key: &str) -> Vec<Notice> {
        match self.builder.load_preset(key) {
            Ok(report) => {
                let mut notices = vec![Notice::success(format!(
                    "Preset '{}' loaded with {} components.",
                    key, report.applied
                ))];
                notices.extend(unresolved_notice(&report));
                notices
            }
            Err(e) => vec![Notice::error(e.to_string())],
        }
    }

    fn import(&mut self, path: PathBuf) -> Vec<Notice> {
        let snapshot = match export::import_file(&path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Import of {:?} failed: {}", path, e);
                return vec![Notice::error(
                    "Error importing build file. Please check the file format.",
                )];
            }
        };

        match self.builder.load_snapshot(&snapshot) {
            Ok(report) => {
                info!("Imported {} components from {:?}", report.applied, path);
                let mut notices = vec![Notice::success(
                    "Build configuration imported successfully!",
                )];
                notices.extend(unresolved_notice(&report));
                notices
            }
            Err(e) => vec![Notice::error(format!("Build was not imported: {}", e))],
        }
    }

    fn open_share(&mut self, token: &str) -> Vec<Notice> {
        let snapshot = match export::decode_share_token(token) {
            Ok(snapshot) => snapshot,
            Err(e) => return vec![Notice::error(format!("Share link is not valid: {}", e))],
        };

        match self.builder.load_snapshot(&snapshot) {
            Ok(report) => {
                let mut notices = vec![Notice::success("Shared build loaded.")];
                notices.extend(unresolved_notice(&report));
                notices
            }
            Err(e) => vec![Notice::error(format!("Shared build was not loaded: {}", e))],
        }
    }

    fn export(&self, path: PathBuf) -> Vec<Notice> {
        let document = BuildDocument::from_build(self.builder.build(), DEFAULT_BUILD_NAME);
        match document.write_to_file(&path) {
            Ok(()) => vec![Notice::success(format!(
                "Build configuration exported to {}",
                path.display()
            ))],
            Err(e) => vec![Notice::error(format!("Export failed: {:#}", e))],
        }
    }

    fn request_quote(&self, send: bool, draft: Option<PathBuf>) -> (Vec<Notice>, Option<String>) {
        let build = self.builder.build();
        let mut notices = Vec::new();

        // Advisory only: the quote is prepared either way
        let missing = crate::aggregate::missing_essentials(build);
        if !build.is_empty() && !missing.is_empty() {
            let list: Vec<String> = missing.iter().map(|c| c.label()).collect();
            notices.push(Notice::warning(format!(
                "Missing essential components: {}. You can specify custom requirements in the email.",
                list.join(", ")
            )));
        }

        let message = quote::compose(build, &self.config.currency, &self.config.quote);

        if !send {
            return (notices, Some(message.draft_text()));
        }

        let mail = MailClient::new(self.config.opener.clone());
        let draft_path = draft.unwrap_or_else(|| self.store.dir().join(DRAFT_FILE_NAME));
        let draft_file = DraftFile::new(&draft_path);
        let channels: [&dyn QuoteChannel; 2] = [&mail, &draft_file];

        match dispatch::dispatch(&channels, &message) {
            DispatchOutcome::Delivered { channel } if channel == mail.name() => {
                notices.push(Notice::success(format!(
                    "Opening email client for {}...",
                    message.kind
                )));
                (notices, None)
            }
            DispatchOutcome::Delivered { .. } => {
                notices.push(Notice::info(format!(
                    "Email details saved to {}. Please paste them into your email client.",
                    draft_path.display()
                )));
                (notices, None)
            }
            DispatchOutcome::Advisory(text) => {
                notices.push(Notice::info(text));
                (notices, Some(message.draft_text()))
            }
        }
    }
}

fn unresolved_notice(report: &SnapshotLoad) -> Option<Notice> {
    if report.is_complete() {
        return None;
    }
    let entries: Vec<String> = report
        .unresolved
        .iter()
        .map(|(c, id)| format!("{} '{}'", c.display_name(), id))
        .collect();
    Some(Notice::warning(format!(
        "Some components are no longer available and were skipped: {}",
        entries.join(", ")
    )))
}
