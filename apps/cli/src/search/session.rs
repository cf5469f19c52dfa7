//! Search session — the workflow controller owning everything the search
//! screen displays: the fetched jobs, the current page, panel visibility,
//! the active notice, per-card apply buttons, and the result cache.
//!
//! One session drives one user's flow. All state lives here; the render
//! layer reads it and never mutates it.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::match_client::JobBoard;
use crate::models::Job;
use crate::resume;
use crate::search::cache::ResultCache;
use crate::search::pager::{load_more_visible, page_window, rendered_count};
use crate::view::{ApplyButton, Modal, Panels};

/// Where the resume reference in the request body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeRef {
    /// Text extracted from an uploaded document.
    Text(String),
    /// Short identifier for a resume the backend already knows.
    Id(String),
}

impl ResumeRef {
    /// The value placed in the request's `resume_id` field.
    pub fn as_wire_value(&self) -> &str {
        match self {
            ResumeRef::Text(text) => text,
            ResumeRef::Id(id) => id,
        }
    }
}

pub struct SearchSession {
    board: Arc<dyn JobBoard>,
    github_username: String,
    resume: Option<ResumeRef>,
    jobs: Vec<Job>,
    current_page: usize,
    buttons: HashMap<String, ApplyButton>,
    cache: ResultCache,
    pub panels: Panels,
    pub modal: Modal,
}

impl SearchSession {
    pub fn new(board: Arc<dyn JobBoard>, github_username: impl Into<String>) -> Self {
        Self {
            board,
            github_username: github_username.into(),
            resume: None,
            jobs: Vec::new(),
            current_page: 1,
            buttons: HashMap::new(),
            cache: ResultCache::new(),
            panels: Panels::default(),
            modal: Modal::Hidden,
        }
    }

    pub fn set_resume_id(&mut self, id: impl Into<String>) {
        self.resume = Some(ResumeRef::Id(id.into()));
    }

    pub fn resume_ref(&self) -> Option<&ResumeRef> {
        self.resume.as_ref()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Cards currently on screen: every window revealed so far.
    pub fn visible_jobs(&self) -> &[Job] {
        &self.jobs[..rendered_count(self.jobs.len(), self.current_page)]
    }

    pub fn button(&self, job_id: &str) -> ApplyButton {
        self.buttons.get(job_id).cloned().unwrap_or_default()
    }

    /// Ingests a resume document, replacing any previously held text.
    /// A failed extraction clears held text rather than leaving a stale
    /// value; an explicitly supplied identifier is kept.
    pub async fn ingest_resume(&mut self, path: &Path) -> Result<(), AppError> {
        match resume::ingest(path).await {
            Ok(text) => {
                self.resume = Some(ResumeRef::Text(text));
                Ok(())
            }
            Err(e) => {
                if matches!(self.resume, Some(ResumeRef::Text(_))) {
                    self.resume = None;
                }
                let err = AppError::from(e);
                self.modal = Modal::error(err.to_string(), err.tips());
                Err(err)
            }
        }
    }

    /// Runs one search attempt end to end: validate, consult the cache,
    /// dispatch, classify the outcome, and reveal the first page.
    pub async fn run_search(&mut self) -> Result<(), AppError> {
        self.modal = Modal::Hidden;

        // 1. Pre-flight validation; on failure nothing leaves the process.
        let github_username = self.github_username.trim().to_string();
        if github_username.is_empty() {
            return Err(self.fail_input("Please enter your GitHub username"));
        }
        let resume_ref = match &self.resume {
            Some(r) => r.as_wire_value().to_string(),
            None => return Err(self.fail_input("Please upload a resume file")),
        };

        let search_id = Uuid::new_v4();
        info!("Search {search_id}: user '{github_username}'");

        // 2. Fresh window: clear rendered cards, reset to the first page.
        self.jobs.clear();
        self.buttons.clear();
        self.current_page = 1;
        self.panels = Panels::default();

        // 3. Cache first: a hit skips the network and the loading indicator.
        if let Some(entry) = self.cache.get(&github_username, &resume_ref) {
            info!(
                "Search {search_id}: serving {} cached jobs (fetched {})",
                entry.jobs.len(),
                entry.fetched_at
            );
            let jobs = entry.jobs.clone();
            self.show_results(jobs);
            return Ok(());
        }

        // 4. Dispatch: single shot, no retry, no timeout override.
        self.panels.loading = true;
        let result = self.board.search(&github_username, &resume_ref).await;
        self.panels.loading = false;

        let jobs = match result {
            Ok(jobs) => jobs,
            Err(e) => {
                let err = AppError::from(e);
                warn!("Search {search_id} failed: {err}");
                self.modal = Modal::error(format!("Failed to fetch jobs: {err}"), err.tips());
                return Err(err);
            }
        };

        // 5. Remember the outcome so an identical repeat search stays local.
        self.cache.insert(&github_username, &resume_ref, jobs.clone());

        info!("Search {search_id}: {} jobs", jobs.len());
        self.show_results(jobs);
        Ok(())
    }

    /// Reveals the next page window. Returns the index range of the cards
    /// that just became visible (empty when nothing further to reveal).
    pub fn load_more(&mut self) -> Range<usize> {
        if !self.panels.load_more {
            return 0..0;
        }
        self.current_page += 1;
        let window = page_window(self.jobs.len(), self.current_page);
        self.panels.load_more = load_more_visible(self.jobs.len(), self.current_page);
        window
    }

    /// Submits an application for one job. While the call is outstanding
    /// that job's button is disabled and relabeled; it is restored when the
    /// attempt completes, on success and on every failure path alike.
    pub async fn apply(&mut self, job_id: &str) -> Result<(), AppError> {
        if !self.jobs.iter().any(|j| j.id == job_id) {
            let err = AppError::InvalidInput(format!("No job with id '{job_id}'"));
            self.modal = Modal::error(err.to_string(), err.tips());
            return Err(err);
        }

        if let Some(button) = self.buttons.get(job_id) {
            if !button.enabled {
                warn!("Apply for {job_id} ignored: an attempt is already outstanding");
                return Ok(());
            }
        }

        info!("Applying for job {job_id}");
        self.buttons.insert(job_id.to_string(), ApplyButton::pending());

        let result = self.board.apply(job_id).await;

        // Restore before inspecting the outcome; every exit below runs with
        // the button already back in its enabled state.
        self.buttons.insert(job_id.to_string(), ApplyButton::default());

        match result {
            Ok(()) => {
                info!("Application submitted for {job_id}");
                self.modal = Modal::Success;
                Ok(())
            }
            Err(e) => {
                let err = AppError::from(e);
                warn!("Application for {job_id} failed: {err}");
                self.modal = Modal::error(err.to_string(), err.tips());
                Err(err)
            }
        }
    }

    /// The "search again" affordance: purge the cached entry for the current
    /// intent and reset the window so the next run fetches fresh results.
    pub fn search_again(&mut self) {
        if let Some(resume) = &self.resume {
            let username = self.github_username.trim().to_string();
            self.cache.remove(&username, resume.as_wire_value());
        }
        self.jobs.clear();
        self.buttons.clear();
        self.current_page = 1;
        self.panels = Panels {
            results: true,
            ..Panels::default()
        };
        self.modal = Modal::Hidden;
    }

    /// Dismisses the active notice. Closing an error notice re-shows the
    /// results container so the card list stays reachable.
    pub fn close_modal(&mut self) {
        if self.modal.is_error() {
            self.panels.results = true;
        }
        self.modal = Modal::Hidden;
    }

    fn show_results(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
        self.buttons = self
            .jobs
            .iter()
            .map(|j| (j.id.clone(), ApplyButton::default()))
            .collect();

        if self.jobs.is_empty() {
            self.panels.results = false;
            self.panels.no_results = true;
            self.panels.load_more = false;
        } else {
            self.panels.results = true;
            self.panels.no_results = false;
            self.panels.load_more = load_more_visible(self.jobs.len(), self.current_page);
        }
    }

    fn fail_input(&mut self, message: &str) -> AppError {
        let err = AppError::InvalidInput(message.to_string());
        self.modal = Modal::error(message, err.tips());
        err
    }
}
