//! # cf-session — Session orchestration for CaseForge
//!
//! Ties the layers together for one user session: loads the catalog and
//! collection at startup, tracks which case is selected, starts rolls, and
//! routes every reveal into the collection.
//!
//! The wiring enforces the system's degradation policy: store failures are
//! absorbed before they get here, so a session works identically with a
//! healthy remote, a failing one, or none at all — the only difference is
//! whether state survives a restart.

use std::sync::Arc;

use thiserror::Error;

use cf_core::{Case, CaseCatalog, CfError};
use cf_reveal::{ItemOdds, RevealEngine, Scheduler, StartRoll, pool_odds, unique_items};
use cf_store::{CatalogStore, CollectionStore, HttpRemoteStore, RemoteStore};

/// Session-level error type
#[derive(Error, Debug)]
pub enum SessionError {
    /// An operation needed a selected case and none is selected (the
    /// catalog was empty at startup)
    #[error("No case selected")]
    NoCaseSelected,

    /// The requested case id is not in the catalog
    #[error("Unknown case: {0}")]
    UnknownCase(String),

    /// The reveal engine rejected the roll
    #[error(transparent)]
    Reveal(#[from] CfError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// One user session: a loaded catalog, a selected case, the user's
/// collection, and the reveal engine that connects them.
///
/// Every reveal is pushed into the collection automatically; callers only
/// select cases and start rolls.
pub struct CaseSession {
    catalog: CaseCatalog,
    catalog_store: CatalogStore,
    collection: CollectionStore,
    engine: RevealEngine,
    current_case: Option<String>,
}

impl CaseSession {
    /// Build a session over an already-constructed remote (or none for a
    /// purely local session).
    pub fn new(remote: Option<Arc<dyn RemoteStore>>, scheduler: Arc<dyn Scheduler>) -> Self {
        let collection = CollectionStore::new(remote.clone());
        let engine = RevealEngine::new(scheduler);

        let sink = collection.clone();
        engine.set_on_reveal(move |item| sink.push(item.clone()));

        Self {
            catalog: CaseCatalog::default(),
            catalog_store: CatalogStore::new(remote),
            collection,
            engine,
            current_case: None,
        }
    }

    /// Build a session from a stored credential token.
    ///
    /// A malformed token is the same as not being logged in: the session
    /// comes up local-only with a warning, never an error.
    pub fn from_token(token: Option<&str>, scheduler: Arc<dyn Scheduler>) -> Self {
        let remote: Option<Arc<dyn RemoteStore>> = match token {
            Some(token) => match HttpRemoteStore::from_token(token) {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    log::warn!("credential rejected, session is local-only: {e}");
                    None
                }
            },
            None => {
                log::debug!("no credential, session is local-only");
                None
            }
        };
        Self::new(remote, scheduler)
    }

    /// Load catalog and collection from the remote and select the first
    /// case in display order. Infallible: anything missing or broken
    /// remotely leaves the corresponding piece empty.
    pub async fn init(&mut self) {
        self.catalog = self.catalog_store.load().await;
        self.collection.load().await;
        self.current_case = self.catalog.first_id().cloned();
        if let Some(id) = &self.current_case {
            log::info!("session ready, selected case {id:?}");
        } else {
            log::info!("session ready, catalog is empty");
        }
    }

    /// Switch the selected case.
    ///
    /// Ignored while a roll is in flight so the strip being animated cannot
    /// be swapped out from under the reveal.
    pub fn select_case(&mut self, id: &str) -> SessionResult<()> {
        if self.engine.is_rolling() {
            log::debug!("select_case({id:?}) ignored: roll in flight");
            return Ok(());
        }
        if !self.catalog.contains(id) {
            return Err(SessionError::UnknownCase(id.to_string()));
        }
        self.current_case = Some(id.to_string());
        Ok(())
    }

    /// Open the selected case: one roll over its pool
    pub fn open_case(&self, viewport_width_px: f64) -> SessionResult<StartRoll> {
        let case = self.current()?;
        Ok(self.engine.start_roll(&case.items, viewport_width_px)?)
    }

    /// Displayed odds for the selected case's pool
    pub fn current_odds(&self) -> SessionResult<Vec<ItemOdds>> {
        Ok(pool_odds(&self.current()?.items)?)
    }

    /// Distinct items of the selected case, rarest first
    pub fn current_unique_items(&self) -> SessionResult<Vec<cf_core::Item>> {
        Ok(unique_items(&self.current()?.items)
            .into_iter()
            .cloned()
            .collect())
    }

    fn current(&self) -> SessionResult<&Case> {
        let id = self.current_case.as_deref().ok_or(SessionError::NoCaseSelected)?;
        self.catalog
            .get(id)
            .ok_or_else(|| SessionError::UnknownCase(id.to_string()))
    }

    pub fn catalog(&self) -> &CaseCatalog {
        &self.catalog
    }

    pub fn collection(&self) -> &CollectionStore {
        &self.collection
    }

    pub fn engine(&self) -> &RevealEngine {
        &self.engine
    }

    pub fn current_case(&self) -> Option<&str> {
        self.current_case.as_deref()
    }
}
