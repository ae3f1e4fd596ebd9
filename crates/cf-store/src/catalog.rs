//! Case catalog loading and the two backward-compatible payload shapes

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use cf_core::{Case, CaseCatalog, CaseId};

use crate::error::{StoreError, StoreResult};
use crate::remote::RemoteStore;

const CASES_PATH: &str = "cases";

/// One entry of the ordered catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: CaseId,
    pub data: Case,
}

/// The two shapes a catalog document can take on the wire.
///
/// Resolved exactly once at load time; nothing downstream ever sees the
/// variant.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CatalogPayload {
    /// Preferred: an ordered array of `{id, data}` records. Preserves
    /// authoring order; duplicate ids keep only the first occurrence.
    Ordered(Vec<CaseRecord>),
    /// Legacy: an object keyed by id. Order falls back to key enumeration
    /// order — arbitrary for older data, but load-bearing, so it is kept
    /// deterministic here (sorted keys).
    Legacy(BTreeMap<CaseId, Case>),
}

impl CatalogPayload {
    /// Resolve into the canonical in-memory catalog.
    ///
    /// Cases that fail the selector's preconditions (empty pool or zero
    /// total weight) are skipped with a warning so every case that survives
    /// loading is openable.
    pub fn resolve(self) -> CaseCatalog {
        let mut cases: HashMap<CaseId, Case> = HashMap::new();
        let mut order: Vec<CaseId> = Vec::new();

        let records: Vec<CaseRecord> = match self {
            CatalogPayload::Ordered(records) => records,
            CatalogPayload::Legacy(map) => map
                .into_iter()
                .map(|(id, data)| CaseRecord { id, data })
                .collect(),
        };

        for record in records {
            if cases.contains_key(&record.id) {
                log::warn!("duplicate case id {:?}, keeping first occurrence", record.id);
                continue;
            }
            if !record.data.is_openable() {
                log::warn!(
                    "case {:?} has an empty or weightless pool, skipping",
                    record.id
                );
                continue;
            }
            order.push(record.id.clone());
            cases.insert(record.id, record.data);
        }

        CaseCatalog::from_parts(cases, order)
    }
}

/// Loads the case catalog from the `cases` document and writes it back in
/// the preferred ordered shape.
///
/// The reveal flow never mutates the catalog; `save` exists for the
/// external authoring collaborator, which uses the same store path.
pub struct CatalogStore {
    remote: Option<Arc<dyn RemoteStore>>,
}

impl CatalogStore {
    pub fn new(remote: Option<Arc<dyn RemoteStore>>) -> Self {
        Self { remote }
    }

    /// Read the catalog once, at startup. Absent or malformed documents
    /// yield an empty catalog — never fatal.
    pub async fn load(&self) -> CaseCatalog {
        let Some(remote) = self.remote.clone() else {
            log::debug!("no remote configured, catalog is empty");
            return CaseCatalog::default();
        };

        match remote.get(CASES_PATH).await {
            Ok(Some(value)) => match serde_json::from_value::<CatalogPayload>(value) {
                Ok(payload) => {
                    let catalog = payload.resolve();
                    log::info!("loaded {} cases", catalog.len());
                    catalog
                }
                Err(e) => {
                    log::warn!("cases document malformed, catalog is empty: {e}");
                    CaseCatalog::default()
                }
            },
            Ok(None) => {
                log::debug!("no cases document, catalog is empty");
                CaseCatalog::default()
            }
            Err(e) => {
                log::warn!("catalog load failed, catalog is empty: {e}");
                CaseCatalog::default()
            }
        }
    }

    /// Write the catalog back wholesale in the preferred ordered shape
    pub async fn save(&self, catalog: &CaseCatalog) -> StoreResult<()> {
        let Some(remote) = self.remote.clone() else {
            log::debug!("no remote configured, catalog save skipped");
            return Ok(());
        };

        let records: Vec<CaseRecord> = catalog
            .iter_ordered()
            .map(|(id, case)| CaseRecord {
                id: id.clone(),
                data: case.clone(),
            })
            .collect();
        let document = serde_json::to_value(records)
            .map_err(|e| StoreError::RemoteUnavailable(format!("encode cases: {e}")))?;
        remote.put(CASES_PATH, document).await
    }
}
