use crate::{
    connectors::{destination::Destination, source::Source},
    error::{SelectorError, StageError},
    mapper::DocumentMap,
    metrics::{StageMetrics, StageMetricsSnapshot},
    progress::ProgressReporter,
    projection::{GridKind, ProjectionBuilder},
    selector::IdentifierSelector,
    upsert::BulkUpsertExecutor,
};
use async_trait::async_trait;
use model::{documents::DocumentMapping, events::progress::ProgressLevel};
use std::fmt;
use tracing::{debug, info, warn};

/// One step of a larger migration, sequenced by an external orchestrator.
#[async_trait]
pub trait Stage: Send {
    /// Runs the stage to completion. Any adapter error is fatal and
    /// returned as is; there is no partial rollback.
    async fn perform(&mut self) -> Result<bool, StageError>;

    fn name(&self) -> &str;
}

/// Where a run currently is. Each document moves through `Selecting`,
/// `Projecting` and `Upserting` to `DocumentDone`; a document whose source is
/// missing goes from `Selecting` straight to `DocumentDone`. After a failed
/// run the phase names the step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    NotStarted,
    Selecting,
    Projecting,
    Upserting,
    DocumentDone,
    AllDone,
}

impl fmt::Display for StagePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StagePhase::NotStarted => "not_started",
            StagePhase::Selecting => "selecting",
            StagePhase::Projecting => "projecting",
            StagePhase::Upserting => "upserting",
            StagePhase::DocumentDone => "document_done",
            StagePhase::AllDone => "all_done",
        };
        f.write_str(s)
    }
}

/// Migrates every mapped grid document, one at a time in mapping order:
/// clear the destination, select pending ids, project, upsert.
pub struct MigrationStage {
    map: DocumentMap,
    source: Source,
    destination: Destination,
    progress: ProgressReporter,
    phase: StagePhase,
    metrics: StageMetrics,
}

impl MigrationStage {
    pub fn new(
        map: DocumentMap,
        source: Source,
        destination: Destination,
        progress: ProgressReporter,
    ) -> Self {
        MigrationStage {
            map,
            source,
            destination,
            progress,
            phase: StagePhase::NotStarted,
            metrics: StageMetrics::new(),
        }
    }

    pub fn phase(&self) -> StagePhase {
        self.phase
    }

    pub fn metrics(&self) -> StageMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Every document paired with its grid kind. Fails on the first unknown
    /// kind, before anything is touched.
    fn resolve_plan(&self) -> Result<Vec<(GridKind, DocumentMapping)>, StageError> {
        let mut plan = Vec::with_capacity(self.map.len());
        for doc in self.map.documents() {
            let kind = doc.kind.parse::<GridKind>()?;
            plan.push((kind, doc.clone()));
        }
        Ok(plan)
    }

    async fn migrate_document(&mut self, kind: GridKind, doc: &DocumentMapping) -> Result<(), StageError> {
        self.destination.clear_document(&doc.destination).await?;
        self.progress.start(1, ProgressLevel::Debug);

        let source_document = self.map.source_document(&doc.destination)?.clone();

        self.phase = StagePhase::Selecting;
        match IdentifierSelector::new(&self.source).pending_ids(&source_document).await {
            Ok(pending) => {
                self.phase = StagePhase::Projecting;
                let projection = ProjectionBuilder::new(&self.destination).project(
                    kind,
                    &doc.destination,
                    &doc.columns,
                    pending,
                );

                self.phase = StagePhase::Upserting;
                let rows = BulkUpsertExecutor::new(self.destination.adapter())
                    .upsert(projection, &doc.key)
                    .await?;
                self.metrics.increment_migrated(1);
                self.metrics.increment_rows(rows);
            }
            Err(SelectorError::DocumentNotFound(name)) => {
                warn!(source = %name, document = %doc.destination, "Source document missing, skipping");
                self.metrics.increment_skipped(1);
            }
            Err(err) => return Err(err.into()),
        }

        self.progress.advance(ProgressLevel::Debug)?;
        self.progress.finish(ProgressLevel::Debug)?;
        self.phase = StagePhase::DocumentDone;
        Ok(())
    }
}

#[async_trait]
impl Stage for MigrationStage {
    async fn perform(&mut self) -> Result<bool, StageError> {
        // A previous run may have aborted with spans still open.
        let abandoned = self.progress.reset();
        if abandoned > 0 {
            debug!(spans = abandoned, "Discarding progress of an aborted run");
        }
        self.metrics.reset();
        self.phase = StagePhase::NotStarted;

        let plan = self.resolve_plan()?;
        info!(documents = plan.len(), "Migrating order grids");

        self.progress.start(plan.len() as u64, ProgressLevel::Info);
        for (kind, doc) in &plan {
            info!(document = %doc.destination, kind = %kind, "Migrating document");
            self.migrate_document(*kind, doc).await?;
            self.progress.advance(ProgressLevel::Info)?;
        }
        self.progress.finish(ProgressLevel::Info)?;

        self.phase = StagePhase::AllDone;
        let metrics = self.metrics.snapshot();
        info!(
            migrated = metrics.documents_migrated,
            skipped = metrics.documents_skipped,
            rows = metrics.rows_affected,
            "Order grid migration finished"
        );
        Ok(true)
    }

    fn name(&self) -> &str {
        "order_grids"
    }
}
