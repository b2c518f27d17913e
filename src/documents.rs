//! In-memory document registry with simulated uploads.
//!
//! Uploads never move bytes anywhere.  Accepting an upload starts two
//! independent timers: a progress ticker that counts from 0 past 100 in
//! fixed steps, and an arrival timer that appends one [`Document`] per file
//! after a fixed delay.  The two are deliberately uncoordinated, so the
//! documents usually show up while the progress bar is still moving.
//!
//! Timer tasks never touch registry state directly.  They send
//! [`RegistryEvent`]s into a channel owned by the registry, and the owner
//! applies them through [`DocumentRegistry::next_event`] or
//! [`DocumentRegistry::drain_events`].  Dropping the registry cancels every
//! outstanding timer.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::observability::{UPLOADS_CANCELLED, UPLOADS_REJECTED, UPLOADS_STARTED};
use crate::types::{Document, UploadFile, format_file_size};

/// The most documents the registry will hold, counting pending uploads.
pub const MAX_DOCUMENTS: usize = 5;

/// Notice shown when an upload would exceed [`MAX_DOCUMENTS`].
pub const DOCUMENT_CAP_NOTICE: &str = "You can upload a maximum of 5 documents";

/// File extensions the registry accepts, compared without regard to case.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "txt", "ppt", "pptx"];

/// Hint shown next to the document picker.
pub const SUPPORTED_FORMATS_HINT: &str =
    "Supported formats: PDF, DOC, DOCX, TXT, PPT, PPTX / Max 5 documents";

/// True when `name` ends in one of [`SUPPORTED_EXTENSIONS`].
pub fn is_supported_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Identifies one call to [`DocumentRegistry::upload`].
pub type UploadId = u64;

/// Pacing of the simulated upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTiming {
    /// Interval between progress ticks.
    pub tick: Duration,
    /// Percentage points added per tick.
    pub step: u32,
    /// Delay before the uploaded documents appear.
    pub arrival_delay: Duration,
}

impl Default for UploadTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(200),
            step: 10,
            arrival_delay: Duration::from_millis(1000),
        }
    }
}

/// A state change produced by an upload timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// The progress counter advanced.
    Progress {
        /// The upload this tick belongs to.
        upload: UploadId,
        /// The new percentage, which may overshoot 100 by less than one step.
        percent: u32,
    },
    /// The progress counter finished and was cleared.
    ProgressCleared {
        /// The upload whose counter finished.
        upload: UploadId,
    },
    /// The uploaded files were appended.
    Arrived {
        /// The upload the documents belong to.
        upload: UploadId,
        /// The records that were appended.
        documents: Vec<Document>,
    },
}

impl RegistryEvent {
    /// The upload this event belongs to.
    pub fn upload(&self) -> UploadId {
        match self {
            RegistryEvent::Progress { upload, .. }
            | RegistryEvent::ProgressCleared { upload }
            | RegistryEvent::Arrived { upload, .. } => *upload,
        }
    }
}

#[derive(Debug)]
struct PendingUpload {
    files: usize,
    progress_running: bool,
    arrival_pending: bool,
}

impl PendingUpload {
    fn is_settled(&self) -> bool {
        !self.progress_running && !self.arrival_pending
    }
}

/// The document list, the shared selection, and any uploads in flight.
#[derive(Debug)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
    selected: Option<String>,
    progress: Option<u32>,
    timing: UploadTiming,
    next_upload: UploadId,
    pending: BTreeMap<UploadId, PendingUpload>,
    events_tx: UnboundedSender<RegistryEvent>,
    events_rx: UnboundedReceiver<RegistryEvent>,
    cancel: CancellationToken,
}

impl DocumentRegistry {
    /// Creates an empty registry.
    pub fn new(timing: UploadTiming) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            documents: Vec::new(),
            selected: None,
            progress: None,
            timing,
            next_upload: 1,
            pending: BTreeMap::new(),
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Adds the three demo documents.
    pub fn with_seed_documents(mut self) -> Self {
        self.documents.extend([
            Document::new("1", "Annual Report 2023.pdf", "2.4 MB"),
            Document::new("2", "Project Proposal.docx", "1.1 MB"),
            Document::new("3", "Research Paper.pdf", "3.2 MB"),
        ]);
        self
    }

    /// All documents, in the order they were added.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Looks up a document by id.
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// The selected document, if any.
    pub fn selected(&self) -> Option<&Document> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// True if `id` is the selected document.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// The current upload progress percentage, if a counter is running.
    pub fn progress(&self) -> Option<u32> {
        self.progress
    }

    /// True while any upload still has a timer outstanding.
    pub fn is_uploading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Files accepted for upload that have not arrived yet.
    pub fn pending_files(&self) -> usize {
        self.pending
            .values()
            .filter(|upload| upload.arrival_pending)
            .map(|upload| upload.files)
            .sum()
    }

    /// Starts a simulated upload.
    ///
    /// Rejects the whole batch, leaving the registry untouched, when any
    /// file has an unsupported extension or when the batch would push the number of documents past [`MAX_DOCUMENTS`].
    /// Otherwise the progress counter is set to 0 before returning and
    /// the timers are spawned on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn upload(&mut self, files: Vec<UploadFile>) -> Result<UploadId> {
        if files.is_empty() {
            return Err(Error::validation(
                "no files selected",
                Some("files".to_string()),
            ));
        }
        if let Some(file) = files.iter().find(|file| !is_supported_file(&file.name)) {
            UPLOADS_REJECTED.click();
            return Err(Error::validation(
                format!("Unsupported file type: {}. {SUPPORTED_FORMATS_HINT}", file.name),
                Some("files".to_string()),
            ));
        }
        if self.documents.len() + self.pending_files() + files.len() > MAX_DOCUMENTS {
            UPLOADS_REJECTED.click();
            return Err(Error::validation(DOCUMENT_CAP_NOTICE, Some("files".to_string())));
        }
        UPLOADS_STARTED.click();

        let upload = self.next_upload;
        self.next_upload += 1;
        self.pending.insert(
            upload,
            PendingUpload {
                files: files.len(),
                progress_running: true,
                arrival_pending: true,
            },
        );
        self.progress = Some(0);
        tracing::debug!(upload, files = files.len(), "upload started");

        let documents = files
            .into_iter()
            .map(|file| Document {
                id: Uuid::now_v7().to_string(),
                name: file.name,
                size: format_file_size(file.size_bytes),
                source: file.source,
            })
            .collect();

        tokio::spawn(run_progress_ticker(
            upload,
            self.timing,
            self.events_tx.clone(),
            self.cancel.clone(),
        ));
        tokio::spawn(run_arrival(
            upload,
            self.timing.arrival_delay,
            documents,
            self.events_tx.clone(),
            self.cancel.clone(),
        ));
        Ok(upload)
    }

    /// Waits for the next upload event and applies it.
    ///
    /// Returns `None` immediately when no upload is in flight.
    pub async fn next_event(&mut self) -> Option<RegistryEvent> {
        while self.is_uploading() {
            let event = self.events_rx.recv().await?;
            if self.apply(&event) {
                return Some(event);
            }
        }
        None
    }

    /// Applies every event that is already queued, without waiting.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        let mut applied = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            if self.apply(&event) {
                applied.push(event);
            }
        }
        applied
    }

    /// Cancels every upload in flight.
    ///
    /// Documents that have not arrived yet are dropped and the progress
    /// counter is cleared.  The registry stays usable for new uploads.
    pub fn cancel_uploads(&mut self) {
        if !self.pending.is_empty() {
            UPLOADS_CANCELLED.click();
            tracing::debug!(uploads = self.pending.len(), "cancelling uploads");
        }
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.pending.clear();
        self.progress = None;
        while self.events_rx.try_recv().is_ok() {}
    }

    /// Selects a document.
    ///
    /// Leaves the selection unchanged and returns false if no document
    /// has this id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Removes a document, clearing the selection if it was selected.
    pub fn delete(&mut self, id: &str) -> Option<Document> {
        let index = self.documents.iter().position(|doc| doc.id == id)?;
        if self.is_selected(id) {
            self.selected = None;
        }
        Some(self.documents.remove(index))
    }

    // Returns false for events from cancelled uploads.
    fn apply(&mut self, event: &RegistryEvent) -> bool {
        let upload = event.upload();
        let Some(pending) = self.pending.get_mut(&upload) else {
            return false;
        };
        match event {
            RegistryEvent::Progress { percent, .. } => {
                self.progress = Some(*percent);
            }
            RegistryEvent::ProgressCleared { .. } => {
                pending.progress_running = false;
            }
            RegistryEvent::Arrived { documents, .. } => {
                pending.arrival_pending = false;
                self.documents.extend(documents.iter().cloned());
            }
        }
        if pending.is_settled() {
            self.pending.remove(&upload);
        }
        if matches!(event, RegistryEvent::ProgressCleared { .. })
            && !self.pending.values().any(|p| p.progress_running)
        {
            self.progress = None;
        }
        true
    }
}

impl Drop for DocumentRegistry {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_progress_ticker(
    upload: UploadId,
    timing: UploadTiming,
    events: UnboundedSender<RegistryEvent>,
    cancel: CancellationToken,
) {
    let mut percent = 0;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(timing.tick) => {}
        }
        if percent >= 100 {
            let _ = events.send(RegistryEvent::ProgressCleared { upload });
            return;
        }
        percent += timing.step;
        if events
            .send(RegistryEvent::Progress { upload, percent })
            .is_err()
        {
            return;
        }
    }
}

async fn run_arrival(
    upload: UploadId,
    delay: Duration,
    documents: Vec<Document>,
    events: UnboundedSender<RegistryEvent>,
    cancel: CancellationToken,
) {
    tokio::select! {
        _ = cancel.cancelled() => {}
        _ = tokio::time::sleep(delay) => {
            let _ = events.send(RegistryEvent::Arrived { upload, documents });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    fn seeded() -> DocumentRegistry {
        DocumentRegistry::new(UploadTiming::default()).with_seed_documents()
    }

    fn files(n: usize) -> Vec<UploadFile> {
        (0..n)
            .map(|i| UploadFile::new(format!("notes-{i}.txt"), 1536))
            .collect()
    }

    async fn run_to_completion(registry: &mut DocumentRegistry) -> Vec<RegistryEvent> {
        let mut events = Vec::new();
        while let Some(event) = registry.next_event().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn seed_documents() {
        let registry = seeded();
        let names: Vec<_> = registry.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Annual Report 2023.pdf",
                "Project Proposal.docx",
                "Research Paper.pdf"
            ]
        );
        assert!(registry.selected().is_none());
        assert!(registry.progress().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn upload_over_cap_is_rejected() {
        let mut registry = seeded();
        let err = registry.upload(files(3)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.message(), DOCUMENT_CAP_NOTICE);
        assert_eq!(registry.documents().len(), 3);
        assert!(registry.progress().is_none());
        assert!(!registry.is_uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_file_type_is_rejected() {
        let mut registry = seeded();
        let batch = vec![
            UploadFile::new("slides.PPTX", 4096),
            UploadFile::new("notes.exe", 1024),
        ];
        let err = registry.upload(batch).unwrap_err();
        assert!(err.is_validation());
        assert!(err.message().contains("notes.exe"));
        assert!(err.message().contains(SUPPORTED_FORMATS_HINT));
        assert_eq!(registry.documents().len(), 3);
        assert!(registry.progress().is_none());
        assert!(!registry.is_uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn type_check_runs_before_cap() {
        let mut registry = seeded();
        let batch = (0..3).map(|i| UploadFile::new(format!("tool-{i}.exe"), 10)).collect();
        let err = registry.upload(batch).unwrap_err();
        assert_ne!(err.message(), DOCUMENT_CAP_NOTICE);
    }

    #[test]
    fn supported_extensions_ignore_case() {
        assert!(is_supported_file("Report.PDF"));
        assert!(is_supported_file("draft.Docx"));
        assert!(is_supported_file("notes.txt"));
        assert!(!is_supported_file("notes.exe"));
        assert!(!is_supported_file("README"));
        assert!(!is_supported_file("archive.pdf.zip"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_upload_is_rejected() {
        let mut registry = seeded();
        assert!(registry.upload(Vec::new()).unwrap_err().is_validation());
        assert!(!registry.is_uploading());
    }

    #[tokio::test(start_paused = true)]
    async fn upload_within_cap_appends_after_delay() {
        let mut registry = seeded();
        assert_ok!(registry.upload(files(2)));
        assert_eq!(registry.progress(), Some(0));
        assert_eq!(registry.documents().len(), 3);
        assert_eq!(registry.pending_files(), 2);

        let events = run_to_completion(&mut registry).await;
        assert_eq!(registry.documents().len(), 5);
        assert_eq!(registry.documents()[3].name, "notes-0.txt");
        assert_eq!(registry.documents()[3].size, "1.5 KB");
        assert_eq!(registry.documents()[4].name, "notes-1.txt");
        assert!(registry.progress().is_none());
        assert!(!registry.is_uploading());

        let percents: Vec<u32> = events
            .iter()
            .filter_map(|event| match event {
                RegistryEvent::Progress { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, (1..=10).map(|i| i * 10).collect::<Vec<_>>());
        assert!(matches!(
            events.last(),
            Some(RegistryEvent::ProgressCleared { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn documents_arrive_before_progress_finishes() {
        let mut registry = seeded();
        assert_ok!(registry.upload(files(1)));
        let events = run_to_completion(&mut registry).await;
        let arrived_at = events
            .iter()
            .position(|e| matches!(e, RegistryEvent::Arrived { .. }))
            .unwrap();
        let cleared_at = events
            .iter()
            .position(|e| matches!(e, RegistryEvent::ProgressCleared { .. }))
            .unwrap();
        assert!(arrived_at < cleared_at);
    }

    #[tokio::test(start_paused = true)]
    async fn pending_files_count_toward_cap() {
        let mut registry = seeded();
        assert_ok!(registry.upload(files(2)));
        let err = registry.upload(files(1)).unwrap_err();
        assert_eq!(err.message(), DOCUMENT_CAP_NOTICE);
        run_to_completion(&mut registry).await;
        assert_eq!(registry.documents().len(), MAX_DOCUMENTS);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_uploads_never_arrive() {
        let mut registry = seeded();
        assert_ok!(registry.upload(files(2)));
        registry.cancel_uploads();
        assert!(!registry.is_uploading());
        assert!(registry.progress().is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(registry.drain_events().is_empty());
        assert_eq!(registry.documents().len(), 3);

        assert_ok!(registry.upload(files(1)));
        run_to_completion(&mut registry).await;
        assert_eq!(registry.documents().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_registry_stops_timers() {
        let mut registry = seeded();
        assert_ok!(registry.upload(files(2)));
        drop(registry);
        // The timers must wind down quietly once their receiver is gone.
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    #[test]
    fn select_unknown_leaves_selection() {
        let mut registry = seeded();
        assert!(registry.select("2"));
        assert!(!registry.select("missing"));
        assert_eq!(registry.selected().map(|d| d.id.as_str()), Some("2"));
    }

    #[test]
    fn deleting_selected_clears_selection() {
        let mut registry = seeded();
        registry.select("1");
        let removed = registry.delete("1").unwrap();
        assert_eq!(removed.name, "Annual Report 2023.pdf");
        assert!(registry.selected().is_none());
        assert_eq!(registry.documents().len(), 2);
    }

    #[test]
    fn deleting_other_keeps_selection() {
        let mut registry = seeded();
        registry.select("1");
        assert!(registry.delete("3").is_some());
        assert!(registry.is_selected("1"));
        assert!(registry.delete("3").is_none());
        assert!(registry.is_selected("1"));
    }
}
