//! The session editor: local form state, debounced auto-save and the manual
//! save/publish actions.
//!
//! Every upsert issued by one editor goes through a single-permit request
//! gate and reads the session id only after acquiring it, so a session
//! created by an auto-save is always targeted by the next save. Manual
//! actions cancel the pending debounce and bump an epoch; an auto-save that
//! fired earlier but has not been sent yet sees the stale epoch and is
//! dropped. Requests already sent always run to completion.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use wellness_core::session::{Session, SessionStatus};
use wellness_core::types::SessionId;

use crate::api::SessionApi;
use crate::autosave::{AutoSaveConfig, AutoSaveStatus, DebounceSlot, StatusIndicator};
use crate::error::ClientError;
use crate::form::SessionForm;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State shared between the editor and its in-flight auto-save tasks.
struct EditorInner {
    api: Arc<dyn SessionApi>,
    form: Mutex<SessionForm>,
    session_id: Mutex<Option<SessionId>>,
    gate: tokio::sync::Mutex<()>,
    epoch: AtomicU64,
    status: StatusIndicator,
}

impl EditorInner {
    fn adopt(&self, session: &Session) {
        let mut id = lock(&self.session_id);
        if id.is_none() {
            tracing::debug!(session_id = %session.id, "Adopted server-assigned session id");
        }
        *id = Some(session.id);
    }

    /// Auto-save body run once the debounce timer has elapsed.
    async fn auto_save(self: Arc<Self>, epoch: u64) {
        let _permit = self.gate.lock().await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Auto-save superseded by a manual action");
            return;
        }

        let form = lock(&self.form).clone();
        if !form.can_auto_save() {
            self.status.idle();
            return;
        }
        let input = form.to_input(*lock(&self.session_id));

        self.status.saving();
        match self.api.save_draft(&input).await {
            Ok(session) => {
                self.adopt(&session);
                self.status.saved();
                tracing::debug!(session_id = %session.id, "Auto-saved draft");
            }
            Err(e) => {
                self.status.idle();
                tracing::warn!(error = %e, "Auto-save failed");
            }
        }
    }
}

/// Editor for one session (new or existing).
///
/// Edits and timers require a Tokio runtime. Dropping the editor cancels a
/// pending auto-save timer and drops auto-saves that have not been sent.
pub struct SessionEditor {
    inner: Arc<EditorInner>,
    config: AutoSaveConfig,
    debounce: Mutex<DebounceSlot>,
}

impl SessionEditor {
    /// Editor for a brand-new session.
    pub fn new(api: Arc<dyn SessionApi>, config: AutoSaveConfig) -> Self {
        Self {
            inner: Arc::new(EditorInner {
                api,
                form: Mutex::new(SessionForm::default()),
                session_id: Mutex::new(None),
                gate: tokio::sync::Mutex::new(()),
                epoch: AtomicU64::new(0),
                status: StatusIndicator::new(config.saved_display),
            }),
            config,
            debounce: Mutex::new(DebounceSlot::new()),
        }
    }

    /// Editor for an existing session owned by the caller.
    pub async fn open(
        api: Arc<dyn SessionApi>,
        config: AutoSaveConfig,
        id: SessionId,
    ) -> Result<Self, ClientError> {
        let editor = Self::new(api, config);
        editor.load(id).await?;
        Ok(editor)
    }

    /// Replace the form with a stored session and target it from now on.
    ///
    /// Does not schedule an auto-save.
    pub async fn load(&self, id: SessionId) -> Result<Session, ClientError> {
        self.supersede_auto_save();
        let _permit = self.inner.gate.lock().await;

        let session = self.inner.api.get_owned(id).await?;
        *lock(&self.inner.form) = SessionForm::from_session(&session);
        self.inner.adopt(&session);
        Ok(session)
    }

    pub fn session_id(&self) -> Option<SessionId> {
        *lock(&self.inner.session_id)
    }

    pub fn form(&self) -> SessionForm {
        lock(&self.inner.form).clone()
    }

    pub fn status(&self) -> AutoSaveStatus {
        self.inner.status.current()
    }

    /// Watch auto-save status changes.
    pub fn subscribe(&self) -> watch::Receiver<AutoSaveStatus> {
        self.inner.status.subscribe()
    }

    pub fn has_pending_auto_save(&self) -> bool {
        lock(&self.debounce).is_pending()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.edit(|form| form.title = title.into());
    }

    pub fn set_tags(&self, tags: impl Into<String>) {
        self.edit(|form| form.tags = tags.into());
    }

    pub fn set_resource_url(&self, url: impl Into<String>) {
        self.edit(|form| form.resource_url = url.into());
    }

    /// Validate, then upsert as draft.
    pub async fn save_draft(&self) -> Result<Session, ClientError> {
        self.save(SessionStatus::Draft).await
    }

    /// Validate, then upsert as published.
    pub async fn publish(&self) -> Result<Session, ClientError> {
        self.save(SessionStatus::Published).await
    }

    fn edit(&self, apply: impl FnOnce(&mut SessionForm)) {
        apply(&mut *lock(&self.inner.form));
        self.schedule_auto_save();
    }

    fn schedule_auto_save(&self) {
        let inner = Arc::clone(&self.inner);
        let epoch = inner.epoch.load(Ordering::SeqCst);
        lock(&self.debounce).schedule(self.config.debounce, move || {
            tokio::spawn(inner.auto_save(epoch));
        });
    }

    /// Cancel the pending timer and invalidate fired-but-unsent auto-saves.
    fn supersede_auto_save(&self) {
        lock(&self.debounce).cancel();
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
    }

    async fn save(&self, target: SessionStatus) -> Result<Session, ClientError> {
        self.form().validate().map_err(ClientError::Invalid)?;
        self.supersede_auto_save();

        let _permit = self.inner.gate.lock().await;
        // The form may have changed while waiting for the gate.
        let form = self.form();
        form.validate().map_err(ClientError::Invalid)?;
        let input = form.to_input(self.session_id());

        let result = match target {
            SessionStatus::Draft => self.inner.api.save_draft(&input).await,
            SessionStatus::Published => self.inner.api.publish(&input).await,
        };

        match result {
            Ok(session) => {
                self.inner.adopt(&session);
                tracing::info!(session_id = %session.id, status = %session.status, "Session saved");
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(error = %e, status = %target, "Session save failed");
                Err(e)
            }
        }
    }
}

impl Drop for SessionEditor {
    fn drop(&mut self) {
        self.supersede_auto_save();
    }
}
