use chrono::Utc;
use validator::Validate;

use crate::{
    entities::{
        defaults::default_motifs,
        footer::{Footer, DEFAULT_FOOTER_TEXT},
        motif::{CategoryFilter, Motif, MotifDraft},
    },
    errors::{ClientError, ControllerError},
    repositories::catalog_api::MotifApi,
    use_cases::session::{AccessState, AdminGate, AdminSession, IdGenerator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A toast for the user. The presentation layer drains these after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

/// How a delete ended for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The service had no such record; the local entry was dropped anyway.
    AlreadyAbsent,
}

/// Owns the in-memory catalog view and keeps it converged with the service.
///
/// Every mutation goes to the service first and is reflected locally only
/// after it succeeded. Nothing is retried.
pub struct CatalogController<A>
where
    A: MotifApi,
{
    api: A,
    session: AdminSession,
    gate: AdminGate,
    ids: IdGenerator,
    motifs: Vec<Motif>,
    footer_text: String,
    access: AccessState,
    loading: bool,
    notices: Vec<Notice>,
}

impl<A> CatalogController<A>
where
    A: MotifApi,
{
    pub fn new(api: A, session: AdminSession, gate: AdminGate) -> Self {
        CatalogController {
            api,
            session,
            gate,
            ids: IdGenerator::new(),
            motifs: Vec::new(),
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
            access: AccessState::LoggedOut,
            loading: true,
            notices: Vec::new(),
        }
    }

    /// Restores the admin session, then loads motifs and the footer concurrently.
    /// An empty catalog is seeded with the built-in motifs.
    pub async fn start(&mut self) {
        if self.session.is_admin() {
            self.access = AccessState::LoggedIn;
        }

        self.loading = true;
        let api = &self.api;
        let (motifs, footer) = tokio::join!(load_or_seed(api), api.get_footer());

        match motifs {
            Ok(motifs) => self.motifs = motifs,
            Err(e) => {
                tracing::error!("Error loading motifs: {}", e);
                self.motifs = default_motifs();
                self.notices.push(Notice::error("Motifler yüklenirken hata oluştu"));
            }
        }

        match footer {
            Ok(footer) => {
                if let Some(text) = footer.non_empty_text() {
                    self.footer_text = text.to_string();
                }
            }
            Err(e) => tracing::error!("Error loading footer: {}", e),
        }

        self.loading = false;
    }

    pub async fn create(&mut self, draft: MotifDraft) -> Result<Motif, ControllerError> {
        draft.validate()?;

        let motif = draft.into_motif(self.ids.next_id(), Utc::now());

        if let Err(e) = self.api.create_motif(&motif).await {
            tracing::error!("Error adding motif: {}", e);
            self.notices.push(Notice::error("Motif eklenirken hata oluştu"));
            return Err(e.into());
        }

        self.motifs.push(motif.clone());
        self.notices.push(Notice::success("Motif başarıyla eklendi"));
        Ok(motif)
    }

    /// Full replacement that keeps the original creation time when the motif is known locally
    pub async fn update(&mut self, id: &str, draft: MotifDraft) -> Result<Motif, ControllerError> {
        draft.validate()?;

        let created_at = self
            .find(id)
            .map(|existing| existing.created_at)
            .unwrap_or_else(Utc::now);
        let motif = draft.into_motif(id.to_string(), created_at);

        if let Err(e) = self.api.update_motif(id, &motif).await {
            tracing::error!("Error updating motif: {}", e);
            self.notices.push(Notice::error("Motif güncellenirken hata oluştu"));
            return Err(e.into());
        }

        for entry in self.motifs.iter_mut().filter(|m| m.id == id) {
            *entry = motif.clone();
        }
        self.notices.push(Notice::success("Motif başarıyla güncellendi"));
        Ok(motif)
    }

    /// Deletes on the service first. A NotFound answer means the record is
    /// already gone, so the local entry is dropped and the delete counts as done.
    pub async fn delete(&mut self, id: &str) -> Result<DeleteOutcome, ControllerError> {
        match self.api.delete_motif(id).await {
            Ok(()) => {
                self.motifs.retain(|m| m.id != id);
                self.notices.push(Notice::success("Motif başarıyla silindi"));
                Ok(DeleteOutcome::Deleted)
            }
            Err(ClientError::NotFound(message)) => {
                tracing::warn!(motif_id = %id, "Motif already absent on the service: {}", message);
                self.motifs.retain(|m| m.id != id);
                self.notices.push(Notice::success("Motif listeden kaldırıldı"));
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(e) => {
                tracing::error!("Error deleting motif: {}", e);
                self.notices.push(Notice::error(format!("Silme hatası: {}", e)));
                Err(e.into())
            }
        }
    }

    pub async fn update_footer(&mut self, text: &str) -> Result<(), ControllerError> {
        if let Err(e) = self.api.update_footer(&Footer::new(text)).await {
            tracing::error!("Error updating footer: {}", e);
            self.notices.push(Notice::error("Footer güncellenirken hata oluştu"));
            return Err(e.into());
        }

        self.footer_text = text.to_string();
        self.notices.push(Notice::success("Footer başarıyla güncellendi"));
        Ok(())
    }

    /// LoggedOut → LoggedIn on a matching password; a wrong one changes nothing
    pub fn login(&mut self, password: &str) -> bool {
        if !self.gate.check(password) {
            tracing::warn!("Rejected admin login attempt");
            return false;
        }

        self.access = AccessState::LoggedIn;
        self.session.mark_admin();
        tracing::info!("Admin logged in");
        true
    }

    pub fn logout(&mut self) {
        self.access = AccessState::LoggedOut;
        self.session.clear();
        tracing::info!("Admin logged out");
    }

    pub fn motifs(&self) -> &[Motif] {
        &self.motifs
    }

    pub fn filtered(&self, filter: CategoryFilter) -> Vec<&Motif> {
        self.motifs.iter().filter(|m| filter.matches(m)).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Motif> {
        self.motifs.iter().find(|m| m.id == id)
    }

    pub fn footer_text(&self) -> &str {
        &self.footer_text
    }

    pub fn access(&self) -> AccessState {
        self.access
    }

    pub fn is_admin(&self) -> bool {
        self.access == AccessState::LoggedIn
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

async fn load_or_seed<A: MotifApi>(api: &A) -> Result<Vec<Motif>, ClientError> {
    let motifs = api.get_motifs().await?;
    if !motifs.is_empty() {
        return Ok(motifs);
    }

    let defaults = default_motifs();
    tracing::info!("Catalog is empty, seeding {} default motifs", defaults.len());
    for motif in &defaults {
        api.create_motif(motif).await?;
    }
    Ok(defaults)
}
