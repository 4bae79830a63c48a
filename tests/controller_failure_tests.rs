use async_trait::async_trait;
use mockall::{mock, predicate::eq};

use motiflab::{
    entities::{
        defaults::default_motifs,
        footer::{Footer, DEFAULT_FOOTER_TEXT},
        image::UploadedImage,
        motif::{Motif, MotifCategory, MotifDraft},
    },
    errors::{ClientError, ControllerError},
    repositories::catalog_api::MotifApi,
    use_cases::{
        catalog::{CatalogController, DeleteOutcome, NoticeLevel},
        session::{AdminGate, AdminSession},
    },
};

mock! {
    pub Api {}

    #[async_trait]
    impl MotifApi for Api {
        async fn get_motifs(&self) -> Result<Vec<Motif>, ClientError>;
        async fn get_motif(&self, id: &str) -> Result<Motif, ClientError>;
        async fn create_motif(&self, motif: &Motif) -> Result<String, ClientError>;
        async fn update_motif(&self, id: &str, motif: &Motif) -> Result<String, ClientError>;
        async fn delete_motif(&self, id: &str) -> Result<(), ClientError>;
        async fn get_footer(&self) -> Result<Footer, ClientError>;
        async fn update_footer(&self, footer: &Footer) -> Result<(), ClientError>;
        async fn upload_image(
            &self,
            file_name: &str,
            content_type: &str,
            bytes: Vec<u8>,
        ) -> Result<UploadedImage, ClientError>;
    }
}

fn server_error(message: &str) -> ClientError {
    ClientError::Api { status: 500, message: message.to_string() }
}

/// An api that already holds the defaults and a saved footer.
fn seeded_api() -> MockApi {
    let mut api = MockApi::new();
    api.expect_get_motifs().returning(|| Ok(default_motifs()));
    api.expect_get_footer().returning(|| Ok(Footer::new("Kayıtlı footer")));
    api
}

async fn started(api: MockApi) -> CatalogController<MockApi> {
    let mut catalog = CatalogController::new(api, AdminSession::new(), AdminGate::new("pw"));
    catalog.start().await;
    catalog
}

fn draft() -> MotifDraft {
    MotifDraft {
        title: "Yıldız".to_string(),
        category: MotifCategory::Motif,
        description: "Sekiz köşeli yıldız".to_string(),
        history: "Selçuklu dönemi".to_string(),
        image_url: "https://x/star.png".to_string(),
        file_name: None,
    }
}

#[actix_rt::test]
async fn failed_fetch_falls_back_to_defaults_and_tells_the_user() {
    let mut api = MockApi::new();
    api.expect_get_motifs().times(1).returning(|| Err(ClientError::Transport("connection refused".into())));
    api.expect_get_footer().times(1).returning(|| Err(server_error("down")));
    api.expect_create_motif().never();

    let mut catalog = started(api).await;

    assert!(!catalog.is_loading());
    assert_eq!(catalog.motifs(), default_motifs().as_slice());
    assert_eq!(catalog.footer_text(), DEFAULT_FOOTER_TEXT);

    let notices = catalog.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Motifler yüklenirken hata oluştu");
}

#[actix_rt::test]
async fn empty_catalog_is_seeded_with_every_default() {
    let mut api = MockApi::new();
    api.expect_get_motifs().times(1).returning(|| Ok(Vec::new()));
    api.expect_get_footer().returning(|| Ok(Footer::default()));
    api.expect_create_motif()
        .times(default_motifs().len())
        .returning(|motif| Ok(motif.id.clone()));

    let catalog = started(api).await;

    assert_eq!(catalog.motifs(), default_motifs().as_slice());
    assert_eq!(catalog.footer_text(), DEFAULT_FOOTER_TEXT);
}

#[actix_rt::test]
async fn empty_footer_text_keeps_the_default() {
    let mut api = MockApi::new();
    api.expect_get_motifs().returning(|| Ok(default_motifs()));
    api.expect_get_footer().returning(|| Ok(Footer::new("")));

    let catalog = started(api).await;

    assert_eq!(catalog.footer_text(), DEFAULT_FOOTER_TEXT);
}

#[actix_rt::test]
async fn not_found_on_delete_counts_as_deleted() {
    let mut api = seeded_api();
    api.expect_delete_motif()
        .with(eq("2"))
        .times(1)
        .returning(|_| Err(ClientError::NotFound("Motif not found".into())));

    let mut catalog = started(api).await;
    let outcome = catalog.delete("2").await.unwrap();

    assert_eq!(outcome, DeleteOutcome::AlreadyAbsent);
    assert!(catalog.find("2").is_none());
    assert_eq!(catalog.motifs().len(), default_motifs().len() - 1);

    let notices = catalog.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Motif listeden kaldırıldı");
}

#[actix_rt::test]
async fn other_delete_failures_leave_the_list_alone() {
    let mut api = seeded_api();
    api.expect_delete_motif().returning(|_| Err(server_error("Failed to delete motif")));

    let mut catalog = started(api).await;
    let err = catalog.delete("2").await.unwrap_err();

    assert_eq!(err, ControllerError::Api(server_error("Failed to delete motif")));
    assert!(catalog.find("2").is_some());

    let notices = catalog.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Silme hatası: Failed to delete motif");
}

#[actix_rt::test]
async fn a_not_found_message_without_the_not_found_kind_is_not_reconciled() {
    let mut api = seeded_api();
    api.expect_delete_motif().returning(|_| Err(server_error("Motif not found")));

    let mut catalog = started(api).await;

    assert!(catalog.delete("2").await.is_err());
    assert!(catalog.find("2").is_some());
}

#[actix_rt::test]
async fn failed_create_changes_nothing_locally() {
    let mut api = seeded_api();
    api.expect_create_motif().times(1).returning(|_| Err(server_error("Failed to create motif")));

    let mut catalog = started(api).await;
    let err = catalog.create(draft()).await.unwrap_err();

    assert!(matches!(err, ControllerError::Api(_)));
    assert_eq!(catalog.motifs(), default_motifs().as_slice());
    let notices = catalog.take_notices();
    assert_eq!(notices[0].message, "Motif eklenirken hata oluştu");
}

#[actix_rt::test]
async fn successful_create_appends_with_a_fresh_id() {
    let mut api = seeded_api();
    api.expect_create_motif().returning(|motif| Ok(motif.id.clone()));

    let mut catalog = started(api).await;
    let created = catalog.create(draft()).await.unwrap();

    assert!(created.id.parse::<i64>().is_ok());
    assert_eq!(catalog.motifs().last(), Some(&created));
}

#[actix_rt::test]
async fn update_keeps_created_at_and_failure_keeps_the_old_entry() {
    let mut api = seeded_api();
    let mut calls = 0;
    api.expect_update_motif().times(2).returning(move |id, _| {
        calls += 1;
        if calls == 1 {
            Ok(id.to_string())
        } else {
            Err(server_error("Failed to update motif"))
        }
    });

    let mut catalog = started(api).await;
    let original = catalog.find("1").cloned().unwrap();

    let updated = catalog.update("1", draft()).await.unwrap();
    assert_eq!(updated.id, "1");
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(catalog.find("1"), Some(&updated));

    let mut second = draft();
    second.title = "Başka".to_string();
    assert!(catalog.update("1", second).await.is_err());
    assert_eq!(catalog.find("1"), Some(&updated));

    let notices = catalog.take_notices();
    assert_eq!(notices[0].message, "Motif başarıyla güncellendi");
    assert_eq!(notices[1].message, "Motif güncellenirken hata oluştu");
}

#[actix_rt::test]
async fn failed_footer_save_keeps_the_current_text() {
    let mut api = seeded_api();
    api.expect_update_footer().returning(|_| Err(server_error("Failed to update footer")));

    let mut catalog = started(api).await;
    assert_eq!(catalog.footer_text(), "Kayıtlı footer");

    assert!(catalog.update_footer("Yeni").await.is_err());
    assert_eq!(catalog.footer_text(), "Kayıtlı footer");
    assert_eq!(catalog.take_notices()[0].level, NoticeLevel::Error);
}
