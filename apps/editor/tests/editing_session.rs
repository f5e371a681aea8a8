use std::sync::Arc;

use editor::models::PersonalField;
use editor::preview::SectionKind;
use editor::sync::Exchange;
use editor::{
    CollectionName, EditorError, EditorSession, FieldPath, InMemoryRemote, ResumeDocument,
};

fn remote_with(ids: &[&str]) -> Arc<InMemoryRemote> {
    let remote = InMemoryRemote::new();
    for id in ids {
        remote.insert(ResumeDocument::new(*id, format!("Resume {id}")));
    }
    Arc::new(remote)
}

#[tokio::test]
async fn test_build_a_resume_from_scratch() {
    let remote = remote_with(&["r-1"]);
    let mut session = EditorSession::new(remote.clone());
    session.load("r-1").await.unwrap();

    let store = session.store_mut();
    store
        .replace_field(FieldPath::PersonalInfo(PersonalField::FullName), "Linus Torvalds")
        .unwrap();
    store
        .replace_field("personal_info.email".parse().unwrap(), "linus@example.com")
        .unwrap();

    store.append_entity(CollectionName::Experiences).unwrap();
    store
        .update_entity_field(CollectionName::Experiences, 0, "title", "Maintainer")
        .unwrap();
    store
        .update_entity_field(CollectionName::Experiences, 0, "organization", "Linux Foundation")
        .unwrap();

    for name in ["C", "Git", ""] {
        store.append_entity(CollectionName::Skills).unwrap();
        let last = store.len(CollectionName::Skills).unwrap() - 1;
        store
            .update_entity_field(CollectionName::Skills, last, "name", name)
            .unwrap();
    }

    let preview = session.preview().unwrap();
    let markdown = preview.render_markdown();
    assert!(markdown.starts_with("# Linus Torvalds\nlinus@example.com\n"));
    assert!(markdown.contains("### Maintainer\nLinux Foundation\n"));
    assert!(markdown.ends_with("## SKILLS\n\nC, Git\n\n"));

    session.save().await.unwrap();
    let stored = remote.stored("r-1").unwrap();
    assert_eq!(stored.data.skills.len(), 3);
    assert_eq!(stored.data.experiences[0].title, "Maintainer");

    let score = session.calculate_score().await.unwrap();
    // contact incomplete (no phone), short summary, one role, no education,
    // three skills, no projects: 15 + 10
    assert_eq!(score.score, 25);
    assert_eq!(score.breakdown["skills"], 10);
}

#[tokio::test]
async fn test_spawned_enrichment_applies_after_concurrent_edits() {
    let remote = remote_with(&["r-1"]);
    let mut session = EditorSession::new(remote.clone());
    session.load("r-1").await.unwrap();
    session
        .store_mut()
        .append_entity(CollectionName::Skills)
        .unwrap();
    session
        .store_mut()
        .update_entity_field(CollectionName::Skills, 0, "name", "Rust")
        .unwrap();

    let summary = session.spawn_summary().unwrap();
    let score = session.spawn_score().unwrap();

    // Editing carries on while both exchanges are in flight.
    session
        .store_mut()
        .append_entity(CollectionName::Projects)
        .unwrap();

    let note = session.apply_summary(summary.await.unwrap().unwrap()).unwrap();
    assert!(note.is_some());
    let applied = session.apply_score(score.await.unwrap().unwrap()).unwrap();
    // Scored from the snapshot taken before the project was added.
    assert_eq!(applied.breakdown["achievements"], 0);

    let snapshot = session.store().snapshot().unwrap();
    assert_eq!(snapshot.data.projects.len(), 1);
    assert!(snapshot.data.summary.contains("Rust"));
    assert_eq!(remote.request_count(Exchange::GenerateSummary), 1);
    assert_eq!(remote.request_count(Exchange::CalculateScore), 1);
}

#[tokio::test]
async fn test_enrichment_for_closed_document_is_rejected() {
    let remote = remote_with(&["r-1", "r-2"]);
    let mut session = EditorSession::new(remote);
    session.load("r-1").await.unwrap();

    let pending = session.spawn_score().unwrap();
    session.load("r-2").await.unwrap();

    let result = pending.await.unwrap().unwrap();
    assert!(matches!(
        session.apply_score(result),
        Err(EditorError::DocumentChanged { .. })
    ));
    assert!(session.score().is_none());
}

#[tokio::test]
async fn test_remote_outage_never_touches_local_state() {
    let remote = remote_with(&["r-1"]);
    let mut session = EditorSession::new(remote.clone());
    session.load("r-1").await.unwrap();
    session
        .store_mut()
        .replace_field(FieldPath::Summary, "Draft summary")
        .unwrap();
    let score = session.calculate_score().await.unwrap().clone();
    let before = (*session.store().snapshot().unwrap()).clone();
    let preview_before = session.preview().unwrap();

    for exchange in [Exchange::Save, Exchange::GenerateSummary, Exchange::CalculateScore] {
        remote.fail(exchange);
    }

    assert!(matches!(session.save().await, Err(EditorError::Transport(_))));
    assert!(matches!(
        session.generate_summary().await,
        Err(EditorError::Service(_))
    ));
    assert!(matches!(
        session.calculate_score().await,
        Err(EditorError::Service(_))
    ));

    assert_eq!(*session.store().snapshot().unwrap(), before);
    assert_eq!(session.preview().unwrap(), preview_before);
    assert_eq!(session.score(), Some(&score));
    assert_eq!(remote.stored("r-1").unwrap().data.summary, "");

    remote.recover(Exchange::Save);
    session.save().await.unwrap();
    assert_eq!(remote.stored("r-1").unwrap().data.summary, "Draft summary");
}

#[tokio::test]
async fn test_library_then_open() {
    let remote = Arc::new(InMemoryRemote::new());
    let session = EditorSession::new(remote.clone());
    let created = session
        .remote()
        .create_document("Backend CV", "modern")
        .await
        .unwrap();
    assert_eq!(session.remote().list_documents().await.unwrap().len(), 1);

    let mut session = session;
    session.load(&created.id).await.unwrap();
    assert_eq!(session.store().document_id(), Some(created.id.as_str()));
    assert!(session.preview().unwrap().section(SectionKind::Summary).is_none());

    session.rename("Systems CV").await.unwrap();
    assert_eq!(remote.stored(&created.id).unwrap().title, "Systems CV");
}
