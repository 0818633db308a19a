use std::sync::{Arc, Mutex};
use std::time::Duration;

use portfolio_forge_core::contract::MockRepoHost;
use portfolio_forge_core::error::{PipelineError, RepoHostError};
use portfolio_forge_core::fileset::FileSet;
use portfolio_forge_core::publish::{publish, PublishOptions};

fn test_options() -> PublishOptions {
    PublishOptions {
        repo_name: Some("portfolio-under-test".to_string()),
        settle: Duration::ZERO,
        ..PublishOptions::default()
    }
}

fn host_with_identity() -> MockRepoHost {
    let mut host = MockRepoHost::new();
    host.expect_owner().return_const("octo".to_string());
    host.expect_repository_url()
        .returning(|repo| format!("https://github.com/octo/{repo}"));
    host
}

#[tokio::test]
async fn publishes_files_in_order_and_skips_empty_ones() {
    let files: FileSet = vec![
        ("README.md", "# Portfolio"),
        ("empty.txt", "   \n"),
        ("app/page.tsx", "export default function HomePage() {}"),
    ]
    .into_iter()
    .collect();

    let mut host = host_with_identity();
    host.expect_create_repository()
        .withf(|req| req.name == "portfolio-under-test" && req.auto_init && !req.private)
        .return_once(|_| Ok(()));

    host.expect_file_revision()
        .times(2)
        .returning(|_, _| Ok(None));

    let pushed = Arc::new(Mutex::new(Vec::new()));
    let recorder = pushed.clone();
    host.expect_upsert_file().times(2).returning(move |req| {
        recorder.lock().unwrap().push(req.path.to_string());
        Ok(())
    });

    let repo = publish(&host, &files, &test_options())
        .await
        .expect("publish should succeed");

    assert_eq!(repo.owner, "octo");
    assert_eq!(repo.url, "https://github.com/octo/portfolio-under-test");
    assert_eq!(
        *pushed.lock().unwrap(),
        vec!["README.md".to_string(), "app/page.tsx".to_string()],
        "Non-empty files are pushed in file-set order; empty ones are skipped"
    );
}

#[tokio::test]
async fn existing_file_update_carries_the_revision_token() {
    let files: FileSet = vec![("README.md", "# updated")].into_iter().collect();

    let mut host = host_with_identity();
    host.expect_create_repository().return_once(|_| Ok(()));
    host.expect_file_revision()
        .withf(|repo, path| repo == "portfolio-under-test" && path == "README.md")
        .return_once(|_, _| Ok(Some("abc123".to_string())));
    host.expect_upsert_file()
        .withf(|req| req.revision == Some("abc123"))
        .return_once(|_| Ok(()));

    publish(&host, &files, &test_options())
        .await
        .expect("publish should succeed");
}

#[tokio::test]
async fn new_file_upsert_carries_no_revision_token() {
    let files: FileSet = vec![("content/data.ts", "export const content = {}")]
        .into_iter()
        .collect();

    let mut host = host_with_identity();
    host.expect_create_repository().return_once(|_| Ok(()));
    host.expect_file_revision().return_once(|_, _| Ok(None));
    host.expect_upsert_file()
        .withf(|req| req.revision.is_none())
        .return_once(|_| Ok(()));

    publish(&host, &files, &test_options())
        .await
        .expect("publish should succeed");
}

#[tokio::test]
async fn creation_conflict_continues_against_the_existing_repository() {
    let files: FileSet = vec![("README.md", "# Portfolio")].into_iter().collect();

    let mut host = host_with_identity();
    host.expect_create_repository()
        .return_once(|_| Err(RepoHostError::AlreadyExists));
    host.expect_file_revision().return_once(|_, _| Ok(None));
    host.expect_upsert_file().return_once(|_| Ok(()));

    let repo = publish(&host, &files, &test_options())
        .await
        .expect("conflict is not fatal");
    assert_eq!(repo.name, "portfolio-under-test");
}

#[tokio::test]
async fn other_creation_failures_abort_the_run() {
    let files: FileSet = vec![("README.md", "# Portfolio")].into_iter().collect();

    let mut host = MockRepoHost::new();
    host.expect_create_repository()
        .return_once(|_| Err(RepoHostError::Api("403 Forbidden".to_string())));

    let err = publish(&host, &files, &test_options()).await.unwrap_err();
    assert!(matches!(err, PipelineError::RepositoryWrite(_)));
}

#[tokio::test]
async fn first_upsert_failure_aborts_without_touching_later_files() {
    let files: FileSet = vec![
        ("a.txt", "first"),
        ("b.txt", "second"),
        ("c.txt", "third"),
    ]
    .into_iter()
    .collect();

    let mut host = host_with_identity();
    host.expect_create_repository().return_once(|_| Ok(()));
    host.expect_file_revision()
        .times(1)
        .returning(|_, _| Ok(None));
    host.expect_upsert_file()
        .times(1)
        .return_once(|_| Err(RepoHostError::Api("422 Unprocessable".to_string())));

    let err = publish(&host, &files, &test_options()).await.unwrap_err();
    match err {
        PipelineError::RepositoryWrite(msg) => assert!(msg.contains("a.txt")),
        other => panic!("Expected RepositoryWrite, got {other:?}"),
    }
}

#[tokio::test]
async fn revision_read_failure_other_than_not_found_is_fatal() {
    let files: FileSet = vec![("a.txt", "first")].into_iter().collect();

    let mut host = host_with_identity();
    host.expect_create_repository().return_once(|_| Ok(()));
    host.expect_file_revision()
        .return_once(|_, _| Err(RepoHostError::Transport("connection reset".to_string())));

    let err = publish(&host, &files, &test_options()).await.unwrap_err();
    assert!(matches!(err, PipelineError::RepositoryWrite(_)));
}

#[tokio::test]
async fn derived_names_carry_the_portfolio_prefix() {
    let files = FileSet::new();

    let mut host = host_with_identity();
    host.expect_create_repository()
        .withf(|req| req.name.starts_with("portfolio-"))
        .return_once(|_| Ok(()));

    let opts = PublishOptions {
        repo_name: None,
        settle: Duration::ZERO,
        ..PublishOptions::default()
    };
    let repo = publish(&host, &files, &opts).await.expect("publish succeeds");
    assert!(repo.name.starts_with("portfolio-"));
    assert!(
        repo.name.len() > "portfolio-".len(),
        "Derived name carries a time suffix"
    );
}
