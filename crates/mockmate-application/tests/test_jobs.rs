mod common;

use common::{FakeBackend, job, notifier};
use mockmate_application::JobCatalog;

#[tokio::test]
async fn test_refresh_and_search() {
    let backend = FakeBackend::new();
    backend
        .jobs
        .lock()
        .unwrap()
        .push(job("9", "Platform Engineer"));
    let (_, notifier) = notifier();
    let mut catalog = JobCatalog::new(backend, notifier);

    assert!(catalog.jobs().is_empty());
    assert_eq!(catalog.refresh().await.unwrap().len(), 3);

    let titles: Vec<_> = catalog
        .search("ENGINEER")
        .iter()
        .map(|j| j.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Backend Engineer", "Platform Engineer"]);
    assert_eq!(catalog.search("").len(), 3);
    assert_eq!(catalog.search("rust").len(), 3);
    assert!(catalog.search("kotlin").is_empty());
    assert_eq!(catalog.find("8").unwrap().title, "Data Analyst");
}
