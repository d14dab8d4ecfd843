//! Merging the list and cleaning up afterwards.

use pdfwatch::surface::{NoticeKind, Surface};

use crate::common::{Harness, page_widths};

#[tokio::test]
async fn test_merge_follows_list_order() {
    let mut h = Harness::new();
    h.add_pdfs(&["a.pdf", "b.pdf", "c.pdf"]).await;

    let report = h.controller.merge(&mut h.surface).await.unwrap();

    assert_eq!(report.merge.files_merged, 3);
    assert_eq!(page_widths(&h.output()), [100, 200, 300]);
    assert_eq!(h.names(), ["a.pdf", "b.pdf", "c.pdf"]);

    let successes = h.surface.notices_of(NoticeKind::Success);
    assert_eq!(successes.len(), 1);
    assert!(successes[0].message.contains("Output_Merge.pdf"));
}

#[tokio::test]
async fn test_merge_after_reorder() {
    let mut h = Harness::new();
    h.add_pdfs(&["a.pdf", "b.pdf", "c.pdf"]).await;

    h.surface.set_selection(&[2]);
    h.controller.move_up(&mut h.surface);
    h.controller.move_up(&mut h.surface);
    assert_eq!(h.names(), ["c.pdf", "a.pdf", "b.pdf"]);

    h.controller.merge(&mut h.surface).await.unwrap();
    assert_eq!(page_widths(&h.output()), [300, 100, 200]);
}

#[tokio::test]
async fn test_merge_overwrites_previous_output() {
    let mut h = Harness::new();
    std::fs::write(h.output(), b"stale").unwrap();
    h.add_pdfs(&["a.pdf"]).await;

    h.controller.merge(&mut h.surface).await.unwrap();
    assert_eq!(page_widths(&h.output()), [100]);
}

#[tokio::test]
async fn test_empty_merge_writes_nothing() {
    let mut h = Harness::new();

    assert!(h.controller.merge(&mut h.surface).await.is_none());

    let warnings = h.surface.notices_of(NoticeKind::Warning);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "No PDFs to merge.");
    assert!(!h.output().exists());
    assert_eq!(std::fs::read_dir(h.dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_delete_after_merge_removes_sources_and_clears_list() {
    let mut h = Harness::new();
    let sources = h.add_pdfs(&["a.pdf", "b.pdf"]).await;
    h.controller.set_delete_after_merge(&mut h.surface, true);

    h.controller.merge(&mut h.surface).await.unwrap();

    assert!(sources.iter().all(|path| !path.exists()));
    assert!(h.output().exists());
    assert!(h.names().is_empty());
    assert!(h.controller.session().files().is_empty());
    assert!(h.surface.notices_of(NoticeKind::Error).is_empty());
}

#[tokio::test]
async fn test_failed_deletion_does_not_stop_the_pass() {
    let mut h = Harness::new();
    let sources = h.add_pdfs(&["a.pdf", "b.pdf", "c.pdf"]).await;

    // A non-empty directory in place of b.pdf cannot be removed as a file.
    std::fs::remove_file(&sources[1]).unwrap();
    std::fs::create_dir(&sources[1]).unwrap();
    std::fs::write(sources[1].join("keep"), b"x").unwrap();

    let deleted = h.controller.delete_files(&mut h.surface).await;

    assert_eq!(deleted, 2);
    assert!(!sources[0].exists());
    assert!(sources[1].exists());
    assert!(!sources[2].exists());

    let errors = h.surface.notices_of(NoticeKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("b.pdf"));
    assert!(h.names().is_empty());
    assert!(h.controller.session().files().is_empty());
}

#[tokio::test]
async fn test_merge_failure_keeps_list_and_sources() {
    let mut h = Harness::new();
    let sources = h.add_pdfs(&["a.pdf", "b.pdf"]).await;
    h.controller.set_delete_after_merge(&mut h.surface, true);
    std::fs::write(&sources[1], b"%PDF-1.4 truncated").unwrap();

    assert!(h.controller.merge(&mut h.surface).await.is_none());

    assert_eq!(h.surface.notices_of(NoticeKind::Error).len(), 1);
    assert_eq!(h.names(), ["a.pdf", "b.pdf"]);
    assert!(sources.iter().all(|path| path.exists()));
    assert!(!h.output().exists());
}
