//! Watching a directory: initial scan, simulated events and live events.

use std::path::PathBuf;
use std::time::Duration;

use pdfwatch::session::WatchState;
use pdfwatch::surface::NoticeKind;
use pdfwatch::watch::{DirectoryEvent, WatchMessage};
use tokio::time::timeout;

use crate::common::{Harness, write_pdf};

/// Watch the harness directory, returning its canonical path.
async fn watch_harness_dir(h: &mut Harness) -> PathBuf {
    h.surface.queue_directory(Some(h.dir.path().to_path_buf()));
    h.controller.watch_directory(&mut h.surface).await;
    h.controller
        .session()
        .watched_directory()
        .expect("directory should be watched")
        .to_path_buf()
}

fn message(h: &Harness, event: DirectoryEvent) -> WatchMessage {
    WatchMessage {
        generation: h.controller.session().generation(),
        event,
    }
}

/// Feed live watcher messages into the controller until `done` holds.
async fn pump_until(h: &mut Harness, done: impl Fn(&[String]) -> bool) {
    let deadline = Duration::from_secs(10);
    let result = timeout(deadline, async {
        while !done(h.surface.names()) {
            let message = h.receiver.recv().await.expect("watch channel closed");
            h.controller.handle_watch_message(&mut h.surface, message);
        }
    })
    .await;
    assert!(result.is_ok(), "timed out, list is {:?}", h.surface.names());
}

#[tokio::test]
async fn test_watch_lists_only_matching_files() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "z.pdf", &[100]);
    std::fs::write(h.path("y.txt"), b"not a pdf").unwrap();
    write_pdf(h.dir.path(), "x.pdf", &[100]);

    watch_harness_dir(&mut h).await;

    assert_eq!(h.controller.session().state(), WatchState::Watching);
    assert_eq!(h.names(), ["x.pdf", "z.pdf"]);
}

#[tokio::test]
async fn test_watch_excludes_merge_output() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "a.pdf", &[100]);
    write_pdf(h.dir.path(), "Output_Merge.pdf", &[100]);

    watch_harness_dir(&mut h).await;
    assert_eq!(h.names(), ["a.pdf"]);
}

#[tokio::test]
async fn test_watch_replaces_explicit_entries() {
    let mut h = Harness::new();
    h.add_pdfs(&["a.pdf"]).await;

    let inbox = h.path("inbox");
    std::fs::create_dir(&inbox).unwrap();
    write_pdf(&inbox, "scan.pdf", &[100]);
    h.surface.queue_directory(Some(inbox));
    h.controller.watch_directory(&mut h.surface).await;

    assert_eq!(h.names(), ["scan.pdf"]);
}

#[tokio::test]
async fn test_simulated_events_update_list() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "x.pdf", &[100]);
    let dir = watch_harness_dir(&mut h).await;

    let created = message(&h, DirectoryEvent::Created(dir.join("w.pdf")));
    h.controller.handle_watch_message(&mut h.surface, created);
    assert_eq!(h.names(), ["x.pdf", "w.pdf"]);

    let refreshes = h.surface.refresh_count();
    let absent = message(&h, DirectoryEvent::Deleted(dir.join("missing.pdf")));
    h.controller.handle_watch_message(&mut h.surface, absent);
    assert_eq!(h.names(), ["x.pdf", "w.pdf"]);
    assert_eq!(h.surface.refresh_count(), refreshes);

    let deleted = message(&h, DirectoryEvent::Deleted(dir.join("x.pdf")));
    h.controller.handle_watch_message(&mut h.surface, deleted);
    assert_eq!(h.names(), ["w.pdf"]);

    let output = message(&h, DirectoryEvent::Created(h.output()));
    h.controller.handle_watch_message(&mut h.surface, output);
    assert_eq!(h.names(), ["w.pdf"]);
}

#[tokio::test]
async fn test_events_from_previous_watch_are_ignored() {
    let mut h = Harness::new();
    let first = watch_harness_dir(&mut h).await;
    let stale_generation = h.controller.session().generation();

    let second = h.path("second");
    std::fs::create_dir(&second).unwrap();
    h.surface.queue_directory(Some(second));
    h.controller.watch_directory(&mut h.surface).await;
    assert!(h.controller.session().generation() > stale_generation);

    let stale = WatchMessage {
        generation: stale_generation,
        event: DirectoryEvent::Created(first.join("late.pdf")),
    };
    h.controller.handle_watch_message(&mut h.surface, stale);
    assert!(h.names().is_empty());
}

#[tokio::test]
async fn test_failed_watch_keeps_previous_watch() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "x.pdf", &[100]);
    let dir = watch_harness_dir(&mut h).await;

    let file = h.path("x.pdf");
    h.surface.queue_directory(Some(file));
    h.controller.watch_directory(&mut h.surface).await;

    assert_eq!(h.surface.notices_of(NoticeKind::Error).len(), 1);
    assert_eq!(h.controller.session().watched_directory(), Some(dir.as_path()));
    assert_eq!(h.names(), ["x.pdf"]);
}

#[tokio::test]
async fn test_live_create_and_delete() {
    let mut h = Harness::new();
    watch_harness_dir(&mut h).await;

    let path = write_pdf(h.dir.path(), "live.pdf", &[100]);
    std::fs::write(h.path("notes.txt"), b"ignored").unwrap();
    pump_until(&mut h, |names| names.iter().any(|n| n == "live.pdf")).await;
    assert_eq!(h.names(), ["live.pdf"]);

    std::fs::remove_file(&path).unwrap();
    pump_until(&mut h, |names| names.is_empty()).await;
}

#[tokio::test]
async fn test_live_move_into_directory() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "a.pdf", &[100]);
    watch_harness_dir(&mut h).await;

    let outside = tempfile::TempDir::new().unwrap();
    let source = write_pdf(outside.path(), "moved_in.pdf", &[200]);
    std::fs::rename(&source, h.path("moved_in.pdf")).unwrap();

    pump_until(&mut h, |names| names.iter().any(|n| n == "moved_in.pdf")).await;
    assert_eq!(h.names(), ["a.pdf", "moved_in.pdf"]);
}

#[tokio::test]
async fn test_live_move_out_of_directory() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "a.pdf", &[100]);
    write_pdf(h.dir.path(), "b.pdf", &[100]);
    watch_harness_dir(&mut h).await;

    let outside = tempfile::TempDir::new().unwrap();
    std::fs::rename(h.path("a.pdf"), outside.path().join("a.pdf")).unwrap();

    pump_until(&mut h, |names| names == ["b.pdf"]).await;
}

#[tokio::test]
async fn test_live_rename_within_directory() {
    let mut h = Harness::new();
    write_pdf(h.dir.path(), "draft.pdf", &[100]);
    watch_harness_dir(&mut h).await;

    std::fs::rename(h.path("draft.pdf"), h.path("final.pdf")).unwrap();

    pump_until(&mut h, |names| names == ["final.pdf"]).await;
}
