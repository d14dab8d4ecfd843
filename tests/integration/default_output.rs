//! The default output lands in the current working directory.

use pdfwatch::config::Config;
use serial_test::serial;
use tempfile::TempDir;

use crate::common::{Harness, page_widths};

/// Restores the working directory when dropped.
struct CwdGuard(std::path::PathBuf);

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

#[tokio::test]
#[serial]
async fn test_default_output_in_working_directory() {
    let work = TempDir::new().unwrap();
    let _guard = CwdGuard(std::env::current_dir().unwrap());
    std::env::set_current_dir(work.path()).unwrap();

    let mut h = Harness::with_config(TempDir::new().unwrap(), &Config::default());
    h.add_pdfs(&["a.pdf", "b.pdf"]).await;
    h.controller.merge(&mut h.surface).await.unwrap();

    let expected = work.path().canonicalize().unwrap().join("Output_Merge.pdf");
    assert_eq!(h.output(), expected);
    assert_eq!(page_widths(&expected), [100, 200]);
}
