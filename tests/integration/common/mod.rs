//! Shared helpers for the integration tests.
//!
//! PDFs are generated on the fly: each page's MediaBox width identifies it,
//! so a merged document can be checked for page order.

use std::path::{Path, PathBuf};

use lopdf::{Document, Object, dictionary};
use pdfwatch::config::Config;
use pdfwatch::controller::Controller;
use pdfwatch::surface::RecordingSurface;
use pdfwatch::watch::WatchMessage;
use tempfile::TempDir;
use tokio::sync::mpsc;

/// Build a document with one page per entry of `widths`.
pub fn build_pdf(widths: &[i64]) -> Document {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = widths
        .iter()
        .map(|&width| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), width.into(), 842.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => widths.len() as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Write a generated PDF named `name` into `dir`.
pub fn write_pdf(dir: &Path, name: &str, widths: &[i64]) -> PathBuf {
    let path = dir.join(name);
    build_pdf(widths)
        .save(&path)
        .expect("Failed to write test PDF");
    path
}

/// MediaBox widths of the pages of the PDF at `path`, in page order.
pub fn page_widths(path: &Path) -> Vec<i64> {
    let doc = Document::load(path).expect("Failed to load merged PDF");
    doc.get_pages()
        .into_values()
        .map(|id| {
            let page = doc.get_dictionary(id).unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            media_box[2].as_i64().unwrap()
        })
        .collect()
}

/// A controller wired to a recording surface, working in a temp directory.
pub struct Harness {
    pub controller: Controller,
    pub surface: RecordingSurface,
    pub receiver: mpsc::Receiver<WatchMessage>,
    pub dir: TempDir,
}

impl Harness {
    /// Harness whose merge output is `Output_Merge.pdf` inside the temp dir.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config {
            output: dir.path().join("Output_Merge.pdf"),
            quiet: true,
            jobs: Some(2),
            ..Config::default()
        };
        Self::with_config(dir, &config)
    }

    /// Harness built from `config`.
    pub fn with_config(dir: TempDir, config: &Config) -> Self {
        let (sender, receiver) = mpsc::channel(64);
        Self {
            controller: Controller::new(config, sender).expect("Failed to build controller"),
            surface: RecordingSurface::new(),
            receiver,
            dir,
        }
    }

    /// Path of `name` inside the temp dir.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// The merge output path.
    pub fn output(&self) -> PathBuf {
        self.controller.session().output_path().to_path_buf()
    }

    /// Write PDFs with one page each and add them to the list in order.
    pub async fn add_pdfs(&mut self, names: &[&str]) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let path = write_pdf(self.dir.path(), name, &[100 * (i as i64 + 1)]);
            self.controller.add_file(&mut self.surface, &path).await;
            paths.push(path);
        }
        paths
    }

    /// Display names currently shown on the surface.
    pub fn names(&self) -> Vec<String> {
        self.surface.names().to_vec()
    }
}
