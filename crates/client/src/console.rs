//! Terminal rendering for the `fieldmap` binary.

use std::sync::atomic::{AtomicBool, Ordering};

use fieldmap_core::mapping::MappingDocument;

use crate::ui::{DialogView, NoticeStyle, Presentation, UiUpdate};

/// [`Presentation`] that prints notices and documents to the terminal.
#[derive(Default)]
pub struct ConsolePresentation {
    failed: AtomicBool,
    print_documents: bool,
}

impl ConsolePresentation {
    /// Also print every document received through `ReplaceState`.
    pub fn printing_documents() -> Self {
        Self {
            print_documents: true,
            ..Self::default()
        }
    }

    /// Whether any error notice has been shown.
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }
}

impl Presentation for ConsolePresentation {
    fn apply(&self, update: UiUpdate) {
        match update {
            UiUpdate::ShowStatus(notice) => match notice.style {
                NoticeStyle::Success => println!("{}", notice.message),
                NoticeStyle::Error => {
                    self.failed.store(true, Ordering::SeqCst);
                    eprintln!("{}", notice.message);
                }
            },
            UiUpdate::HideStatus => {}
            UiUpdate::ShowDialog(view) => {
                tracing::debug!(dialog = %describe_dialog(&view), "Dialog opened");
            }
            UiUpdate::HideDialog(id) => tracing::debug!(?id, "Dialog closed"),
            UiUpdate::Navigate(url) => println!("Download: {url}"),
            UiUpdate::ReplaceState(document) => {
                if self.print_documents {
                    print!("{}", render_document(&document));
                }
            }
        }
    }
}

/// Render mappings and mismatches as two plain-text tables.
pub fn render_document(document: &MappingDocument) -> String {
    let mut out = String::new();

    out.push_str("Mappings\n");
    if document.mappings.is_empty() {
        out.push_str("  (none)\n");
    }
    for row in &document.mappings {
        out.push_str(&format!(
            "  {:<30} -> {:<30} {:<10} {}\n",
            row.mapping.j1_field,
            row.mapping.j2_field,
            row.mapping.mapping_type,
            row.color().as_str()
        ));
    }

    out.push_str("Mismatches\n");
    if document.mismatches.is_empty() {
        out.push_str("  (none)\n");
    }
    for mismatch in &document.mismatches {
        out.push_str(&format!(
            "  {:<30}    {:<30} {:<10} {}\n",
            mismatch.j1_field,
            "",
            mismatch.j1_type,
            mismatch.color().as_str()
        ));
    }

    out
}

/// One-line summary of a dialog, used in debug output.
pub fn describe_dialog(view: &DialogView) -> String {
    match view {
        DialogView::AddMapping(_) => "add mapping".to_string(),
        DialogView::EditMapping(form) => format!("edit mapping '{}'", form.old_j1_field),
        DialogView::ResolveMismatch(form) => format!("resolve mismatch '{}'", form.j1_field),
    }
}
