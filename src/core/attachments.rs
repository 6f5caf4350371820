//! Rules for the PDF documents attached to a candidate form.

use crate::domain::model::Attachment;
use serde::{Deserialize, Serialize};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const DEFAULT_MAX_FILES: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentLimits {
    pub max_files: usize,
    pub max_file_size: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl AttachmentLimits {
    fn too_many_message(&self) -> String {
        format!(
            "Você pode enviar no máximo {} arquivos. \
             Remova alguns arquivos antes de adicionar novos.",
            self.max_files
        )
    }

    fn too_large_message(&self) -> String {
        format!(
            "Arquivo muito grande. Máximo permitido: {}",
            format_file_size(self.max_file_size)
        )
    }
}

/// Checks a single file against the type and size rules.
pub fn check_attachment(file: &Attachment, limits: &AttachmentLimits) -> Option<String> {
    if file.content_type != PDF_CONTENT_TYPE {
        return Some("Apenas arquivos PDF são permitidos".to_string());
    }
    if file.size > limits.max_file_size {
        return Some(limits.too_large_message());
    }
    None
}

fn is_duplicate(existing: &[Attachment], file: &Attachment) -> bool {
    existing
        .iter()
        .any(|f| f.name == file.name && f.size == file.size)
}

/// Checks an already assembled attachment list, as found in a submitted form.
///
/// Returns one `"<name>: <reason>"` line per rejected file, or a single line
/// when the list holds too many files.
pub fn validate_attachments(files: &[Attachment], limits: &AttachmentLimits) -> Vec<String> {
    if files.len() > limits.max_files {
        return vec![limits.too_many_message()];
    }

    files
        .iter()
        .enumerate()
        .filter_map(|(i, file)| {
            check_attachment(file, limits)
                .or_else(|| {
                    is_duplicate(&files[..i], file)
                        .then(|| "Arquivo já foi adicionado".to_string())
                })
                .map(|reason| format!("{}: {}", file.name, reason))
        })
        .collect()
}

/// The files accepted so far, with the limits applied on every addition.
#[derive(Debug, Clone, Default)]
pub struct AttachmentSet {
    files: Vec<Attachment>,
    limits: AttachmentLimits,
    next_id: u64,
}

impl AttachmentSet {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            files: Vec::new(),
            limits,
            next_id: 1,
        }
    }

    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.files.len() >= self.limits.max_files
    }

    /// Adds a batch of files, assigning each accepted file a fresh id.
    ///
    /// A batch that would take the set past `max_files` is rejected whole.
    /// Otherwise invalid files and files already present (same name and size,
    /// either in the set or earlier in the batch) are skipped and reported.
    pub fn add_batch(&mut self, batch: Vec<Attachment>) -> Vec<String> {
        if self.files.len() + batch.len() > self.limits.max_files {
            return vec![self.limits.too_many_message()];
        }

        let mut errors = Vec::new();
        let mut accepted = Vec::new();
        for mut file in batch {
            let reason = check_attachment(&file, &self.limits).or_else(|| {
                (is_duplicate(&self.files, &file) || is_duplicate(&accepted, &file))
                    .then(|| "Arquivo já foi adicionado".to_string())
            });
            match reason {
                Some(reason) => errors.push(format!("{}: {}", file.name, reason)),
                None => {
                    file.id = self.next_id.max(1);
                    self.next_id = file.id + 1;
                    accepted.push(file);
                }
            }
        }

        self.files.extend(accepted);
        errors
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        self.files.len() != before
    }

    pub fn into_files(self) -> Vec<Attachment> {
        self.files
    }
}

/// Human-readable size with 1024 steps, e.g. `1.5 KB` or `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size: u64) -> Attachment {
        Attachment {
            id: 0,
            name: name.to_string(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            size,
        }
    }

    #[test]
    fn test_check_attachment() {
        let limits = AttachmentLimits::default();
        assert_eq!(check_attachment(&pdf("cv.pdf", 1024), &limits), None);

        let mut doc = pdf("cv.docx", 1024);
        doc.content_type = "application/msword".to_string();
        assert_eq!(
            check_attachment(&doc, &limits).as_deref(),
            Some("Apenas arquivos PDF são permitidos")
        );

        assert_eq!(
            check_attachment(&pdf("big.pdf", DEFAULT_MAX_FILE_SIZE + 1), &limits).as_deref(),
            Some("Arquivo muito grande. Máximo permitido: 10 MB")
        );
        assert_eq!(
            check_attachment(&pdf("edge.pdf", DEFAULT_MAX_FILE_SIZE), &limits),
            None
        );
    }

    #[test]
    fn test_add_batch_assigns_ids_and_skips_duplicates() {
        let mut set = AttachmentSet::new(AttachmentLimits::default());
        assert!(set.add_batch(vec![pdf("a.pdf", 10), pdf("b.pdf", 20)]).is_empty());
        assert_eq!(set.len(), 2);
        assert_eq!(set.files()[0].id, 1);
        assert_eq!(set.files()[1].id, 2);

        let errors = set.add_batch(vec![pdf("a.pdf", 10), pdf("c.pdf", 30)]);
        assert_eq!(errors, vec!["a.pdf: Arquivo já foi adicionado".to_string()]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.files()[2].id, 3);
    }

    #[test]
    fn test_add_batch_skips_repeats_within_batch() {
        let mut set = AttachmentSet::new(AttachmentLimits::default());
        let errors = set.add_batch(vec![pdf("a.pdf", 10), pdf("a.pdf", 10), pdf("a.pdf", 11)]);
        assert_eq!(errors, vec!["a.pdf: Arquivo já foi adicionado".to_string()]);
        assert_eq!(set.len(), 2);
        assert!(validate_attachments(set.files(), &AttachmentLimits::default()).is_empty());
    }

    #[test]
    fn test_add_batch_rejects_over_limit() {
        let mut set = AttachmentSet::new(AttachmentLimits {
            max_files: 2,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        });
        set.add_batch(vec![pdf("a.pdf", 10)]);
        let errors = set.add_batch(vec![pdf("b.pdf", 10), pdf("c.pdf", 10)]);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Você pode enviar no máximo 2 arquivos"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = AttachmentSet::new(AttachmentLimits::default());
        set.add_batch(vec![pdf("a.pdf", 10), pdf("b.pdf", 20)]);
        assert!(set.remove(1));
        assert!(!set.remove(1));
        assert_eq!(set.files()[0].name, "b.pdf");

        // ids are not reused after a removal
        set.add_batch(vec![pdf("c.pdf", 30)]);
        assert_eq!(set.files()[1].id, 3);
    }

    #[test]
    fn test_validate_attachments() {
        let limits = AttachmentLimits::default();
        let files = vec![pdf("a.pdf", 10), pdf("a.pdf", 10)];
        assert_eq!(
            validate_attachments(&files, &limits),
            vec!["a.pdf: Arquivo já foi adicionado".to_string()]
        );

        let six: Vec<_> = (0..6).map(|i| pdf(&format!("{}.pdf", i), 10)).collect();
        assert_eq!(validate_attachments(&six, &limits).len(), 1);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }
}
