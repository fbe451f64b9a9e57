//! Source tree reader: builds a [`DocumentMap`] from a directory.
//!
//! Keys are paths relative to the source directory with `/` separators.
//! With front matter enabled, UTF-8 files have their leading block parsed
//! into attributes; the body is kept as raw bytes. Other files are loaded
//! verbatim.

use std::path::Path;

use strata_core::{files_under, Document, DocumentMap};

use crate::error::{io_err, PipelineError};
use crate::frontmatter;

/// Read every file under `dir` into a [`DocumentMap`].
pub fn read_documents(dir: &Path, frontmatter: bool) -> Result<DocumentMap, PipelineError> {
    let mut documents = DocumentMap::new();
    for file in files_under(dir)? {
        let path = file.path;
        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        let document = if frontmatter {
            match String::from_utf8(bytes) {
                Ok(text) => {
                    let parsed = frontmatter::parse(&text)
                        .map_err(|source| PipelineError::FrontMatter { path, source })?;
                    Document {
                        contents: parsed.body.into_bytes().into(),
                        attributes: parsed.attributes,
                    }
                }
                Err(err) => Document::new(err.into_bytes()),
            }
        } else {
            Document::new(bytes)
        };
        documents.insert(file.key, document);
    }
    tracing::debug!(dir = %dir.display(), count = documents.len(), "read source documents");
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strata_core::Contents;
    use tempfile::TempDir;

    #[test]
    fn reads_nested_files_with_front_matter() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("posts")).unwrap();
        std::fs::write(
            dir.path().join("posts/hello.md"),
            "---\ntitle: Hello\ntemplate: post.html\n---\nHi there\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("logo.png"), [0x89u8, b'P', b'N', b'G', 0xff]).unwrap();

        let docs = read_documents(dir.path(), true).unwrap();
        assert_eq!(docs.len(), 2);
        let post = &docs["posts/hello.md"];
        assert_eq!(post.attributes["title"], json!("Hello"));
        assert_eq!(post.template(), Some("post.html"));
        assert_eq!(post.contents, Contents::Bytes(b"Hi there\n".to_vec()));
        assert!(docs["logo.png"].attributes.is_empty());
    }

    #[test]
    fn front_matter_disabled_keeps_raw_bytes() {
        let dir = TempDir::new().unwrap();
        let raw = "---\ntitle: Hello\n---\nbody";
        std::fs::write(dir.path().join("a.md"), raw).unwrap();
        let docs = read_documents(dir.path(), false).unwrap();
        assert!(docs["a.md"].attributes.is_empty());
        assert_eq!(docs["a.md"].contents.as_bytes(), raw.as_bytes());
    }

    #[test]
    fn bad_front_matter_names_the_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.md"), "---\n- a list\n---\nbody").unwrap();
        let err = read_documents(dir.path(), true).unwrap_err();
        assert!(matches!(err, PipelineError::FrontMatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }
}
