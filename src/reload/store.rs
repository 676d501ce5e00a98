//! The currently published mapping document.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;
use tracing::Span;

use crate::document::Document;
use crate::observability::metrics;
use crate::reload::loader::{read_document, LoadError};

/// One published version of the mapping file.
#[derive(Debug)]
pub struct Snapshot {
    /// The parsed tree.
    pub document: Document,
    /// Modification time of the source file when it was read.
    pub modified: SystemTime,
}

/// Single-writer, many-reader holder of the current [`Snapshot`].
///
/// A store cannot exist without a successfully loaded document: [`open`]
/// performs the first load and fails if it does.
///
/// [`open`]: MappingStore::open
pub struct MappingStore {
    source: PathBuf,
    current: ArcSwap<Snapshot>,
    span: Span,
}

impl MappingStore {
    /// Load `source` for the first time.
    pub fn open(source: impl Into<PathBuf>, span: Span) -> Result<Self, LoadError> {
        let source = source.into();
        let (document, modified) = span.in_scope(|| read_document(&source))?;

        span.in_scope(|| {
            tracing::info!(
                source = %source.display(),
                entries = document.leaf_count(),
                "Mapping file loaded"
            );
        });
        metrics::record_reload("ok");
        metrics::record_document_entries(document.leaf_count());

        Ok(Self {
            source,
            current: ArcSwap::from_pointee(Snapshot { document, modified }),
            span,
        })
    }

    /// Re-read the source file and publish it.
    ///
    /// On error nothing is published and the previous snapshot stays current.
    pub fn load(&self) -> Result<(), LoadError> {
        let _entered = self.span.enter();

        let (document, modified) = match read_document(&self.source) {
            Ok(loaded) => loaded,
            Err(e) => {
                metrics::record_reload(e.kind());
                return Err(e);
            }
        };
        let entries = document.leaf_count();

        self.current.store(Arc::new(Snapshot { document, modified }));

        tracing::info!(
            source = %self.source.display(),
            entries,
            "Mapping file reloaded"
        );
        metrics::record_reload("ok");
        metrics::record_document_entries(entries);
        Ok(())
    }

    /// The most recently published snapshot.
    #[inline]
    pub fn current(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Path of the mapping file backing this store.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub(crate) fn span(&self) -> &Span {
        &self.span
    }
}
