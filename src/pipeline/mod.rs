//! Document processing pipeline.
//!
//! The pipeline runs a fixed sequence of stages over a parsed document
//! body: first-page sentinel removal, conditional region removal for each
//! tag family, row filtering, tag stripping, and structural cleanup. Stage
//! order matters: regions and rows are resolved while their tags are still
//! present, then every remaining tag is stripped, and the cleanup passes
//! collapse whatever blank structure the earlier stages left behind.

mod cleanup;
mod first_page;
mod regions;
mod rows;
mod strip;

use serde::Serialize;

use crate::document::DocxDocument;
use crate::error::Result;
use crate::options::ProcessOptions;
use crate::tag::{TagFamily, TagLexicon};

/// Non-fatal condition noticed while processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// A region opened by a removal-labelled start tag was never closed
    /// before the end of the document body. Everything from the start tag
    /// onward was removed.
    UnterminatedRegion { family: String },
}

/// Summary of everything a pipeline run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    /// Whether the leading sentinel page was deleted.
    pub first_page_removed: bool,
    /// Body nodes deleted by region removal.
    pub nodes_removed: usize,
    /// Body nodes whose text was trimmed in place by region removal.
    pub nodes_trimmed: usize,
    /// Table rows deleted by the row filter.
    pub rows_removed: usize,
    /// Tag occurrences erased by the stripping stage.
    pub tags_stripped: usize,
    /// Page-break nodes removed by the blank-page pass.
    pub breaks_removed: usize,
    /// Empty paragraphs removed by the purge pass.
    pub paragraphs_purged: usize,
    /// Non-fatal conditions noticed along the way.
    pub warnings: Vec<PipelineWarning>,
}

impl ProcessReport {
    /// True when the run changed nothing at all.
    pub fn is_noop(&self) -> bool {
        !self.first_page_removed
            && self.nodes_removed == 0
            && self.nodes_trimmed == 0
            && self.rows_removed == 0
            && self.tags_stripped == 0
            && self.breaks_removed == 0
            && self.paragraphs_purged == 0
    }
}

/// Configured processing pipeline.
///
/// A pipeline is cheap to build and can process any number of documents.
pub struct Pipeline {
    options: ProcessOptions,
    lexicon: TagLexicon,
}

impl Pipeline {
    /// Build a pipeline from validated options.
    pub fn new(options: ProcessOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            lexicon: TagLexicon::new(),
        })
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Run every stage over the document, in order, and report what changed.
    pub fn process(&self, doc: &mut DocxDocument) -> ProcessReport {
        let mut report = ProcessReport::default();
        let label = self.options.removal_label.as_str();
        let body = doc.body_mut();

        if self.options.first_page_rule {
            report.first_page_removed =
                first_page::remove_sentinel_page(body, &self.options.sentinel);
        }

        for family in [TagFamily::Block, TagFamily::Section] {
            regions::remove_regions(body, family, label, &self.lexicon, &mut report);
        }

        report.rows_removed = rows::filter_rows(body, label, &self.lexicon);
        report.tags_stripped = strip::strip_tags(body, &self.lexicon);
        let (breaks, purged) = cleanup::clean_structure(body);
        report.breaks_removed = breaks;
        report.paragraphs_purged = purged;

        log::info!(
            "pipeline done: removed {} node(s), trimmed {}, filtered {} row(s), \
             stripped {} tag(s), cleaned {} break(s) and {} paragraph(s)",
            report.nodes_removed,
            report.nodes_trimmed,
            report.rows_removed,
            report.tags_stripped,
            report.breaks_removed,
            report.paragraphs_purged
        );
        report
    }
}
