//! # untag
//!
//! Conditional-content removal for Word (DOCX) templates.
//!
//! Template authors mark optional content with inline tags such as
//! `[[BLOCK_START0]]` / `[[BLOCK_END]]`, `[[SECTION_START0]]` /
//! `[[SECTION_END]]` and `[[ROW0]]`. This library deletes every region and
//! table row carrying the removal label, strips all remaining tags, and
//! cleans up the blank structure the deletions leave behind, producing a
//! finished document with no trace of the tagging scheme.
//!
//! ## Quick Start
//!
//! ```no_run
//! use untag::process_file;
//!
//! fn main() -> untag::Result<()> {
//!     let report = process_file("template.docx", "output.docx")?;
//!     println!("removed {} node(s)", report.nodes_removed);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Region removal**: BLOCK and SECTION regions trimmed at tag precision
//! - **Row filtering**: tagged table rows deleted without disturbing layout
//! - **Tag stripping**: every tag erased, whatever its label
//! - **Structural cleanup**: blank pages and empty paragraphs collapsed
//! - **First-page rule**: sentinel cover pages dropped automatically
//! - **Parallel batches**: processes many files at once via Rayon

pub mod document;
pub mod error;
pub mod options;
pub mod package;
pub mod pipeline;
pub mod tag;
pub mod text;
pub mod xml;

// Re-export commonly used types
pub use document::DocxDocument;
pub use error::{Error, Result};
pub use options::ProcessOptions;
pub use package::Package;
pub use pipeline::{Pipeline, PipelineWarning, ProcessReport};
pub use tag::{TagFamily, TagKind, TagMatch};

use std::path::Path;

use rayon::prelude::*;

/// Process a DOCX file and write the result to another path.
///
/// # Arguments
///
/// * `input` - Path to the tagged template
/// * `output` - Path the processed document is written to
///
/// # Example
///
/// ```no_run
/// use untag::process_file;
///
/// let report = process_file("template.docx", "output.docx").unwrap();
/// println!("{} row(s) filtered", report.rows_removed);
/// ```
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ProcessReport> {
    process_file_with_options(input, output, ProcessOptions::default())
}

/// Process a DOCX file with custom options.
///
/// # Example
///
/// ```no_run
/// use untag::{process_file_with_options, ProcessOptions};
///
/// let options = ProcessOptions::new().with_label("2");
/// let report = process_file_with_options("in.docx", "out.docx", options).unwrap();
/// ```
pub fn process_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: ProcessOptions,
) -> Result<ProcessReport> {
    let mut package = Package::open(&input)?;
    let report = process_package(&mut package, options)?;
    package.save(&output)?;
    Ok(report)
}

/// Process DOCX content held in memory and return the rewritten bytes.
///
/// # Example
///
/// ```no_run
/// use untag::{process_bytes, ProcessOptions};
///
/// let data = std::fs::read("template.docx").unwrap();
/// let (output, report) = process_bytes(&data, ProcessOptions::default()).unwrap();
/// std::fs::write("output.docx", output).unwrap();
/// assert!(report.warnings.is_empty());
/// ```
pub fn process_bytes(data: &[u8], options: ProcessOptions) -> Result<(Vec<u8>, ProcessReport)> {
    let mut package = Package::from_bytes(data)?;
    let report = process_package(&mut package, options)?;
    let bytes = package.to_bytes()?;
    Ok((bytes, report))
}

/// Process a batch of files in parallel.
///
/// Each entry pairs an input path with its output path. Results come back
/// in the same order as the inputs, one `Result` per file, so a single bad
/// file does not abort the rest of the batch.
pub fn process_files_parallel<P, Q>(
    jobs: &[(P, Q)],
    options: &ProcessOptions,
) -> Vec<Result<ProcessReport>>
where
    P: AsRef<Path> + Sync,
    Q: AsRef<Path> + Sync,
{
    jobs.par_iter()
        .map(|(input, output)| process_file_with_options(input, output, options.clone()))
        .collect()
}

fn process_package(package: &mut Package, options: ProcessOptions) -> Result<ProcessReport> {
    let document_xml = package.document_part()?;
    let mut doc = DocxDocument::parse(document_xml)?;
    let pipeline = Pipeline::new(options)?;
    let report = pipeline.process(&mut doc);
    package.set_document_part(doc.to_bytes()?)?;
    Ok(report)
}
