//! doomdoc — turn compiled-language declarations and their doc comments into
//! a serializable, searchable documentation model.
//!
//! Pipeline: [`source`] snapshot → [`convert`] (using [`comment`] and
//! [`normalize`]) → [`tree::PackageTree`] grouping and indexing → [`render`].

pub mod comment;
pub mod convert;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod source;
pub mod tree;

pub use convert::convert;
pub use error::ConvertError;
pub use model::DocumentationModel;
pub use tree::PackageTree;

use anyhow::Result;
use source::Snapshot;

/// Run both passes over a snapshot: convert and insert every declaration,
/// then build the search index.
///
/// Package docs are attached once all declarations are in, and only to
/// packages that received a type, so bucket order follows type discovery.
/// Unsupported declaration kinds abort the run when `strict` is set and are
/// skipped with a warning otherwise.
pub fn build_tree(snapshot: &Snapshot, strict: bool) -> Result<PackageTree> {
    let mut tree = PackageTree::new();

    for decl in &snapshot.declarations {
        if !strict && !decl.kind.is_supported() {
            tracing::warn!(
                kind = %decl.kind,
                name = %decl.qualified_name,
                "skipping unsupported declaration"
            );
            continue;
        }
        let converted = convert(decl)?;
        tree.add_type(&decl.package_name(), converted);
    }

    for package in &snapshot.packages {
        if let Some(doc) = comment::parse(package.doc.as_ref()) {
            if !tree.set_package_doc(&package.name, doc) {
                tracing::debug!(package = %package.name, "no types in package, dropping its doc");
            }
        }
    }

    tree.build_search_index();
    Ok(tree)
}
