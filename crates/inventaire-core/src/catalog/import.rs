//! Catalog import validation.
//!
//! Normalizes externally-parsed tabular rows (first row is the header) into
//! the canonical [`ProductReference`] shape. The surrounding spreadsheet
//! codec is an external collaborator; this module only sees rows of strings.

use super::model::ProductReference;
use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// Expected header row of an imported catalog sheet, in column order.
pub const CATALOG_HEADER: [&str; 3] = ["CodeBarres", "CodeArticle", "Libelle"];

/// Errors that fail a catalog import as a whole.
///
/// Individual malformed data rows are skipped with a warning instead; only
/// an import that yields no usable reference at all is an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The sheet contained no rows at all, not even a header.
    #[error("the imported sheet contains no rows")]
    EmptySheet,

    /// The header row did not match [`CATALOG_HEADER`] exactly
    /// (case-sensitive, same column order).
    #[error("unexpected header row {found:?}, expected {expected:?}")]
    HeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Every data row was malformed or a duplicate.
    #[error("no valid article rows found in the imported sheet")]
    NoValidRows,
}

/// Validates and normalizes imported catalog rows.
///
/// Rules:
/// - the first row must be exactly `CodeBarres | CodeArticle | Libelle`
///   (extra trailing columns are ignored);
/// - data rows with fewer than three columns are skipped with a warning;
/// - duplicate barcodes are deduplicated first-wins with a warning, so the
///   result always satisfies the catalog's unique-barcode invariant;
/// - an import that leaves no valid row fails as a whole.
///
/// The result replaces the catalog wholesale; it is never merged with a
/// previously imported catalog.
pub fn parse_catalog_rows(rows: &[Vec<String>]) -> Result<Vec<ProductReference>, ImportError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(ImportError::EmptySheet);
    };

    let header_matches = header.len() >= CATALOG_HEADER.len()
        && header
            .iter()
            .zip(CATALOG_HEADER.iter())
            .all(|(found, expected)| found == expected);
    if !header_matches {
        return Err(ImportError::HeaderMismatch {
            expected: CATALOG_HEADER.iter().map(|c| c.to_string()).collect(),
            found: header.clone(),
        });
    }

    let mut references = Vec::with_capacity(data.len());
    let mut seen_barcodes: HashSet<&str> = HashSet::new();
    for row in data {
        let [barcode, code, label, ..] = row.as_slice() else {
            warn!(columns = row.len(), "skipping malformed catalog row");
            continue;
        };
        if !seen_barcodes.insert(barcode) {
            warn!(barcode = %barcode, "skipping duplicate barcode in catalog import");
            continue;
        }
        references.push(ProductReference::new(barcode, code, label));
    }

    if references.is_empty() {
        return Err(ImportError::NoValidRows);
    }

    Ok(references)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_valid_sheet() {
        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["123", "A1", "Widget"]),
        ];

        let catalog = parse_catalog_rows(&rows).unwrap();

        assert_eq!(catalog, vec![ProductReference::new("123", "A1", "Widget")]);
    }

    #[test]
    fn test_empty_sheet_is_rejected() {
        assert_eq!(parse_catalog_rows(&[]), Err(ImportError::EmptySheet));
    }

    #[test]
    fn test_header_mismatch_fails_whole_import() {
        let rows = vec![
            row(&["Barcode", "CodeArticle", "Libelle"]),
            row(&["123", "A1", "Widget"]),
        ];

        let err = parse_catalog_rows(&rows).unwrap_err();
        assert!(matches!(err, ImportError::HeaderMismatch { .. }));
    }

    #[test]
    fn test_header_is_case_sensitive() {
        let rows = vec![
            row(&["codebarres", "codearticle", "libelle"]),
            row(&["123", "A1", "Widget"]),
        ];

        assert!(matches!(
            parse_catalog_rows(&rows),
            Err(ImportError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_short_rows_are_skipped_not_fatal() {
        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["123", "A1"]),
            row(&["456", "B2", "Gadget"]),
        ];

        let catalog = parse_catalog_rows(&rows).unwrap();

        assert_eq!(catalog, vec![ProductReference::new("456", "B2", "Gadget")]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle", "Stock"]),
            row(&["123", "A1", "Widget", "42"]),
        ];

        let catalog = parse_catalog_rows(&rows).unwrap();

        assert_eq!(catalog, vec![ProductReference::new("123", "A1", "Widget")]);
    }

    #[test]
    fn test_duplicate_barcodes_first_wins() {
        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["123", "A1", "Widget"]),
            row(&["123", "Z9", "Impostor"]),
        ];

        let catalog = parse_catalog_rows(&rows).unwrap();

        assert_eq!(catalog, vec![ProductReference::new("123", "A1", "Widget")]);
    }

    #[test]
    fn test_only_malformed_rows_is_an_error() {
        let rows = vec![
            row(&["CodeBarres", "CodeArticle", "Libelle"]),
            row(&["123"]),
            row(&[]),
        ];

        assert_eq!(parse_catalog_rows(&rows), Err(ImportError::NoValidRows));
    }
}
