//! One-shot catalog ingestion from a tabular text file.
//!
//! Expected format: comma-separated rows of `id,name,category[,group]`,
//! first row is a header and is skipped. Malformed rows (missing columns,
//! non-numeric id, duplicate id) are skipped with a warning. If the source
//! file is missing or produces zero items, a built-in fallback list is used
//! so the room can still start.

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};
use types::{Item, ItemId};

use crate::Catalog;

/// Load a catalog from `path`, falling back to the built-in list when the
/// file is unreadable or yields no valid rows.
pub fn load(path: impl AsRef<Path>) -> Catalog {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let items = parse_rows(&contents);
            if items.is_empty() {
                warn!(path = %path.display(), "catalog file had no valid rows, using fallback");
                Catalog::new(fallback_items())
            } else {
                info!(path = %path.display(), items = items.len(), "catalog loaded");
                Catalog::new(items)
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog file unavailable, using fallback");
            Catalog::new(fallback_items())
        }
    }
}

/// Parse catalog rows from file contents. The first line is treated as a
/// header and skipped; malformed rows are skipped with a warning.
pub fn parse_rows(contents: &str) -> Vec<Item> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for (lineno, line) in contents.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            warn!(lineno = lineno + 1, "skipping catalog row: too few columns");
            continue;
        }

        let id = match fields[0].parse::<u32>() {
            Ok(id) => ItemId(id),
            Err(_) => {
                warn!(lineno = lineno + 1, "skipping catalog row: bad id");
                continue;
            }
        };
        if !seen.insert(id) {
            warn!(lineno = lineno + 1, %id, "skipping catalog row: duplicate id");
            continue;
        }
        if fields[1].is_empty() || fields[2].is_empty() {
            warn!(lineno = lineno + 1, "skipping catalog row: empty name or category");
            continue;
        }

        let mut item = Item::new(id, fields[1], fields[2]);
        if let Some(group) = fields.get(3).filter(|g| !g.is_empty()) {
            item = item.with_group(*group);
        }
        items.push(item);
    }

    items
}

/// Built-in fallback list used when no catalog source is available.
fn fallback_items() -> Vec<Item> {
    vec![
        Item::new(ItemId(1), "Patrick Mahomes", "QB"),
        Item::new(ItemId(2), "Josh Allen", "QB"),
        Item::new(ItemId(3), "Christian McCaffrey", "RB"),
        Item::new(ItemId(4), "Derrick Henry", "RB"),
        Item::new(ItemId(5), "Cooper Kupp", "WR"),
        Item::new(ItemId(6), "Davante Adams", "WR"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_rows() {
        let src = "id,name,category,group\n\
                   1,Patrick Mahomes,QB,KC\n\
                   2,Josh Allen,QB,BUF\n";
        let items = parse_rows(src);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Patrick Mahomes");
        assert_eq!(items[0].group.as_deref(), Some("KC"));
    }

    #[test]
    fn test_group_column_optional() {
        let src = "id,name,category\n5,Cooper Kupp,WR\n";
        let items = parse_rows(src);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].group, None);
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let src = "id,name,category\n\
                   1,Patrick Mahomes,QB\n\
                   not-a-number,Bad Row,QB\n\
                   2,Missing Category\n\
                   \n\
                   3,Christian McCaffrey,RB\n";
        let items = parse_rows(src);
        let ids: Vec<_> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[test]
    fn test_duplicate_ids_skipped() {
        let src = "id,name,category\n1,Patrick Mahomes,QB\n1,Impostor,QB\n";
        let items = parse_rows(src);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Patrick Mahomes");
    }

    #[test]
    fn test_header_is_skipped() {
        // Header row would otherwise fail the id parse; it must not count
        // as a malformed data row either.
        let src = "id,name,category\n";
        assert!(parse_rows(src).is_empty());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let cat = load("/nonexistent/players.csv");
        assert_eq!(cat.len(), 6);
        assert_eq!(cat.all_available()[0].name, "Patrick Mahomes");
    }
}
