//! Property-based tests for index document edits.
//!
//! These tests use proptest to generate index files and edits and verify that
//! the reconciliation invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::document::{Entry, IndexDocument, Upsert};
    use crate::validate::missing_markers;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const HEADER: &str = "## Key Files";

    fn file_name() -> impl Strategy<Value = String> {
        "[a-z_]{1,8}\\.(py|rs|md|txt)"
    }

    fn summary() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z ,.]{0,28}[A-Za-z.]"
    }

    fn existing_entries() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map(file_name(), summary(), 0..6)
    }

    fn document_with(entries: &BTreeMap<String, String>) -> String {
        let mut content = format!("# pkg\n\nA package.\n\n{}\n", HEADER);
        for (name, summary) in entries {
            content.push_str(&format!("- `{}`: {}\n", name, summary));
        }
        content
    }

    proptest! {
        /// Property: rendering a parsed document reproduces the input exactly
        #[test]
        fn parse_render_is_identity(lines in prop::collection::vec("[ -~]{0,20}", 0..8), trailing in any::<bool>()) {
            let mut content = lines.join("\n");
            if trailing {
                content.push('\n');
            }
            let doc = IndexDocument::parse(&content, HEADER);
            prop_assert_eq!(doc.render(), content);
        }

        /// Property: two upserts leave exactly one entry, holding the second summary
        #[test]
        fn upsert_twice_last_write_wins(
            entries in existing_entries(),
            name in file_name(),
            first in summary(),
            second in summary(),
        ) {
            let mut doc = IndexDocument::parse(&document_with(&entries), HEADER);
            doc.upsert(Entry::new(name.clone(), &first));
            doc.upsert(Entry::new(name.clone(), &second));

            let matching: Vec<_> = doc.entries().filter(|e| e.name == name).collect();
            prop_assert_eq!(matching.len(), 1);
            prop_assert_eq!(&matching[0].summary, &second);
        }

        /// Property: repeating an upsert is a no-op
        #[test]
        fn upsert_is_idempotent(entries in existing_entries(), name in file_name(), text in summary()) {
            let mut doc = IndexDocument::parse(&document_with(&entries), HEADER);
            doc.upsert(Entry::new(name.clone(), &text));
            let once = doc.render();
            prop_assert_eq!(doc.upsert(Entry::new(name, &text)), Upsert::Unchanged);
            prop_assert_eq!(doc.render(), once);
        }

        /// Property: remove after upsert leaves no entry and keeps the others in order
        #[test]
        fn remove_after_upsert_preserves_others(
            entries in existing_entries(),
            name in file_name(),
            text in summary(),
        ) {
            let mut doc = IndexDocument::parse(&document_with(&entries), HEADER);
            doc.upsert(Entry::new(name.clone(), &text));
            let others_before: Vec<Entry> = doc.entries().filter(|e| e.name != name).cloned().collect();

            prop_assert!(doc.remove(&name) >= 1);
            prop_assert!(doc.get(&name).is_none());
            let others_after: Vec<Entry> = doc.entries().cloned().collect();
            prop_assert_eq!(others_after, others_before);
        }

        /// Property: every document produced by upsert passes structural validation
        #[test]
        fn upsert_output_is_structurally_valid(
            prose in prop::collection::vec("[a-zA-Z ]{0,20}", 0..4),
            name in file_name(),
            text in summary(),
        ) {
            let mut doc = IndexDocument::parse(&prose.join("\n"), HEADER);
            doc.upsert(Entry::new(name, &text));
            let rendered = doc.render();
            // Prose without a heading still lacks "#"; the header line supplies it.
            prop_assert!(missing_markers(&rendered, HEADER).is_empty());
        }
    }
}
