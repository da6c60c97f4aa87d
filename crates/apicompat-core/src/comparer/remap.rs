use super::{ElementComparer, Side};
use crate::errors::{ApiCompatError, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Characters that separate type references inside a signature string
const REFERENCE_DELIMITERS: &[char] = &['<', '>', ',', '[', ']', '(', ')', ' ', '&', '*'];

/// Characters at which a qualified name may be cut into a remappable prefix
const SEGMENT_BOUNDARIES: &[char] = &['.', '`', '+'];

/// Old-qualified-name → new-qualified-name pairs
///
/// A name is rewritten through its longest prefix that ends on a segment
/// boundary, so `Old.Ns -> New.Ns` also maps `Old.Ns.Widget` and
/// `Old.Ns.Inner.Widget`, but not `Old.Nsx.Widget`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapTable {
    entries: BTreeMap<String, String>,
}

impl RemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs
    ///
    /// # Errors
    ///
    /// `ConflictingRemap` when one old name maps to two different targets.
    pub fn from_pairs<I, O, N>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (O, N)>,
        O: Into<String>,
        N: Into<String>,
    {
        let mut table = Self::new();
        for (old, new) in pairs {
            table.insert(old.into(), new.into())?;
        }
        Ok(table)
    }

    /// Parse the line format: `Old.Name -> New.Name` (or `Old.Name=New.Name`),
    /// blank lines and `#` comments ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidRemapRecord` for a line that is not a pair of non-empty names
    /// - `ConflictingRemap` for contradictory entries
    pub fn parse(text: &str) -> Result<Self> {
        let mut table = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let pair = line.split_once("->").or_else(|| line.split_once('='));
            let (old, new) = match pair {
                Some((old, new)) if !old.trim().is_empty() && !new.trim().is_empty() => {
                    (old.trim(), new.trim())
                }
                _ => {
                    return Err(ApiCompatError::InvalidRemapRecord {
                        line: idx + 1,
                        content: line.to_string(),
                    })
                }
            };
            table.insert(old.to_string(), new.to_string())?;
        }
        Ok(table)
    }

    fn insert(&mut self, old: String, new: String) -> Result<()> {
        if let Some(existing) = self.entries.get(&old) {
            if *existing != new {
                return Err(ApiCompatError::ConflictingRemap {
                    old,
                    first: existing.clone(),
                    second: new,
                });
            }
            return Ok(());
        }
        self.entries.insert(old, new);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite every qualified name inside `reference`.
    pub fn rewrite<'n>(&self, reference: &'n str) -> Cow<'n, str> {
        if self.entries.is_empty() {
            return Cow::Borrowed(reference);
        }

        let mut out = String::with_capacity(reference.len());
        let mut changed = false;
        let mut token_start = 0;
        for (idx, ch) in reference.char_indices() {
            if REFERENCE_DELIMITERS.contains(&ch) {
                changed |= self.push_rewritten(&reference[token_start..idx], &mut out);
                out.push(ch);
                token_start = idx + ch.len_utf8();
            }
        }
        changed |= self.push_rewritten(&reference[token_start..], &mut out);

        if changed {
            Cow::Owned(out)
        } else {
            Cow::Borrowed(reference)
        }
    }

    fn push_rewritten(&self, token: &str, out: &mut String) -> bool {
        match self.longest_prefix(token) {
            Some((prefix_len, replacement)) => {
                out.push_str(replacement);
                out.push_str(&token[prefix_len..]);
                true
            }
            None => {
                out.push_str(token);
                false
            }
        }
    }

    fn longest_prefix(&self, token: &str) -> Option<(usize, &str)> {
        if token.is_empty() {
            return None;
        }
        let mut end = token.len();
        loop {
            if let Some(replacement) = self.entries.get(&token[..end]) {
                return Some((end, replacement.as_str()));
            }
            end = token[..end].rfind(SEGMENT_BOUNDARIES)?;
            if end == 0 {
                return None;
            }
        }
    }
}

/// Rewrites contract-side names through a [`RemapTable`] before comparing
#[derive(Debug, Clone)]
pub struct RemapComparer {
    table: RemapTable,
}

impl RemapComparer {
    pub fn new(table: RemapTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RemapTable {
        &self.table
    }
}

impl ElementComparer for RemapComparer {
    fn canonical_name<'n>(&self, name: &'n str, side: Side) -> Cow<'n, str> {
        match side {
            Side::Contract => self.table.rewrite(name),
            Side::Implementation => Cow::Borrowed(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_separators() {
        let table = RemapTable::parse(
            "# renamed in v2\nOld.Ns -> New.Ns\n\nLegacy.Widget=Modern.Widget\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rewrite("Old.Ns"), "New.Ns");
        assert_eq!(table.rewrite("Legacy.Widget"), "Modern.Widget");
    }

    #[test]
    fn test_parse_rejects_half_pairs() {
        let err = RemapTable::parse("Old.Ns ->\n").unwrap_err();
        assert_eq!(
            err,
            ApiCompatError::InvalidRemapRecord {
                line: 1,
                content: "Old.Ns ->".to_string()
            }
        );
        assert!(RemapTable::parse("just-a-name").is_err());
    }

    #[test]
    fn test_conflicting_entries() {
        let err = RemapTable::from_pairs([("A", "B"), ("A", "C")]).unwrap_err();
        assert!(matches!(err, ApiCompatError::ConflictingRemap { .. }));
        assert!(RemapTable::from_pairs([("A", "B"), ("A", "B")]).is_ok());
    }

    #[test]
    fn test_rewrite_respects_segment_boundaries() {
        let table = RemapTable::from_pairs([("Old.Ns", "New.Ns")]).unwrap();
        assert_eq!(table.rewrite("Old.Ns.Widget"), "New.Ns.Widget");
        assert_eq!(table.rewrite("Old.Ns.Inner.Widget`1"), "New.Ns.Inner.Widget`1");
        assert_eq!(table.rewrite("Old.Nsx.Widget"), "Old.Nsx.Widget");
        assert!(matches!(table.rewrite("System.Int32"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table =
            RemapTable::from_pairs([("Old", "Mid"), ("Old.Ns.Widget", "New.Gadget")]).unwrap();
        assert_eq!(table.rewrite("Old.Ns.Widget"), "New.Gadget");
        assert_eq!(table.rewrite("Old.Ns.Other"), "Mid.Ns.Other");
    }

    #[test]
    fn test_rewrite_inside_generic_references() {
        let table = RemapTable::from_pairs([("Old.Ns", "New.Ns")]).unwrap();
        assert_eq!(
            table.rewrite("System.Collections.Generic.List`1<Old.Ns.Widget>"),
            "System.Collections.Generic.List`1<New.Ns.Widget>"
        );
        assert_eq!(table.rewrite("Old.Ns.Widget[]"), "New.Ns.Widget[]");
    }

    #[test]
    fn test_only_contract_side_is_rewritten() {
        let cmp = RemapComparer::new(RemapTable::from_pairs([("Old.Ns", "New.Ns")]).unwrap());
        assert_eq!(cmp.canonical_name("Old.Ns.A", Side::Contract), "New.Ns.A");
        assert_eq!(cmp.canonical_name("Old.Ns.A", Side::Implementation), "Old.Ns.A");
        assert!(cmp.same_type_reference("Old.Ns.A", "New.Ns.A"));
    }
}
