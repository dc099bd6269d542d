//! Text patches layered over a token store.
//!
//! A fixer never edits annotations in place. It records replacements and
//! insertions by token position, renders the patched text, and runs the
//! whole pipeline again to get a consistent store.

use std::collections::BTreeMap;

use crate::store::TokenStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Patch {
    before: String,
    replacement: Option<String>,
    after: String,
}

/// Pending edits against one [`TokenStore`].
///
/// ```
/// use phptokens::{Config, Overlay, tokenize};
///
/// let store = tokenize("<?php echo $a;", &Config::new());
/// let mut overlay = Overlay::new(&store);
/// overlay.replace(3, "$b").add_after(3, " . 'x'");
/// assert_eq!(overlay.contents(), "<?php echo $b . 'x';");
/// ```
#[derive(Debug, Clone)]
pub struct Overlay<'s> {
    store: &'s TokenStore,
    patches: BTreeMap<usize, Patch>,
}

impl<'s> Overlay<'s> {
    #[must_use]
    pub const fn new(store: &'s TokenStore) -> Self {
        Self {
            store,
            patches: BTreeMap::new(),
        }
    }

    /// Replace the text of the token at `position`. A later replacement of
    /// the same token wins.
    pub fn replace(&mut self, position: usize, text: impl Into<String>) -> &mut Self {
        self.patch(position).replacement = Some(text.into());
        self
    }

    /// Insert text before the token at `position`.
    pub fn add_before(&mut self, position: usize, text: impl AsRef<str>) -> &mut Self {
        self.patch(position).before.push_str(text.as_ref());
        self
    }

    /// Insert text after the token at `position`.
    pub fn add_after(&mut self, position: usize, text: impl AsRef<str>) -> &mut Self {
        self.patch(position).after.push_str(text.as_ref());
        self
    }

    /// Drop every recorded edit.
    pub fn clear(&mut self) {
        self.patches.clear();
    }

    /// Number of tokens with at least one edit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    fn patch(&mut self, position: usize) -> &mut Patch {
        if position >= self.store.len() {
            tracing::warn!(position, len = self.store.len(), "edit outside the token stream");
        }
        self.patches.entry(position).or_default()
    }

    /// The patched source text. Untouched tokens render their original,
    /// unexpanded text; edits past the last token are ignored.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for (position, token) in self.store.iter().enumerate() {
            match self.patches.get(&position) {
                Some(patch) => {
                    out.push_str(&patch.before);
                    out.push_str(
                        patch
                            .replacement
                            .as_deref()
                            .unwrap_or(token.source_text()),
                    );
                    out.push_str(&patch.after);
                }
                None => out.push_str(token.source_text()),
            }
        }
        out
    }

    /// Run the full pipeline over [`Self::contents`] with the store's
    /// configuration.
    #[must_use]
    #[tracing::instrument(level = "debug", skip_all, fields(edits = self.patches.len()))]
    pub fn retokenize(&self) -> TokenStore {
        crate::tokenize(&self.contents(), self.store.config())
    }
}
