use crate::classify::matcher::match_groups;
use crate::classify::resolver::{resolve_type, resolve_version};
use crate::taxonomy::Taxonomy;

/// How one matched group was resolved down to a canonical label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Name of the matched group (its first usage name).
    pub group: String,
    pub full_name: String,
    pub type_fallback: bool,
    pub version_fallback: bool,
}

/// Classifies free text against a borrowed, immutable [`Taxonomy`].
///
/// Stateless and `Sync`: one engine can serve any number of threads, and the
/// same text always yields the same labels.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationEngine<'t> {
    taxonomy: &'t Taxonomy,
}

impl<'t> ClassificationEngine<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Canonical labels for `text`, one per matched group in catalog order.
    ///
    /// Empty when no group's usage names occur in the text.
    pub fn classify(&self, text: &str) -> Vec<String> {
        self.explain(text)
            .into_iter()
            .map(|r| r.full_name)
            .collect()
    }

    /// Like [`classify`](Self::classify) but keeps the resolution trace.
    pub fn explain(&self, text: &str) -> Vec<Resolution> {
        let text = text.to_lowercase();

        match_groups(self.taxonomy, &text)
            .into_iter()
            .map(|group| {
                let resolved_type = resolve_type(&text, group);
                let resolved_version = resolve_version(&text, resolved_type.technology);

                if resolved_type.fallback || resolved_version.fallback {
                    tracing::debug!(
                        group = group.name(),
                        label = resolved_version.version.full_name(),
                        type_fallback = resolved_type.fallback,
                        version_fallback = resolved_version.fallback,
                        "resolved with default"
                    );
                }

                Resolution {
                    group: group.name().to_string(),
                    full_name: resolved_version.version.full_name().to_string(),
                    type_fallback: resolved_type.fallback,
                    version_fallback: resolved_version.fallback,
                }
            })
            .collect()
    }
}
