use crate::classify::matcher::any_match;
use crate::taxonomy::{Technology, TechnologyGroup, VersionInfo};

/// The technology chosen within a group.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolution<'t> {
    pub technology: &'t Technology,
    /// No type name matched; the group's first technology was adopted.
    pub fallback: bool,
}

/// The version chosen within a technology.
#[derive(Debug, Clone, Copy)]
pub struct VersionResolution<'t> {
    pub version: &'t VersionInfo,
    /// No version number matched; the technology's first version was adopted.
    pub fallback: bool,
}

/// Pick the first technology (in declaration order) whose type names occur in
/// `text`, or the group's first technology when none do.
pub fn resolve_type<'t>(text: &str, group: &'t TechnologyGroup) -> TypeResolution<'t> {
    group
        .technologies()
        .iter()
        .find(|tech| any_match(tech.type_names(), text))
        .map(|technology| TypeResolution {
            technology,
            fallback: false,
        })
        .unwrap_or_else(|| TypeResolution {
            technology: group.default_technology(),
            fallback: true,
        })
}

/// Pick the first version (in declaration order) whose number occurs in
/// `text`, or the technology's first version when none does.
pub fn resolve_version<'t>(text: &str, technology: &'t Technology) -> VersionResolution<'t> {
    technology
        .versions()
        .iter()
        .find(|v| v.number().is_match(text))
        .map(|version| VersionResolution {
            version,
            fallback: false,
        })
        .unwrap_or_else(|| VersionResolution {
            version: technology.default_version(),
            fallback: true,
        })
}
