use lumir::{decl::Declaration, name::FqName};

use crate::magic::{COMPOSABLE_MARKER, SCREEN_NAME_SUFFIX};

/// Selects the declarations to instrument.
///
/// A declaration matches when it is function-like, carries the marker and its
/// name ends with the suffix. Name comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMatcher {
    marker: FqName,
    suffix: &'static str,
}

impl Default for ScreenMatcher {
    fn default() -> Self {
        Self {
            marker: FqName::parse(COMPOSABLE_MARKER),
            suffix: SCREEN_NAME_SUFFIX,
        }
    }
}

impl ScreenMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self) -> &FqName {
        &self.marker
    }

    pub fn matches(&self, declaration: &Declaration) -> bool {
        declaration.kind.is_function_like()
            && declaration.has_annotation(&self.marker)
            && declaration.name.ends_with(self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use lumir::{
        decl::{Annotation, DeclarationKind},
        types::Type,
    };

    use super::*;

    fn composable(name: &str) -> Declaration {
        Declaration::function(name, Vec::new(), Type::Unit)
            .with_annotation(Annotation::new(COMPOSABLE_MARKER))
    }

    #[test]
    fn marked_screens_match() {
        let matcher = ScreenMatcher::new();
        assert!(matcher.matches(&composable("LoginScreen")));
        assert!(matcher.matches(&composable("Screen")));
    }

    #[test]
    fn suffix_must_end_the_name() {
        let matcher = ScreenMatcher::new();
        assert!(!matcher.matches(&composable("ScreenTitle")));
        assert!(!matcher.matches(&composable("LoginScreens")));
        assert!(!matcher.matches(&composable("Loginscreen")));
    }

    #[test]
    fn marker_is_required() {
        let matcher = ScreenMatcher::new();
        let unmarked = Declaration::function("LoginScreen", Vec::new(), Type::Unit);
        assert!(!matcher.matches(&unmarked));

        let short_marker = Declaration::function("LoginScreen", Vec::new(), Type::Unit)
            .with_annotation(Annotation::new("Composable"));
        assert!(
            !matcher.matches(&short_marker),
            "only the qualified marker name counts"
        );
    }

    #[test]
    fn only_functions_match() {
        let mut property = composable("LoginScreen");
        property.kind = DeclarationKind::Property;
        property.body = None;
        assert!(!ScreenMatcher::new().matches(&property));
    }
}
