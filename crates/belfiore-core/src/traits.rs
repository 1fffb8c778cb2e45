// crates/belfiore-core/src/traits.rs
use crate::model::Place;
use crate::text::equals_folded;

/// Accent-blind name equality, used by
/// [`Connector::find_by_folded_name`](crate::Connector::find_by_folded_name)
/// to keep only whole-name hits out of a folded substring scan.
///
/// ```rust
/// use belfiore_core::traits::NameMatch;
///
/// struct Comune(&'static str);
/// impl NameMatch for Comune {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Comune("Forlì").is_named("FORLI"));
/// assert!(!Comune("Forlì del Sannio").is_named("forli"));
/// ```
pub trait NameMatch {
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }
}

impl NameMatch for Place {
    fn name_str(&self) -> &str {
        self.name()
    }
}
