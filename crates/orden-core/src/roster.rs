//! # Preparer Roster
//!
//! The small fixed set of people who can price an order. Every preparer id
//! that reaches the numbering rules has been checked against this list.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::PreparerId;
use crate::validation::validate_roster;

/// Configured preparers, in toggle order.
///
/// Never empty: every constructor, deserialization included, goes through
/// [`Roster::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    default: PreparerId,
    preparers: Vec<PreparerId>,
}

impl Roster {
    /// Builds a roster from raw ids.
    ///
    /// Ids are trimmed; the list must be non-empty and free of duplicates.
    ///
    /// ## Example
    /// ```rust
    /// use orden_core::roster::Roster;
    ///
    /// let roster = Roster::new(["Nacho", "Pepo"]).unwrap();
    /// assert_eq!(roster.default_preparer().as_str(), "Nacho");
    /// assert!(Roster::new(Vec::<String>::new()).is_err());
    /// ```
    pub fn new<I, S>(ids: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(|s| s.into().trim().to_string()).collect();
        let invalid = |reason: String| CoreError::InvalidRoster { reason };
        validate_roster(&ids).map_err(|e| invalid(e.to_string()))?;

        let preparers: Vec<PreparerId> = ids.into_iter().map(PreparerId::new).collect();
        let default = preparers
            .first()
            .cloned()
            .ok_or_else(|| invalid("no preparers".to_string()))?;
        Ok(Roster { default, preparers })
    }

    /// All preparers in order.
    pub fn preparers(&self) -> &[PreparerId] {
        &self.preparers
    }

    /// The first configured preparer.
    pub fn default_preparer(&self) -> &PreparerId {
        &self.default
    }

    /// Returns the matching roster entry, if any.
    pub fn find(&self, id: &str) -> Option<&PreparerId> {
        self.preparers.iter().find(|p| p.as_str() == id)
    }

    /// Like [`Self::find`], but an unknown id is an error.
    pub fn require(&self, id: &str) -> CoreResult<PreparerId> {
        self.find(id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownPreparer(id.to_string()))
    }

    /// The saved preparer when it is still in the roster, else the default.
    pub fn resolve_saved(&self, saved: Option<&str>) -> PreparerId {
        saved
            .and_then(|id| self.find(id))
            .unwrap_or_else(|| self.default_preparer())
            .clone()
    }
}

impl Default for Roster {
    fn default() -> Self {
        let preparers: Vec<PreparerId> = crate::DEFAULT_PREPARERS
            .iter()
            .map(|id| PreparerId::new(*id))
            .collect();
        Roster {
            default: PreparerId::new(crate::DEFAULT_PREPARERS[0]),
            preparers,
        }
    }
}

impl TryFrom<Vec<String>> for Roster {
    type Error = CoreError;

    fn try_from(ids: Vec<String>) -> CoreResult<Self> {
        Roster::new(ids)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster
            .preparers
            .into_iter()
            .map(|p| p.as_str().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = Roster::default();
        assert_eq!(roster.preparers().len(), 2);
        assert_eq!(roster.default_preparer().as_str(), "Nacho");
    }

    #[test]
    fn test_rejects_duplicates_and_blanks() {
        assert!(Roster::new(["Nacho", "Nacho"]).is_err());
        assert!(Roster::new(["Nacho", "  "]).is_err());
        assert!(Roster::new([" Nacho ", "Pepo"]).is_ok());
    }

    #[test]
    fn test_deserialize_goes_through_validation() {
        let roster: Roster = serde_json::from_str(r#"["Ana", "Beto"]"#).unwrap();
        assert_eq!(roster.default_preparer().as_str(), "Ana");
        assert_eq!(serde_json::to_string(&roster).unwrap(), r#"["Ana","Beto"]"#);

        assert!(serde_json::from_str::<Roster>("[]").is_err());
        assert!(serde_json::from_str::<Roster>(r#"["Ana", "Ana"]"#).is_err());
    }

    #[test]
    fn test_require_unknown_preparer() {
        let roster = Roster::default();
        assert!(roster.require("Pepo").is_ok());
        assert!(matches!(
            roster.require("Juan"),
            Err(CoreError::UnknownPreparer(id)) if id == "Juan"
        ));
    }

    #[test]
    fn test_resolve_saved() {
        let roster = Roster::default();
        assert_eq!(roster.resolve_saved(Some("Pepo")).as_str(), "Pepo");
        assert_eq!(roster.resolve_saved(Some("Juan")).as_str(), "Nacho");
        assert_eq!(roster.resolve_saved(None).as_str(), "Nacho");
    }
}
