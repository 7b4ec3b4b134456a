//! The canonical argument map.

use serde::{Deserialize, Serialize};

/// The four canonical fields of an argument map, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentField {
    Thesis,
    SupportingClaims,
    Counterarguments,
    Evidence,
}

impl ArgumentField {
    pub const ALL: [ArgumentField; 4] = [
        ArgumentField::Thesis,
        ArgumentField::SupportingClaims,
        ArgumentField::Counterarguments,
        ArgumentField::Evidence,
    ];

    /// JSON key for this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Thesis => "thesis",
            Self::SupportingClaims => "supporting_claims",
            Self::Counterarguments => "counterarguments",
            Self::Evidence => "evidence",
        }
    }
}

/// Structured argument extracted from an article.
///
/// Every field is always present and always a flat sequence of non-empty,
/// trimmed strings. Instances are built fresh per attempt by the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentMap {
    #[serde(default)]
    pub thesis: Vec<String>,

    #[serde(default)]
    pub supporting_claims: Vec<String>,

    #[serde(default)]
    pub counterarguments: Vec<String>,

    #[serde(default)]
    pub evidence: Vec<String>,
}

impl ArgumentMap {
    /// An all-empty map, substituted when the final attempt fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        ArgumentField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Borrow one field.
    pub fn field(&self, field: ArgumentField) -> &[String] {
        match field {
            ArgumentField::Thesis => &self.thesis,
            ArgumentField::SupportingClaims => &self.supporting_claims,
            ArgumentField::Counterarguments => &self.counterarguments,
            ArgumentField::Evidence => &self.evidence,
        }
    }

    /// Mutably borrow one field.
    pub fn field_mut(&mut self, field: ArgumentField) -> &mut Vec<String> {
        match field {
            ArgumentField::Thesis => &mut self.thesis,
            ArgumentField::SupportingClaims => &mut self.supporting_claims,
            ArgumentField::Counterarguments => &mut self.counterarguments,
            ArgumentField::Evidence => &mut self.evidence,
        }
    }

    /// Set the thesis statements.
    pub fn with_thesis(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.thesis = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the supporting claims.
    pub fn with_supporting_claims(
        mut self,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.supporting_claims = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the counterarguments.
    pub fn with_counterarguments(
        mut self,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.counterarguments = items.into_iter().map(Into::into).collect();
        self
    }

    /// Set the evidence.
    pub fn with_evidence(mut self, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.evidence = items.into_iter().map(Into::into).collect();
        self
    }
}
