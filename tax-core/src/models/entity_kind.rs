use serde::{Deserialize, Serialize};

/// The three taxable entities an income amount can be split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Individual,
    Company,
    Fund,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Company",
            Self::Fund => "SMSF (accumulation)",
        }
    }

    /// Heading for the amount allocated to this entity in a report.
    pub fn portion_label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual portion",
            Self::Company => "Company portion",
            Self::Fund => "SMSF accumulation portion",
        }
    }

    /// Heading for the tax charged on this entity's portion.
    pub fn tax_label(&self) -> &'static str {
        match self {
            Self::Individual => "Tax + Medicare (est)",
            Self::Company => "Company tax",
            Self::Fund => "SMSF tax",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
