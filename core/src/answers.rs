use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// Practice area the firm is known for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    TaxLitigation,
    CorporateMa,
    EsgAdvisory,
    AuditAssurance,
}

impl Specialization {
    pub const ALL: [Specialization; 4] = [
        Specialization::TaxLitigation,
        Specialization::CorporateMa,
        Specialization::EsgAdvisory,
        Specialization::AuditAssurance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Specialization::TaxLitigation => "tax_litigation",
            Specialization::CorporateMa => "corporate_ma",
            Specialization::EsgAdvisory => "esg_advisory",
            Specialization::AuditAssurance => "audit_assurance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirmSize {
    Small,
    Medium,
    Large,
}

impl FirmSize {
    pub const ALL: [FirmSize; 3] = [FirmSize::Small, FirmSize::Medium, FirmSize::Large];

    pub fn as_str(self) -> &'static str {
        match self {
            FirmSize::Small => "small",
            FirmSize::Medium => "medium",
            FirmSize::Large => "large",
        }
    }
}

/// International footprint. `Unspecified` leaves the threat score untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reach {
    Global,
    Local,
    Unspecified,
}

impl Reach {
    pub const ALL: [Reach; 3] = [Reach::Global, Reach::Local, Reach::Unspecified];

    pub fn as_str(self) -> &'static str {
        match self {
            Reach::Global => "global",
            Reach::Local => "local",
            Reach::Unspecified => "unspecified",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    Premium,
    Other,
}

impl PricingTier {
    pub const ALL: [PricingTier; 2] = [PricingTier::Premium, PricingTier::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            PricingTier::Premium => "premium",
            PricingTier::Other => "other",
        }
    }
}

/// One question of the questionnaire. Step `n` asks category `ORDER[n - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "spec", alias = "specialization")]
    Specialization,
    #[serde(rename = "size")]
    Size,
    #[serde(rename = "intl", alias = "reach")]
    Reach,
    #[serde(rename = "pricing")]
    Pricing,
}

impl Category {
    pub const ORDER: [Category; 4] = [
        Category::Specialization,
        Category::Size,
        Category::Reach,
        Category::Pricing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Specialization => "spec",
            Category::Size => "size",
            Category::Reach => "intl",
            Category::Pricing => "pricing",
        }
    }

    /// 1-based step number at which this category is asked.
    pub fn step(self) -> u8 {
        match self {
            Category::Specialization => 1,
            Category::Size => 2,
            Category::Reach => 3,
            Category::Pricing => 4,
        }
    }

    pub fn for_step(step: u8) -> Option<Category> {
        step.checked_sub(1)
            .and_then(|idx| Category::ORDER.get(usize::from(idx)).copied())
    }

    pub fn allowed_values(self) -> Vec<&'static str> {
        match self {
            Category::Specialization => Specialization::ALL.iter().map(|v| v.as_str()).collect(),
            Category::Size => FirmSize::ALL.iter().map(|v| v.as_str()).collect(),
            Category::Reach => Reach::ALL.iter().map(|v| v.as_str()).collect(),
            Category::Pricing => PricingTier::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = WizardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "spec" | "specialization" => Ok(Category::Specialization),
            "size" => Ok(Category::Size),
            "intl" | "reach" => Ok(Category::Reach),
            "pricing" => Ok(Category::Pricing),
            _ => Err(WizardError::UnknownCategory(raw.to_string())),
        }
    }
}

/// A typed answer to one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", content = "value", rename_all = "snake_case")]
pub enum Selection {
    #[serde(rename = "spec")]
    Specialization(Specialization),
    Size(FirmSize),
    #[serde(rename = "intl")]
    Reach(Reach),
    Pricing(PricingTier),
}

impl Selection {
    pub fn category(&self) -> Category {
        match self {
            Selection::Specialization(_) => Category::Specialization,
            Selection::Size(_) => Category::Size,
            Selection::Reach(_) => Category::Reach,
            Selection::Pricing(_) => Category::Pricing,
        }
    }

    pub fn value_str(&self) -> &'static str {
        match self {
            Selection::Specialization(v) => v.as_str(),
            Selection::Size(v) => v.as_str(),
            Selection::Reach(v) => v.as_str(),
            Selection::Pricing(v) => v.as_str(),
        }
    }

    /// Parse the loose `(category, value)` string pair an adapter reports.
    pub fn parse(category: &str, value: &str) -> Result<Self, WizardError> {
        let category: Category = category.parse()?;
        let normalized = value.trim().to_ascii_lowercase();
        let unknown = || WizardError::UnknownValue {
            category,
            value: value.to_string(),
        };

        let parsed = match category {
            Category::Specialization => Specialization::ALL
                .into_iter()
                .find(|v| v.as_str() == normalized)
                .map(Selection::Specialization),
            Category::Size => FirmSize::ALL
                .into_iter()
                .find(|v| v.as_str() == normalized)
                .map(Selection::Size),
            Category::Reach => Reach::ALL
                .into_iter()
                .find(|v| v.as_str() == normalized)
                .map(Selection::Reach),
            Category::Pricing => PricingTier::ALL
                .into_iter()
                .find(|v| v.as_str() == normalized)
                .map(Selection::Pricing),
        };
        parsed.ok_or_else(unknown)
    }
}

/// Answers collected so far. Starts empty, filled one step at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub specialization: Option<Specialization>,
    pub size: Option<FirmSize>,
    pub reach: Option<Reach>,
    pub pricing: Option<PricingTier>,
}

impl AnswerSet {
    pub fn record(&mut self, selection: Selection) {
        match selection {
            Selection::Specialization(v) => self.specialization = Some(v),
            Selection::Size(v) => self.size = Some(v),
            Selection::Reach(v) => self.reach = Some(v),
            Selection::Pricing(v) => self.pricing = Some(v),
        }
    }

    pub fn missing(&self) -> Vec<Category> {
        let mut missing = Vec::new();
        if self.specialization.is_none() {
            missing.push(Category::Specialization);
        }
        if self.size.is_none() {
            missing.push(Category::Size);
        }
        if self.reach.is_none() {
            missing.push(Category::Reach);
        }
        if self.pricing.is_none() {
            missing.push(Category::Pricing);
        }
        missing
    }

    pub fn is_empty(&self) -> bool {
        *self == AnswerSet::default()
    }

    /// Promote to a scoreable set, or report which categories are still open.
    pub fn complete(&self) -> Result<CompleteAnswers, WizardError> {
        match (self.specialization, self.size, self.reach, self.pricing) {
            (Some(specialization), Some(size), Some(reach), Some(pricing)) => Ok(CompleteAnswers {
                specialization,
                size,
                reach,
                pricing,
            }),
            _ => Err(WizardError::Incomplete {
                missing: self.missing(),
            }),
        }
    }
}

/// All four answers present. Only obtainable through [`AnswerSet::complete`]
/// or by naming every field, so scoring never sees a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompleteAnswers {
    pub specialization: Specialization,
    pub size: FirmSize,
    pub reach: Reach,
    pub pricing: PricingTier,
}

impl From<CompleteAnswers> for AnswerSet {
    fn from(answers: CompleteAnswers) -> Self {
        AnswerSet {
            specialization: Some(answers.specialization),
            size: Some(answers.size),
            reach: Some(answers.reach),
            pricing: Some(answers.pricing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_short_keys_and_long_aliases() {
        assert_eq!(
            Selection::parse("spec", "esg_advisory").unwrap(),
            Selection::Specialization(Specialization::EsgAdvisory)
        );
        assert_eq!(
            Selection::parse("reach", " Global ").unwrap(),
            Selection::Reach(Reach::Global)
        );
        assert_eq!(
            Selection::parse("intl", "local").unwrap(),
            Selection::Reach(Reach::Local)
        );
    }

    #[test]
    fn parse_rejects_values_outside_the_category() {
        let err = Selection::parse("size", "premium").unwrap_err();
        assert_eq!(
            err,
            WizardError::UnknownValue {
                category: Category::Size,
                value: "premium".to_string(),
            }
        );

        let err = Selection::parse("budget", "premium").unwrap_err();
        assert_eq!(err, WizardError::UnknownCategory("budget".to_string()));
    }

    #[test]
    fn complete_reports_missing_categories_in_step_order() {
        let mut answers = AnswerSet::default();
        answers.record(Selection::Size(FirmSize::Large));

        let err = answers.complete().unwrap_err();
        assert_eq!(
            err,
            WizardError::Incomplete {
                missing: vec![Category::Specialization, Category::Reach, Category::Pricing],
            }
        );
    }

    #[test]
    fn complete_succeeds_once_every_step_is_answered() {
        let mut answers = AnswerSet::default();
        answers.record(Selection::Specialization(Specialization::CorporateMa));
        answers.record(Selection::Size(FirmSize::Large));
        answers.record(Selection::Reach(Reach::Global));
        answers.record(Selection::Pricing(PricingTier::Other));

        let complete = answers.complete().unwrap();
        assert_eq!(complete.specialization, Specialization::CorporateMa);
        assert_eq!(AnswerSet::from(complete), answers);
    }

    #[test]
    fn step_numbers_follow_category_order() {
        for (idx, category) in Category::ORDER.into_iter().enumerate() {
            assert_eq!(usize::from(category.step()), idx + 1);
            assert_eq!(Category::for_step(category.step()), Some(category));
        }
        assert_eq!(Category::for_step(0), None);
        assert_eq!(Category::for_step(5), None);
    }

    #[test]
    fn selection_serializes_with_wire_keys() {
        let json = serde_json::to_value(Selection::Reach(Reach::Local)).unwrap();
        assert_eq!(json, serde_json::json!({"category": "intl", "value": "local"}));
    }
}
