//! Recurring financial events owned by a scenario.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::EventCategory;
use crate::domain::common::{EntityId, Identifiable, NamedEntity};
use crate::domain::occurrence::DateValue;

/// Direction of money for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Credit,
    Debit,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventType::Credit => "Income",
            EventType::Debit => "Expense",
        };
        f.write_str(label)
    }
}

/// How often the backend repeats an event. Occurrence dates are expanded
/// server-side; this is carried for display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
    Weekly,
    EveryOtherWeek,
    Monthly,
    EveryOtherMonth,
    Yearly,
    Other(String),
}

impl Frequency {
    pub const KNOWN: [Frequency; 7] = [
        Frequency::Once,
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::EveryOtherWeek,
        Frequency::Monthly,
        Frequency::EveryOtherMonth,
        Frequency::Yearly,
    ];

    pub fn code(&self) -> &str {
        match self {
            Frequency::Once => "ONCE",
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::EveryOtherWeek => "EVERY_OTHER_WEEK",
            Frequency::Monthly => "MONTHLY",
            Frequency::EveryOtherMonth => "EVERY_OTHER_MONTH",
            Frequency::Yearly => "YEARLY",
            Frequency::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::EveryOtherWeek => "Every Other Week",
            Frequency::Monthly => "Monthly",
            Frequency::EveryOtherMonth => "Every Other Month",
            Frequency::Yearly => "Yearly",
            Frequency::Other(code) => code,
        }
    }
}

impl From<String> for Frequency {
    fn from(code: String) -> Self {
        Frequency::KNOWN
            .iter()
            .find(|known| known.code().eq_ignore_ascii_case(&code))
            .cloned()
            .unwrap_or(Frequency::Other(code))
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.code().to_string()
    }
}

/// A recurring income, bill or loan payment belonging to one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringEvent {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub category: EventCategory,
    #[serde(default)]
    pub start_date: Option<DateValue>,
    #[serde(default)]
    pub end_date: Option<DateValue>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escrow: Option<Decimal>,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default, alias = "profileID")]
    pub profile_id: Option<EntityId>,
    #[serde(default, alias = "scenarioID")]
    pub scenario_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn active_by_default() -> bool {
    true
}

impl RecurringEvent {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        amount: Decimal,
        event_type: EventType,
        category: EventCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            event_type,
            category,
            start_date: None,
            end_date: None,
            frequency: Frequency::Monthly,
            monthly_payment: None,
            escrow: None,
            active: true,
            profile_id: None,
            scenario_id: None,
            description: None,
        }
    }

    pub fn with_loan_terms(mut self, monthly_payment: Decimal, escrow: Option<Decimal>) -> Self {
        self.monthly_payment = Some(monthly_payment);
        self.escrow = escrow;
        self
    }

    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(DateValue::Text(start_date.into()));
        self
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn is_credit(&self) -> bool {
        self.event_type == EventType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.event_type == EventType::Debit
    }

    /// Amount shown to the user: loans show their monthly payment (plus escrow
    /// for mortgages) instead of the principal.
    pub fn display_amount(&self) -> Decimal {
        let payment = self
            .monthly_payment
            .filter(|payment| *payment > Decimal::ZERO);
        match payment {
            Some(payment) if self.category.is_loan() => {
                let escrow = self
                    .escrow
                    .filter(|escrow| *escrow > Decimal::ZERO)
                    .filter(|_| self.category == EventCategory::Mortgage);
                payment + escrow.unwrap_or(Decimal::ZERO)
            }
            _ => self.amount,
        }
    }
}

impl Identifiable for RecurringEvent {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl NamedEntity for RecurringEvent {
    fn name(&self) -> &str {
        &self.name
    }
}
