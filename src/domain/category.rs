//! Budget categories attached to recurring events.

use std::fmt;

use serde::{Deserialize, Serialize};

const DEFAULT_COLOR: &str = "#9e9e9e";
const DEFAULT_ICON: &str = "receipt";

/// Category of a recurring event as stored by the backend.
///
/// Unknown codes are kept verbatim in [`EventCategory::Other`] so a new backend
/// category never breaks deserialization of a whole month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Mortgage,
    Rent,
    Grocery,
    Dining,
    Entertainment,
    Utility,
    Subscription,
    Insurance,
    GenericLoan,
    AutoLoan,
    CreditCard,
    Phone,
    Savings,
    PrimaryIncome,
    SecondaryIncome,
    #[default]
    Misc,
    Other(String),
}

impl EventCategory {
    /// Every category the backend offers when creating an event, in menu order.
    pub const KNOWN: [EventCategory; 16] = [
        EventCategory::Mortgage,
        EventCategory::Rent,
        EventCategory::Grocery,
        EventCategory::Dining,
        EventCategory::Entertainment,
        EventCategory::Utility,
        EventCategory::Subscription,
        EventCategory::Insurance,
        EventCategory::GenericLoan,
        EventCategory::AutoLoan,
        EventCategory::CreditCard,
        EventCategory::Phone,
        EventCategory::Savings,
        EventCategory::PrimaryIncome,
        EventCategory::SecondaryIncome,
        EventCategory::Misc,
    ];

    /// Wire code, e.g. `GENERIC_LOAN`.
    pub fn code(&self) -> &str {
        match self {
            EventCategory::Mortgage => "MORTGAGE",
            EventCategory::Rent => "RENT",
            EventCategory::Grocery => "GROCERY",
            EventCategory::Dining => "DINING",
            EventCategory::Entertainment => "ENTERTAINMENT",
            EventCategory::Utility => "UTILITY",
            EventCategory::Subscription => "SUBSCRIPTION",
            EventCategory::Insurance => "INSURANCE",
            EventCategory::GenericLoan => "GENERIC_LOAN",
            EventCategory::AutoLoan => "AUTO_LOAN",
            EventCategory::CreditCard => "CREDIT_CARD",
            EventCategory::Phone => "PHONE",
            EventCategory::Savings => "SAVINGS",
            EventCategory::PrimaryIncome => "PRIMARY_INCOME",
            EventCategory::SecondaryIncome => "SECONDARY_INCOME",
            EventCategory::Misc => "MISC",
            EventCategory::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EventCategory::Mortgage => "Mortgage",
            EventCategory::Rent => "Rent",
            EventCategory::Grocery => "Grocery",
            EventCategory::Dining => "Dining",
            EventCategory::Entertainment => "Entertainment",
            EventCategory::Utility => "Utilities",
            EventCategory::Subscription => "Subscription",
            EventCategory::Insurance => "Insurance",
            EventCategory::GenericLoan => "Generic Loan",
            EventCategory::AutoLoan => "Auto Loan",
            EventCategory::CreditCard => "Credit Card",
            EventCategory::Phone => "Phone",
            EventCategory::Savings => "Savings",
            EventCategory::PrimaryIncome => "Primary Income",
            EventCategory::SecondaryIncome => "Secondary Income",
            EventCategory::Misc => "Misc Income",
            EventCategory::Other(code) => code,
        }
    }

    /// Loan categories display their monthly payment instead of the principal.
    pub fn is_loan(&self) -> bool {
        matches!(
            self,
            EventCategory::Mortgage | EventCategory::GenericLoan | EventCategory::AutoLoan
        )
    }

    pub fn is_savings(&self) -> bool {
        matches!(self, EventCategory::Savings)
    }

    /// Accent colour used by the dashboard for this category.
    pub fn color(&self) -> &'static str {
        match self {
            EventCategory::Mortgage | EventCategory::Rent | EventCategory::CreditCard => "#9c27b0",
            EventCategory::Grocery
            | EventCategory::Dining
            | EventCategory::Savings
            | EventCategory::SecondaryIncome => "#4caf50",
            EventCategory::Entertainment => "#f44336",
            EventCategory::Utility | EventCategory::Phone => "#00bcd4",
            EventCategory::Subscription => "#e91e63",
            EventCategory::Insurance => "#ff9800",
            EventCategory::GenericLoan | EventCategory::AutoLoan => "#607d8b",
            EventCategory::PrimaryIncome => "#2e7d32",
            EventCategory::Misc => DEFAULT_COLOR,
            EventCategory::Other(code) => match code.to_uppercase().as_str() {
                "HOUSING" => "#9c27b0",
                "FOOD & DINING" | "FOOD & DRINKS" => "#4caf50",
                "TRANSPORTATION" => "#2196f3",
                "SHOPPING" => "#ff9800",
                "UTILITIES" => "#00bcd4",
                "HEALTHCARE" => "#e91e63",
                "EDUCATION" => "#3f51b5",
                _ => DEFAULT_COLOR,
            },
        }
    }

    /// Material icon name used by the dashboard for this category.
    pub fn icon(&self) -> &'static str {
        match self {
            EventCategory::Mortgage | EventCategory::Rent => "home",
            EventCategory::Grocery => "shopping_cart",
            EventCategory::Dining => "restaurant",
            EventCategory::Entertainment => "movie",
            EventCategory::Utility => "bolt",
            EventCategory::Subscription => "subscriptions",
            EventCategory::Insurance => "shield",
            EventCategory::GenericLoan => "account_balance",
            EventCategory::AutoLoan => "directions_car",
            EventCategory::CreditCard => "credit_card",
            EventCategory::Phone => "phone",
            EventCategory::Savings => "savings",
            EventCategory::PrimaryIncome | EventCategory::SecondaryIncome => "attach_money",
            EventCategory::Misc => "category",
            EventCategory::Other(code) => match code.to_uppercase().as_str() {
                "HOUSING" => "home",
                "FOOD & DINING" | "FOOD & DRINKS" => "restaurant",
                "TRANSPORTATION" => "directions_car",
                "SHOPPING" => "shopping_bag",
                "UTILITIES" => "bolt",
                "HEALTHCARE" => "local_hospital",
                "EDUCATION" => "school",
                "MISCELLANEOUS" => "category",
                _ => DEFAULT_ICON,
            },
        }
    }
}

impl From<String> for EventCategory {
    fn from(code: String) -> Self {
        EventCategory::KNOWN
            .iter()
            .find(|known| known.code().eq_ignore_ascii_case(&code))
            .cloned()
            .unwrap_or(EventCategory::Other(code))
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        category.code().to_string()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
