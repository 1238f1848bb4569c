//! Employee and contract models.
//!
//! These mirror the read-only identity and contract data supplied by the
//! HR system. The engine never creates or edits them; they only seed a
//! settlement with a start date and wage.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee as known to the HR system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
}

/// An employment contract.
///
/// # Example
///
/// ```
/// use eos_engine::models::Contract;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let contract = Contract {
///     id: "ctr_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     wage: Decimal::new(9000, 0),
///     date_start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
///     date_end: None,
/// };
/// assert!(contract.belongs_to("emp_001"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// The monthly basic wage.
    pub wage: Decimal,
    /// The date the contract started.
    pub date_start: NaiveDate,
    /// The date the contract ended, if it has.
    #[serde(default)]
    pub date_end: Option<NaiveDate>,
}

impl Contract {
    /// Returns true if this contract belongs to the given employee.
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee_id == employee_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_open_contract() {
        let json = r#"{
            "id": "ctr_001",
            "employee_id": "emp_001",
            "wage": "9000.00",
            "date_start": "2019-01-01"
        }"#;

        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.wage, Decimal::new(900000, 2));
        assert_eq!(
            contract.date_start,
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
        );
        assert!(contract.date_end.is_none());
    }

    #[test]
    fn test_deserialize_closed_contract() {
        let json = r#"{
            "id": "ctr_002",
            "employee_id": "emp_002",
            "wage": "12500",
            "date_start": "2015-03-15",
            "date_end": "2024-03-14"
        }"#;

        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(
            contract.date_end,
            Some(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap())
        );
    }

    #[test]
    fn test_belongs_to_matches_employee_id() {
        let contract = Contract {
            id: "ctr_001".to_string(),
            employee_id: "emp_001".to_string(),
            wage: Decimal::new(9000, 0),
            date_start: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            date_end: None,
        };

        assert!(contract.belongs_to("emp_001"));
        assert!(!contract.belongs_to("emp_002"));
    }

    #[test]
    fn test_deserialize_employee() {
        let employee: Employee =
            serde_json::from_str(r#"{"id": "emp_001", "name": "John EOS"}"#).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.name, "John EOS");
    }
}
