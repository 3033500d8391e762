//! # Validation Module
//!
//! Field rules for client contact data and the bookkeeping ledgers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Argument parsing, enum labels, dates                              │
//! │  └── Booking flow only offers listed services/slots                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: salon-core                                                   │
//! │  ├── THIS MODULE: field rules, returns normalized values               │
//! │  └── booking::validate_request: catalog, grid, past dates              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign keys (supplier_id)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validators trim their input and hand back the cleaned value, so callers
//! store exactly what was checked.
//!
//! ## Usage
//! ```rust
//! use salon_core::validation::{validate_email, validate_phone};
//!
//! assert_eq!(validate_phone("client_phone", " +34 600 123 456 ").unwrap(), "+34 600 123 456");
//! assert_eq!(validate_email("client_email", Some("  ")).unwrap(), None);
//! assert!(validate_email("client_email", Some("ana@")).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewEmployee, NewExpense, NewInventoryItem, NewSupplier};
use crate::{MAX_NAME_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most `max` characters
pub fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates an optional text field. Blank counts as absent.
pub fn validate_optional_text(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => validate_required_text(field, v, max).map(Some),
    }
}

/// Validates a client's name.
///
/// ## Example
/// ```rust
/// use salon_core::validation::validate_client_name;
///
/// assert_eq!(validate_client_name("  Lucía Pérez ").unwrap(), "Lucía Pérez");
/// assert!(validate_client_name("   ").is_err());
/// ```
pub fn validate_client_name(name: &str) -> ValidationResult<String> {
    validate_required_text("client_name", name, MAX_NAME_LEN)
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Digits and spaces only, with an optional leading `+`
/// - At least one digit
pub fn validate_phone(field: &str, phone: &str) -> ValidationResult<String> {
    let phone = validate_required_text(field, phone, MAX_NAME_LEN)?;

    let digits = phone.strip_prefix('+').unwrap_or(&phone);
    if !digits.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only digits and spaces, optionally starting with +".to_string(),
        });
    }
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain at least one digit".to_string(),
        });
    }

    Ok(phone)
}

/// Validates an optional email address. A blank address is treated as absent.
///
/// ## Rules
/// - Non-empty local part, a single `@`, no whitespace
/// - Domain made of at least two non-empty labels separated by dots
pub fn validate_email(field: &str, email: Option<&str>) -> ValidationResult<Option<String>> {
    let email = match email.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(e) => e,
    };

    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must look like name@domain.tld".to_string(),
    };

    if email.chars().count() > MAX_NAME_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(Some(email.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an amount in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples, unpaid trial days)
///
/// ## Example
/// ```rust
/// use salon_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents("amount", 1500).is_ok());
/// assert!(validate_amount_cents("amount", 0).is_ok());
/// assert!(validate_amount_cents("amount", -100).is_err());
/// ```
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock count (non-negative).
pub fn validate_stock(field: &str, count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a commission in basis points (0% to 100%).
pub fn validate_commission_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "commission_bps".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use salon_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

fn validate_optional_uuid(field: &str, id: Option<&str>) -> ValidationResult<Option<String>> {
    match id.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => validate_uuid(field, id).map(|_| Some(id.to_string())),
    }
}

// =============================================================================
// Ledger Record Validators
// =============================================================================

/// Validates and normalizes an expense before insert.
pub fn validate_expense(expense: NewExpense) -> ValidationResult<NewExpense> {
    Ok(NewExpense {
        concept: validate_required_text("concept", &expense.concept, MAX_NAME_LEN * 2)?,
        amount_cents: {
            validate_amount_cents("amount", expense.amount_cents)?;
            expense.amount_cents
        },
        supplier_id: validate_optional_uuid("supplier_id", expense.supplier_id.as_deref())?,
        description: validate_optional_text(
            "description",
            expense.description.as_deref(),
            MAX_TEXT_LEN,
        )?,
        ..expense
    })
}

/// Validates and normalizes an inventory item before insert.
pub fn validate_inventory_item(item: NewInventoryItem) -> ValidationResult<NewInventoryItem> {
    let name = validate_required_text("name", &item.name, MAX_NAME_LEN)?;
    validate_stock("current_stock", item.current_stock)?;
    validate_stock("minimum_stock", item.minimum_stock)?;
    validate_amount_cents("purchase_price", item.purchase_price_cents)?;
    if let Some(sale_price) = item.sale_price_cents {
        validate_amount_cents("sale_price", sale_price)?;
    }
    let supplier_id = validate_optional_uuid("supplier_id", item.supplier_id.as_deref())?;

    Ok(NewInventoryItem {
        name,
        supplier_id,
        ..item
    })
}

/// Validates and normalizes an employee before insert.
pub fn validate_employee(employee: NewEmployee) -> ValidationResult<NewEmployee> {
    let name = validate_required_text("name", &employee.name, MAX_NAME_LEN)?;
    let phone = validate_phone("phone", &employee.phone)?;
    let email = validate_email("email", employee.email.as_deref())?;
    validate_amount_cents("salary", employee.salary_cents)?;
    if let Some(bps) = employee.commission_bps {
        validate_commission_bps(bps)?;
    }
    let schedule = validate_optional_text("schedule", employee.schedule.as_deref(), MAX_NAME_LEN)?;

    Ok(NewEmployee {
        name,
        phone,
        email,
        schedule,
        ..employee
    })
}

/// Validates and normalizes a supplier before insert.
pub fn validate_supplier(supplier: NewSupplier) -> ValidationResult<NewSupplier> {
    Ok(NewSupplier {
        name: validate_required_text("name", &supplier.name, MAX_NAME_LEN)?,
        contact_person: validate_required_text(
            "contact_person",
            &supplier.contact_person,
            MAX_NAME_LEN,
        )?,
        phone: validate_phone("phone", &supplier.phone)?,
        email: validate_email("email", supplier.email.as_deref())?,
        address: validate_optional_text("address", supplier.address.as_deref(), MAX_TEXT_LEN)?,
        ..supplier
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EmployeeRole, ExpenseCategory, PaymentMethod, SupplierCategory};
    use chrono::NaiveDate;

    #[test]
    fn test_validate_required_text() {
        assert_eq!(validate_required_text("name", "  Ana ", 10).unwrap(), "Ana");
        assert!(matches!(
            validate_required_text("name", "", 10),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_required_text("name", "abcdefghijk", 10),
            Err(ValidationError::TooLong { max: 10, .. })
        ));
        // Length counts characters, not bytes.
        assert!(validate_required_text("name", "ñññññ", 5).is_ok());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("phone", "600123456").is_ok());
        assert!(validate_phone("phone", "+34 600 123 456").is_ok());

        assert!(matches!(
            validate_phone("phone", ""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_phone("phone", "600-123-456").is_err());
        assert!(validate_phone("phone", "call me").is_err());
        assert!(validate_phone("phone", "+").is_err());
        assert!(validate_phone("phone", "34+600").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(
            validate_email("email", Some("ana@salon.es")).unwrap(),
            Some("ana@salon.es".to_string())
        );
        assert_eq!(validate_email("email", None).unwrap(), None);
        assert_eq!(validate_email("email", Some("")).unwrap(), None);

        assert!(validate_email("email", Some("ana")).is_err());
        assert!(validate_email("email", Some("@salon.es")).is_err());
        assert!(validate_email("email", Some("ana@salon")).is_err());
        assert!(validate_email("email", Some("ana@salon.")).is_err());
        assert!(validate_email("email", Some("ana@.es")).is_err());
        assert!(validate_email("email", Some("ana@a@b.es")).is_err());
        assert!(validate_email("email", Some("a na@salon.es")).is_err());
    }

    #[test]
    fn test_validate_commission_bps() {
        assert!(validate_commission_bps(0).is_ok());
        assert!(validate_commission_bps(1500).is_ok());
        assert!(validate_commission_bps(10000).is_ok());
        assert!(validate_commission_bps(10001).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "123").is_err());
    }

    #[test]
    fn test_validate_expense_normalizes() {
        let expense = NewExpense {
            concept: "  Alquiler local ".to_string(),
            category: ExpenseCategory::Rent,
            amount_cents: 80000,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            supplier_id: Some(" ".to_string()),
            description: Some("".to_string()),
            payment_method: PaymentMethod::Transfer,
        };

        let clean = validate_expense(expense).unwrap();
        assert_eq!(clean.concept, "Alquiler local");
        assert_eq!(clean.supplier_id, None);
        assert_eq!(clean.description, None);
        assert_eq!(clean.payment_method, PaymentMethod::Transfer);
    }

    #[test]
    fn test_validate_expense_rejects_negative_amount() {
        let expense = NewExpense {
            concept: "Toallas".to_string(),
            category: ExpenseCategory::Products,
            amount_cents: -1,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            supplier_id: None,
            description: None,
            payment_method: PaymentMethod::Cash,
        };

        let err = validate_expense(expense).unwrap_err();
        assert_eq!(err.field(), "amount");
    }

    #[test]
    fn test_validate_employee() {
        let employee = NewEmployee {
            name: "Andrés".to_string(),
            phone: "611 222 333".to_string(),
            email: None,
            role: EmployeeRole::Stylist,
            salary_cents: 150000,
            hire_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            schedule: Some("L-V 10:00-19:00".to_string()),
            commission_bps: Some(1500),
        };
        assert!(validate_employee(employee.clone()).is_ok());

        let too_much = NewEmployee {
            commission_bps: Some(20000),
            ..employee
        };
        assert_eq!(validate_employee(too_much).unwrap_err().field(), "commission_bps");
    }

    #[test]
    fn test_validate_supplier() {
        let supplier = NewSupplier {
            name: "Distribuciones Belleza".to_string(),
            contact_person: "María".to_string(),
            phone: "+34 910 000 000".to_string(),
            email: Some("pedidos@belleza.es".to_string()),
            address: None,
            category: SupplierCategory::Products,
        };
        assert!(validate_supplier(supplier.clone()).is_ok());

        let no_contact = NewSupplier {
            contact_person: " ".to_string(),
            ..supplier
        };
        assert_eq!(validate_supplier(no_contact).unwrap_err().field(), "contact_person");
    }
}
