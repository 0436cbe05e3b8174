//! Validation utilities for the print shop production console

use rust_decimal::Decimal;

use crate::error::WorkflowError;

// ============================================================================
// Quantity Validations
// ============================================================================

/// Validate a material quantity moved through the ledger
pub fn validate_positive_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a product's daily production rate
pub fn validate_production_rate(rate: u32) -> Result<(), &'static str> {
    if rate == 0 {
        return Err("Production rate must be at least 1 unit per day");
    }
    Ok(())
}

/// Validate a bill-of-materials quantity per unit
pub fn validate_bom_quantity(quantity_per_unit: Decimal) -> Result<(), &'static str> {
    if quantity_per_unit <= Decimal::ZERO {
        return Err("BOM quantity per unit must be positive");
    }
    Ok(())
}

// ============================================================================
// Contact & Reference Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate phone number: 7 to 15 digits, optional leading '+', separators allowed
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ' || c == '(' || c == ')')
    {
        return Err("Phone number may only contain digits and separators");
    }

    let digits = body.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must have 7 to 15 digits");
    }
    Ok(())
}

/// Validate supplier name is present
pub fn validate_supplier_name(supplier: &str) -> Result<(), &'static str> {
    if supplier.trim().is_empty() {
        return Err("Supplier name is required");
    }
    Ok(())
}

/// Validate employee code format (2-12 uppercase alphanumeric or '-')
pub fn validate_employee_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Employee code must be at least 2 characters");
    }
    if code.len() > 12 {
        return Err("Employee code must be at most 12 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("Employee code must be uppercase alphanumeric");
    }
    Ok(())
}

/// Validate worker rating is between 0 and 5
pub fn validate_rating(rating: Decimal) -> Result<(), &'static str> {
    if rating < Decimal::ZERO || rating > Decimal::from(5) {
        return Err("Rating must be between 0 and 5");
    }
    Ok(())
}

/// Lift a validation message into a workflow error
pub(crate) fn check(result: Result<(), &'static str>) -> Result<(), WorkflowError> {
    result.map_err(|message| WorkflowError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_quantity() {
        assert!(validate_positive_quantity(Decimal::from(1)).is_ok());
        assert!(validate_positive_quantity(Decimal::new(5, 1)).is_ok());
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(Decimal::from(-3)).is_err());
    }

    #[test]
    fn test_validate_production_rate() {
        assert!(validate_production_rate(1).is_ok());
        assert!(validate_production_rate(0).is_err());
    }

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("orders@printshop.com").is_ok());
        assert!(validate_email("buyer.name@client.co.uk").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("0812345678").is_ok());
        assert!(validate_phone("081-234-5678").is_ok());
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(021) 555-0142").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("1234567890123456").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }

    #[test]
    fn test_validate_supplier_name() {
        assert!(validate_supplier_name("Northern Board Mills").is_ok());
        assert!(validate_supplier_name("   ").is_err());
        assert!(validate_supplier_name("").is_err());
    }

    #[test]
    fn test_validate_employee_code() {
        assert!(validate_employee_code("EMP-001").is_ok());
        assert!(validate_employee_code("P7").is_ok());
        assert!(validate_employee_code("E").is_err());
        assert!(validate_employee_code("emp-001").is_err());
        assert!(validate_employee_code("EMPLOYEE-00001").is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(Decimal::ZERO).is_ok());
        assert!(validate_rating(Decimal::new(45, 1)).is_ok());
        assert!(validate_rating(Decimal::from(5)).is_ok());
        assert!(validate_rating(Decimal::new(51, 1)).is_err());
        assert!(validate_rating(Decimal::from(-1)).is_err());
    }
}
