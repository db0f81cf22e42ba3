//! Field rules for inbound entities
//!
//! Shape validation lives at the REST boundary (serde); the rules here
//! guard entity invariants. Each check fails with the first violated
//! rule's message, which the REST layer reports verbatim.

use crate::contract::{NewAcademicYear, NewClass, NewStudent, StudentsError, StudentUpdate};

fn fail(message: impl Into<String>) -> StudentsError {
    StudentsError::Validation {
        message: message.into(),
    }
}

/// "YYYY/YYYY"
pub fn is_academic_year(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 9
        && bytes[4] == b'/'
        && s[..4].chars().all(|c| c.is_ascii_digit())
        && s[5..].chars().all(|c| c.is_ascii_digit())
}

/// Exactly 10 decimal digits
pub fn is_nisn(s: &str) -> bool {
    s.len() == 10 && s.chars().all(|c| c.is_ascii_digit())
}

/// Local mobile format: "08" followed by 8 to 11 digits
pub fn is_phone(s: &str) -> bool {
    s.starts_with("08") && (10..=13).contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

fn check_name(name: &str) -> Result<(), StudentsError> {
    if name.len() < 3 || name.len() > 100 {
        return Err(fail("name must be between 3 and 100 characters"));
    }
    Ok(())
}

fn check_optional_phone(phone: Option<&str>) -> Result<(), StudentsError> {
    if let Some(p) = phone {
        if !is_phone(p) {
            return Err(fail("phone must match 08 followed by 8 to 11 digits"));
        }
    }
    Ok(())
}

fn check_optional_email(email: Option<&str>) -> Result<(), StudentsError> {
    if let Some(e) = email {
        if !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(fail("email must be a valid address"));
        }
    }
    Ok(())
}

/// Validate a student enrollment input
pub fn validate_new_student(input: &NewStudent) -> Result<(), StudentsError> {
    if !is_nisn(&input.nisn) {
        return Err(fail("nisn must be exactly 10 digits"));
    }
    if let Some(nis) = &input.nis {
        if nis.is_empty() || nis.len() > 20 {
            return Err(fail("nis must be between 1 and 20 characters"));
        }
    }
    check_name(&input.name)?;
    if let Some(nickname) = &input.nickname {
        if nickname.len() > 50 {
            return Err(fail("nickname must be at most 50 characters"));
        }
    }
    if input.birth_place.is_empty() || input.birth_place.len() > 100 {
        return Err(fail("birth_place must be between 1 and 100 characters"));
    }
    if input.birth_date > chrono::Utc::now().date_naive() {
        return Err(fail("birth_date must not be in the future"));
    }
    if input.address.is_empty() || input.address.len() > 500 {
        return Err(fail("address must be between 1 and 500 characters"));
    }
    if input.city.is_empty() || input.city.len() > 100 {
        return Err(fail("city must be between 1 and 100 characters"));
    }
    if input.province.is_empty() || input.province.len() > 100 {
        return Err(fail("province must be between 1 and 100 characters"));
    }
    check_optional_phone(input.phone.as_deref())?;
    check_optional_email(input.email.as_deref())?;
    if !is_academic_year(&input.academic_year) {
        return Err(fail("academic_year must match YYYY/YYYY"));
    }
    if input.entry_year.len() != 4 || !input.entry_year.chars().all(|c| c.is_ascii_digit()) {
        return Err(fail("entry_year must be a 4-digit year"));
    }
    Ok(())
}

/// Validate a partial student update
pub fn validate_student_update(update: &StudentUpdate) -> Result<(), StudentsError> {
    if let Some(name) = &update.name {
        check_name(name)?;
    }
    if let Some(nickname) = &update.nickname {
        if nickname.len() > 50 {
            return Err(fail("nickname must be at most 50 characters"));
        }
    }
    check_optional_phone(update.phone.as_deref())?;
    check_optional_email(update.email.as_deref())?;
    if let Some(address) = &update.address {
        if address.is_empty() || address.len() > 500 {
            return Err(fail("address must be between 1 and 500 characters"));
        }
    }
    Ok(())
}

/// Validate a class creation input
pub fn validate_new_class(input: &NewClass) -> Result<(), StudentsError> {
    if input.code.len() < 3 || input.code.len() > 20 {
        return Err(fail("code must be between 3 and 20 characters"));
    }
    check_name(&input.name)?;
    if !matches!(input.level.as_str(), "10" | "11" | "12") {
        return Err(fail("level must be one of 10, 11, 12"));
    }
    if let Some(major) = &input.major {
        if major.len() > 50 {
            return Err(fail("major must be at most 50 characters"));
        }
    }
    if !(1..=50).contains(&input.capacity) {
        return Err(fail("capacity must be between 1 and 50"));
    }
    if !is_academic_year(&input.academic_year) {
        return Err(fail("academic_year must match YYYY/YYYY"));
    }
    Ok(())
}

/// Validate an academic year creation input
pub fn validate_new_academic_year(input: &NewAcademicYear) -> Result<(), StudentsError> {
    if !is_academic_year(&input.year) {
        return Err(fail("year must match YYYY/YYYY"));
    }
    if input.end_date <= input.start_date {
        return Err(fail("end_date must be after start_date"));
    }
    if input.semester1_end <= input.semester1_start {
        return Err(fail("semester1_end must be after semester1_start"));
    }
    if input.semester2_end <= input.semester2_start {
        return Err(fail("semester2_end must be after semester2_start"));
    }
    Ok(())
}
