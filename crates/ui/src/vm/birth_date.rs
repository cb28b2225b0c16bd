use chrono::NaiveDate;
use quiz_core::model::BIRTH_DATE_FORMAT;

/// Why a birth-date input was rejected before reaching the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BirthDateError {
    Empty,
    Malformed,
    InFuture,
}

impl BirthDateError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            BirthDateError::Empty => "Informe sua data de nascimento.",
            BirthDateError::Malformed => "Data inválida.",
            BirthDateError::InFuture => "A data não pode estar no futuro.",
        }
    }
}

/// Validates the raw value of the date input against `today`.
///
/// # Errors
///
/// Returns `BirthDateError` for blank, unparseable or future dates.
pub fn parse_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, BirthDateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(BirthDateError::Empty);
    }
    let date =
        NaiveDate::parse_from_str(raw, BIRTH_DATE_FORMAT).map_err(|_| BirthDateError::Malformed)?;
    if date > today {
        return Err(BirthDateError::InFuture);
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn accepts_iso_dates() {
        assert_eq!(
            parse_birth_date("1990-05-12", today()),
            Ok(NaiveDate::from_ymd_opt(1990, 5, 12).unwrap())
        );
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(parse_birth_date("  ", today()), Err(BirthDateError::Empty));
        assert_eq!(parse_birth_date("12/05/1990", today()), Err(BirthDateError::Malformed));
    }

    #[test]
    fn rejects_future_dates() {
        assert_eq!(parse_birth_date("2030-01-01", today()), Err(BirthDateError::InFuture));
    }
}
