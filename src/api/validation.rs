use super::ApiError;
use crate::models::annotation::AnnotationInput;

pub fn validate_limit(limit: usize, max: usize) -> Result<usize, ApiError> {
    const MIN_LIMIT: usize = 1;

    if !(MIN_LIMIT..=max).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {limit}. Limit must be between {MIN_LIMIT} and {max}"
        )));
    }
    Ok(limit)
}

pub fn validate_apod_date(date: &str) -> Result<&str, ApiError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| date)
        .map_err(|_| ApiError::validation(format!("Invalid date '{date}'. Expected YYYY-MM-DD")))
}

pub fn validate_annotation(input: &AnnotationInput) -> Result<(), ApiError> {
    if input.dataset.trim().is_empty() {
        return Err(ApiError::validation("Annotation dataset cannot be empty"));
    }

    if input.feature_name.chars().count() > 200 {
        return Err(ApiError::validation(
            "Feature name must be 200 characters or less",
        ));
    }

    if !input.x.is_finite() || !input.y.is_finite() {
        return Err(ApiError::validation(
            "Annotation coordinates must be finite numbers",
        ));
    }

    if input.zoom < 0 {
        return Err(ApiError::validation(format!(
            "Invalid zoom: {}. Zoom cannot be negative",
            input.zoom
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> AnnotationInput {
        AnnotationInput {
            dataset: "mars".to_string(),
            feature_name: "Olympus Mons".to_string(),
            x: 1.0,
            y: 2.0,
            zoom: 3,
            note: String::new(),
        }
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(20, 100).is_ok());
        assert!(validate_limit(100, 100).is_ok());
        assert!(validate_limit(0, 100).is_err());
        assert!(validate_limit(101, 100).is_err());
    }

    #[test]
    fn test_validate_apod_date() {
        assert!(validate_apod_date("2024-02-19").is_ok());
        assert!(validate_apod_date("19/02/2024").is_err());
    }

    #[test]
    fn test_validate_annotation() {
        assert!(validate_annotation(&input()).is_ok());

        let mut bad = input();
        bad.dataset = " ".to_string();
        assert!(validate_annotation(&bad).is_err());

        let mut bad = input();
        bad.x = f64::NAN;
        assert!(validate_annotation(&bad).is_err());

        let mut bad = input();
        bad.zoom = -1;
        assert!(validate_annotation(&bad).is_err());
    }
}
