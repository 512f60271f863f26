use relatos_core::models::Coordinate;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    /// Human-readable summary of all errors
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.location, e.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a coordinate in decimal degrees.
///
/// The registry itself accepts any coordinate; this is used by adapters to
/// warn about values that will produce meaningless distances.
pub fn validate_coordinate(coord: &Coordinate) -> ValidationResult {
    let location = format!("Coordinate({}, {})", coord.lat, coord.lon);
    let mut result = ValidationResult::valid();

    if !coord.is_finite() {
        result.add_error(location, "Coordinates must be finite".to_string());
        return result;
    }

    if !(-90.0..=90.0).contains(&coord.lat) {
        result.add_error(
            location.clone(),
            format!("Latitude must be between -90 and 90, found {}", coord.lat),
        );
    }

    if !(-180.0..=180.0).contains(&coord.lon) {
        result.add_error(
            location,
            format!("Longitude must be between -180 and 180, found {}", coord.lon),
        );
    }

    result
}
