use super::ApiError;
use super::types::TaskRequest;
use crate::domain::TaskId;

const MIN_DESCRIPTION_LEN: usize = 10;
const MIN_DURATION_HOURS: i32 = 2;
const MAX_PAGE_SIZE: u64 = 100;

pub fn validate_task_id(id: &str) -> Result<TaskId, ApiError> {
    id.parse().map_err(|_| {
        ApiError::validation(format!("Invalid task id: {id}. Expected a UUID"))
    })
}

/// Check a create/update payload against the field constraints, collecting
/// every violation so the caller gets them all at once.
pub fn validate_task_request(payload: &TaskRequest) -> Result<(), ApiError> {
    let mut violations = Vec::new();

    if payload.name.trim().is_empty() {
        violations.push("name: Task name is required".to_string());
    }

    if payload.description.trim().is_empty() {
        violations.push("description: Task description is required".to_string());
    } else if payload.description.chars().count() < MIN_DESCRIPTION_LEN {
        violations.push(format!(
            "description: Task description must be at least {MIN_DESCRIPTION_LEN} characters"
        ));
    }

    if payload.duration_in_hour < MIN_DURATION_HOURS {
        violations.push(format!(
            "durationInHour: Duration must be at least {MIN_DURATION_HOURS} hours"
        ));
    }

    if let Some(scheduled) = &payload.scheduled_date_time
        && chrono::DateTime::parse_from_rfc3339(scheduled).is_err()
    {
        violations.push(
            "scheduledDateTime: Scheduled date must be an RFC3339 timestamp".to_string(),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationError(violations))
    }
}

pub fn validate_page_size(page_size: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "Invalid page size: {page_size}. Page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, description: &str, duration: i32) -> TaskRequest {
        TaskRequest {
            name: name.to_string(),
            description: description.to_string(),
            scheduled_date_time: None,
            duration_in_hour: duration,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_task_request(&request("Write report", "Draft the quarterly report", 3)).is_ok());
    }

    #[test]
    fn test_description_length_boundary() {
        // 9 characters fails, 10 passes
        assert!(validate_task_request(&request("Task", "123456789", 2)).is_err());
        assert!(validate_task_request(&request("Task", "1234567890", 2)).is_ok());
    }

    #[test]
    fn test_duration_boundary() {
        assert!(validate_task_request(&request("Task", "long enough text", 1)).is_err());
        assert!(validate_task_request(&request("Task", "long enough text", 2)).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(validate_task_request(&request("", "long enough text", 2)).is_err());
        assert!(validate_task_request(&request("   ", "long enough text", 2)).is_err());
    }

    #[test]
    fn test_violations_are_collected() {
        let err = validate_task_request(&request("", "short", 0)).unwrap_err();
        match err {
            ApiError::ValidationError(violations) => assert_eq!(violations.len(), 3),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_scheduled_date_must_be_rfc3339() {
        let mut req = request("Task", "long enough text", 2);
        req.scheduled_date_time = Some("tomorrow".to_string());
        assert!(validate_task_request(&req).is_err());

        req.scheduled_date_time = Some("2026-09-01T10:00:00Z".to_string());
        assert!(validate_task_request(&req).is_ok());
    }

    #[test]
    fn test_validate_task_id() {
        assert!(validate_task_id("f3b5c2de-8a33-4f6e-9b1a-0c4d5e6f7a8b").is_ok());
        assert!(validate_task_id("42").is_err());
        assert!(validate_task_id("").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(100).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
    }
}
