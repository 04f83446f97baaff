//! Synthetic error wording
//!
//! Messages are written to look like real failures from the dependencies a
//! typical web service talks to.

use crate::config::ErrorType;

/// Messages drawn by the probabilistic policy
pub const ERROR_MESSAGES: [&str; 10] = [
    "DatabaseConnectionError: Unable to connect to PostgreSQL at db:5432",
    "RedisConnectionError: Connection refused to redis:6379",
    "TimeoutException: Request to external API timed out after 30s",
    "AuthenticationError: JWT token expired or invalid",
    "PermissionDenied: Insufficient permissions to access resource",
    "FileNotFoundError: Configuration file /etc/app/config.yaml not found",
    "NetworkError: Failed to resolve DNS for api.service.local",
    "ValueError: Invalid input format in request payload",
    "KeyError: Required field \"user_id\" missing from request",
    "ImportError: Module \"critical_dependency\" not found",
];

/// Fixed line logged on every invocation for the given error type, if any
pub fn fixed_error_line(error_type: &ErrorType) -> Option<&'static str> {
    match error_type {
        ErrorType::ImportError => {
            Some("ImportError: Failed to import required module \"database_connector\"")
        }
        ErrorType::DbError => Some("DatabaseError: Connection pool exhausted, max connections: 100"),
        ErrorType::ApiError => Some("APIError: Upstream service returned 503 Service Unavailable"),
        ErrorType::DiskFull => {
            Some("IOError: [Errno 28] No space left on device: \"/var/log/app.log\"")
        }
        _ => None,
    }
}
