//! Status line for each error code

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Anything not listed is the caller's fault: 400
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;

        match self {
            NotAuthenticated | InvalidCredentials | TokenExpired | TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            // pending or role-less profiles are known users we still turn away
            AdminRequired | AccountPending | ProfileNotFound => StatusCode::FORBIDDEN,
            SupplierNotFound | ReportNotFound | CnpjNotFound => StatusCode::NOT_FOUND,
            DuplicatePhone => StatusCode::CONFLICT,
            FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RemoteServiceError | DatabaseError | FileStorageFailed => StatusCode::BAD_GATEWAY,
            NetworkError | LookupUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            InternalError | ImageProcessingFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
