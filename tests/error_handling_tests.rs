use cash_register_server::receipt::{ConvertError, ReceiptError};
use cash_register_server::ErrorResponse;

#[test]
fn test_error_response_kinds() {
    assert_eq!(ErrorResponse::not_found("Receipt not found").error, "NotFound");
    assert_eq!(ErrorResponse::bad_request("Item list is empty").error, "BadRequest");
    assert_eq!(ErrorResponse::internal_error("Conversion failed").error, "InternalServerError");
}

#[test]
fn test_error_response_serialization() {
    let error = ErrorResponse::bad_request("item list is empty or missing");

    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["error"], "BadRequest");
    assert_eq!(json["message"], "item list is empty or missing");
    assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());

    let deserialized: ErrorResponse = serde_json::from_value(json).unwrap();
    assert_eq!(deserialized.message, error.message);
}

#[test]
fn test_receipt_error_causes_are_distinguishable() {
    let errors = [
        ReceiptError::MediaDir(std::io::Error::other("permission denied")),
        ReceiptError::Convert(ConvertError::Exit(1)),
        ReceiptError::WriteDocument(std::io::Error::other("disk full")),
    ];

    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert!(messages[0].starts_with("failed to create media directory"));
    assert!(messages[1].starts_with("failed to convert receipt to PDF"));
    assert!(messages[2].starts_with("failed to write receipt document"));
}
