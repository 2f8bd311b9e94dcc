//! Shared constants and invariants

pub const GOOGLE_PROVIDER: &str = "accounts.google.com";
pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// Cognito Identity JSON API
pub const COGNITO_TARGET_PREFIX: &str = "AWSCognitoIdentityService";
pub const COGNITO_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
