//! 基础请求验证逻辑

use super::models::{HttpServerError, VerifyRequest};

/// 验证 `/api/v1/verify` 请求：至少一个标识符，且不超过批量上限
pub fn validate_verify_request(
    req: &VerifyRequest,
    max_identifiers: usize,
) -> Result<(), HttpServerError> {
    if req.nips.is_empty() {
        return Err(HttpServerError::InvalidRequest(
            "nips cannot be empty".to_string(),
        ));
    }

    if req.nips.len() > max_identifiers {
        return Err(HttpServerError::InvalidRequest(format!(
            "Too many identifiers ({}, max {})",
            req.nips.len(),
            max_identifiers
        )));
    }

    Ok(())
}

/// 验证路径中的 task id / token（仅允许字母数字和连字符）
pub fn validate_path_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= 64 && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
