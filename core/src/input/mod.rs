//! 输入收集：表单文本框中的单个 NIP，或上传的 xlsx 文件中的一批 NIP

use crate::error::InputError;
use crate::sheet::{has_xlsx_extension, read_identifiers};

/// 上传的文件
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    pub file_name: &'a str,
    pub bytes: &'a [u8],
}

/// 按表单规则确定要校验的原始标识符序列
///
/// - 文本框非空（去掉首尾空白后）优先，结果恰好一个元素；
/// - 否则需要一个以 `.xlsx` 结尾的文件；
/// - 文件中的标识符数量超过 `max_identifiers` 时整体拒绝。
pub fn collect_identifiers(
    text: Option<&str>,
    upload: Option<Upload<'_>>,
    max_identifiers: usize,
) -> Result<Vec<String>, InputError> {
    if let Some(nip) = text.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(vec![nip.to_string()]);
    }

    // 浏览器未选择文件时也会提交一个文件名为空的字段
    let Some(upload) = upload.filter(|u| !u.file_name.trim().is_empty()) else {
        return Err(InputError::Missing);
    };

    if !has_xlsx_extension(upload.file_name) {
        return Err(InputError::UnsupportedFile(upload.file_name.to_string()));
    }

    let identifiers = read_identifiers(upload.bytes)?;
    if identifiers.len() > max_identifiers {
        return Err(InputError::TooMany {
            count: identifiers.len(),
            limit: max_identifiers,
        });
    }

    tracing::info!(
        target: "vatcheck.input",
        file_name = %upload.file_name,
        identifiers = identifiers.len(),
        "spreadsheet accepted"
    );
    Ok(identifiers)
}
