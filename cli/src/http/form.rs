//! 表单提交解析（multipart：文本框 `nip` + 文件 `plik`）

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;
use vatcheck_core::api::Upload;

pub const FIELD_NIP: &str = "nip";
pub const FIELD_FILE: &str = "plik";

/// 上传的文件（已完整读入内存，大小受 body limit 约束）
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct SubmittedForm {
    pub nip: Option<String>,
    pub file: Option<UploadedFile>,
}

impl SubmittedForm {
    pub fn upload(&self) -> Option<Upload<'_>> {
        self.file.as_ref().map(|f| Upload {
            file_name: &f.file_name,
            bytes: &f.bytes,
        })
    }
}

/// 读取整个 multipart 表单；未知字段被忽略
pub async fn read_submitted_form(mut multipart: Multipart) -> Result<SubmittedForm, MultipartError> {
    let mut form = SubmittedForm::default();

    while let Some(field) = multipart.next_field().await? {
        // 读取内容会消费 field，先拿出名字
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FIELD_NIP => {
                form.nip = Some(field.text().await?);
            }
            FIELD_FILE => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.file = Some(UploadedFile { file_name, bytes });
            }
            other => {
                tracing::debug!(target: "vatcheck.http", field = other, "ignoring form field");
            }
        }
    }

    Ok(form)
}
