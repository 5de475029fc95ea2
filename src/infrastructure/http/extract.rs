//! Request Extractors
//!
//! - `JsonBody`: 解析失败时返回字段级 400，而不是 axum 默认的纯文本拒绝
//! - `PatchBody`: 局部更新用，空请求体等同于空对象
//! - `ProjectForm`: multipart（含图片）或 JSON（仅文本字段）
//! - `resource_id`: 路径中的记录 id

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::state::AppState;
use crate::domain::project::{ImageUpload, ProjectFields, UploadPolicy, UploadRejection, IMAGE_FIELD};

/// JSON 请求体
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::malformed_body(rejection.body_text())),
        }
    }
}

/// 局部更新的 JSON 请求体
///
/// 没有请求体（或只有空白）时得到 `T::default()`，不要求 Content-Type
pub struct PatchBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for PatchBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = content_type(req.headers()).as_deref() == Some("application/json");
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::malformed_body(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(PatchBody(T::default()));
        }
        if !is_json {
            return Err(ApiError::malformed_body(
                "Expected request with `Content-Type: application/json`",
            ));
        }

        serde_json::from_slice(&bytes)
            .map(PatchBody)
            .map_err(|e| ApiError::malformed_body(e.to_string()))
    }
}

/// 路径 id 不是整数时按不存在处理
pub fn resource_id(raw: &str, resource_type: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("{} not found", resource_type)))
}

/// 项目表单
#[derive(Debug, Default)]
pub struct ProjectForm {
    pub fields: ProjectFields,
    pub image: Option<ImageUpload>,
}

#[axum::async_trait]
impl FromRequest<Arc<AppState>> for ProjectForm {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        match content_type(req.headers()).as_deref() {
            Some("multipart/form-data") => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::malformed_body(e.body_text()))?;
                Ok(read_multipart(multipart, &state.upload_policy).await?)
            }
            Some("application/json") => {
                let PatchBody(fields) = PatchBody::<ProjectFields>::from_request(req, state).await?;
                Ok(ProjectForm {
                    fields,
                    image: None,
                })
            }
            // 没有请求体或无法识别的类型：所有字段视为缺省
            _ => Ok(ProjectForm::default()),
        }
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mime = value.split(';').next()?.trim().to_ascii_lowercase();
    Some(mime)
}

/// 逐个读取表单字段；图片按块累计大小，超限立即中止，不落盘
async fn read_multipart(
    mut multipart: Multipart,
    policy: &UploadPolicy,
) -> Result<ProjectForm, UploadRejection> {
    let mut form = ProjectForm::default();
    let to_rejection = |e: MultipartError| multipart_rejection(e, policy);

    while let Some(mut field) = multipart.next_field().await.map_err(to_rejection)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            // 浏览器在未选择文件时会提交一个空文件名的空 part
            if file_name.is_empty() {
                continue;
            }
            if name != IMAGE_FIELD || form.image.is_some() {
                return Err(UploadRejection::UnexpectedField(name));
            }

            let kind = policy.check_type(Some(file_name.as_str()), field.content_type())?;

            let mut bytes = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(to_rejection)? {
                policy.check_size((bytes.len() + chunk.len()) as u64)?;
                bytes.extend_from_slice(&chunk);
            }

            form.image = Some(ImageUpload {
                original_name: file_name,
                kind,
                bytes,
            });
            continue;
        }

        let value = field.text().await.map_err(to_rejection)?;
        match name.as_str() {
            "name" => form.fields.name = Some(value),
            "description" => form.fields.description = Some(value),
            "date" => form.fields.date = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_rejection(err: MultipartError, policy: &UploadPolicy) -> UploadRejection {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadRejection::TooLarge {
            limit: policy.max_file_size(),
        }
    } else {
        UploadRejection::Malformed(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_id() {
        assert_eq!(resource_id("42", "Contact").unwrap(), 42);
        match resource_id("abc", "Contact") {
            Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Contact not found"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_content_type_ignores_parameters() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            "Multipart/Form-Data; boundary=xyz".parse().unwrap(),
        );
        assert_eq!(content_type(&headers).as_deref(), Some("multipart/form-data"));
        assert_eq!(content_type(&HeaderMap::new()), None);
    }
}
