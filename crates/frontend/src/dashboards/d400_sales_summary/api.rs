use crate::shared::api_error::ApiError;
use crate::shared::api_utils::join_url;
use crate::shared::http::{HttpRequest, HttpResponse, HttpTransport, MultipartFile, RequestBody};
use crate::system::auth::provider::AuthProvider;
use contracts::dashboards::d400_sales_summary::{
    DashboardSummary, FileItem, FileListResponse, SummaryQuery, UploadResponse,
};
use serde::de::DeserializeOwned;
use std::rc::Rc;

pub const FILES_PATH: &str = "/getfiles/";
pub const UPLOAD_PATH: &str = "/upload/";
pub const SUMMARY_PATH: &str = "/dashboard/summary/";

/// Multipart field name expected by the upload endpoint
pub const UPLOAD_FIELD: &str = "file";

/// Client for the sales summary backend
#[derive(Clone)]
pub struct DashboardApi {
    transport: Rc<dyn HttpTransport>,
    auth: Rc<dyn AuthProvider>,
    base_url: String,
}

impl DashboardApi {
    pub fn new(
        transport: Rc<dyn HttpTransport>,
        auth: Rc<dyn AuthProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            auth,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorized(&self, request: HttpRequest) -> HttpRequest {
        match self.auth.token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{:?} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        log::debug!("-> {}", response.status);
        Ok(response)
    }

    /// Получить список ранее загруженных файлов (порядок сервера сохраняется)
    pub async fn list_files(&self) -> Result<Vec<FileItem>, ApiError> {
        let request = self
            .authorized(HttpRequest::get(self.url(FILES_PATH)))
            .header("Accept", "application/json");

        let response = self.send(request).await?;
        let data: FileListResponse = decode(response)?;
        Ok(data.files)
    }

    /// Загрузить один файл, вернуть сгенерированный идентификатор
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<UploadResponse, ApiError> {
        let body = RequestBody::Multipart(MultipartFile {
            field: UPLOAD_FIELD.to_string(),
            filename: filename.to_string(),
            bytes,
        });
        let request = self
            .authorized(HttpRequest::post(self.url(UPLOAD_PATH), body))
            .header("Accept", "application/json");

        let response = self.send(request).await?;
        decode(response)
    }

    /// Получить сводку по файлу и типу отчёта
    pub async fn fetch_summary(&self, query: &SummaryQuery) -> Result<DashboardSummary, ApiError> {
        let request = self
            .authorized(HttpRequest::get(summary_url(&self.base_url, query)?))
            .header("Accept", "application/json");

        let response = self.send(request).await?;
        decode(response)
    }
}

/// Full summary URL with the query string
pub fn summary_url(base_url: &str, query: &SummaryQuery) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(format!("{}?{}", join_url(base_url, SUMMARY_PATH), qs))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::from_response(&response));
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::undecodable(response.status, &e))
}
