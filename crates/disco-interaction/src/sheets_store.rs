//! GoogleSheetsStore - append-only row store backed by a Google Sheets worksheet.
//!
//! The workbook is located by name through the Drive files API (the same way
//! a spreadsheet is "opened" by title) unless an explicit spreadsheet id is
//! configured. The resolved id is kept for the life of the process.

use crate::service_account::ServiceAccountAuth;
use async_trait::async_trait;
use disco_core::analysis::AnalysisRow;
use disco_core::config::{ServiceAccountKey, StoreConfig};
use disco_core::error::StoreError;
use disco_core::store::AnalysisStore;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

pub struct GoogleSheetsStore {
    client: Client,
    auth: ServiceAccountAuth,
    workbook: String,
    worksheet: String,
    sheets_base: String,
    drive_files_url: String,
    spreadsheet_id: Mutex<Option<String>>,
}

impl GoogleSheetsStore {
    pub fn new(key: &ServiceAccountKey, config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::new();
        let auth = ServiceAccountAuth::new(client.clone(), key, config.scopes.clone())?;

        Ok(Self {
            client,
            auth,
            workbook: config.workbook.clone(),
            worksheet: config.worksheet.clone(),
            sheets_base: SHEETS_API_BASE.to_string(),
            drive_files_url: DRIVE_FILES_URL.to_string(),
            spreadsheet_id: Mutex::new(config.spreadsheet_id.clone()),
        })
    }

    /// Overrides the Sheets and Drive endpoints.
    pub fn with_endpoints(
        mut self,
        sheets_base: impl Into<String>,
        drive_files_url: impl Into<String>,
    ) -> Self {
        self.sheets_base = sheets_base.into();
        self.drive_files_url = drive_files_url.into();
        self
    }

    pub fn workbook(&self) -> &str {
        &self.workbook
    }

    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    async fn spreadsheet_id(&self, token: &str) -> Result<String, StoreError> {
        let mut cached = self.spreadsheet_id.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let id = self.find_spreadsheet(token).await?;
        tracing::info!(workbook = %self.workbook, spreadsheet_id = %id, "Resolved workbook");
        *cached = Some(id.clone());
        Ok(id)
    }

    async fn find_spreadsheet(&self, token: &str) -> Result<String, StoreError> {
        let query = drive_name_query(&self.workbook);
        let response = self
            .client
            .get(&self.drive_files_url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Drive lookup failed: {e}")))?;

        let listing: FileList = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Request(format!("failed to parse Drive listing: {e}")))?;

        pick_workbook(listing, &self.workbook)
    }

    fn append_url(&self, spreadsheet_id: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.sheets_base)
            .map_err(|e| StoreError::Request(format!("invalid Sheets endpoint: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| StoreError::Request("invalid Sheets endpoint".to_string()))?
            .push(spreadsheet_id)
            .push("values")
            .push(&format!("{}:append", worksheet_range(&self.worksheet)));

        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        Ok(url)
    }
}

#[async_trait]
impl AnalysisStore for GoogleSheetsStore {
    async fn append_row(&self, row: &AnalysisRow) -> Result<(), StoreError> {
        let token = self.auth.access_token().await?;
        let spreadsheet_id = self.spreadsheet_id(&token).await?;
        let url = self.append_url(&spreadsheet_id)?;

        let body = ValueRange::single_row(row);
        let response = self
            .client
            .post(url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Request(format!("Sheets append failed: {e}")))?;

        ensure_success(response).await?;
        tracing::info!(
            session_id = %row.session_id,
            worksheet = %self.worksheet,
            "Appended analysis row"
        );
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange<'a> {
    major_dimension: &'static str,
    values: [[&'a str; 5]; 1],
}

impl<'a> ValueRange<'a> {
    fn single_row(row: &'a AnalysisRow) -> Self {
        Self {
            major_dimension: "ROWS",
            values: [row.values()],
        }
    }
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Drive search expression matching spreadsheets with exactly this name.
fn drive_name_query(workbook: &str) -> String {
    let escaped = workbook.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME_TYPE}' and trashed = false")
}

/// A1 range addressing the first cell of the worksheet; titles are quoted.
fn worksheet_range(worksheet: &str) -> String {
    format!("'{}'!A1", worksheet.replace('\'', "''"))
}

fn pick_workbook(listing: FileList, workbook: &str) -> Result<String, StoreError> {
    listing
        .files
        .into_iter()
        .find(|file| file.name == workbook)
        .map(|file| file.id)
        .ok_or_else(|| StoreError::WorkbookNotFound(workbook.to_string()))
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    let message = serde_json::from_str::<GoogleErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    Err(StoreError::Http {
        status: status.as_u16(),
        message,
    })
}
