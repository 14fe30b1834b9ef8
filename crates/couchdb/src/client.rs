// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::models::AllDocs;
use async_trait::async_trait;
use couchfs::store::{Response, Store};
use diagnostics::*;
use url::Url;

const ALL_DBS: &str = "_all_dbs";
const ALL_DOCS: &str = "_all_docs";

/// Async CouchDB client
pub struct Client {
    http_client: reqwest::Client,
    config: ConnectionConfig,
}

impl Client {
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Client {
            http_client,
            config,
        })
    }

    /// Parse a connection URI and build a client for it
    pub fn connect(uri: &str) -> Result<Self> {
        Self::new(ConnectionConfig::parse(uri)?)
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Database names from `_all_dbs`
    pub async fn all_dbs(&self) -> Result<Vec<String>> {
        let url = self.config.url_for(&[ALL_DBS])?;
        self.fetch_json(url).await
    }

    /// Document ids from `{db}/_all_docs`, design documents included
    pub async fn all_doc_ids(&self, database: &str) -> Result<Vec<String>> {
        let url = self.config.url_for(&[database, ALL_DOCS])?;
        let all: AllDocs = self.fetch_json(url).await?;
        Ok(all.into_ids())
    }

    /// Status and body of `GET {base}/{segments...}`, whatever the status.
    /// Each segment is sent as one encoded path segment.
    pub async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.config.url_for(segments)?;
        let response = self.request(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Response::new(status, body))
    }

    fn request(&self, url: Url) -> reqwest::RequestBuilder {
        let builder = self
            .http_client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.config.credentials {
            Some(credentials) => {
                builder.basic_auth(&credentials.user, Some(&credentials.password))
            }
            None => builder,
        }
    }

    async fn fetch_json<T>(&self, url: Url) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let response = self.request(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Store for Client {
    async fn list_database_names(&self) -> couchfs::Result<Vec<String>> {
        Ok(self.all_dbs().await?)
    }

    async fn fetch_object(&self, database: Option<&str>, id: &str) -> couchfs::Result<Response> {
        let response = match database {
            Some(database) => self.get(&[database, id]).await?,
            None => self.get(&[id]).await?,
        };
        debug!(
            "GET {database}/{id} -> {status}",
            database: database.unwrap_or(""),
            id: id,
            status: response.status
        );
        Ok(response)
    }

    async fn list_document_ids(&self, database: &str) -> couchfs::Result<Vec<String>> {
        Ok(self.all_doc_ids(database).await?)
    }
}
