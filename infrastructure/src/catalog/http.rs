//! Poem catalog served by the tutor backend (`GET /api/poems`).

use crate::http::{ApiClient, ApiError};
use crate::tutor::wire::WirePoem;
use async_trait::async_trait;
use tutor_application::ports::content_catalog::{CatalogError, ContentCatalog};
use tutor_domain::ContentItem;

pub struct HttpContentCatalog {
    api: ApiClient,
}

impl HttpContentCatalog {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn to_catalog_error(e: ApiError) -> CatalogError {
    CatalogError::Http(e.to_string())
}

#[async_trait]
impl ContentCatalog for HttpContentCatalog {
    async fn list(&self) -> Result<Vec<ContentItem>, CatalogError> {
        let poems: Vec<WirePoem> = self
            .api
            .get_json("/api/poems")
            .await
            .map_err(to_catalog_error)?;
        let mut items: Vec<ContentItem> = poems.into_iter().map(ContentItem::from).collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn find(&self, id: u64) -> Result<Option<ContentItem>, CatalogError> {
        match self.api.get_json::<WirePoem>(&format!("/api/poems/{}", id)).await {
            Ok(poem) => Ok(Some(poem.into())),
            Err(ApiError::Status { status: 404, .. }) => Ok(None),
            Err(e) => Err(to_catalog_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn catalog_answering(
        route: &str,
        response: ResponseTemplate,
    ) -> (MockServer, HttpContentCatalog) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .expect(1)
            .mount(&server)
            .await;
        let catalog = HttpContentCatalog::new(ApiClient::new(server.uri(), None).unwrap());
        (server, catalog)
    }

    #[tokio::test]
    async fn test_list_sorts_by_id() {
        let (_server, catalog) = catalog_answering(
            "/api/poems",
            ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "title": "서시", "author": "윤동주", "content": "b"},
                {"id": 1, "title": "진달래꽃", "author": "김소월", "content": "a"}
            ])),
        )
        .await;

        let items = catalog.list().await.unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(items[0].body, "a");
    }

    #[tokio::test]
    async fn test_find_known_poem() {
        let (_server, catalog) = catalog_answering(
            "/api/poems/3",
            ResponseTemplate::new(200).set_body_json(json!(
                {"id": 3, "title": "별 헤는 밤", "author": "윤동주", "content": "계절이 지나가는 하늘에는"}
            )),
        )
        .await;

        let item = catalog.find(3).await.unwrap().unwrap();
        assert_eq!(item.title, "별 헤는 밤");
    }

    #[tokio::test]
    async fn test_find_not_found_is_none() {
        let (_server, catalog) = catalog_answering(
            "/api/poems/9",
            ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})),
        )
        .await;
        assert!(catalog.find(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let (_server, catalog) = catalog_answering(
            "/api/poems",
            ResponseTemplate::new(503).set_body_json(json!({})),
        )
        .await;
        assert!(matches!(catalog.list().await, Err(CatalogError::Http(_))));
    }
}
