//! Shopify Admin GraphQL implementation of the ShopifyAdmin port.
//!
//! Each call POSTs to `/admin/api/{version}/graphql.json` with the shop's
//! access token. GraphQL-level `errors` and mutation `userErrors` both fail
//! the call; an empty `userErrors` array is required before a mutation is
//! considered applied.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::ports::{
    AdminError, AdminSession, MediaImage, ProductMedia, ProductQuery, ProductSummary,
    ProductUpdate, ShopifyAdmin, UserError,
};

/// Hard cap on batch fetches, matching the platform edge limits this app
/// operates under.
const MAX_BATCH: u32 = 5;

pub struct AdminGraphqlClient {
    client: Client,
    api_version: String,
}

impl AdminGraphqlClient {
    pub fn new(client: Client, api_version: impl Into<String>) -> Self {
        Self {
            client,
            api_version: api_version.into(),
        }
    }

    fn endpoint(&self, session: &AdminSession) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            session.shop.as_str(),
            self.api_version
        )
    }

    /// Executes one GraphQL request and unwraps the `data`/`errors` envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        session: &AdminSession,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, AdminError> {
        let response = self
            .client
            .post(self.endpoint(session))
            .header("X-Shopify-Access-Token", session.access_token.expose_secret())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| AdminError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AdminError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminError::Network(format!(
                "Unexpected status {status}: {body}"
            )));
        }

        let envelope: GraphqlEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AdminError::InvalidResponse(e.to_string()))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                return Err(AdminError::Graphql(
                    errors.into_iter().map(|e| e.message).collect(),
                ));
            }
        }

        envelope
            .data
            .ok_or_else(|| AdminError::InvalidResponse("Response carried no data".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

fn check_user_errors(user_errors: Vec<UserError>) -> Result<(), AdminError> {
    if user_errors.is_empty() {
        Ok(())
    } else {
        Err(AdminError::UserErrors(user_errors))
    }
}

// Wire shapes for the product batch query.

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: NodeConnection<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct NodeConnection<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    title: String,
    body_html: Option<String>,
    handle: Option<String>,
    variants: Option<NodeConnection<VariantNode>>,
}

#[derive(Debug, Deserialize)]
struct VariantNode {
    price: String,
}

impl From<ProductNode> for ProductSummary {
    fn from(node: ProductNode) -> Self {
        let price = node
            .variants
            .and_then(|v| v.nodes.into_iter().next())
            .map(|v| v.price);
        ProductSummary {
            id: node.id,
            title: node.title,
            body_html: node.body_html,
            handle: node.handle,
            price,
        }
    }
}

// Wire shapes for the media batch query.

#[derive(Debug, Deserialize)]
struct MediaData {
    products: NodeConnection<MediaProductNode>,
}

#[derive(Debug, Deserialize)]
struct MediaProductNode {
    id: String,
    title: String,
    media: NodeConnection<MediaNode>,
}

#[derive(Debug, Deserialize)]
struct MediaNode {
    id: Option<String>,
    image: Option<ImageNode>,
}

#[derive(Debug, Deserialize)]
struct ImageNode {
    url: String,
}

impl From<MediaProductNode> for ProductMedia {
    fn from(node: MediaProductNode) -> Self {
        let images = node
            .media
            .nodes
            .into_iter()
            .filter_map(|media| match (media.id, media.image) {
                (Some(id), Some(image)) => Some(MediaImage { id, url: image.url }),
                _ => None,
            })
            .collect();
        ProductMedia {
            id: node.id,
            title: node.title,
            images,
        }
    }
}

// Wire shapes for mutations.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductUpdateData {
    product_update: MutationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileUpdateData {
    file_update: MutationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagsAddData {
    tags_add: MutationPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationPayload {
    #[serde(default)]
    user_errors: Vec<UserError>,
}

const PRODUCTS_QUERY: &str = r#"
query fetchBatch($first: Int!, $query: String, $reverse: Boolean) {
  products(first: $first, query: $query, reverse: $reverse) {
    nodes {
      id
      title
      bodyHtml
      handle
      variants(first: 1) { nodes { price } }
    }
  }
}"#;

const MEDIA_QUERY: &str = r#"
query fetchMediaBatch($first: Int!, $query: String) {
  products(first: $first, query: $query) {
    nodes {
      id
      title
      media(first: 5) {
        nodes {
          ... on MediaImage {
            id
            image { url }
          }
        }
      }
    }
  }
}"#;

const PRODUCT_UPDATE_MUTATION: &str = r#"
mutation productUpdate($input: ProductInput!) {
  productUpdate(input: $input) {
    product { id }
    userErrors { field message }
  }
}"#;

const FILE_UPDATE_MUTATION: &str = r#"
mutation fileUpdate($files: [FileUpdateInput!]!) {
  fileUpdate(files: $files) {
    files { id alt }
    userErrors { field message }
  }
}"#;

const TAGS_ADD_MUTATION: &str = r#"
mutation addTags($id: ID!, $tags: [String!]!) {
  tagsAdd(id: $id, tags: $tags) {
    node { id }
    userErrors { field message }
  }
}"#;

#[async_trait]
impl ShopifyAdmin for AdminGraphqlClient {
    async fn fetch_products(
        &self,
        session: &AdminSession,
        query: ProductQuery,
    ) -> Result<Vec<ProductSummary>, AdminError> {
        let data: ProductsData = self
            .execute(
                session,
                PRODUCTS_QUERY,
                json!({
                    "first": query.first.min(MAX_BATCH),
                    "query": query.search,
                    "reverse": query.reverse,
                }),
            )
            .await?;

        Ok(data
            .products
            .nodes
            .into_iter()
            .map(ProductSummary::from)
            .collect())
    }

    async fn fetch_media_batch(
        &self,
        session: &AdminSession,
        query: ProductQuery,
    ) -> Result<Vec<ProductMedia>, AdminError> {
        let data: MediaData = self
            .execute(
                session,
                MEDIA_QUERY,
                json!({
                    "first": query.first.min(MAX_BATCH),
                    "query": query.search,
                }),
            )
            .await?;

        Ok(data
            .products
            .nodes
            .into_iter()
            .map(ProductMedia::from)
            .collect())
    }

    async fn update_product(
        &self,
        session: &AdminSession,
        update: ProductUpdate,
    ) -> Result<(), AdminError> {
        let mut input = json!({ "id": update.id });
        if let Some(title) = update.title {
            input["title"] = json!(title);
        }
        if let Some(description_html) = update.description_html {
            input["descriptionHtml"] = json!(description_html);
        }

        let data: ProductUpdateData = self
            .execute(session, PRODUCT_UPDATE_MUTATION, json!({ "input": input }))
            .await?;

        check_user_errors(data.product_update.user_errors)
    }

    async fn update_file_alt(
        &self,
        session: &AdminSession,
        file_id: &str,
        alt: &str,
    ) -> Result<(), AdminError> {
        let data: FileUpdateData = self
            .execute(
                session,
                FILE_UPDATE_MUTATION,
                json!({ "files": [{ "id": file_id, "alt": alt }] }),
            )
            .await?;

        check_user_errors(data.file_update.user_errors)
    }

    async fn add_tags(
        &self,
        session: &AdminSession,
        resource_id: &str,
        tags: &[String],
    ) -> Result<(), AdminError> {
        let data: TagsAddData = self
            .execute(
                session,
                TAGS_ADD_MUTATION,
                json!({ "id": resource_id, "tags": tags }),
            )
            .await?;

        check_user_errors(data.tags_add.user_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_node_takes_first_variant_price() {
        let node: ProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Lamp",
            "bodyHtml": "<p>x</p>",
            "handle": "lamp",
            "variants": { "nodes": [{ "price": "19.99" }, { "price": "29.99" }] }
        }))
        .unwrap();
        let summary = ProductSummary::from(node);
        assert_eq!(summary.price.as_deref(), Some("19.99"));
    }

    #[test]
    fn media_node_skips_non_image_media() {
        let node: MediaProductNode = serde_json::from_value(serde_json::json!({
            "id": "gid://shopify/Product/1",
            "title": "Lamp",
            "media": { "nodes": [
                {},
                { "id": "gid://shopify/MediaImage/2", "image": { "url": "https://cdn/2.jpg" } }
            ]}
        }))
        .unwrap();
        let media = ProductMedia::from(node);
        assert_eq!(media.images.len(), 1);
        assert_eq!(media.images[0].id, "gid://shopify/MediaImage/2");
    }

    #[test]
    fn envelope_surfaces_graphql_errors() {
        let envelope: GraphqlEnvelope<ProductsData> = serde_json::from_value(serde_json::json!({
            "data": null,
            "errors": [{ "message": "Throttled" }]
        }))
        .unwrap();
        assert_eq!(envelope.errors.unwrap()[0].message, "Throttled");
    }

    #[test]
    fn user_errors_fail_the_mutation() {
        let payload = MutationPayload {
            user_errors: vec![UserError {
                field: None,
                message: "boom".to_string(),
            }],
        };
        assert!(matches!(
            check_user_errors(payload.user_errors),
            Err(AdminError::UserErrors(_))
        ));
    }
}
