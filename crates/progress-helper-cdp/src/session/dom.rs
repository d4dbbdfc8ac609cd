//! DOM operations for CDP page session.

use serde_json::json;

use crate::error::CdpError;
use crate::protocol::{DomNode, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Get the document root node.
    ///
    /// Node ids handed out earlier stay valid until the next call to this.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Query selector within the subtree of `node_id`.
    pub async fn query_selector_all(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Vec<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// Resolve node to runtime object.
    pub async fn resolve_node(&self, node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node_id})))
            .await?;

        let obj: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(obj)
    }

    /// Turn a runtime object back into a DOM node id.
    pub async fn request_node(&self, object_id: &str) -> Result<i64, CdpError> {
        let result = self
            .call("DOM.requestNode", Some(json!({"objectId": object_id})))
            .await?;

        result["nodeId"]
            .as_i64()
            .filter(|id| *id != 0)
            .ok_or_else(|| CdpError::InvalidResponse("Missing nodeId".to_string()))
    }

    /// Release a runtime object handle.
    pub async fn release_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("Runtime.releaseObject", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }
}
