//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::error::CdpError;
use crate::protocol::{ExceptionDetails, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Call a function with `this` bound to a remote object, returning its value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let result = self
            .call_function(object_id, function, args, true)
            .await?;
        Ok(result["result"]["value"].clone())
    }

    /// Call a function with `this` bound to a remote object, returning a
    /// handle to whatever it returns.
    pub async fn call_function_on_handle(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call_function(object_id, function, args, false)
            .await?;
        let remote_obj: RemoteObject = serde_json::from_value(result["result"].clone())?;
        Ok(remote_obj)
    }

    async fn call_function(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
        by_value: bool,
    ) -> Result<Value, CdpError> {
        let params = json!({
            "objectId": object_id,
            "functionDeclaration": function,
            "arguments": args.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>(),
            "returnByValue": by_value,
            "awaitPromise": true,
        });

        let result = self.call("Runtime.callFunctionOn", Some(params)).await?;
        check_exception(&result)?;
        Ok(result)
    }
}

/// Turn `exceptionDetails` in a Runtime result into an error.
pub(super) fn check_exception(result: &Value) -> Result<(), CdpError> {
    let Some(exception) = result.get("exceptionDetails") else {
        return Ok(());
    };

    let message = serde_json::from_value::<ExceptionDetails>(exception.clone())
        .map(|details| details.message())
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(CdpError::JavaScript(message))
}
