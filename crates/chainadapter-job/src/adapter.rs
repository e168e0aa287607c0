//! The shared invocation contract: job request in, `(status, JobResult)` out.

use std::sync::Arc;

use serde_json::Value;

use chainadapter_codec::{ParameterCodec, TypedValue};
use chainadapter_http::{CallTransport, ConstantCallRequest, HttpCallTransport, HttpResponse, Requester};

use crate::config::AdapterConfig;
use crate::error::AdapterError;
use crate::job::{validate, JobResult, JobRunId};

/// ABI type of the single call argument.
pub const USER_TYPE: &str = "address";

/// ABI type of the call result.
pub const RESULT_TYPE: &str = "uint256";

const RESULT_PATH: &str = "constant_result.0";

/// Runs job requests against one contract method.
///
/// Holds only configuration and the transport; cheap to clone and safe to
/// share across concurrent invocations.
#[derive(Clone)]
pub struct Adapter {
    config: AdapterConfig,
    requester: Requester,
}

impl Adapter {
    /// Build an adapter that talks to `config.endpoint_url` over HTTP.
    pub fn new(config: AdapterConfig) -> Result<Self, AdapterError> {
        let transport = HttpCallTransport::new(config.endpoint_url.clone(), config.http_config())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build an adapter over any transport.
    pub fn with_transport(config: AdapterConfig, transport: Arc<dyn CallTransport>) -> Self {
        let requester = Requester::new(transport, config.retry.to_retry_config());
        Self { config, requester }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Contract-call body for a user given as a TRON hex address.
    pub fn build_call(&self, user_address: &str) -> Result<ConstantCallRequest, AdapterError> {
        let parameter =
            ParameterCodec::encode(&[TypedValue::new(USER_TYPE, user_address.to_string())])?;
        Ok(ConstantCallRequest {
            owner_address: self.config.owner_address.clone(),
            contract_address: self.config.contract_address.clone(),
            function_selector: self.config.function_selector.clone(),
            parameter,
            visible: self.config.visible,
        })
    }

    /// Run one job request. Failures of any step yield status 500 and an
    /// errored envelope; there are no partial results.
    pub async fn create_request(&self, input: Value) -> (u16, JobResult) {
        let job_run_id = JobRunId::from_input(&input);
        match self.execute(&input).await {
            Ok(response) => {
                tracing::info!(
                    job_run_id = %job_run_id,
                    status = response.status,
                    result = %response.data["result"],
                    "job run succeeded"
                );
                (response.status, JobResult::success(job_run_id, response))
            }
            Err(e) => {
                tracing::error!(job_run_id = %job_run_id, error = %e, "job run failed");
                (500, JobResult::errored(job_run_id, &e))
            }
        }
    }

    async fn execute(&self, input: &Value) -> Result<HttpResponse, AdapterError> {
        let job = validate(input)?;
        let user = job.decode_user()?;
        let call = self.build_call(&user)?;
        tracing::debug!(job_run_id = %job.id, user = %user, parameter = %call.parameter, "calling contract");

        let mut response = self.requester.request(&call).await?;

        let raw = response
            .constant_result()
            .ok_or_else(|| AdapterError::MissingResult {
                path: RESULT_PATH.into(),
            })?;
        let decoded = ParameterCodec::decode(&[RESULT_TYPE], &format!("0x{raw}"), false)
            .map_err(AdapterError::ResultDecode)?;
        let result = decoded
            .first()
            .map(ToString::to_string)
            .ok_or_else(|| AdapterError::MissingResult {
                path: RESULT_PATH.into(),
            })?;

        match response.data.as_object_mut() {
            Some(obj) => {
                obj.insert("result".into(), Value::String(result));
            }
            None => {
                return Err(AdapterError::MissingResult {
                    path: RESULT_PATH.into(),
                })
            }
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chainadapter_http::TransportError;

    struct Unreachable;

    #[async_trait]
    impl CallTransport for Unreachable {
        async fn send(&self, _req: &ConstantCallRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Other("no network in unit tests".into()))
        }
        fn url(&self) -> &str {
            "mock://unreachable"
        }
    }

    fn adapter() -> Adapter {
        Adapter::with_transport(AdapterConfig::default(), Arc::new(Unreachable))
    }

    #[test]
    fn build_call_uses_config_and_encodes_user() {
        let call = adapter()
            .build_call("41d8da6bf26964af9d7eed9e03e53415d37aa96045")
            .unwrap();
        assert_eq!(call.function_selector, "confirmedTokensForUser(address)");
        assert_eq!(call.owner_address, "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb");
        assert_eq!(call.contract_address, "TBSo1pthwZJkkXLwfNUC3wzKG2K7wt2Zvg");
        assert!(call.visible);
        assert_eq!(
            call.parameter,
            "000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045"
        );
    }

    #[test]
    fn build_call_rejects_garbage_user() {
        let err = adapter().build_call("not-an-address").unwrap_err();
        assert_eq!(err.name(), "EncodingError");
    }

    #[tokio::test]
    async fn non_retryable_transport_error_fails_job() {
        // base64("41d8da6bf26964af9d7eed9e03e53415d37aa96045")
        let user = "NDFkOGRhNmJmMjY5NjRhZjlkN2VlZDllMDNlNTM0MTVkMzdhYTk2MDQ1";
        let (status, result) = adapter()
            .create_request(serde_json::json!({"id": "7", "data": {"user": user}}))
            .await;
        assert_eq!(status, 500);
        assert!(!result.is_success());
        assert_eq!(result.job_run_id(), &JobRunId::String("7".into()));
    }
}
