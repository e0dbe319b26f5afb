//! `WhatsAppService` implementation.
//!
//! Each handler runs its business call through the middleware stack and answers with an
//! empty-string field when the call fails. Business failures never become a `tonic::Status`.

use crate::proto::whats_app_service_server::{WhatsAppService, WhatsAppServiceServer};
use crate::proto::{
    CreateThreadAnalyzerRequest, CreateThreadAnalyzerResponse, CreateThreadRequest,
    CreateThreadResponse, GenerateResponseAnalyzerRequest, GenerateResponseAnalyzerResponse,
    GenerateResponseRequest, GenerateResponseResponse,
};
use gateway_core::{GatewayError, MessageRole};
use responder::{AssistantProfile, AssistantProfiles, Responder};
use rpc_middleware::{MiddlewareStack, RpcMethod};
use tonic::{Request, Response, Status};
use tracing::{info, instrument};

/// gRPC handlers backed by the responder.
#[derive(Clone)]
pub struct WhatsAppRpc {
    responder: Responder,
    profiles: AssistantProfiles,
    middleware: MiddlewareStack,
}

impl WhatsAppRpc {
    /// Handlers with the standard logging and metrics middleware.
    pub fn new(responder: Responder, profiles: AssistantProfiles) -> Self {
        Self {
            responder,
            profiles,
            middleware: MiddlewareStack::standard(),
        }
    }

    pub fn with_middleware(mut self, middleware: MiddlewareStack) -> Self {
        self.middleware = middleware;
        self
    }

    pub fn into_server(self) -> WhatsAppServiceServer<Self> {
        WhatsAppServiceServer::new(self)
    }

    /// New thread id, or an empty string when creation failed.
    async fn new_thread(&self, method: RpcMethod) -> String {
        self.middleware
            .observe(method, async {
                self.responder
                    .client()
                    .create_thread()
                    .await
                    .ok_or(GatewayError::ThreadCreation)
            })
            .await
            .unwrap_or_default()
    }

    /// Reply text for `text` on the thread, or an empty string when the append failed.
    async fn reply(
        &self,
        method: RpcMethod,
        profile: &AssistantProfile,
        thread_id: &str,
        text: &str,
    ) -> String {
        self.middleware
            .observe(
                method,
                self.responder
                    .process_response(profile, thread_id, MessageRole::User, text),
            )
            .await
            .unwrap_or_default()
    }
}

#[tonic::async_trait]
impl WhatsAppService for WhatsAppRpc {
    #[instrument(skip(self, _request))]
    async fn create_thread(
        &self,
        _request: Request<CreateThreadRequest>,
    ) -> Result<Response<CreateThreadResponse>, Status> {
        let thread_id = self.new_thread(RpcMethod::CreateThread).await;
        info!(thread_id = %thread_id, "Thread created");
        Ok(Response::new(CreateThreadResponse { thread_id }))
    }

    #[instrument(skip(self, _request))]
    async fn create_thread_analyzer(
        &self,
        _request: Request<CreateThreadAnalyzerRequest>,
    ) -> Result<Response<CreateThreadAnalyzerResponse>, Status> {
        let thread_id_analyzer = self.new_thread(RpcMethod::CreateThreadAnalyzer).await;
        info!(thread_id = %thread_id_analyzer, "Analyzer thread created");
        Ok(Response::new(CreateThreadAnalyzerResponse { thread_id_analyzer }))
    }

    #[instrument(skip(self, request))]
    async fn generate_response(
        &self,
        request: Request<GenerateResponseRequest>,
    ) -> Result<Response<GenerateResponseResponse>, Status> {
        let request = request.into_inner();
        info!(thread_id = %request.thread_id, phone = %request.phone, "Generating response");
        let response = self
            .reply(
                RpcMethod::GenerateResponse,
                &self.profiles.primary,
                &request.thread_id,
                &request.message_body,
            )
            .await;
        Ok(Response::new(GenerateResponseResponse { response }))
    }

    #[instrument(skip(self, request))]
    async fn generate_response_analyzer(
        &self,
        request: Request<GenerateResponseAnalyzerRequest>,
    ) -> Result<Response<GenerateResponseAnalyzerResponse>, Status> {
        let request = request.into_inner();
        info!(thread_id = %request.thread_id_analyzer, "Generating analyzer response");
        let response = self
            .reply(
                RpcMethod::GenerateResponseAnalyzer,
                &self.profiles.analyzer,
                &request.thread_id_analyzer,
                &request.message_body,
            )
            .await;
        Ok(Response::new(GenerateResponseAnalyzerResponse { response }))
    }
}
