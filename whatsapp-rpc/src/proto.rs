//! Wire messages of the `whatsapp` package (see `proto/whatsapp.proto`) and the generated
//! `WhatsAppService` server and client.

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateThreadRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateThreadResponse {
    #[prost(string, tag = "1")]
    pub thread_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateThreadAnalyzerRequest {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateThreadAnalyzerResponse {
    #[prost(string, tag = "1")]
    pub thread_id_analyzer: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GenerateResponseRequest {
    #[prost(string, tag = "1")]
    pub phone: String,
    #[prost(string, tag = "2")]
    pub thread_id: String,
    #[prost(string, tag = "3")]
    pub message_body: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GenerateResponseResponse {
    #[prost(string, tag = "1")]
    pub response: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GenerateResponseAnalyzerRequest {
    #[prost(string, tag = "1")]
    pub thread_id_analyzer: String,
    #[prost(string, tag = "2")]
    pub message_body: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GenerateResponseAnalyzerResponse {
    #[prost(string, tag = "1")]
    pub response: String,
}

include!(concat!(env!("OUT_DIR"), "/whatsapp.WhatsAppService.rs"));
