use tonic_build::manual::{Builder, Method, Service};

fn method(name: &str, route: &str, input: &str, output: &str) -> Method {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::proto::{}", input))
        .output_type(format!("crate::proto::{}", output))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let service = Service::builder()
        .name("WhatsAppService")
        .package("whatsapp")
        .method(method(
            "create_thread",
            "CreateThread",
            "CreateThreadRequest",
            "CreateThreadResponse",
        ))
        .method(method(
            "create_thread_analyzer",
            "CreateThreadAnalyzer",
            "CreateThreadAnalyzerRequest",
            "CreateThreadAnalyzerResponse",
        ))
        .method(method(
            "generate_response",
            "GenerateResponse",
            "GenerateResponseRequest",
            "GenerateResponseResponse",
        ))
        .method(method(
            "generate_response_analyzer",
            "GenerateResponseAnalyzer",
            "GenerateResponseAnalyzerRequest",
            "GenerateResponseAnalyzerResponse",
        ))
        .build();

    Builder::new().compile(&[service]);
}
