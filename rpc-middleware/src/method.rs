use std::fmt;

/// The RPC methods of the WhatsApp service, used as the `method` metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    CreateThread,
    CreateThreadAnalyzer,
    GenerateResponse,
    GenerateResponseAnalyzer,
}

impl RpcMethod {
    pub const ALL: [RpcMethod; 4] = [
        RpcMethod::CreateThread,
        RpcMethod::CreateThreadAnalyzer,
        RpcMethod::GenerateResponse,
        RpcMethod::GenerateResponseAnalyzer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::CreateThread => "CreateThread",
            RpcMethod::CreateThreadAnalyzer => "CreateThreadAnalyzer",
            RpcMethod::GenerateResponse => "GenerateResponse",
            RpcMethod::GenerateResponseAnalyzer => "GenerateResponseAnalyzer",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
