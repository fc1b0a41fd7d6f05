use common::ConfigError;

#[derive(Debug)]
pub enum ClientError {
    Config(ConfigError),
    InvalidUri(String),
    Transport(tonic::transport::Error),
    Rpc(tonic::Status),
    MissingUser,
    Cancelled,
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Config(e) => write!(f, "Configuration error: {}", e),
            ClientError::InvalidUri(uri) => write!(f, "Invalid service address: {}", uri),
            ClientError::Transport(e) => write!(f, "Transport error: {}", e),
            ClientError::Rpc(status) => write!(
                f,
                "Remote call failed ({:?}): {}",
                status.code(),
                status.message()
            ),
            ClientError::MissingUser => write!(f, "Response did not contain a user"),
            ClientError::Cancelled => write!(f, "Call cancelled before it completed"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Config(e) => Some(e),
            ClientError::Transport(e) => Some(e),
            ClientError::Rpc(status) => Some(status),
            ClientError::InvalidUri(_) | ClientError::MissingUser | ClientError::Cancelled => None,
        }
    }
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        ClientError::Config(err)
    }
}

impl From<tonic::transport::Error> for ClientError {
    fn from(err: tonic::transport::Error) -> Self {
        ClientError::Transport(err)
    }
}

impl From<tonic::Status> for ClientError {
    fn from(err: tonic::Status) -> Self {
        ClientError::Rpc(err)
    }
}
