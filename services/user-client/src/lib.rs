pub mod user {
    tonic::include_proto!("user");
}

pub mod api;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod stream;

pub use api::{Shutdown, UserApi, UserStream};
pub use connection::GrpcUserApi;
pub use dispatch::{dispatch, DispatchOptions, Mode, Outcome};
pub use error::ClientError;
pub use stream::{consume_stream, StreamEnding, StreamSummary};
