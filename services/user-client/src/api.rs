use futures::stream::BoxStream;

use crate::error::ClientError;
use crate::user::{AddUserRequest, User};

/// Users delivered by the server-streaming list call, in delivery order.
pub type UserStream = BoxStream<'static, Result<User, ClientError>>;

/// Which teardown path closed a connection.
///
/// `tonic` has no explicit channel shutdown, so both variants release the
/// connection by dropping the last client handle. `Immediate` is used after a
/// stream, whose response body has already been dropped by then, which resets
/// the HTTP/2 stream if it was still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shutdown {
    /// After a unary call has returned.
    Graceful,
    /// After a streaming call, whatever way it ended.
    Immediate,
}

/// The remote operations of the user service, as seen by the dispatcher.
#[tonic::async_trait]
pub trait UserApi: Send {
    async fn add_user(&mut self, request: AddUserRequest) -> Result<User, ClientError>;

    async fn get_all_users(&mut self) -> Result<Vec<User>, ClientError>;

    async fn get_all_users_stream(&mut self) -> Result<UserStream, ClientError>;

    /// Consumes the connection, so it can be closed at most once.
    fn close(self, shutdown: Shutdown)
    where
        Self: Sized;
}
