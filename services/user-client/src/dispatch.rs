use std::time::Duration;

use log::{info, warn};
use tokio_util::sync::CancellationToken;

use common::{random_new_user, ClientConfig, NewUser};

use crate::api::{Shutdown, UserApi};
use crate::error::ClientError;
use crate::stream::{consume_stream, StreamEnding, StreamSummary};
use crate::user::{AddUserRequest, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    AddUser,
    StreamAll,
    ListAll,
}

impl Mode {
    pub fn from_selector(selector: i32) -> Self {
        match selector {
            0 => Mode::AddUser,
            1 => Mode::StreamAll,
            _ => Mode::ListAll,
        }
    }
}

impl From<i32> for Mode {
    fn from(selector: i32) -> Self {
        Mode::from_selector(selector)
    }
}

#[derive(Debug, Clone)]
pub struct DispatchOptions {
    pub stream_pace: Duration,
}

impl From<&ClientConfig> for DispatchOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            stream_pace: config.stream_pace,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(User),
    Listed(Vec<User>),
    Streamed(StreamSummary),
}

impl From<NewUser> for AddUserRequest {
    fn from(user: NewUser) -> Self {
        AddUserRequest {
            name: user.name,
            hobbies: user.hobbies,
        }
    }
}

/// Runs the single operation selected by `mode`, then closes `api`.
///
/// Blocking modes close gracefully whether or not the call succeeded, and
/// fail with [`ClientError::Cancelled`] if `cancel` fires first. The
/// streaming mode closes immediately once the stream ends, fails or is
/// cancelled; its errors are logged and reported in the summary instead of
/// being returned.
pub async fn dispatch<A: UserApi>(
    mut api: A,
    mode: Mode,
    options: &DispatchOptions,
    cancel: &CancellationToken,
) -> Result<Outcome, ClientError> {
    match mode {
        Mode::AddUser => {
            let result = add_user(&mut api, cancel).await;
            api.close(Shutdown::Graceful);
            result.map(Outcome::Added)
        }
        Mode::StreamAll => {
            let summary = stream_all(&mut api, options.stream_pace, cancel).await;
            api.close(Shutdown::Immediate);
            Ok(Outcome::Streamed(summary))
        }
        Mode::ListAll => {
            let result = list_all(&mut api, cancel).await;
            api.close(Shutdown::Graceful);
            result.map(Outcome::Listed)
        }
    }
}

async fn add_user<A: UserApi>(
    api: &mut A,
    cancel: &CancellationToken,
) -> Result<User, ClientError> {
    let request = AddUserRequest::from(random_new_user());

    let user = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ClientError::Cancelled),
        user = api.add_user(request) => user?,
    };
    info!("User added successfully ");
    info!("User Info : \n{:?}", user);

    Ok(user)
}

async fn list_all<A: UserApi>(
    api: &mut A,
    cancel: &CancellationToken,
) -> Result<Vec<User>, ClientError> {
    let users = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(ClientError::Cancelled),
        users = api.get_all_users() => users?,
    };
    info!("User getting successfully ");
    info!("User Info List : \n{:?}", users);

    Ok(users)
}

async fn stream_all<A: UserApi>(
    api: &mut A,
    pace: Duration,
    cancel: &CancellationToken,
) -> StreamSummary {
    info!("Client getAllUserWithStream ");

    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Stream cancelled before it opened");
            return StreamSummary {
                users: Vec::new(),
                ending: StreamEnding::Cancelled,
            };
        }
        opened = api.get_all_users_stream() => opened,
    };

    match opened {
        Ok(stream) => consume_stream(stream, pace, cancel).await,
        Err(err) => {
            warn!("{}", err);
            StreamSummary::failed(&err)
        }
    }
}
