use futures::StreamExt;
use log::{debug, info};
use tonic::transport::{Channel, Endpoint};

use common::ClientConfig;

use crate::api::{Shutdown, UserApi, UserStream};
use crate::error::ClientError;
use crate::user::user_service_client::UserServiceClient;
use crate::user::{AddUserRequest, GetAllUserRequest, User};

/// A plaintext gRPC connection to the user service.
pub struct GrpcUserApi {
    client: UserServiceClient<Channel>,
    addr: String,
}

impl GrpcUserApi {
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let endpoint = Endpoint::from_shared(config.addr.clone())
            .map_err(|_| ClientError::InvalidUri(config.addr.clone()))?;

        let channel = endpoint.connect().await?;
        info!("Connected to user service at {}", config.addr);

        Ok(Self {
            client: UserServiceClient::new(channel),
            addr: config.addr.clone(),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }
}

#[tonic::async_trait]
impl UserApi for GrpcUserApi {
    async fn add_user(&mut self, request: AddUserRequest) -> Result<User, ClientError> {
        let response = self
            .client
            .add_user(tonic::Request::new(request))
            .await?
            .into_inner();

        response.user.ok_or(ClientError::MissingUser)
    }

    async fn get_all_users(&mut self) -> Result<Vec<User>, ClientError> {
        let response = self
            .client
            .get_all_user(tonic::Request::new(GetAllUserRequest {}))
            .await?
            .into_inner();

        Ok(response.users)
    }

    async fn get_all_users_stream(&mut self) -> Result<UserStream, ClientError> {
        let stream = self
            .client
            .get_all_user_with_stream(tonic::Request::new(GetAllUserRequest {}))
            .await?
            .into_inner();

        Ok(stream
            .map(|item| {
                item.map_err(ClientError::from)
                    .and_then(|response| response.user.ok_or(ClientError::MissingUser))
            })
            .boxed())
    }

    fn close(self, shutdown: Shutdown) {
        match shutdown {
            Shutdown::Graceful => debug!("Closing channel to {}", self.addr),
            Shutdown::Immediate => debug!("Closing channel to {} immediately", self.addr),
        }
        // The channel's background connection task ends once the last
        // handle to it is dropped.
        drop(self.client);
    }
}
