use clap::Parser;
use dotenv::dotenv;
use log::{error, warn};
use tokio_util::sync::CancellationToken;

use common::ClientConfig;
use user_client::{dispatch, ClientError, DispatchOptions, GrpcUserApi, Mode};

/// Calls the user service once and logs the result.
#[derive(Parser, Debug)]
struct Cli {
    /// 0 adds a random user, 1 streams all users, anything else lists all users
    #[arg(allow_negative_numbers = true)]
    mode: i32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Err(e) = run(cli).await {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let config = ClientConfig::from_env()?;
    let mode = Mode::from_selector(cli.mode);

    let api = GrpcUserApi::connect(&config).await?;

    // Every mode observes the token, so Ctrl-C always ends the call.
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            interrupt.cancel();
        }
    });

    dispatch(api, mode, &DispatchOptions::from(&config), &cancel).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_any_integer_selector() {
        assert_eq!(Cli::try_parse_from(["user-client", "0"]).unwrap().mode, 0);
        assert_eq!(Cli::try_parse_from(["user-client", "1"]).unwrap().mode, 1);
        assert_eq!(Cli::try_parse_from(["user-client", "-3"]).unwrap().mode, -3);
    }

    #[test]
    fn rejects_malformed_or_missing_selector() {
        assert!(Cli::try_parse_from(["user-client", "abc"]).is_err());
        assert!(Cli::try_parse_from(["user-client", "1.5"]).is_err());
        assert!(Cli::try_parse_from(["user-client"]).is_err());
        assert!(Cli::try_parse_from(["user-client", "1", "2"]).is_err());
    }
}
