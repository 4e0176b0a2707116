//! Console listing page for the notice board.

use dotenvy::dotenv;

use notice_board::models::config::ClientConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let client_config = match ClientConfig::load() {
        Ok(client_config) => client_config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = notice_board::run(client_config).await {
        log::error!("Notice listing stopped: {err}");
        std::process::exit(1);
    }
}
