use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::config::mongo_conf::MongoConfig;

/// Shared database handle, built once at startup and injected into each
/// repository. Collections hand out cheap clones of the underlying client.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("KefkoBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        if let (Some(ref username), Some(ref password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        info!("Connected to MongoDB database: {}", config.database);
        Ok(MongoStore { db })
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }
}
