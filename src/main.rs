use std::io;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::Config;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tera::Tera;

use pushkind_news::db::establish_connection_pool;
use pushkind_news::models::config::ServerConfig;
use pushkind_news::repository::DieselRepository;
use pushkind_news::routes::configure;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    Config::builder()
        .set_default("address", "127.0.0.1")?
        .set_default("port", 8080)?
        .set_default("database_url", "app.db")?
        .set_default("templates_dir", "templates/**/*")?
        .set_default("assets_dir", "assets")?
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name("config/local").required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize()
}

/// Cookie signing key; falls back to a per-process key when the configured
/// one is unusable, which invalidates pending flash messages on restart.
fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::warn!("Configured secret_key is unusable ({e}), generating a random one");
            Key::generate()
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = load_config().map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        log::error!("Failed to establish database connection pool: {e}");
        io::Error::other(e)
    })?;

    {
        let mut conn = pool.get().map_err(|e| {
            log::error!("Failed to get database connection: {e}");
            io::Error::other(e)
        })?;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("Failed to run migrations: {e}");
            io::Error::other(e.to_string())
        })?;
        if !applied.is_empty() {
            log::info!("Applied {} migration(s)", applied.len());
        }
    }

    let tera = Tera::new(&server_config.templates_dir).map_err(|e| {
        log::error!("Failed to parse templates: {e}");
        io::Error::other(e)
    })?;

    let message_store = CookieMessageStore::builder(signing_key(&server_config.secret_key)).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let repo = DieselRepository::new(pool);
    let bind_address = (server_config.address.clone(), server_config.port);
    let assets_dir = server_config.assets_dir.clone();

    log::info!("Starting server on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .service(Files::new("/assets", &assets_dir))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
