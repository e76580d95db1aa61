use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use tasktrack::{
    auth::{AuthService, BcryptHasher, JwtKeys, JwtStrategy, UserRepository},
    config::Config,
    db::{self, PgTaskStore, PgUserStore},
    routes,
    tasks::{TaskRepository, TasksService},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let pool = db::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| {
            log::error!("Failed to connect to database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    let keys = Arc::new(JwtKeys::from_config(&config));
    let users = UserRepository::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(BcryptHasher::new(config.bcrypt_cost)),
    );
    let tasks = TasksService::new(TaskRepository::new(Arc::new(PgTaskStore::new(pool))));

    let auth_service = web::Data::new(AuthService::new(users.clone(), keys.clone()));
    let strategy = web::Data::new(JwtStrategy::new(users));
    let tasks_service = web::Data::new(tasks);
    let jwt_keys = web::Data::from(keys);

    log::info!("Starting server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(auth_service.clone())
            .app_data(strategy.clone())
            .app_data(tasks_service.clone())
            .app_data(jwt_keys.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
