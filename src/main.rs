use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

use employee_rds::config::Config;
use employee_rds::handlers::fallback::route_not_found;
use employee_rds::routes;
use employee_rds::utils::secrets::AwsSecretSource;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Starting employee service");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    let secrets = AwsSecretSource::from_env().await;
    let state = match employee_rds::bootstrap(&config, &secrets).await {
        Ok(state) => state,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };

    info!("Starting server at {}", config.bind_address);

    let state = web::Data::new(state);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
            .default_service(web::to(route_not_found))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
