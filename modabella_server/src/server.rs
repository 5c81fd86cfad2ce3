use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use brevo_tools::BrevoApi;
use mercado_tools::MercadoPagoApi;
use modabella_engine::{CheckoutApi, OrderFlowApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::{BrevoMailer, MercadoPagoGateway},
    routes::{health, CheckoutRoute, PaymentWebhookRoute},
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let gateway = MercadoPagoGateway::new(
        MercadoPagoApi::new(config.mercado_pago.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let mailer = BrevoMailer::new(
        BrevoApi::new(config.brevo.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?,
    );
    let host = config.host.clone();
    let port = config.port;
    let srv = HttpServer::new(move || {
        let checkout_api = CheckoutApi::new(db.clone(), gateway.clone(), config.checkout.clone());
        let flow_api = OrderFlowApi::new(db.clone(), gateway.clone(), mailer.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mb::access_log"))
            .app_data(web::Data::new(checkout_api))
            .app_data(web::Data::new(flow_api))
            .service(health)
            .service(CheckoutRoute::<SqliteDatabase, MercadoPagoGateway>::new())
            .service(PaymentWebhookRoute::<SqliteDatabase, MercadoPagoGateway, BrevoMailer>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((host.as_str(), port))?
    .run();
    Ok(srv)
}
