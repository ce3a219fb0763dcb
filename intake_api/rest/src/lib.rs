use std::net::SocketAddr;

use axum::Router;
use intake_core_contact_contracts::ContactFeatureService;
use intake_core_lead_contracts::LeadFeatureService;
use intake_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact, Lead> {
    config: RestServerConfig,
    contact: Contact,
    lead: Lead,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
}

impl<Contact, Lead> RestServer<Contact, Lead>
where
    Contact: ContactFeatureService,
    Lead: LeadFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact, lead: Lead) -> Self {
        Self {
            config,
            contact,
            lead,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Starting REST API server");
        axum::serve(listener, router).await.map_err(Into::into)
    }

    pub fn router(self) -> Router<()> {
        let router = Router::new()
            .merge(routes::contact::router(self.contact.into()))
            .merge(routes::lead::router(self.lead.into()));

        // layers added last run first
        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        middlewares::request_id::add(router)
    }
}
