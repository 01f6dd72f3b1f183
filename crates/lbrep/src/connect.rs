//! Keystone-backed connector.
//!
//! Authenticates on first use and shares the token between the Neutron and
//! Octavia clients. Missing credentials only surface if a run actually needs
//! to connect.

use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use url::Url;

use lbrep_api::keystone::{self, Session};
use lbrep_api::{Credentials, NeutronClient, OctaviaClient, Service};
use lbrep_core::{Connector, CoreError};

use crate::cli::AuthOpts;
use crate::config::Settings;

pub struct SessionConnector<'a> {
    auth: &'a AuthOpts,
    settings: &'a Settings,
    session: OnceCell<Session>,
}

impl<'a> SessionConnector<'a> {
    pub fn new(auth: &'a AuthOpts, settings: &'a Settings) -> Self {
        Self {
            auth,
            settings,
            session: OnceCell::new(),
        }
    }

    fn credentials(&self) -> Result<Credentials, CoreError> {
        fn required<'v>(
            value: Option<&'v String>,
            name: &'static str,
            env: &'static str,
        ) -> Result<&'v str, CoreError> {
            value
                .map(String::as_str)
                .filter(|v| !v.is_empty())
                .ok_or(CoreError::MissingCredential { name, env })
        }

        let auth_url = required(self.auth.auth_url.as_ref(), "--auth-url", "OS_AUTH_URL")?;
        let auth_url = Url::parse(auth_url).map_err(|e| CoreError::Config {
            message: format!("invalid auth URL '{auth_url}': {e}"),
        })?;

        Ok(Credentials {
            auth_url,
            username: required(self.auth.username.as_ref(), "--username", "OS_USERNAME")?.to_owned(),
            password: SecretString::from(
                required(self.auth.password.as_ref(), "--password", "OS_PASSWORD")?.to_owned(),
            ),
            project_name: required(self.auth.project_name.as_ref(), "--project-name", "OS_PROJECT_NAME")?
                .to_owned(),
            user_domain_name: self.auth.user_domain_name.clone(),
            project_domain_name: self.auth.project_domain_name.clone(),
        })
    }

    async fn session(&self) -> Result<&Session, CoreError> {
        self.session
            .get_or_try_init(|| async {
                let credentials = self.credentials()?;
                info!(auth_url = %credentials.auth_url, project = %credentials.project_name, "authenticating");
                let session = keystone::authenticate(&credentials, &self.settings.transport).await?;
                debug!(project_id = session.project_id().unwrap_or("<unreported>"), "token scoped");
                Ok::<_, CoreError>(session)
            })
            .await
    }

    async fn endpoint(&self, service: Service) -> Result<(Url, &Session), CoreError> {
        let session = self.session().await?;
        let url = session.endpoint(service, self.settings.interface, self.settings.region.as_deref())?;
        debug!(service = service.catalog_type(), %url, "using endpoint");
        Ok((url, session))
    }
}

impl Connector for SessionConnector<'_> {
    type Source = NeutronClient;
    type Target = OctaviaClient;

    async fn source(&self) -> Result<NeutronClient, CoreError> {
        let (url, session) = self.endpoint(Service::Network).await?;
        Ok(NeutronClient::new(&url, session.token(), &self.settings.transport)?)
    }

    async fn target(&self) -> Result<OctaviaClient, CoreError> {
        let (url, session) = self.endpoint(Service::LoadBalancer).await?;
        Ok(OctaviaClient::new(&url, session.token(), &self.settings.transport)?)
    }
}
