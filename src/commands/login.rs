use std::task::{Context, Poll};

use tower::Service;
use tracing::{debug, info};

use crate::ports::{clock::ClockPort, database::DatabasePort};

use super::{summary, DomainLogic, Error, ServiceFuture, Summary};

pub struct LoginRequest {
    pub email: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoginResponse {
    Welcome(Summary),
    /// No club uses this email, or no email was given
    UnknownEmail,
}

impl<D, C> Service<LoginRequest> for DomainLogic<D, C>
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    type Response = LoginResponse;
    type Error = Error;
    type Future = ServiceFuture<Self::Response>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: LoginRequest) -> Self::Future {
        let database = self.database.clone();
        let clock = self.clock.clone();
        Box::pin(async move {
            let Some(email) = req.email.filter(|email| !email.is_empty()) else {
                debug!("Login attempt without email");
                return Ok(LoginResponse::UnknownEmail);
            };

            let Some(club) = database.find_club_by_email(&email).await? else {
                debug!(%email, "Login attempt with unknown email");
                return Ok(LoginResponse::UnknownEmail);
            };

            info!(club = %club.name, "Club logged in");
            Ok(LoginResponse::Welcome(
                summary(database.as_ref(), clock.as_ref(), club).await?,
            ))
        })
    }
}
