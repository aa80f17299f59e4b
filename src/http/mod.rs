//! Server-rendered pages
//!
//! Every outcome of a command maps to one page, one status code and at most one flash message.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    commands::DomainLogic,
    ports::{clock::ClockPort, database::DatabasePort},
};

pub mod error;
pub mod handlers;
pub mod templates;

use handlers::{board, book, index, logout, lost_connection, purchase_places, show_summary};
use templates::Templates;

pub struct AppState<D, C> {
    pub domain: DomainLogic<D, C>,
    pub templates: Arc<Templates>,
}

impl<D, C> AppState<D, C> {
    pub fn new(domain: DomainLogic<D, C>, templates: Templates) -> Self {
        Self {
            domain,
            templates: Arc::new(templates),
        }
    }
}

impl<D, C> Clone for AppState<D, C> {
    fn clone(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            templates: self.templates.clone(),
        }
    }
}

pub fn router<D, C>(state: AppState<D, C>) -> Router
where
    D: DatabasePort + Send + Sync + 'static,
    C: ClockPort + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index::<D, C>))
        .route("/showSummary", post(show_summary::<D, C>))
        .route("/book", get(lost_connection))
        .route("/book/:competition", get(lost_connection))
        .route("/book/:competition/:club", get(book::<D, C>))
        .route("/purchasePlaces", post(purchase_places::<D, C>))
        .route("/board", get(board::<D, C>))
        .route("/logout", get(logout))
        .with_state(state)
}
