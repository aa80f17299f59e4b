use std::{future::Future, pin::Pin, sync::Arc};

use serde::Serialize;

use crate::{
    domain::{split_by_date, Club, Competition},
    ports::{clock::ClockPort, database::DatabasePort},
};

pub mod board;
pub mod login;
pub mod purchase_places;
pub mod view_booking;

pub type ServiceFuture<T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send>>;

pub struct DomainLogic<D, C> {
    database: Arc<D>,
    clock: Arc<C>,
    /// Places a club may buy for a single competition
    max_places_per_club: u32,
}

impl<D, C> DomainLogic<D, C> {
    pub fn new(database: D, clock: C, max_places_per_club: u32) -> Self {
        Self {
            database: Arc::new(database),
            clock: Arc::new(clock),
            max_places_per_club,
        }
    }
}

impl<D, C> Clone for DomainLogic<D, C> {
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            clock: self.clock.clone(),
            max_places_per_club: self.max_places_per_club,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("database port error: {0:?}")]
    Database(#[from] crate::ports::database::Error),
}

/// What a logged-in club sees on its welcome page
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub club: Club,
    pub past_competitions: Vec<Competition>,
    pub future_competitions: Vec<Competition>,
}

async fn summary<D, C>(database: &D, clock: &C, club: Club) -> Result<Summary, Error>
where
    D: DatabasePort + ?Sized,
    C: ClockPort + ?Sized,
{
    let competitions = database.list_competitions().await?;
    let (past_competitions, future_competitions) = split_by_date(competitions, clock.now());

    Ok(Summary {
        club,
        past_competitions,
        future_competitions,
    })
}
