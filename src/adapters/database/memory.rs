use crate::{
    adapters::database::lookup::{find, IndexCache},
    domain::{
        booking::{apply_booking, check_booking, LedgerEntry},
        Club, Competition,
    },
    ports::database::{Booking, DatabasePort, Error},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::debug;

/// In-memory store for clubs, competitions and the booking ledger
///
/// Clones share the same underlying data.
#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    store: Arc<Mutex<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    clubs: Vec<Club>,
    competitions: Vec<Competition>,
    /// Places bought, keyed by (competition name, club name)
    ledger: HashMap<(String, String), LedgerEntry>,
    clubs_by_email: IndexCache,
    clubs_by_name: IndexCache,
    competitions_by_name: IndexCache,
}

impl Store {
    fn club_by_email(&mut self, email: &str) -> Option<usize> {
        find(email, &self.clubs, &mut self.clubs_by_email, |club| {
            club.email.as_str()
        })
    }

    fn club_by_name(&mut self, name: &str) -> Option<usize> {
        find(name, &self.clubs, &mut self.clubs_by_name, |club| {
            club.name.as_str()
        })
    }

    fn competition_by_name(&mut self, name: &str) -> Option<usize> {
        find(
            name,
            &self.competitions,
            &mut self.competitions_by_name,
            |competition| competition.name.as_str(),
        )
    }

    fn booked(&self, competition_name: &str, club_name: &str) -> u32 {
        self.ledger
            .get(&(competition_name.to_string(), club_name.to_string()))
            .map_or(0, |entry| entry.total)
    }
}

impl MemoryDatabase {
    pub fn new(clubs: Vec<Club>, competitions: Vec<Competition>) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store {
                clubs,
                competitions,
                ..Store::default()
            })),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, Error> {
        Ok(self.store.lock()?)
    }
}

#[async_trait::async_trait]
impl DatabasePort for MemoryDatabase {
    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error> {
        let mut store = self.lock()?;
        Ok(store
            .club_by_email(email)
            .and_then(|index| store.clubs.get(index))
            .cloned())
    }

    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error> {
        let mut store = self.lock()?;
        Ok(store
            .club_by_name(name)
            .and_then(|index| store.clubs.get(index))
            .cloned())
    }

    async fn find_competition(&self, name: &str) -> Result<Option<Competition>, Error> {
        let mut store = self.lock()?;
        Ok(store
            .competition_by_name(name)
            .and_then(|index| store.competitions.get(index))
            .cloned())
    }

    async fn list_clubs(&self) -> Result<Vec<Club>, Error> {
        Ok(self.lock()?.clubs.clone())
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, Error> {
        Ok(self.lock()?.competitions.clone())
    }

    async fn booked_places(&self, competition_name: &str, club_name: &str) -> Result<u32, Error> {
        Ok(self.lock()?.booked(competition_name, club_name))
    }

    async fn register_booking(
        &self,
        competition_name: &str,
        club_name: &str,
        places: u32,
        max_allowed: u32,
    ) -> Result<Booking, Error> {
        let mut store = self.lock()?;
        let club_index = store
            .club_by_name(club_name)
            .ok_or_else(|| Error::ClubNotFound(club_name.to_string()))?;
        let competition_index = store
            .competition_by_name(competition_name)
            .ok_or_else(|| Error::CompetitionNotFound(competition_name.to_string()))?;

        let store = &mut *store;
        let (Some(club), Some(competition)) = (
            store.clubs.get_mut(club_index),
            store.competitions.get_mut(competition_index),
        ) else {
            return Err(Error::Adapter(
                "lookup cache points outside of the collection".into(),
            ));
        };

        let key = (competition.name.clone(), club.name.clone());
        let already_booked = store.ledger.get(&key).map_or(0, |entry| entry.total);
        // Return an error if the request breaks the quota or either balance
        check_booking(places, club, competition, max_allowed, already_booked)?;

        let granted = apply_booking(places.into(), club, competition, max_allowed);
        let entry = store.ledger.entry(key).or_default();
        let event = entry.record(granted).clone();
        debug!(
            booking_id = %event.booking_id,
            total = entry.total,
            "Recorded {granted} places for {club_name} in {competition_name}"
        );

        Ok(Booking {
            club: club.clone(),
            competition: competition.clone(),
            event,
            total_booked: entry.total,
        })
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
