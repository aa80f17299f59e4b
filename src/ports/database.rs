use crate::domain::{
    booking::{BookingEvent, Rejection},
    Club, Competition,
};

#[mockall::automock]
#[async_trait::async_trait]
pub trait DatabasePort {
    async fn find_club_by_email(&self, email: &str) -> Result<Option<Club>, Error>;
    async fn find_club_by_name(&self, name: &str) -> Result<Option<Club>, Error>;
    async fn find_competition(&self, name: &str) -> Result<Option<Competition>, Error>;
    async fn list_clubs(&self) -> Result<Vec<Club>, Error>;
    async fn list_competitions(&self) -> Result<Vec<Competition>, Error>;
    /// Places already bought by a club for a competition
    async fn booked_places(&self, competition_name: &str, club_name: &str) -> Result<u32, Error>;
    /// Buy `places` for a club, enforcing `max_allowed` places per club for this competition
    ///
    /// Either every check passes and both balances and the ledger are updated together, or
    /// nothing changes.
    async fn register_booking(
        &self,
        competition_name: &str,
        club_name: &str,
        places: u32,
        max_allowed: u32,
    ) -> Result<Booking, Error>;
}

/// State after a successful booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Booking {
    pub club: Club,
    pub competition: Competition,
    pub event: BookingEvent,
    /// Places bought by this club for this competition, this booking included
    pub total_booked: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level refusal of a booking
    ///
    /// Nothing was changed in the database.
    #[error("booking rejected: {0}")]
    Rejected(#[from] Rejection),

    #[error("club {0:?} does not exist")]
    ClubNotFound(String),

    #[error("competition {0:?} does not exist")]
    CompetitionNotFound(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
